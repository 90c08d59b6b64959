mod common;

use tempfile::tempdir;
use widecopy::commands::{check_command, list_providers_command, sizes_command, AnalysisArgs};
use widecopy::resolve_graph_path;
use widecopy_core::config::SizeConfig;

use common::{write_fixture, CLEAN_JSON, SHAPES_JSON, SHAPES_LINE};

#[test]
fn size_config_defaults_without_file_or_flags() {
    let args = AnalysisArgs::new("graph.json");
    assert_eq!(args.size_config().unwrap(), SizeConfig::default());
}

#[test]
fn size_config_flags_override_config_file() {
    let dir = tempdir().unwrap();
    let file = write_fixture(dir.path(), "widecopy.yaml", "max_width: 64\nword_size: 4\n");

    let mut args = AnalysisArgs::new("graph.json");
    args.config = Some(file.display().to_string());
    args.word_size = Some(8);
    assert_eq!(args.size_config().unwrap(), SizeConfig::new(64, 8, 8));
}

#[test]
fn size_config_rejects_zero_values() {
    let mut args = AnalysisArgs::new("graph.json");
    args.max_align = Some(0);
    let err = args.size_config().unwrap_err();
    assert!(format!("{err:#}").contains("max_align"));
}

#[test]
fn size_config_reports_unreadable_files() {
    let mut args = AnalysisArgs::new("graph.json");
    args.config = Some("/no/such/widecopy.yaml".into());
    let err = args.size_config().unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn check_command_returns_sorted_report() {
    let dir = tempdir().unwrap();
    let graph = write_fixture(dir.path(), "shapes.json", SHAPES_JSON);

    let report = check_command(&AnalysisArgs::new(graph.display().to_string()), false).unwrap();
    assert!(report.has_findings());
    assert_eq!(report.lines(), vec![SHAPES_LINE.to_string()]);
}

#[test]
fn check_command_on_clean_graph_has_no_findings() {
    let dir = tempdir().unwrap();
    let graph = write_fixture(dir.path(), "clean.json", CLEAN_JSON);

    let report = check_command(&AnalysisArgs::new(graph.display().to_string()), true).unwrap();
    assert!(!report.has_findings());
    assert_eq!(report.units_checked, 1);
}

#[test]
fn check_command_uses_named_provider() {
    let dir = tempdir().unwrap();
    // JSON is valid YAML, so the yaml provider reads it as well.
    let graph = write_fixture(dir.path(), "shapes.graph", SHAPES_JSON);

    let mut args = AnalysisArgs::new(graph.display().to_string());
    args.format = Some("yaml".into());
    let report = check_command(&args, false).unwrap();
    assert_eq!(report.diagnostics.len(), 1);

    args.format = Some("toml".into());
    let err = check_command(&args, false).unwrap_err();
    assert!(err.to_string().contains("Unknown provider"));
}

#[test]
fn sizes_command_returns_rows_in_document_order() {
    let dir = tempdir().unwrap();
    let graph = write_fixture(dir.path(), "shapes.json", SHAPES_JSON);

    let mut args = AnalysisArgs::new(graph.display().to_string());
    args.word_size = Some(4);
    args.max_align = Some(4);
    let rows = sizes_command(&args, false).unwrap();
    let summary: Vec<(String, u64, u64, bool)> =
        rows.into_iter().map(|r| (r.id.to_string(), r.size, r.align, r.wide)).collect();
    assert_eq!(
        summary,
        vec![("shapes.Big".to_string(), 16, 4, false), ("shapes.Bigger".to_string(), 24, 4, true)]
    );
}

#[test]
fn list_providers_returns_registered_names() {
    let providers = list_providers_command(true).unwrap();
    let names: Vec<&str> = providers.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["json", "yaml"]);
}

#[test]
fn resolve_graph_path_rejects_missing_files() {
    let err = resolve_graph_path("/no/such/graph.json").unwrap_err();
    assert!(err.to_string().contains("Type graph does not exist"));
}
