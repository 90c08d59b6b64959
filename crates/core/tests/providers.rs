use std::path::Path;

use tempfile::tempdir;
use widecopy_core::analysis::ResolutionError;
use widecopy_core::config::{ConfigError, SizeConfig};
use widecopy_core::model::{Builtin, Scalar, TypeRef};
use widecopy_core::services::{
    check_graph, default_provider_registry, CheckError, Checker, GraphProvider, JsonGraphProvider,
    YamlGraphProvider,
};

const SHAPES_JSON: &str = r#"{
  "units": [
    {
      "path": "shapes",
      "types": [
        { "id": "shapes.Big", "fields": [
          { "name": "a", "type": { "primitive": "int64" } },
          { "name": "b", "type": { "primitive": "int64" } },
          { "name": "c", "type": { "primitive": { "size": 8, "align": 8 } } }
        ] }
      ],
      "functions": [
        { "name": "Scale",
          "position": { "file": "shapes.go", "line": 4, "column": 1 },
          "receiver": { "pointer": { "named": "shapes.Big" } },
          "params": [ { "name": "by", "type": { "named": "shapes.Big" } } ] }
      ]
    }
  ]
}"#;

const SHAPES_YAML: &str = "\
units:
  - path: shapes
    types:
      - id: shapes.Big
        fields:
          - name: a
            type: { primitive: string }
          - name: b
            type: { primitive: int }
    functions:
      - name: Copy
        position: { file: shapes.go, line: 9, column: 1 }
        results:
          - type: { named: shapes.Big }
";

#[test]
fn json_provider_reads_graph_documents() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("graph.json");
    std::fs::write(&path, SHAPES_JSON).unwrap();

    let graph = JsonGraphProvider.resolve(&path).expect("resolve");
    let unit = &graph.units[0];
    assert_eq!(unit.types[0].fields[0].ty, TypeRef::builtin(Builtin::Int64));
    assert_eq!(
        unit.types[0].fields[2].ty,
        TypeRef::Primitive(Scalar::Opaque { size: 8, align: 8 })
    );
    assert_eq!(unit.functions[0].receiver, Some(TypeRef::pointer_to(TypeRef::named("shapes.Big"))));

    let report = check_graph(&graph, &SizeConfig::default()).unwrap();
    assert_eq!(
        report.lines(),
        vec!["shapes.go:4:1: parameter 'by' at index 0 should be made into a pointer \
              (func (*shapes.Big).Scale(by shapes.Big))"]
    );
}

#[test]
fn yaml_provider_reads_graph_documents() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("graph.yaml");
    std::fs::write(&path, SHAPES_YAML).unwrap();

    let graph = YamlGraphProvider.resolve(&path).expect("resolve");
    let report = check_graph(&graph, &SizeConfig::default()).unwrap();
    assert_eq!(
        report.lines(),
        vec!["shapes.go:9:1: return value 'shapes.Big' at index 0 should be made into a pointer \
              (func shapes.Copy() shapes.Big)"]
    );
}

#[test]
fn malformed_documents_are_resolution_failures() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, r#"{ "units": [ { "path": 3 } ] }"#).unwrap();
    let err = JsonGraphProvider.resolve(&path).unwrap_err();
    assert!(matches!(err, ResolutionError::Malformed { .. }));

    let unknown_builtin = dir.path().join("builtin.json");
    std::fs::write(
        &unknown_builtin,
        r#"{ "units": [ { "path": "p", "types": [ { "id": "p.T", "fields": [
            { "name": "x", "type": { "primitive": "int128" } } ] } ] } ] }"#,
    )
    .unwrap();
    let err = JsonGraphProvider.resolve(&unknown_builtin).unwrap_err();
    assert!(err.to_string().contains("int128"), "{err}");
}

#[test]
fn missing_documents_are_io_failures() {
    let err = JsonGraphProvider.resolve(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, ResolutionError::Io { .. }));
}

#[test]
fn registry_selects_by_name_or_extension() {
    let registry = default_provider_registry();
    assert_eq!(registry.names(), vec!["json", "yaml"]);
    assert_eq!(registry.select(None, Path::new("g.yml")).unwrap().name(), "yaml");
    assert_eq!(registry.select(None, Path::new("g.JSON")).unwrap().name(), "json");
    assert_eq!(registry.select(None, Path::new("g.graph")).unwrap().name(), "json");
    assert_eq!(registry.select(Some("yaml"), Path::new("g.json")).unwrap().name(), "yaml");

    let err = registry.select(Some("toml"), Path::new("g.toml")).err().unwrap();
    assert!(err.to_string().contains("json, yaml"));
}

#[test]
fn checker_reads_sources_through_a_provider() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("graph.json");
    std::fs::write(&path, SHAPES_JSON).unwrap();
    let config = SizeConfig::default();

    let report = Checker::new(&config).check_source(&JsonGraphProvider, &path).unwrap();
    assert_eq!(report.units_checked, 1);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].should_be, vec!["parameter 'by' at index 0".to_string()]);

    let rows = Checker::new(&config).sizes_source(&JsonGraphProvider, &path).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!((rows[0].id.as_str(), rows[0].size, rows[0].wide), ("shapes.Big", 24, true));
}

#[test]
fn checker_validates_config_before_reading_sources() {
    let config = SizeConfig::new(16, 0, 8);
    let missing = Path::new("/definitely/not/here.json");

    let err = Checker::new(&config).check_source(&JsonGraphProvider, missing).unwrap_err();
    assert!(matches!(err, CheckError::Config(ConfigError::NonPositive { field: "word_size", .. })));

    let err = Checker::new(&SizeConfig::default())
        .sizes_source(&JsonGraphProvider, missing)
        .unwrap_err();
    assert!(matches!(err, CheckError::Resolution(ResolutionError::Io { .. })));
}
