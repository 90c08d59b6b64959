pub mod check;
pub mod providers;
pub mod units;

pub use check::{check_graph, CheckError, CheckReport, Checker, TypeSize};
pub use providers::{
    default_provider_registry, GraphProvider, JsonGraphProvider, ProviderRegistry,
    YamlGraphProvider,
};
pub use units::UnitPattern;
