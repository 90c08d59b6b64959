pub mod check;
pub mod providers;
pub mod sizes;
pub mod util;

pub use check::*;
pub use providers::*;
pub use sizes::*;
pub use util::*;
