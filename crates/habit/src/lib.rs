mod command;
mod query;
pub(crate) mod repository;
pub mod stats;

pub use command::*;
pub use query::*;
pub use stats::{COMPLETION_WINDOW_DAYS, StatsQuery};
