pub mod badge;
mod command;
mod date;
pub mod stats;

pub use command::*;
pub use date::*;
pub use stats::*;
