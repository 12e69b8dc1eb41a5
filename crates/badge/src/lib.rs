mod check;
mod command;
mod evaluator;
mod ledger;
mod notification;
mod query;
pub(crate) mod repository;

pub use check::*;
pub use command::*;
pub use ledger::*;
pub use notification::*;
pub use query::*;
pub use repository::BadgeRow;
