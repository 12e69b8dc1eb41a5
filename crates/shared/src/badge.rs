use serde::Deserialize;
use strum::{AsRefStr, Display, EnumString};

/// The metric a badge condition is checked against.
///
/// `Unknown` absorbs condition types from an older catalog so a stale row
/// decodes instead of poisoning the whole read; it never matches any stats.
#[derive(EnumString, Display, AsRefStr, Clone, Debug, PartialEq, Deserialize)]
#[strum(serialize_all = "snake_case")]
pub enum ConditionType {
    TotalHabits,
    TotalRecords,
    ConsecutiveDays,
    CompletionRate,
    #[strum(default)]
    Unknown(String),
}

impl ConditionType {
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}
