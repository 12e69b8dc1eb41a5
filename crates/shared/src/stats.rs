/// Derived metrics for one user at a point in time. Computed fresh for each
/// badge check, never persisted or cached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsSnapshot {
    /// Habits the user currently tracks.
    pub total_habits: u32,
    /// All-time completion records, completed or not.
    pub total_records: u64,
    /// Completed records inside the rolling completion window.
    pub completed_records: u64,
    /// Longest run of calendar-consecutive completed days for any single
    /// habit. Streaks never span habits.
    pub consecutive_days: u32,
    /// 0.0 to 100.0, rounded to one decimal. 0.0 when the user has no habits.
    pub completion_rate: f64,
}
