use habitloop_shared::{StatsSnapshot, badge::ConditionType};

use crate::repository::BadgeRow;

impl BadgeRow {
    /// True when this badge's condition holds for the snapshot. Pure and
    /// total: thresholds are inclusive, unknown condition types never match.
    pub fn earned_by_stats(&self, stats: &StatsSnapshot) -> bool {
        earned(&self.condition_type.0, self.condition_value, stats)
    }
}

pub fn earned(condition_type: &ConditionType, threshold: f64, stats: &StatsSnapshot) -> bool {
    match condition_type {
        ConditionType::TotalHabits => stats.total_habits as f64 >= threshold,
        ConditionType::TotalRecords => stats.total_records as f64 >= threshold,
        ConditionType::ConsecutiveDays => stats.consecutive_days as f64 >= threshold,
        ConditionType::CompletionRate => stats.completion_rate >= threshold,
        ConditionType::Unknown(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> StatsSnapshot {
        StatsSnapshot {
            total_habits: 3,
            total_records: 42,
            completed_records: 20,
            consecutive_days: 7,
            completion_rate: 64.5,
        }
    }

    #[test]
    fn thresholds_are_inclusive() {
        let stats = stats();
        assert!(earned(&ConditionType::ConsecutiveDays, 7.0, &stats));
        assert!(!earned(&ConditionType::ConsecutiveDays, 8.0, &stats));
        assert!(earned(&ConditionType::TotalHabits, 3.0, &stats));
        assert!(earned(&ConditionType::TotalRecords, 42.0, &stats));
        assert!(!earned(&ConditionType::TotalRecords, 43.0, &stats));
    }

    #[test]
    fn completion_rate_compares_fractional_thresholds() {
        let stats = stats();
        assert!(earned(&ConditionType::CompletionRate, 64.5, &stats));
        assert!(!earned(&ConditionType::CompletionRate, 64.6, &stats));
    }

    #[test]
    fn unknown_condition_types_never_match() {
        assert!(!earned(
            &ConditionType::Unknown("weekly_average".to_owned()),
            0.0,
            &stats()
        ));
    }
}
