use sqlx::SqlitePool;
use time::{Date, Duration};

use habitloop_shared::{StatsSnapshot, format_date, parse_date};

use crate::repository;

/// Rolling window for the completion rate, in calendar days, inclusive of
/// today. Tunable; everything else derives from it.
pub const COMPLETION_WINDOW_DAYS: i64 = 31;

#[derive(Clone)]
pub struct StatsQuery(pub SqlitePool);

impl StatsQuery {
    /// Computes the full snapshot in one pass. Read-only; `today` anchors
    /// the rolling window so callers (and tests) control the clock.
    #[tracing::instrument(skip(self))]
    pub async fn compute(
        &self,
        user_id: &str,
        today: Date,
    ) -> habitloop_shared::Result<StatsSnapshot> {
        let total_habits = repository::count_habits(&self.0, user_id).await?;
        let total_records = repository::count_records(&self.0, user_id).await?;

        let window_start = today - Duration::days(COMPLETION_WINDOW_DAYS - 1);
        let completed_records = repository::count_completed_between(
            &self.0,
            user_id,
            &format_date(window_start),
            &format_date(today),
        )
        .await?;

        let consecutive_days = self.max_consecutive_days(user_id).await?;

        Ok(StatsSnapshot {
            total_habits: total_habits.max(0) as u32,
            total_records: total_records.max(0) as u64,
            completed_records: completed_records.max(0) as u64,
            consecutive_days,
            completion_rate: completion_rate(total_habits, completed_records),
        })
    }

    /// Longest run of calendar-consecutive completed days for any single
    /// habit. Streaks are per habit; unrelated habits completed on adjacent
    /// days never chain into one run.
    pub async fn max_consecutive_days(&self, user_id: &str) -> habitloop_shared::Result<u32> {
        let rows = repository::completed_dates(&self.0, user_id).await?;

        let mut max = 0;
        let mut current_habit: Option<String> = None;
        let mut dates: Vec<Date> = Vec::new();

        for (habit_id, recorded_at) in rows {
            if current_habit.as_deref() != Some(habit_id.as_str()) {
                max = max.max(longest_run(&dates));
                dates.clear();
                current_habit = Some(habit_id);
            }
            dates.push(parse_date(&recorded_at)?);
        }

        Ok(max.max(longest_run(&dates)))
    }
}

/// Longest run of consecutive days in an ascending, deduplicated date list.
/// One date counts as a streak of 1.
fn longest_run(dates: &[Date]) -> u32 {
    if dates.is_empty() {
        return 0;
    }

    let mut max_streak = 1;
    let mut current_streak = 1;

    for pair in dates.windows(2) {
        if pair[1].to_julian_day() - pair[0].to_julian_day() == 1 {
            current_streak += 1;
            max_streak = max_streak.max(current_streak);
        } else {
            current_streak = 1;
        }
    }

    max_streak
}

fn completion_rate(total_habits: i64, completed_records: i64) -> f64 {
    if total_habits <= 0 {
        return 0.0;
    }

    let possible = (total_habits * COMPLETION_WINDOW_DAYS) as f64;
    let rate = completed_records as f64 / possible * 100.0;

    (rate * 10.0).round() / 10.0
}
