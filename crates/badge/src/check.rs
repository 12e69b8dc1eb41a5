use std::time::Instant;

use sqlx::SqlitePool;
use time::OffsetDateTime;

use habitloop_habit::StatsQuery;
use habitloop_shared::StatsSnapshot;

use crate::{
    ledger::{AwardOutcome, Ledger},
    notification::PendingNotification,
    repository,
};

/// Cap on how many not-yet-earned badges one check evaluates, so catalog
/// growth cannot stretch the synchronous path.
pub const CANDIDATE_LIMIT: u64 = 20;

/// Everything one badge check produced. `errors` holds per-badge failures;
/// the stats snapshot is handed back for the notification layer to show
/// progress toward the next badge.
#[derive(Debug, Default)]
pub struct CheckOutcome {
    pub newly_earned: Vec<EarnedBadge>,
    pub errors: Vec<String>,
    pub stats: StatsSnapshot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EarnedBadge {
    pub id: String,
    pub name: String,
}

impl CheckOutcome {
    pub fn pending_notification(&self) -> Option<PendingNotification> {
        if self.newly_earned.is_empty() {
            return None;
        }

        let mut notification = PendingNotification::default();
        notification.merge(&self.newly_earned);

        Some(notification)
    }
}

/// The award orchestrator. Called synchronously after a record mutation,
/// habit creation or registration; it must never fail the action that
/// triggered it, so every error ends up inside the outcome.
#[derive(Clone)]
pub struct BadgeCheck {
    pool: SqlitePool,
}

impl BadgeCheck {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self))]
    pub async fn evaluate_and_award(&self, user_id: &str) -> CheckOutcome {
        let started = Instant::now();
        let mut outcome = CheckOutcome::default();

        if let Err(err) = self.run(user_id, &mut outcome).await {
            tracing::error!(user_id, %err, "badge check failed");
            outcome.errors.push(format!("Badge check failed: {err}"));
        }

        tracing::info!(
            user_id,
            awarded = outcome.newly_earned.len(),
            errors = outcome.errors.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "badge check completed"
        );

        outcome
    }

    async fn run(
        &self,
        user_id: &str,
        outcome: &mut CheckOutcome,
    ) -> habitloop_shared::Result<()> {
        let earned = repository::earned_badge_ids(&self.pool, user_id).await?;
        tracing::debug!(user_id, existing = earned.len(), "loaded earned badges");

        let candidates = repository::list_candidates(&self.pool, &earned, CANDIDATE_LIMIT).await?;
        tracing::debug!(user_id, candidates = candidates.len(), "loaded candidates");

        // One snapshot for the whole candidate set; it is never recomputed
        // per badge.
        let today = OffsetDateTime::now_utc().date();
        outcome.stats = StatsQuery(self.pool.clone()).compute(user_id, today).await?;

        let ledger = Ledger(self.pool.clone());
        for badge in candidates {
            let check_started = Instant::now();

            if badge.earned_by_stats(&outcome.stats) {
                match ledger.try_award(user_id, &badge.id).await {
                    Ok(AwardOutcome::Fresh(_)) => {
                        tracing::info!(user_id, badge = %badge.name, "badge awarded");
                        outcome.newly_earned.push(EarnedBadge {
                            id: badge.id.clone(),
                            name: badge.name.clone(),
                        });
                    }
                    Ok(AwardOutcome::AlreadyAwarded) => {
                        tracing::debug!(user_id, badge = %badge.name, "badge already awarded");
                    }
                    Err(err) => {
                        // One badge's failure never aborts the rest.
                        tracing::error!(user_id, badge = %badge.name, %err, "award failed");
                        outcome
                            .errors
                            .push(format!("Failed to award badge '{}': {err}", badge.name));
                    }
                }
            }

            let elapsed_ms = check_started.elapsed().as_millis() as u64;
            if elapsed_ms > 100 {
                tracing::warn!(badge = %badge.name, elapsed_ms, "slow badge check");
            }
        }

        Ok(())
    }
}
