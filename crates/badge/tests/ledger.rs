use habitloop_badge::{AwardOutcome, Ledger};
use habitloop_shared::badge::ConditionType;
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn a_second_award_attempt_reports_already_awarded() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_pool(dir.child("db.sqlite3")).await?;

    let badge_id =
        helpers::create_badge(&pool, "First Step", ConditionType::TotalHabits, 1.0).await?;
    let ledger = Ledger(pool.clone());

    let first = ledger.try_award("alice", &badge_id).await?;
    assert!(first.is_fresh());

    let second = ledger.try_award("alice", &badge_id).await?;
    assert!(matches!(second, AwardOutcome::AlreadyAwarded));

    assert_eq!(ledger.list("alice").await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn concurrent_awards_persist_exactly_one_row() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_pool(dir.child("db.sqlite3")).await?;

    let badge_id =
        helpers::create_badge(&pool, "First Step", ConditionType::TotalHabits, 1.0).await?;
    let ledger = Ledger(pool.clone());

    let attempts = futures::future::join_all(
        (0..8).map(|_| ledger.try_award("alice", &badge_id)),
    )
    .await;

    let mut fresh = 0;
    for attempt in attempts {
        // The loser of the race must observe AlreadyAwarded, never an error.
        match attempt? {
            AwardOutcome::Fresh(row) => {
                fresh += 1;
                assert_eq!(row.user_id, "alice");
                assert_eq!(row.badge_id, badge_id);
            }
            AwardOutcome::AlreadyAwarded => {}
        }
    }

    assert_eq!(fresh, 1);
    assert_eq!(ledger.list("alice").await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn different_users_earn_the_same_badge_independently() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_pool(dir.child("db.sqlite3")).await?;

    let badge_id =
        helpers::create_badge(&pool, "First Step", ConditionType::TotalHabits, 1.0).await?;
    let ledger = Ledger(pool.clone());

    assert!(ledger.try_award("alice", &badge_id).await?.is_fresh());
    assert!(ledger.try_award("bob", &badge_id).await?.is_fresh());

    assert_eq!(ledger.list("alice").await?.len(), 1);
    assert_eq!(ledger.list("bob").await?.len(), 1);

    Ok(())
}
