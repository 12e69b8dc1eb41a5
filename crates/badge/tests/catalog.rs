use habitloop_badge::{Command, CreateBadgeInput, Query};
use habitloop_shared::badge::ConditionType;
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn badge_names_are_unique() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_pool(dir.child("db.sqlite3")).await?;

    helpers::create_badge(&pool, "First Step", ConditionType::TotalHabits, 1.0).await?;

    let duplicate = Command(pool.clone())
        .create(CreateBadgeInput {
            name: "First Step".to_owned(),
            description: None,
            icon: None,
            condition_type: ConditionType::TotalRecords,
            condition_value: 10.0,
        })
        .await;

    assert_eq!(
        duplicate.unwrap_err().to_string(),
        "Badge name already exists".to_owned()
    );

    Ok(())
}

#[tokio::test]
async fn condition_values_must_be_positive() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_pool(dir.child("db.sqlite3")).await?;

    let result = Command(pool.clone())
        .create(CreateBadgeInput {
            name: "Broken".to_owned(),
            description: None,
            icon: None,
            condition_type: ConditionType::ConsecutiveDays,
            condition_value: 0.0,
        })
        .await;

    assert!(matches!(
        result.unwrap_err(),
        habitloop_shared::Error::Validate(_)
    ));

    Ok(())
}

#[tokio::test]
async fn unknown_condition_types_are_rejected_at_creation() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_pool(dir.child("db.sqlite3")).await?;

    let result = Command(pool.clone())
        .create(CreateBadgeInput {
            name: "Mystery".to_owned(),
            description: None,
            icon: None,
            condition_type: ConditionType::Unknown("weekly_average".to_owned()),
            condition_value: 1.0,
        })
        .await;

    assert_eq!(
        result.unwrap_err().to_string(),
        "Unknown condition type".to_owned()
    );

    Ok(())
}

#[tokio::test]
async fn seeding_the_default_catalog_is_idempotent() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_pool(dir.child("db.sqlite3")).await?;

    let command = Command(pool.clone());

    let created = command.seed_defaults().await?;
    assert!(created > 0);

    let again = command.seed_defaults().await?;
    assert_eq!(again, 0);

    let catalog = Query(pool.clone()).catalog().await?;
    assert_eq!(catalog.len(), created as usize);

    Ok(())
}

#[tokio::test]
async fn earned_badges_list_with_their_definitions() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_pool(dir.child("db.sqlite3")).await?;

    let badge_id =
        helpers::create_badge(&pool, "First Step", ConditionType::TotalHabits, 1.0).await?;
    let ledger = habitloop_badge::Ledger(pool.clone());
    ledger.try_award("alice", &badge_id).await?;

    let earned = Query(pool.clone()).earned_by_user("alice").await?;
    assert_eq!(earned.len(), 1);
    assert_eq!(earned[0].badge_id, badge_id);
    assert_eq!(earned[0].name, "First Step");
    assert!(earned[0].earned_at > 0);

    let nothing = Query(pool.clone()).earned_by_user("bob").await?;
    assert!(nothing.is_empty());

    Ok(())
}
