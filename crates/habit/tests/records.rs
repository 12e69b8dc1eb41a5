use habitloop_habit::{Command, CreateHabitInput, MarkDayInput, Query, RecordFilter, StatsQuery};
use temp_dir::TempDir;
use time::macros::date;

mod helpers;

#[tokio::test]
async fn a_day_can_only_be_recorded_once_per_habit() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_pool(dir.child("db.sqlite3")).await?;

    let habit = helpers::create_habit(&pool, "alice", "Morning run").await?;
    let command = Command(pool.clone());

    command
        .mark_day(MarkDayInput {
            user_id: "alice".to_owned(),
            habit_id: habit.to_owned(),
            date: date!(2026 - 03 - 30),
            completed: true,
            note: None,
        })
        .await?;

    let duplicate = command
        .mark_day(MarkDayInput {
            user_id: "alice".to_owned(),
            habit_id: habit.to_owned(),
            date: date!(2026 - 03 - 30),
            completed: true,
            note: Some("second attempt".to_owned()),
        })
        .await;

    assert_eq!(
        duplicate.unwrap_err().to_string(),
        "Day already recorded for this habit".to_owned()
    );

    Ok(())
}

#[tokio::test]
async fn unmark_removes_the_record() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_pool(dir.child("db.sqlite3")).await?;

    let habit = helpers::create_habit(&pool, "alice", "Morning run").await?;
    helpers::mark_day(&pool, "alice", &habit, date!(2026 - 03 - 30), true).await?;

    let command = Command(pool.clone());
    command
        .unmark_day("alice", &habit, date!(2026 - 03 - 30))
        .await?;

    let records = Query(pool.clone())
        .list_records("alice", RecordFilter::default())
        .await?;
    assert!(records.is_empty());

    // Unmarking an unrecorded day is a user error, not a silent no-op.
    let missing = command
        .unmark_day("alice", &habit, date!(2026 - 03 - 30))
        .await;
    assert_eq!(
        missing.unwrap_err().to_string(),
        "No record for this day".to_owned()
    );

    Ok(())
}

#[tokio::test]
async fn marking_requires_an_owned_habit() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_pool(dir.child("db.sqlite3")).await?;

    let habit = helpers::create_habit(&pool, "alice", "Morning run").await?;
    let command = Command(pool.clone());

    let result = command
        .mark_day(MarkDayInput {
            user_id: "bob".to_owned(),
            habit_id: habit,
            date: date!(2026 - 03 - 30),
            completed: true,
            note: None,
        })
        .await;

    assert_eq!(
        result.unwrap_err().to_string(),
        "Habit not found".to_owned()
    );

    Ok(())
}

#[tokio::test]
async fn set_completed_flips_the_flag_on_an_existing_record() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_pool(dir.child("db.sqlite3")).await?;

    let habit = helpers::create_habit(&pool, "alice", "Morning run").await?;
    helpers::mark_day(&pool, "alice", &habit, date!(2026 - 03 - 30), true).await?;

    let command = Command(pool.clone());
    let query = Query(pool.clone());
    let stats = StatsQuery(pool.clone());

    command
        .set_completed("alice", &habit, date!(2026 - 03 - 30), false)
        .await?;

    let records = query.list_records("alice", RecordFilter::default()).await?;
    assert_eq!(records.len(), 1);
    assert!(!records[0].completed);

    // The flipped-off day no longer counts toward a streak.
    let snapshot = stats.compute("alice", date!(2026 - 03 - 30)).await?;
    assert_eq!(snapshot.consecutive_days, 0);

    command
        .set_completed("alice", &habit, date!(2026 - 03 - 30), true)
        .await?;

    let records = query.list_records("alice", RecordFilter::default()).await?;
    assert!(records[0].completed);

    let snapshot = stats.compute("alice", date!(2026 - 03 - 30)).await?;
    assert_eq!(snapshot.consecutive_days, 1);

    // Flipping a day that was never recorded is a user error.
    let missing = command
        .set_completed("alice", &habit, date!(2026 - 03 - 31), false)
        .await;
    assert_eq!(
        missing.unwrap_err().to_string(),
        "No record for this day".to_owned()
    );

    Ok(())
}

#[tokio::test]
async fn habit_titles_are_validated() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_pool(dir.child("db.sqlite3")).await?;

    let command = Command(pool.clone());
    let result = command
        .create(CreateHabitInput {
            user_id: "alice".to_owned(),
            title: String::new(),
            description: None,
        })
        .await;

    assert!(matches!(
        result.unwrap_err(),
        habitloop_shared::Error::Validate(_)
    ));

    Ok(())
}

#[tokio::test]
async fn record_listing_filters_by_habit_and_range() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_pool(dir.child("db.sqlite3")).await?;

    let habit_a = helpers::create_habit(&pool, "alice", "Reading").await?;
    let habit_b = helpers::create_habit(&pool, "alice", "Stretching").await?;
    helpers::mark_day(&pool, "alice", &habit_a, date!(2026 - 03 - 10), true).await?;
    helpers::mark_day(&pool, "alice", &habit_a, date!(2026 - 03 - 20), true).await?;
    helpers::mark_day(&pool, "alice", &habit_b, date!(2026 - 03 - 15), true).await?;

    let query = Query(pool.clone());

    let all = query.list_records("alice", RecordFilter::default()).await?;
    assert_eq!(all.len(), 3);

    let only_a = query
        .list_records(
            "alice",
            RecordFilter {
                habit_id: Some(habit_a.to_owned()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(only_a.len(), 2);

    let mid_march = query
        .list_records(
            "alice",
            RecordFilter {
                from: Some(date!(2026 - 03 - 12)),
                to: Some(date!(2026 - 03 - 18)),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(mid_march.len(), 1);
    assert_eq!(mid_march[0].habit_id, habit_b);
    assert_eq!(mid_march[0].recorded_on()?, date!(2026 - 03 - 15));

    Ok(())
}
