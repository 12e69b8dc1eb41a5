mod badge_create_active_idx;
mod badge_create_name_idx;
mod badge_create_table;
mod habit_create_table;
mod habit_create_user_idx;
mod habit_record_create_habit_idx;
mod habit_record_create_table;
mod habit_record_create_user_habit_date_idx;
mod user_badge_create_table;
mod user_badge_create_user_badge_idx;

use sqlx_migrator::vec_box;

pub struct M0_1;

sqlx_migrator::sqlite_migration!(
    M0_1,
    "main",
    "m0_1",
    vec_box![],
    vec_box![
        habit_create_table::Operation,
        habit_create_user_idx::Operation,
        habit_record_create_table::Operation,
        habit_record_create_user_habit_date_idx::Operation,
        habit_record_create_habit_idx::Operation,
        badge_create_table::Operation,
        badge_create_name_idx::Operation,
        badge_create_active_idx::Operation,
        user_badge_create_table::Operation,
        user_badge_create_user_badge_idx::Operation
    ]
);
