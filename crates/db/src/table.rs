use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Habit {
    Table,
    Id,
    UserId,
    Title,
    Description,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum HabitRecord {
    Table,
    Id,
    UserId,
    HabitId,
    RecordedAt,
    Completed,
    Note,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Badge {
    Table,
    Id,
    Name,
    Description,
    Icon,
    ConditionType,
    ConditionValue,
    Active,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum UserBadge {
    Table,
    Id,
    UserId,
    BadgeId,
    EarnedAt,
}
