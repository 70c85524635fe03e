/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Grouped event counts are PostgreSQL BIGINT (`COUNT(*)`).
pub type EventCount = i64;
