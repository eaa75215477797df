/// All database primary keys are UUIDs generated by PostgreSQL.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Subject identifier issued by the external identity provider.
pub type UserId = String;
