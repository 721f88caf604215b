//! Store error taxonomy
//!
//! Driver errors are classified once, here. Uniqueness and referential
//! violations stay distinct kinds so callers can answer 409 and 422
//! respectively.

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("{resource} '{key}' already exists")]
    Conflict { resource: &'static str, key: String },

    #[error("referenced record does not exist: {detail}")]
    MissingReference { detail: String },

    #[error("store unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    #[error("database error: {0}")]
    Sqlx(#[source] sqlx::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db) = err.as_database_error() {
            if db.is_unique_violation() {
                return Self::Conflict {
                    resource: "record",
                    key: db.message().to_owned(),
                };
            }
            if is_referential(db) {
                return Self::MissingReference {
                    detail: db.message().to_owned(),
                };
            }
        }

        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::Unavailable(err)
            }
            other => Self::Sqlx(other),
        }
    }
}

/// SQLite reports `ON DELETE RESTRICT` as SQLITE_CONSTRAINT_TRIGGER (1811)
/// rather than SQLITE_CONSTRAINT_FOREIGNKEY (787), with the same message.
fn is_referential(db: &dyn sqlx::error::DatabaseError) -> bool {
    db.is_foreign_key_violation()
        || db.code().as_deref() == Some("1811")
        || db.message().contains("FOREIGN KEY constraint failed")
}

impl DbError {
    /// Map a failed write, naming the clashing record on unique violations.
    pub(crate) fn on_write<'a>(
        resource: &'static str,
        key: &'a str,
    ) -> impl FnOnce(sqlx::Error) -> Self + 'a {
        move |err| match Self::from(err) {
            Self::Conflict { .. } => Self::Conflict {
                resource,
                key: key.to_owned(),
            },
            other => other,
        }
    }

    pub(crate) fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}
