use rusqlite::ErrorCode;
use rusqlite::ffi;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A unique column already holds this value.
    #[error("{0}")]
    Conflict(String),

    /// A foreign key points at a row that does not exist.
    #[error("referenced record does not exist")]
    MissingReference,

    #[error("database lock poisoned")]
    Poisoned,

    #[error(transparent)]
    Sqlite(rusqlite::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(code, msg) = &err {
            if code.code == ErrorCode::ConstraintViolation {
                match code.extended_code {
                    ffi::SQLITE_CONSTRAINT_UNIQUE => {
                        return StoreError::Conflict(conflict_message(msg.as_deref()));
                    }
                    ffi::SQLITE_CONSTRAINT_FOREIGNKEY => return StoreError::MissingReference,
                    _ => {}
                }
            }
        }
        StoreError::Sqlite(err)
    }
}

/// Turns "UNIQUE constraint failed: users.email" into "email already exists".
fn conflict_message(msg: Option<&str>) -> String {
    let column = msg
        .and_then(|m| m.rsplit(':').next())
        .and_then(|cols| cols.split(',').next())
        .and_then(|col| col.trim().rsplit('.').next())
        .filter(|col| !col.is_empty());

    match column {
        Some(col) => format!("{} already exists", col),
        None => "record already exists".to_string(),
    }
}
