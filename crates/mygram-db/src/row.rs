use rusqlite::Row;
use rusqlite::types::Type;
use uuid::Uuid;

use crate::{StoreError, StoreResult};

/// Ids are stored as hyphenated TEXT.
pub(crate) fn uuid_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Extension trait for single-row lookups: no row becomes `NotFound(entity)`.
pub(crate) trait FoundExt<T> {
    fn found(self, entity: &'static str) -> StoreResult<T>;
}

impl<T> FoundExt<T> for rusqlite::Result<T> {
    fn found(self, entity: &'static str) -> StoreResult<T> {
        match self {
            Ok(val) => Ok(val),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StoreError::NotFound(entity)),
            Err(e) => Err(e.into()),
        }
    }
}

/// `UPDATE` helper: zero affected rows means no live row matched.
pub(crate) fn expect_one(affected: usize, entity: &'static str) -> StoreResult<()> {
    if affected == 0 {
        Err(StoreError::NotFound(entity))
    } else {
        Ok(())
    }
}
