use std::sync::Arc;

use chrono::Utc;
use rusqlite::{Row, params};
use uuid::Uuid;

use mygram_types::models::Photo;

use crate::repository::PhotoRepository;
use crate::row::{FoundExt, expect_one, uuid_at};
use crate::{Database, StoreResult};

const COLUMNS: &str = "id, title, url, caption, user_id, created_at, updated_at";

pub struct SqlitePhotoRepository {
    db: Arc<Database>,
}

impl SqlitePhotoRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

fn photo_from_row(row: &Row<'_>) -> rusqlite::Result<Photo> {
    Ok(Photo {
        id: uuid_at(row, 0)?,
        title: row.get(1)?,
        url: row.get(2)?,
        caption: row.get(3)?,
        user_id: uuid_at(row, 4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

impl PhotoRepository for SqlitePhotoRepository {
    fn list(&self) -> StoreResult<Vec<Photo>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM photos WHERE deleted_at IS NULL ORDER BY created_at"
            ))?;
            let rows = stmt
                .query_map([], photo_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    fn list_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Photo>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM photos
                 WHERE user_id = ?1 AND deleted_at IS NULL
                 ORDER BY created_at"
            ))?;
            let rows = stmt
                .query_map([user_id.to_string()], photo_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    fn get_by_id(&self, id: Uuid) -> StoreResult<Photo> {
        self.db.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {COLUMNS} FROM photos WHERE id = ?1 AND deleted_at IS NULL"),
                [id.to_string()],
                photo_from_row,
            )
            .found("photo")
        })
    }

    fn create(&self, photo: &Photo) -> StoreResult<Photo> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO photos (id, title, url, caption, user_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    photo.id.to_string(),
                    photo.title,
                    photo.url,
                    photo.caption,
                    photo.user_id.to_string(),
                    photo.created_at,
                    photo.updated_at,
                ],
            )?;
            Ok(photo.clone())
        })
    }

    fn update(&self, photo: &Photo) -> StoreResult<Photo> {
        self.db.with_conn(|conn| {
            let affected = conn.execute(
                "UPDATE photos SET title = ?2, url = ?3, caption = ?4, updated_at = ?5
                 WHERE id = ?1 AND deleted_at IS NULL",
                params![
                    photo.id.to_string(),
                    photo.title,
                    photo.url,
                    photo.caption,
                    photo.updated_at,
                ],
            )?;
            expect_one(affected, "photo")?;
            Ok(photo.clone())
        })
    }

    fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.db.with_conn(|conn| {
            let affected = conn.execute(
                "UPDATE photos SET deleted_at = ?2 WHERE id = ?1 AND deleted_at IS NULL",
                params![id.to_string(), Utc::now()],
            )?;
            expect_one(affected, "photo")
        })
    }
}
