use std::sync::Arc;

use chrono::Utc;
use rusqlite::{Row, params};
use uuid::Uuid;

use mygram_types::models::Social;

use crate::repository::SocialRepository;
use crate::row::{FoundExt, expect_one, uuid_at};
use crate::{Database, StoreResult};

const COLUMNS: &str = "s.id, s.name, s.url, s.user_id, s.created_at, s.updated_at";

pub struct SqliteSocialRepository {
    db: Arc<Database>,
}

impl SqliteSocialRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

fn social_from_row(row: &Row<'_>) -> rusqlite::Result<Social> {
    Ok(Social {
        id: uuid_at(row, 0)?,
        name: row.get(1)?,
        url: row.get(2)?,
        user_id: uuid_at(row, 3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

impl SocialRepository for SqliteSocialRepository {
    fn list(&self) -> StoreResult<Vec<Social>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM socials s WHERE s.deleted_at IS NULL ORDER BY s.created_at"
            ))?;
            let rows = stmt
                .query_map([], social_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    fn list_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Social>> {
        // Resolved through the join table rather than socials.user_id
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM socials s
                 JOIN user_socials us ON us.social_id = s.id
                 WHERE us.user_id = ?1 AND s.deleted_at IS NULL
                 ORDER BY s.created_at"
            ))?;
            let rows = stmt
                .query_map([user_id.to_string()], social_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    fn get_by_id(&self, id: Uuid) -> StoreResult<Social> {
        self.db.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {COLUMNS} FROM socials s WHERE s.id = ?1 AND s.deleted_at IS NULL"),
                [id.to_string()],
                social_from_row,
            )
            .found("social")
        })
    }

    fn create(&self, social: &Social) -> StoreResult<Social> {
        self.db.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO socials (id, name, url, user_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    social.id.to_string(),
                    social.name,
                    social.url,
                    social.user_id.to_string(),
                    social.created_at,
                    social.updated_at,
                ],
            )?;
            tx.execute(
                "INSERT INTO user_socials (user_id, social_id) VALUES (?1, ?2)",
                params![social.user_id.to_string(), social.id.to_string()],
            )?;
            tx.commit()?;
            Ok(social.clone())
        })
    }

    fn update(&self, social: &Social) -> StoreResult<Social> {
        self.db.with_conn(|conn| {
            let affected = conn.execute(
                "UPDATE socials SET name = ?2, url = ?3, updated_at = ?4
                 WHERE id = ?1 AND deleted_at IS NULL",
                params![social.id.to_string(), social.name, social.url, social.updated_at],
            )?;
            expect_one(affected, "social")?;
            Ok(social.clone())
        })
    }

    fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.db.with_conn(|conn| {
            let affected = conn.execute(
                "UPDATE socials SET deleted_at = ?2 WHERE id = ?1 AND deleted_at IS NULL",
                params![id.to_string(), Utc::now()],
            )?;
            expect_one(affected, "social")
        })
    }
}
