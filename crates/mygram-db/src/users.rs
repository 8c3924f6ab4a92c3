use std::sync::Arc;

use chrono::Utc;
use rusqlite::{Row, params};
use uuid::Uuid;

use mygram_types::models::User;

use crate::repository::UserRepository;
use crate::row::{FoundExt, expect_one, uuid_at};
use crate::{Database, StoreResult};

const COLUMNS: &str = "id, username, email, password, dob, created_at, updated_at";

pub struct SqliteUserRepository {
    db: Arc<Database>,
}

impl SqliteUserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: uuid_at(row, 0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password: row.get(3)?,
        dob: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

impl UserRepository for SqliteUserRepository {
    fn list(&self) -> StoreResult<Vec<User>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM users WHERE deleted_at IS NULL ORDER BY created_at"
            ))?;
            let rows = stmt
                .query_map([], user_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    fn get_by_id(&self, id: Uuid) -> StoreResult<User> {
        self.db.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {COLUMNS} FROM users WHERE id = ?1 AND deleted_at IS NULL"),
                [id.to_string()],
                user_from_row,
            )
            .found("user")
        })
    }

    fn get_by_email(&self, email: &str) -> StoreResult<User> {
        self.db.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {COLUMNS} FROM users WHERE email = ?1 AND deleted_at IS NULL"),
                [email],
                user_from_row,
            )
            .found("user")
        })
    }

    fn create(&self, user: &User) -> StoreResult<User> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, username, email, password, dob, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    user.id.to_string(),
                    user.username,
                    user.email,
                    user.password,
                    user.dob,
                    user.created_at,
                    user.updated_at,
                ],
            )?;
            Ok(user.clone())
        })
    }

    fn update(&self, user: &User) -> StoreResult<User> {
        self.db.with_conn(|conn| {
            let affected = conn.execute(
                "UPDATE users SET username = ?2, email = ?3, password = ?4, dob = ?5, updated_at = ?6
                 WHERE id = ?1 AND deleted_at IS NULL",
                params![
                    user.id.to_string(),
                    user.username,
                    user.email,
                    user.password,
                    user.dob,
                    user.updated_at,
                ],
            )?;
            expect_one(affected, "user")?;
            Ok(user.clone())
        })
    }

    fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.db.with_conn(|conn| {
            let affected = conn.execute(
                "UPDATE users SET deleted_at = ?2 WHERE id = ?1 AND deleted_at IS NULL",
                params![id.to_string(), Utc::now()],
            )?;
            expect_one(affected, "user")
        })
    }
}
