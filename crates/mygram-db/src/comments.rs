use std::sync::Arc;

use chrono::Utc;
use rusqlite::{Row, params};
use uuid::Uuid;

use mygram_types::models::Comment;

use crate::repository::CommentRepository;
use crate::row::{FoundExt, expect_one, uuid_at};
use crate::{Database, StoreResult};

const COLUMNS: &str = "id, message, user_id, photo_id, created_at, updated_at";

pub struct SqliteCommentRepository {
    db: Arc<Database>,
}

impl SqliteCommentRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

fn comment_from_row(row: &Row<'_>) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: uuid_at(row, 0)?,
        message: row.get(1)?,
        user_id: uuid_at(row, 2)?,
        photo_id: uuid_at(row, 3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

impl CommentRepository for SqliteCommentRepository {
    fn list(&self) -> StoreResult<Vec<Comment>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM comments WHERE deleted_at IS NULL ORDER BY created_at"
            ))?;
            let rows = stmt
                .query_map([], comment_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    fn list_by_photo(&self, photo_id: Uuid) -> StoreResult<Vec<Comment>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM comments
                 WHERE photo_id = ?1 AND deleted_at IS NULL
                 ORDER BY created_at"
            ))?;
            let rows = stmt
                .query_map([photo_id.to_string()], comment_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    fn get_by_id(&self, id: Uuid) -> StoreResult<Comment> {
        self.db.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {COLUMNS} FROM comments WHERE id = ?1 AND deleted_at IS NULL"),
                [id.to_string()],
                comment_from_row,
            )
            .found("comment")
        })
    }

    fn create(&self, comment: &Comment) -> StoreResult<Comment> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO comments (id, message, user_id, photo_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    comment.id.to_string(),
                    comment.message,
                    comment.user_id.to_string(),
                    comment.photo_id.to_string(),
                    comment.created_at,
                    comment.updated_at,
                ],
            )?;
            Ok(comment.clone())
        })
    }

    fn update(&self, comment: &Comment) -> StoreResult<Comment> {
        self.db.with_conn(|conn| {
            let affected = conn.execute(
                "UPDATE comments SET message = ?2, updated_at = ?3
                 WHERE id = ?1 AND deleted_at IS NULL",
                params![comment.id.to_string(), comment.message, comment.updated_at],
            )?;
            expect_one(affected, "comment")?;
            Ok(comment.clone())
        })
    }

    fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.db.with_conn(|conn| {
            let affected = conn.execute(
                "UPDATE comments SET deleted_at = ?2 WHERE id = ?1 AND deleted_at IS NULL",
                params![id.to_string(), Utc::now()],
            )?;
            expect_one(affected, "comment")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photos::SqlitePhotoRepository;
    use crate::photos::tests::sample_photo;
    use crate::repository::{PhotoRepository, UserRepository};
    use crate::users::SqliteUserRepository;
    use crate::users::tests::sample_user;
    use crate::StoreError;

    fn comment(user_id: Uuid, photo_id: Uuid, message: &str) -> Comment {
        let now = Utc::now();
        Comment {
            id: Uuid::new_v4(),
            message: message.to_string(),
            user_id,
            photo_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn comments_follow_their_photo() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let users = SqliteUserRepository::new(db.clone());
        let photos = SqlitePhotoRepository::new(db.clone());
        let comments = SqliteCommentRepository::new(db);

        let alice = users.create(&sample_user("alice", "alice@example.com")).unwrap();
        let first = photos.create(&sample_photo(alice.id, "first")).unwrap();
        let second = photos.create(&sample_photo(alice.id, "second")).unwrap();

        let c = comments.create(&comment(alice.id, first.id, "nice")).unwrap();
        comments.create(&comment(alice.id, second.id, "meh")).unwrap();

        let on_first = comments.list_by_photo(first.id).unwrap();
        assert_eq!(on_first, vec![c.clone()]);

        let mut edited = c.clone();
        edited.message = "very nice".into();
        comments.update(&edited).unwrap();
        assert_eq!(comments.get_by_id(c.id).unwrap().message, "very nice");

        comments.delete(c.id).unwrap();
        assert!(matches!(comments.get_by_id(c.id), Err(StoreError::NotFound("comment"))));
        assert_eq!(comments.list().unwrap().len(), 1);
    }

    #[test]
    fn comment_on_unknown_photo_is_rejected() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let users = SqliteUserRepository::new(db.clone());
        let comments = SqliteCommentRepository::new(db);

        let alice = users.create(&sample_user("alice", "alice@example.com")).unwrap();
        let err = comments.create(&comment(alice.id, Uuid::new_v4(), "hello")).unwrap_err();
        assert!(matches!(err, StoreError::MissingReference));
    }
}
