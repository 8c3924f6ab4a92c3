use rusqlite::Connection;
use tracing::info;

use crate::StoreResult;

pub fn run(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          TEXT PRIMARY KEY,
            username    TEXT NOT NULL,
            email       TEXT NOT NULL,
            password    TEXT NOT NULL,
            dob         TEXT NOT NULL,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL,
            deleted_at  TEXT
        );

        -- Soft-deleted accounts release their username and email
        CREATE UNIQUE INDEX IF NOT EXISTS idx_users_username
            ON users(username) WHERE deleted_at IS NULL;
        CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email
            ON users(email) WHERE deleted_at IS NULL;

        CREATE TABLE IF NOT EXISTS photos (
            id          TEXT PRIMARY KEY,
            title       TEXT NOT NULL,
            url         TEXT NOT NULL,
            caption     TEXT NOT NULL,
            user_id     TEXT NOT NULL REFERENCES users(id),
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL,
            deleted_at  TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_photos_user
            ON photos(user_id, created_at);

        CREATE TABLE IF NOT EXISTS comments (
            id          TEXT PRIMARY KEY,
            message     TEXT NOT NULL,
            user_id     TEXT NOT NULL REFERENCES users(id),
            photo_id    TEXT NOT NULL REFERENCES photos(id),
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL,
            deleted_at  TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_comments_photo
            ON comments(photo_id, created_at);

        CREATE TABLE IF NOT EXISTS socials (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            url         TEXT NOT NULL,
            user_id     TEXT NOT NULL REFERENCES users(id),
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL,
            deleted_at  TEXT
        );

        CREATE TABLE IF NOT EXISTS user_socials (
            user_id     TEXT NOT NULL REFERENCES users(id),
            social_id   TEXT NOT NULL REFERENCES socials(id),
            PRIMARY KEY (user_id, social_id)
        );
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
