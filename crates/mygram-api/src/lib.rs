pub mod auth;
pub mod comments;
pub mod error;
pub mod middleware;
pub mod password;
pub mod photos;
pub mod routes;
pub mod service;
pub mod socials;
pub mod token;
pub mod users;

mod extract;

use std::sync::Arc;

use tracing::error;

use mygram_db::{
    Database, SqliteCommentRepository, SqlitePhotoRepository, SqliteSocialRepository,
    SqliteUserRepository,
};

use crate::error::{ServiceError, ServiceResult};
use crate::service::{CommentService, PhotoService, SocialService, UserService};
use crate::token::TokenKeys;

pub use routes::create_router;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub users: UserService,
    pub photos: PhotoService,
    pub comments: CommentService,
    pub socials: SocialService,
    pub keys: TokenKeys,
}

impl AppStateInner {
    /// Wires the SQLite repositories into the services over one shared store.
    pub fn new(db: Arc<Database>, keys: TokenKeys) -> Self {
        let users = Arc::new(SqliteUserRepository::new(db.clone()));
        let photos = Arc::new(SqlitePhotoRepository::new(db.clone()));
        let comments = Arc::new(SqliteCommentRepository::new(db.clone()));
        let socials = Arc::new(SqliteSocialRepository::new(db));

        Self {
            users: UserService::new(users.clone(), keys.clone()),
            photos: PhotoService::new(photos.clone(), users.clone()),
            comments: CommentService::new(comments, photos, users.clone()),
            socials: SocialService::new(socials, users),
            keys,
        }
    }
}

/// Run store-backed service work off the async runtime.
pub(crate) async fn blocking<F, T>(state: &AppState, f: F) -> ServiceResult<T>
where
    F: FnOnce(&AppStateInner) -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ServiceError::Internal(e.into())
        })?
}
