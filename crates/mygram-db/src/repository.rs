//! Per-entity data access contracts.
//!
//! Services depend on these traits rather than on [`crate::Database`], so they
//! can be exercised against fakes. Every `get_by_*` reports absence as
//! [`StoreError::NotFound`](crate::StoreError::NotFound), and every read skips
//! soft-deleted rows.

use uuid::Uuid;

use mygram_types::models::{Comment, Photo, Social, User};

use crate::StoreResult;

pub trait UserRepository: Send + Sync {
    fn list(&self) -> StoreResult<Vec<User>>;
    fn get_by_id(&self, id: Uuid) -> StoreResult<User>;
    fn get_by_email(&self, email: &str) -> StoreResult<User>;
    fn create(&self, user: &User) -> StoreResult<User>;
    /// Replaces username, email, password, dob and `updated_at`.
    fn update(&self, user: &User) -> StoreResult<User>;
    fn delete(&self, id: Uuid) -> StoreResult<()>;
}

pub trait PhotoRepository: Send + Sync {
    fn list(&self) -> StoreResult<Vec<Photo>>;
    fn list_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Photo>>;
    fn get_by_id(&self, id: Uuid) -> StoreResult<Photo>;
    fn create(&self, photo: &Photo) -> StoreResult<Photo>;
    fn update(&self, photo: &Photo) -> StoreResult<Photo>;
    fn delete(&self, id: Uuid) -> StoreResult<()>;
}

pub trait CommentRepository: Send + Sync {
    fn list(&self) -> StoreResult<Vec<Comment>>;
    fn list_by_photo(&self, photo_id: Uuid) -> StoreResult<Vec<Comment>>;
    fn get_by_id(&self, id: Uuid) -> StoreResult<Comment>;
    fn create(&self, comment: &Comment) -> StoreResult<Comment>;
    fn update(&self, comment: &Comment) -> StoreResult<Comment>;
    fn delete(&self, id: Uuid) -> StoreResult<()>;
}

pub trait SocialRepository: Send + Sync {
    fn list(&self) -> StoreResult<Vec<Social>>;
    fn list_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Social>>;
    fn get_by_id(&self, id: Uuid) -> StoreResult<Social>;
    /// Inserts the social and its `user_socials` link together.
    fn create(&self, social: &Social) -> StoreResult<Social>;
    fn update(&self, social: &Social) -> StoreResult<Social>;
    fn delete(&self, id: Uuid) -> StoreResult<()>;
}
