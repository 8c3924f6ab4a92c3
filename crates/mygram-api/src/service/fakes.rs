//! In-memory repositories for service tests.

use std::sync::Mutex;

use uuid::Uuid;

use mygram_db::{
    CommentRepository, PhotoRepository, SocialRepository, StoreError, StoreResult,
    UserRepository,
};
use mygram_types::models::{Comment, Photo, Social, User};

/// A list of rows plus the shared bookkeeping every fake needs.
pub(crate) struct Table<T> {
    rows: Mutex<Vec<T>>,
    entity: &'static str,
}

impl<T: Clone> Table<T> {
    fn new(entity: &'static str) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            entity,
        }
    }

    fn all(&self) -> Vec<T> {
        self.rows.lock().unwrap().clone()
    }

    fn find(&self, pred: impl Fn(&T) -> bool) -> StoreResult<T> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| pred(r))
            .cloned()
            .ok_or(StoreError::NotFound(self.entity))
    }

    fn insert(&self, row: &T) -> StoreResult<T> {
        self.rows.lock().unwrap().push(row.clone());
        Ok(row.clone())
    }

    fn replace(&self, row: &T, same: impl Fn(&T) -> bool) -> StoreResult<T> {
        let mut rows = self.rows.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|r| same(r))
            .ok_or(StoreError::NotFound(self.entity))?;
        *slot = row.clone();
        Ok(row.clone())
    }

    fn remove(&self, pred: impl Fn(&T) -> bool) -> StoreResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| !pred(r));
        if rows.len() == before {
            return Err(StoreError::NotFound(self.entity));
        }
        Ok(())
    }
}

pub(crate) struct FakeUsers(pub(crate) Table<User>);

impl FakeUsers {
    pub(crate) fn new() -> Self {
        Self(Table::new("user"))
    }
}

impl UserRepository for FakeUsers {
    fn list(&self) -> StoreResult<Vec<User>> {
        Ok(self.0.all())
    }

    fn get_by_id(&self, id: Uuid) -> StoreResult<User> {
        self.0.find(|u| u.id == id)
    }

    fn get_by_email(&self, email: &str) -> StoreResult<User> {
        self.0.find(|u| u.email == email)
    }

    fn create(&self, user: &User) -> StoreResult<User> {
        for existing in self.0.all() {
            if existing.username == user.username {
                return Err(StoreError::Conflict("username already exists".into()));
            }
            if existing.email == user.email {
                return Err(StoreError::Conflict("email already exists".into()));
            }
        }
        self.0.insert(user)
    }

    fn update(&self, user: &User) -> StoreResult<User> {
        self.0.replace(user, |u| u.id == user.id)
    }

    fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.0.remove(|u| u.id == id)
    }
}

pub(crate) struct FakePhotos(pub(crate) Table<Photo>);

impl FakePhotos {
    pub(crate) fn new() -> Self {
        Self(Table::new("photo"))
    }
}

impl PhotoRepository for FakePhotos {
    fn list(&self) -> StoreResult<Vec<Photo>> {
        Ok(self.0.all())
    }

    fn list_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Photo>> {
        Ok(self.0.all().into_iter().filter(|p| p.user_id == user_id).collect())
    }

    fn get_by_id(&self, id: Uuid) -> StoreResult<Photo> {
        self.0.find(|p| p.id == id)
    }

    fn create(&self, photo: &Photo) -> StoreResult<Photo> {
        self.0.insert(photo)
    }

    fn update(&self, photo: &Photo) -> StoreResult<Photo> {
        self.0.replace(photo, |p| p.id == photo.id)
    }

    fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.0.remove(|p| p.id == id)
    }
}

pub(crate) struct FakeComments(pub(crate) Table<Comment>);

impl FakeComments {
    pub(crate) fn new() -> Self {
        Self(Table::new("comment"))
    }
}

impl CommentRepository for FakeComments {
    fn list(&self) -> StoreResult<Vec<Comment>> {
        Ok(self.0.all())
    }

    fn list_by_photo(&self, photo_id: Uuid) -> StoreResult<Vec<Comment>> {
        Ok(self.0.all().into_iter().filter(|c| c.photo_id == photo_id).collect())
    }

    fn get_by_id(&self, id: Uuid) -> StoreResult<Comment> {
        self.0.find(|c| c.id == id)
    }

    fn create(&self, comment: &Comment) -> StoreResult<Comment> {
        self.0.insert(comment)
    }

    fn update(&self, comment: &Comment) -> StoreResult<Comment> {
        self.0.replace(comment, |c| c.id == comment.id)
    }

    fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.0.remove(|c| c.id == id)
    }
}

pub(crate) struct FakeSocials(pub(crate) Table<Social>);

impl FakeSocials {
    pub(crate) fn new() -> Self {
        Self(Table::new("social"))
    }
}

impl SocialRepository for FakeSocials {
    fn list(&self) -> StoreResult<Vec<Social>> {
        Ok(self.0.all())
    }

    fn list_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Social>> {
        Ok(self.0.all().into_iter().filter(|s| s.user_id == user_id).collect())
    }

    fn get_by_id(&self, id: Uuid) -> StoreResult<Social> {
        self.0.find(|s| s.id == id)
    }

    fn create(&self, social: &Social) -> StoreResult<Social> {
        self.0.insert(social)
    }

    fn update(&self, social: &Social) -> StoreResult<Social> {
        self.0.replace(social, |s| s.id == social.id)
    }

    fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.0.remove(|s| s.id == id)
    }
}
