use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use mygram_db::{PhotoRepository, UserRepository};
use mygram_types::api::PhotoRequest;
use mygram_types::models::Photo;

use super::{ensure_owner, require_text};
use crate::error::ServiceResult;

pub struct PhotoService {
    photos: Arc<dyn PhotoRepository>,
    users: Arc<dyn UserRepository>,
}

impl PhotoService {
    pub fn new(photos: Arc<dyn PhotoRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { photos, users }
    }

    pub fn list(&self) -> ServiceResult<Vec<Photo>> {
        Ok(self.photos.list()?)
    }

    pub fn list_by_user(&self, user_id: Uuid) -> ServiceResult<Vec<Photo>> {
        self.users.get_by_id(user_id)?;
        Ok(self.photos.list_by_user(user_id)?)
    }

    pub fn get(&self, id: Uuid) -> ServiceResult<Photo> {
        Ok(self.photos.get_by_id(id)?)
    }

    pub fn create(&self, actor: Uuid, req: PhotoRequest) -> ServiceResult<Photo> {
        validate(&req)?;
        // Tokens outlive deleted accounts
        self.users.get_by_id(actor)?;

        let now = Utc::now();
        let photo = Photo {
            id: Uuid::new_v4(),
            title: req.title.trim().to_string(),
            url: req.url.trim().to_string(),
            caption: req.caption,
            user_id: actor,
            created_at: now,
            updated_at: now,
        };

        Ok(self.photos.create(&photo)?)
    }

    pub fn update(&self, id: Uuid, actor: Uuid, req: PhotoRequest) -> ServiceResult<Photo> {
        let mut photo = self.photos.get_by_id(id)?;
        ensure_owner(photo.user_id, actor, "cannot modify another user's photo")?;
        validate(&req)?;

        photo.title = req.title.trim().to_string();
        photo.url = req.url.trim().to_string();
        photo.caption = req.caption;
        photo.updated_at = Utc::now();

        Ok(self.photos.update(&photo)?)
    }

    pub fn delete(&self, id: Uuid, actor: Uuid) -> ServiceResult<()> {
        let photo = self.photos.get_by_id(id)?;
        ensure_owner(photo.user_id, actor, "cannot delete another user's photo")?;
        Ok(self.photos.delete(id)?)
    }
}

fn validate(req: &PhotoRequest) -> ServiceResult<()> {
    require_text(&req.title, "title")?;
    require_text(&req.url, "url")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::service::fakes::{FakePhotos, FakeUsers};
    use chrono::NaiveDate;
    use mygram_types::models::User;

    fn user(repo: &FakeUsers, name: &str) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: name.into(),
            email: format!("{}@example.com", name),
            password: "hash".into(),
            dob: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            created_at: now,
            updated_at: now,
        };
        repo.create(&user).unwrap()
    }

    fn req(title: &str) -> PhotoRequest {
        PhotoRequest {
            title: title.into(),
            url: "https://cdn.example.com/p.jpg".into(),
            caption: "caption".into(),
        }
    }

    fn setup() -> (Arc<FakeUsers>, PhotoService) {
        let users = Arc::new(FakeUsers::new());
        let svc = PhotoService::new(Arc::new(FakePhotos::new()), users.clone());
        (users, svc)
    }

    #[test]
    fn create_assigns_owner_and_id() {
        let (users, svc) = setup();
        let alice = user(&users, "alice");

        let photo = svc.create(alice.id, req("sunset")).unwrap();
        assert_eq!(photo.user_id, alice.id);
        assert!(!photo.id.is_nil());
        assert_eq!(svc.list_by_user(alice.id).unwrap(), vec![photo]);
    }

    #[test]
    fn blank_title_is_rejected() {
        let (users, svc) = setup();
        let alice = user(&users, "alice");
        assert!(matches!(svc.create(alice.id, req("  ")), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn unknown_actor_cannot_create() {
        let (_users, svc) = setup();
        assert!(matches!(
            svc.create(Uuid::new_v4(), req("sunset")),
            Err(ServiceError::NotFound("user"))
        ));
    }

    #[test]
    fn only_owner_may_mutate() {
        let (users, svc) = setup();
        let alice = user(&users, "alice");
        let bob = user(&users, "bob");
        let photo = svc.create(alice.id, req("sunset")).unwrap();

        assert!(matches!(
            svc.update(photo.id, bob.id, req("mine now")),
            Err(ServiceError::Forbidden(_))
        ));
        assert!(matches!(svc.delete(photo.id, bob.id), Err(ServiceError::Forbidden(_))));

        let updated = svc.update(photo.id, alice.id, req("dusk")).unwrap();
        assert_eq!(updated.title, "dusk");
        assert_eq!(updated.created_at, photo.created_at);

        svc.delete(photo.id, alice.id).unwrap();
        assert!(matches!(svc.get(photo.id), Err(ServiceError::NotFound("photo"))));
    }

    #[test]
    fn listing_for_unknown_user_is_not_found() {
        let (_users, svc) = setup();
        assert!(matches!(svc.list_by_user(Uuid::new_v4()), Err(ServiceError::NotFound("user"))));
    }
}
