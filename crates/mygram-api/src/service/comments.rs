use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use mygram_db::{CommentRepository, PhotoRepository, UserRepository};
use mygram_types::api::{CreateCommentRequest, UpdateCommentRequest};
use mygram_types::models::Comment;

use super::{ensure_owner, require_text};
use crate::error::ServiceResult;

pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    photos: Arc<dyn PhotoRepository>,
    users: Arc<dyn UserRepository>,
}

impl CommentService {
    pub fn new(
        comments: Arc<dyn CommentRepository>,
        photos: Arc<dyn PhotoRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self { comments, photos, users }
    }

    pub fn list(&self) -> ServiceResult<Vec<Comment>> {
        Ok(self.comments.list()?)
    }

    pub fn list_by_photo(&self, photo_id: Uuid) -> ServiceResult<Vec<Comment>> {
        self.photos.get_by_id(photo_id)?;
        Ok(self.comments.list_by_photo(photo_id)?)
    }

    pub fn get(&self, id: Uuid) -> ServiceResult<Comment> {
        Ok(self.comments.get_by_id(id)?)
    }

    pub fn create(&self, actor: Uuid, req: CreateCommentRequest) -> ServiceResult<Comment> {
        require_text(&req.message, "message")?;
        self.users.get_by_id(actor)?;
        self.photos.get_by_id(req.photo_id)?;

        let now = Utc::now();
        let comment = Comment {
            id: Uuid::new_v4(),
            message: req.message.trim().to_string(),
            user_id: actor,
            photo_id: req.photo_id,
            created_at: now,
            updated_at: now,
        };

        Ok(self.comments.create(&comment)?)
    }

    pub fn update(&self, id: Uuid, actor: Uuid, req: UpdateCommentRequest) -> ServiceResult<Comment> {
        let mut comment = self.comments.get_by_id(id)?;
        ensure_owner(comment.user_id, actor, "cannot modify another user's comment")?;
        require_text(&req.message, "message")?;

        comment.message = req.message.trim().to_string();
        comment.updated_at = Utc::now();

        Ok(self.comments.update(&comment)?)
    }

    pub fn delete(&self, id: Uuid, actor: Uuid) -> ServiceResult<()> {
        let comment = self.comments.get_by_id(id)?;
        ensure_owner(comment.user_id, actor, "cannot delete another user's comment")?;
        Ok(self.comments.delete(id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::service::fakes::{FakeComments, FakePhotos, FakeUsers};
    use chrono::NaiveDate;
    use mygram_types::models::{Photo, User};

    struct Fixture {
        users: Arc<FakeUsers>,
        photos: Arc<FakePhotos>,
        svc: CommentService,
    }

    fn setup() -> Fixture {
        let users = Arc::new(FakeUsers::new());
        let photos = Arc::new(FakePhotos::new());
        let svc = CommentService::new(Arc::new(FakeComments::new()), photos.clone(), users.clone());
        Fixture { users, photos, svc }
    }

    fn user(repo: &FakeUsers, name: &str) -> User {
        let now = Utc::now();
        repo.create(&User {
            id: Uuid::new_v4(),
            username: name.into(),
            email: format!("{}@example.com", name),
            password: "hash".into(),
            dob: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            created_at: now,
            updated_at: now,
        })
        .unwrap()
    }

    fn photo(repo: &FakePhotos, owner: Uuid) -> Photo {
        let now = Utc::now();
        repo.create(&Photo {
            id: Uuid::new_v4(),
            title: "sunset".into(),
            url: "https://cdn.example.com/sunset.jpg".into(),
            caption: String::new(),
            user_id: owner,
            created_at: now,
            updated_at: now,
        })
        .unwrap()
    }

    fn comment(message: &str, photo_id: Uuid) -> CreateCommentRequest {
        CreateCommentRequest { message: message.into(), photo_id }
    }

    #[test]
    fn comment_on_existing_photo() {
        let f = setup();
        let author = user(&f.users, "alice");
        let p = photo(&f.photos, Uuid::new_v4());

        let c = f.svc.create(author.id, comment("nice shot", p.id)).unwrap();
        assert_eq!(c.user_id, author.id);
        assert_eq!(f.svc.list_by_photo(p.id).unwrap(), vec![c]);
    }

    #[test]
    fn comment_on_missing_photo_is_not_found() {
        let f = setup();
        let author = user(&f.users, "alice");
        let err = f.svc.create(author.id, comment("hello", Uuid::new_v4())).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound("photo")));
    }

    #[test]
    fn unknown_author_cannot_comment() {
        let f = setup();
        let p = photo(&f.photos, Uuid::new_v4());
        let err = f.svc.create(Uuid::new_v4(), comment("hello", p.id)).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound("user")));

        let gone = user(&f.users, "ghost");
        f.users.delete(gone.id).unwrap();
        let err = f.svc.create(gone.id, comment("still here?", p.id)).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound("user")));
        assert!(f.svc.list().unwrap().is_empty());
    }

    #[test]
    fn message_is_trimmed() {
        let f = setup();
        let author = user(&f.users, "alice");
        let p = photo(&f.photos, Uuid::new_v4());

        let c = f.svc.create(author.id, comment("  lovely light \n", p.id)).unwrap();
        assert_eq!(c.message, "lovely light");

        let edited = f
            .svc
            .update(c.id, author.id, UpdateCommentRequest { message: "\tedited  ".into() })
            .unwrap();
        assert_eq!(edited.message, "edited");
    }

    #[test]
    fn only_author_may_edit_or_delete() {
        let f = setup();
        let author = user(&f.users, "alice");
        let stranger = user(&f.users, "bob");
        let p = photo(&f.photos, author.id);
        let c = f.svc.create(author.id, comment("first", p.id)).unwrap();

        let edit = || UpdateCommentRequest { message: "edited".into() };
        assert!(matches!(f.svc.update(c.id, stranger.id, edit()), Err(ServiceError::Forbidden(_))));
        assert!(matches!(f.svc.delete(c.id, stranger.id), Err(ServiceError::Forbidden(_))));

        assert_eq!(f.svc.update(c.id, author.id, edit()).unwrap().message, "edited");
        f.svc.delete(c.id, author.id).unwrap();
        assert!(f.svc.list().unwrap().is_empty());
    }

    #[test]
    fn empty_message_is_rejected() {
        let f = setup();
        let author = user(&f.users, "alice");
        let p = photo(&f.photos, Uuid::new_v4());
        let err = f.svc.create(author.id, comment("", p.id)).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
