use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use mygram_db::{SocialRepository, UserRepository};
use mygram_types::api::SocialRequest;
use mygram_types::models::Social;

use super::{ensure_owner, require_text};
use crate::error::ServiceResult;

pub struct SocialService {
    socials: Arc<dyn SocialRepository>,
    users: Arc<dyn UserRepository>,
}

impl SocialService {
    pub fn new(socials: Arc<dyn SocialRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { socials, users }
    }

    pub fn list(&self) -> ServiceResult<Vec<Social>> {
        Ok(self.socials.list()?)
    }

    pub fn list_by_user(&self, user_id: Uuid) -> ServiceResult<Vec<Social>> {
        self.users.get_by_id(user_id)?;
        Ok(self.socials.list_by_user(user_id)?)
    }

    pub fn get(&self, id: Uuid) -> ServiceResult<Social> {
        Ok(self.socials.get_by_id(id)?)
    }

    pub fn create(&self, actor: Uuid, req: SocialRequest) -> ServiceResult<Social> {
        validate(&req)?;
        self.users.get_by_id(actor)?;

        let now = Utc::now();
        let social = Social {
            id: Uuid::new_v4(),
            name: req.name.trim().to_string(),
            url: req.url.trim().to_string(),
            user_id: actor,
            created_at: now,
            updated_at: now,
        };

        Ok(self.socials.create(&social)?)
    }

    pub fn update(&self, id: Uuid, actor: Uuid, req: SocialRequest) -> ServiceResult<Social> {
        let mut social = self.socials.get_by_id(id)?;
        ensure_owner(social.user_id, actor, "cannot modify another user's social link")?;
        validate(&req)?;

        social.name = req.name.trim().to_string();
        social.url = req.url.trim().to_string();
        social.updated_at = Utc::now();

        Ok(self.socials.update(&social)?)
    }

    pub fn delete(&self, id: Uuid, actor: Uuid) -> ServiceResult<()> {
        let social = self.socials.get_by_id(id)?;
        ensure_owner(social.user_id, actor, "cannot delete another user's social link")?;
        Ok(self.socials.delete(id)?)
    }
}

fn validate(req: &SocialRequest) -> ServiceResult<()> {
    require_text(&req.name, "name")?;
    require_text(&req.url, "url")
}
