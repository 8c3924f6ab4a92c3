//! Business rules on top of the repositories: existence, ownership and
//! duplicate checks, credential verification. Services are synchronous; the
//! handlers run them on the blocking pool.

pub mod comments;
pub mod photos;
pub mod socials;
pub mod users;

pub use comments::CommentService;
pub use photos::PhotoService;
pub use socials::SocialService;
pub use users::UserService;

use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};

fn require_text(value: &str, field: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Rejects a mutation by anyone other than the owning user.
fn ensure_owner(owner: Uuid, actor: Uuid, message: &'static str) -> ServiceResult<()> {
    if owner != actor {
        return Err(ServiceError::Forbidden(message));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod fakes;
