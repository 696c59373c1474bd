//! User entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserEntity> for domain::models::User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            email: entity.email,
            password_hash: entity.password_hash,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Public columns of a user, used for directory listings.
#[derive(Debug, Clone, FromRow)]
pub struct PublicUserEntity {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl From<PublicUserEntity> for domain::models::PublicUser {
    fn from(entity: PublicUserEntity) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            email: entity.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::{PublicUser, User};

    #[test]
    fn test_user_entity_to_domain() {
        let entity = UserEntity {
            id: Uuid::new_v4(),
            username: "Carol".to_string(),
            email: "carol@example.com".to_string(),
            password_hash: "$argon2id$hash".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let user: User = entity.clone().into();
        assert_eq!(user.id, entity.id);
        assert_eq!(user.username, "Carol");
        assert_eq!(user.password_hash, entity.password_hash);
    }

    #[test]
    fn test_public_user_entity_to_domain() {
        let id = Uuid::new_v4();
        let user: PublicUser = PublicUserEntity {
            id,
            username: "dave".to_string(),
            email: "dave@example.com".to_string(),
        }
        .into();
        assert_eq!(user.id, id);
        assert_eq!(user.email, "dave@example.com");
    }
}
