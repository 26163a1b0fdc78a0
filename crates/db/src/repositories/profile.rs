//! Profile repository.

use async_trait::async_trait;
use sasper_core::records::Profile;
use sasper_core::store::{ProfileStore, StoreError};
use sea_orm::{DatabaseConnection, EntityTrait};

use super::{db_error, parse_user_id};
use crate::entities::profiles;

/// Reads user profiles and their push tokens.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    db: DatabaseConnection,
}

impl ProfileRepository {
    /// Creates a new profile repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl profiles::Model {
    /// Converts the row into a profile. A blank token becomes no token.
    ///
    /// # Errors
    ///
    /// Never fails for a row read from the table; the id is always set.
    pub fn into_record(self) -> Result<Profile, StoreError> {
        Profile::new(self.id.to_string(), self.fcm_token)
            .map_err(|e| StoreError::malformed("profile", e))
    }
}

#[async_trait]
impl ProfileStore for ProfileRepository {
    async fn find_profile(&self, user_id: &str) -> Result<Option<Profile>, StoreError> {
        let Some(user_id) = parse_user_id(user_id) else {
            return Ok(None);
        };

        profiles::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(profiles::Model::into_record)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_blank_token_is_none() {
        let row = profiles::Model {
            id: Uuid::new_v4(),
            fcm_token: Some("  ".to_string()),
            updated_at: Utc::now().into(),
        };

        assert_eq!(row.into_record().unwrap().push_token(), None);
    }
}
