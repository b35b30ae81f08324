use thiserror::Error;

use crate::db_types::{NewProfile, PetProfile};

/// Pet-profile CRUD and discovery queries. Profiles are created and deleted by their owners only;
/// the matching logic never touches their lifecycle.
#[allow(async_fn_in_trait)]
pub trait ProfileManagement {
    /// Creates the profile for its owner. Each user owns at most one profile; a second create
    /// fails with [`ProfileApiError::ProfileAlreadyExists`].
    async fn create_profile(&self, profile: NewProfile) -> Result<PetProfile, ProfileApiError>;

    async fn fetch_profile(&self, profile_id: i64) -> Result<Option<PetProfile>, ProfileApiError>;

    async fn fetch_profile_for_owner(&self, owner_id: i64) -> Result<Option<PetProfile>, ProfileApiError>;

    /// Deletes the profile. Ownership is checked by the caller; storage only reports whether the
    /// profile existed.
    async fn delete_profile(&self, profile_id: i64) -> Result<(), ProfileApiError>;

    /// The discovery feed for a user: profiles they do not own and have not yet swiped on,
    /// newest first.
    async fn discovery_feed(&self, user_id: i64, limit: u32) -> Result<Vec<PetProfile>, ProfileApiError>;
}

#[derive(Debug, Clone, Error)]
pub enum ProfileApiError {
    #[error("There is an internal database engine error: {0}")]
    DatabaseError(String),
    #[error("Pet profile {0} does not exist")]
    ProfileNotFound(i64),
    #[error("User {0} already has a pet profile")]
    ProfileAlreadyExists(i64),
}

impl From<sqlx::Error> for ProfileApiError {
    fn from(e: sqlx::Error) -> Self {
        ProfileApiError::DatabaseError(e.to_string())
    }
}
