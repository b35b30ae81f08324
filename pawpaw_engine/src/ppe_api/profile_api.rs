use std::fmt::Debug;

use crate::{
    db_types::{NewProfile, PetProfile},
    traits::{ProfileApiError, ProfileManagement},
};

pub struct ProfileApi<B> {
    db: B,
}

impl<B> Debug for ProfileApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ProfileApi")
    }
}

impl<B> ProfileApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> ProfileApi<B>
where B: ProfileManagement
{
    pub async fn create_profile(&self, profile: NewProfile) -> Result<PetProfile, ProfileApiError> {
        self.db.create_profile(profile).await
    }

    pub async fn profile(&self, profile_id: i64) -> Result<Option<PetProfile>, ProfileApiError> {
        self.db.fetch_profile(profile_id).await
    }

    pub async fn profile_for_owner(&self, owner_id: i64) -> Result<Option<PetProfile>, ProfileApiError> {
        self.db.fetch_profile_for_owner(owner_id).await
    }

    pub async fn delete_profile(&self, profile_id: i64) -> Result<(), ProfileApiError> {
        self.db.delete_profile(profile_id).await
    }

    pub async fn discovery_feed(&self, user_id: i64, limit: u32) -> Result<Vec<PetProfile>, ProfileApiError> {
        self.db.discovery_feed(user_id, limit).await
    }
}
