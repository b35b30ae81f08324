use mockall::mock;
use pawpaw_engine::{
    db_types::{Gift, NewGift, NewProfile, PetProfile, Wallet},
    traits::{GiftReceipt, ProfileApiError, ProfileManagement, WalletApiError, WalletManagement},
};

mock! {
    pub ProfileManager {}
    impl ProfileManagement for ProfileManager {
        async fn create_profile(&self, profile: NewProfile) -> Result<PetProfile, ProfileApiError>;
        async fn fetch_profile(&self, profile_id: i64) -> Result<Option<PetProfile>, ProfileApiError>;
        async fn fetch_profile_for_owner(&self, owner_id: i64) -> Result<Option<PetProfile>, ProfileApiError>;
        async fn delete_profile(&self, profile_id: i64) -> Result<(), ProfileApiError>;
        async fn discovery_feed(&self, user_id: i64, limit: u32) -> Result<Vec<PetProfile>, ProfileApiError>;
    }
}

mock! {
    pub WalletManager {}
    impl WalletManagement for WalletManager {
        async fn fetch_or_create_wallet(&self, user_id: i64) -> Result<Wallet, WalletApiError>;
        async fn process_gift(&self, gift: NewGift) -> Result<GiftReceipt, WalletApiError>;
        async fn fetch_gifts_for_receiver(&self, user_id: i64) -> Result<Vec<Gift>, WalletApiError>;
    }
}
