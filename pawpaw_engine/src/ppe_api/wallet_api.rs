use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{Gift, NewGift, Wallet},
    traits::{GiftReceipt, WalletApiError, WalletManagement},
};

/// `WalletApi` fronts the coin ledger: lazy wallet reads and the atomic gift transfer.
pub struct WalletApi<B> {
    db: B,
}

impl<B> Debug for WalletApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WalletApi")
    }
}

impl<B> WalletApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> WalletApi<B>
where B: WalletManagement
{
    /// The wallet for the given user, created with the default starting balance on first access.
    pub async fn wallet(&self, user_id: i64) -> Result<Wallet, WalletApiError> {
        self.db.fetch_or_create_wallet(user_id).await
    }

    /// Sends a gift. The kind has already been validated against the fixed catalogue by the time a
    /// `NewGift` exists; the cost is always the catalogue price. Insufficient funds is an expected
    /// outcome and leaves every balance untouched.
    pub async fn send_gift(&self, gift: NewGift) -> Result<GiftReceipt, WalletApiError> {
        let receipt = self.db.process_gift(gift).await?;
        trace!(
            "💰️ Gift [{}] sent; user {} now has {}",
            receipt.gift.id,
            receipt.gift.sender_id,
            receipt.new_sender_balance
        );
        Ok(receipt)
    }

    pub async fn gifts_received(&self, user_id: i64) -> Result<Vec<Gift>, WalletApiError> {
        self.db.fetch_gifts_for_receiver(user_id).await
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
