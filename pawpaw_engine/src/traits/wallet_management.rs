use pp_common::Coins;
use thiserror::Error;

use crate::{
    db_types::{Gift, NewGift, Wallet},
    traits::GiftReceipt,
};

/// The coin ledger. Wallets are created lazily with a fixed starting balance, and only ever mutate
/// through the operations here — a debit that has passed the sufficiency check, or a lifetime-earned
/// credit.
#[allow(async_fn_in_trait)]
pub trait WalletManagement {
    /// Fetches the wallet for the given user, creating it with the default starting balance if it
    /// does not exist yet. The creation is an atomic insert-if-absent, so two concurrent first
    /// touches converge on one wallet row.
    async fn fetch_or_create_wallet(&self, user_id: i64) -> Result<Wallet, WalletApiError>;

    /// Processes a gift in a single atomic transaction:
    /// * lazily creates both wallets,
    /// * conditionally debits the sender (`balance >= cost`, else
    ///   [`WalletApiError::InsufficientFunds`] with **no** mutation),
    /// * credits the receiver's `total_earned`,
    /// * records the immutable gift row.
    ///
    /// A failure at any step rolls the whole unit back; a partial debit is never observable.
    async fn process_gift(&self, gift: NewGift) -> Result<GiftReceipt, WalletApiError>;

    /// All gifts received by the given user, newest first.
    async fn fetch_gifts_for_receiver(&self, user_id: i64) -> Result<Vec<Gift>, WalletApiError>;
}

#[derive(Debug, Clone, Error)]
pub enum WalletApiError {
    #[error("There is an internal database engine error: {0}")]
    DatabaseError(String),
    #[error("Insufficient funds: balance is {balance}, but {required} is required")]
    InsufficientFunds { balance: Coins, required: Coins },
}

impl From<sqlx::Error> for WalletApiError {
    fn from(e: sqlx::Error) -> Self {
        WalletApiError::DatabaseError(e.to_string())
    }
}
