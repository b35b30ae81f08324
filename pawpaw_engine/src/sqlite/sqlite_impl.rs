//! `SqliteDatabase` is a concrete implementation of a PawPaw engine backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the traits defined in the
//! [`crate::traits`] module. Every multi-step operation runs as a single transaction, so the
//! invariants (swipe uniqueness, match-pair uniqueness, wallet non-negativity) hold under
//! concurrent requests with no in-memory coordination at all.
use std::fmt::Debug;

use log::*;
use sqlx::SqlitePool;

use super::db::{db_url, gifts, matches, new_pool, profiles, swipes, wallets};
use crate::{
    db_types::{MatchPair, NewGift, NewProfile, NewSwipe, PetMatch, PetProfile, SwipeDecision},
    traits::{
        GiftReceipt,
        MatchDetails,
        ProfileApiError,
        ProfileManagement,
        SocialGatewayDatabase,
        SocialGatewayError,
        SwipeOutcome,
        WalletApiError,
        WalletManagement,
    },
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SocialGatewayDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Records a swipe and, in the same atomic transaction,
    /// * verifies the swiped profile exists and is not the swiper's own,
    /// * inserts the swipe guarded by the pair-unique constraint (duplicates abort here, so no
    ///   downstream step ever runs for them),
    /// * bumps the likes counter for a `Like`,
    /// * probes for the reverse like and creates the match exactly once per pair.
    ///
    /// Committing the transaction makes the swipe durably visible atomically with its side effects.
    async fn record_swipe(&self, swipe: NewSwipe) -> Result<SwipeOutcome, SocialGatewayError> {
        let mut tx = self.pool.begin().await?;
        let target = profiles::fetch_profile(swipe.profile_id, &mut tx)
            .await?
            .ok_or(SocialGatewayError::ProfileNotFound(swipe.profile_id))?;
        if target.owner_id == swipe.swiper_id {
            return Err(SocialGatewayError::SelfSwipe);
        }
        let decision = swipe.decision;
        let stored = swipes::guarded_insert(swipe, &mut tx).await?;
        debug!("🗃️ Swipe [{}] by user {} on profile {} recorded", stored.id, stored.swiper_id, stored.profile_id);
        let mut outcome = SwipeOutcome { swipe: stored, matched: None, match_created: false };
        if decision == SwipeDecision::Like {
            if !profiles::increment_likes(target.id, &mut tx).await? {
                // The swipe row is the durable fact; the counter is best-effort denormalisation.
                warn!("🗃️ Profile {} vanished before its likes counter could be bumped", target.id);
            }
            let (matched, created) = self.check_and_create_match(&outcome.swipe, &target, &mut tx).await?;
            outcome.matched = matched;
            outcome.match_created = created;
        }
        tx.commit().await?;
        Ok(outcome)
    }

    async fn fetch_match_for_pair(&self, user_1: i64, user_2: i64) -> Result<Option<PetMatch>, SocialGatewayError> {
        let mut conn = self.pool.acquire().await?;
        matches::fetch_match_for_pair(user_1, user_2, &mut conn).await
    }

    async fn fetch_matches_for_user(&self, user_id: i64) -> Result<Vec<PetMatch>, SocialGatewayError> {
        let mut conn = self.pool.acquire().await?;
        matches::fetch_matches_for_user(user_id, &mut conn).await
    }

    async fn count_likes_from_swipes(&self, profile_id: i64) -> Result<i64, SocialGatewayError> {
        let mut conn = self.pool.acquire().await?;
        let count = profiles::recount_likes(profile_id, &mut conn).await?;
        Ok(count)
    }

    async fn close(&mut self) -> Result<(), SocialGatewayError> {
        self.pool.close().await;
        Ok(())
    }
}

impl ProfileManagement for SqliteDatabase {
    async fn create_profile(&self, profile: NewProfile) -> Result<PetProfile, ProfileApiError> {
        let mut conn = self.pool.acquire().await?;
        let profile = profiles::insert_profile(profile, &mut conn).await?;
        debug!("🗃️ Pet profile [{}] created for user {}", profile.id, profile.owner_id);
        Ok(profile)
    }

    async fn fetch_profile(&self, profile_id: i64) -> Result<Option<PetProfile>, ProfileApiError> {
        let mut conn = self.pool.acquire().await?;
        profiles::fetch_profile(profile_id, &mut conn).await
    }

    async fn fetch_profile_for_owner(&self, owner_id: i64) -> Result<Option<PetProfile>, ProfileApiError> {
        let mut conn = self.pool.acquire().await?;
        profiles::fetch_profile_for_owner(owner_id, &mut conn).await
    }

    async fn delete_profile(&self, profile_id: i64) -> Result<(), ProfileApiError> {
        let mut conn = self.pool.acquire().await?;
        if !profiles::delete_profile(profile_id, &mut conn).await? {
            return Err(ProfileApiError::ProfileNotFound(profile_id));
        }
        debug!("🗃️ Pet profile [{profile_id}] deleted");
        Ok(())
    }

    async fn discovery_feed(&self, user_id: i64, limit: u32) -> Result<Vec<PetProfile>, ProfileApiError> {
        let mut conn = self.pool.acquire().await?;
        profiles::discovery_feed(user_id, limit, &mut conn).await
    }
}

impl WalletManagement for SqliteDatabase {
    async fn fetch_or_create_wallet(&self, user_id: i64) -> Result<crate::db_types::Wallet, WalletApiError> {
        let mut tx = self.pool.begin().await?;
        wallets::ensure_wallet(user_id, &mut tx).await?;
        let wallet = wallets::fetch_wallet(user_id, &mut tx).await?.ok_or_else(|| {
            WalletApiError::DatabaseError(format!("Wallet for user {user_id} missing straight after creation"))
        })?;
        tx.commit().await?;
        Ok(wallet)
    }

    /// The gift state machine: check balance → debit sender → credit receiver → record gift, as one
    /// atomic unit. A failure anywhere leaves all three untouched; the sufficiency check and the
    /// debit are a single conditional `UPDATE`, so a concurrent transfer can never overdraw.
    async fn process_gift(&self, gift: NewGift) -> Result<GiftReceipt, WalletApiError> {
        let cost = gift.cost();
        let mut tx = self.pool.begin().await?;
        wallets::ensure_wallet(gift.sender_id, &mut tx).await?;
        wallets::ensure_wallet(gift.receiver_id, &mut tx).await?;
        let new_balance = match wallets::debit_balance(gift.sender_id, cost, &mut tx).await? {
            Some(balance) => balance,
            None => {
                let wallet = wallets::fetch_wallet(gift.sender_id, &mut tx).await?.ok_or_else(|| {
                    WalletApiError::DatabaseError(format!(
                        "Wallet for user {} missing straight after creation",
                        gift.sender_id
                    ))
                })?;
                debug!(
                    "🗃️ Gift of {cost} from user {} rejected: balance is only {}",
                    gift.sender_id, wallet.balance
                );
                return Err(WalletApiError::InsufficientFunds { balance: wallet.balance, required: cost });
            },
        };
        wallets::credit_earned(gift.receiver_id, cost, &mut tx).await?;
        let stored = gifts::insert_gift(gift, &mut tx).await?;
        tx.commit().await?;
        debug!(
            "🗃️ Gift [{}] of {} ({}) from user {} to user {} processed",
            stored.id, stored.coin_value, stored.kind, stored.sender_id, stored.receiver_id
        );
        Ok(GiftReceipt { gift: stored, new_sender_balance: new_balance })
    }

    async fn fetch_gifts_for_receiver(&self, user_id: i64) -> Result<Vec<crate::db_types::Gift>, WalletApiError> {
        let mut conn = self.pool.acquire().await?;
        gifts::fetch_gifts_for_receiver(user_id, &mut conn).await
    }
}

impl SqliteDatabase {
    /// Creates a new database API object
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// The Mutual-Match Detector. Only called for a freshly-recorded `Like`, inside the swipe
    /// transaction. A swiper without a profile of their own cannot be matched; that is a normal
    /// outcome, not a failure.
    async fn check_and_create_match(
        &self,
        swipe: &crate::db_types::Swipe,
        target: &PetProfile,
        tx: &mut sqlx::SqliteConnection,
    ) -> Result<(Option<MatchDetails>, bool), SocialGatewayError> {
        let own_profile = match profiles::fetch_profile_for_owner(swipe.swiper_id, &mut *tx).await? {
            Some(p) => p,
            None => {
                trace!("🗃️ User {} owns no profile; no match possible", swipe.swiper_id);
                return Ok((None, false));
            },
        };
        if !swipes::like_exists(target.owner_id, own_profile.id, &mut *tx).await? {
            return Ok((None, false));
        }
        let pair = MatchPair::new(swipe.swiper_id, own_profile.id, target.owner_id, target.id);
        let (record, created) = matches::idempotent_insert(pair, &mut *tx).await?;
        info!(
            "🗃️ It's a match! Users {} and {} (profiles {} and {})",
            record.user_a, record.user_b, record.profile_a, record.profile_b
        );
        let (profile_a, profile_b) = if record.user_a == swipe.swiper_id {
            (own_profile, target.clone())
        } else {
            (target.clone(), own_profile)
        };
        Ok((Some(MatchDetails { record, profile_a, profile_b }), created))
    }
}
