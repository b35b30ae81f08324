use pp_common::Coins;

use crate::db_types::{Gift, PetMatch, PetProfile, Swipe};

/// The result of recording a swipe. `matched` is populated whenever the swipe completes a mutual
/// like; `match_created` distinguishes the request that actually inserted the match row from one
/// that lost the race and was handed the existing record.
#[derive(Debug, Clone)]
pub struct SwipeOutcome {
    pub swipe: Swipe,
    pub matched: Option<MatchDetails>,
    pub match_created: bool,
}

/// A match together with both profiles, aligned with the stored pair ordering
/// (`profile_a` belongs to `record.user_a`). Carries enough data to notify both users.
#[derive(Debug, Clone)]
pub struct MatchDetails {
    pub record: PetMatch,
    pub profile_a: PetProfile,
    pub profile_b: PetProfile,
}

impl MatchDetails {
    /// The partner's profile, from the perspective of `user_id`.
    pub fn partner_profile_of(&self, user_id: i64) -> &PetProfile {
        if self.record.user_a == user_id {
            &self.profile_b
        } else {
            &self.profile_a
        }
    }
}

/// The result of a successful gift transfer.
#[derive(Debug, Clone)]
pub struct GiftReceipt {
    pub gift: Gift,
    pub new_sender_balance: Coins,
}
