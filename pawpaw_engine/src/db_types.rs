use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
pub use pp_common::Coins;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

/// Every wallet starts life with this balance, whether it is created on a first read or as a
/// side effect of a first gift.
pub const DEFAULT_STARTING_BALANCE: i64 = 100;

#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ConversionError(String);

//--------------------------------------    PetProfile     -----------------------------------------------------------
/// A pet profile as stored. `likes_count` is a denormalised popularity counter, mutated only by the
/// swipe flow; the swipe rows remain the source of truth.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct PetProfile {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub species: String,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub likes_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------    NewProfile     -----------------------------------------------------------
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub owner_id: i64,
    pub name: String,
    pub species: String,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
}

impl NewProfile {
    pub fn new<S: Into<String>>(owner_id: i64, name: S) -> Self {
        Self { owner_id, name: name.into(), species: "dog".to_string(), bio: None, photo_url: None }
    }

    pub fn with_species<S: Into<String>>(mut self, species: S) -> Self {
        self.species = species.into();
        self
    }

    pub fn with_bio<S: Into<String>>(mut self, bio: S) -> Self {
        self.bio = Some(bio.into());
        self
    }

    pub fn with_photo_url<S: Into<String>>(mut self, url: S) -> Self {
        self.photo_url = Some(url.into());
        self
    }
}

//--------------------------------------   SwipeDecision   -----------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDecision {
    Like,
    Pass,
}

impl Display for SwipeDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwipeDecision::Like => write!(f, "Like"),
            SwipeDecision::Pass => write!(f, "Pass"),
        }
    }
}

impl FromStr for SwipeDecision {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "like" => Ok(Self::Like),
            "pass" => Ok(Self::Pass),
            s => Err(ConversionError(format!("Invalid swipe decision: {s}"))),
        }
    }
}

//--------------------------------------      Swipe        -----------------------------------------------------------
/// A single recorded swipe. Immutable once created; at most one exists per
/// `(swiper_id, profile_id)` pair, and the first write wins.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Swipe {
    pub id: i64,
    pub swiper_id: i64,
    pub profile_id: i64,
    pub decision: SwipeDecision,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------     NewSwipe      -----------------------------------------------------------
#[derive(Debug, Clone)]
pub struct NewSwipe {
    pub swiper_id: i64,
    pub profile_id: i64,
    pub decision: SwipeDecision,
}

impl NewSwipe {
    pub fn new(swiper_id: i64, profile_id: i64, decision: SwipeDecision) -> Self {
        Self { swiper_id, profile_id, decision }
    }

    pub fn like(swiper_id: i64, profile_id: i64) -> Self {
        Self::new(swiper_id, profile_id, SwipeDecision::Like)
    }

    pub fn pass(swiper_id: i64, profile_id: i64) -> Self {
        Self::new(swiper_id, profile_id, SwipeDecision::Pass)
    }
}

//--------------------------------------     PetMatch      -----------------------------------------------------------
/// A mutual match between two users. The pair is stored normalised (`user_a < user_b`) so that the
/// unordered-pair uniqueness invariant maps onto a plain unique constraint. Never deleted.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct PetMatch {
    pub id: i64,
    pub user_a: i64,
    pub user_b: i64,
    pub profile_a: i64,
    pub profile_b: i64,
    pub created_at: DateTime<Utc>,
}

impl PetMatch {
    /// The other participant's user id, from the perspective of `user_id`.
    pub fn partner_of(&self, user_id: i64) -> i64 {
        if self.user_a == user_id {
            self.user_b
        } else {
            self.user_a
        }
    }

    /// The other participant's profile id, from the perspective of `user_id`.
    pub fn partner_profile_of(&self, user_id: i64) -> i64 {
        if self.user_a == user_id {
            self.profile_b
        } else {
            self.profile_a
        }
    }
}

//--------------------------------------    MatchPair      -----------------------------------------------------------
/// The candidate for a new match. Construction normalises the pair ordering, so the storage layer
/// never sees `{A,B}` and `{B,A}` as different pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPair {
    pub user_a: i64,
    pub profile_a: i64,
    pub user_b: i64,
    pub profile_b: i64,
}

impl MatchPair {
    pub fn new(user_1: i64, profile_1: i64, user_2: i64, profile_2: i64) -> Self {
        if user_1 <= user_2 {
            Self { user_a: user_1, profile_a: profile_1, user_b: user_2, profile_b: profile_2 }
        } else {
            Self { user_a: user_2, profile_a: profile_2, user_b: user_1, profile_b: profile_1 }
        }
    }
}

//--------------------------------------      Wallet       -----------------------------------------------------------
/// Per-user coin wallet. `balance` only decreases through debits that have passed the sufficiency
/// check; `total_earned` is a lifetime counter that is unaffected by spending.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Wallet {
    pub user_id: i64,
    pub balance: Coins,
    pub total_earned: Coins,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------     GiftKind      -----------------------------------------------------------
/// The fixed gift catalogue. Prices are part of the domain; a gift row always records the catalogue
/// price at send time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GiftKind {
    Toy,
    Treat,
    Steak,
}

impl GiftKind {
    pub const ALL: [GiftKind; 3] = [GiftKind::Toy, GiftKind::Treat, GiftKind::Steak];

    pub fn price(&self) -> Coins {
        match self {
            GiftKind::Toy => Coins::from(50),
            GiftKind::Treat => Coins::from(150),
            GiftKind::Steak => Coins::from(500),
        }
    }
}

impl Display for GiftKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GiftKind::Toy => write!(f, "Toy"),
            GiftKind::Treat => write!(f, "Treat"),
            GiftKind::Steak => write!(f, "Steak"),
        }
    }
}

impl FromStr for GiftKind {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "toy" => Ok(Self::Toy),
            "treat" => Ok(Self::Treat),
            "steak" => Ok(Self::Steak),
            s => Err(ConversionError(format!("Unrecognised gift kind: {s}"))),
        }
    }
}

//--------------------------------------       Gift        -----------------------------------------------------------
/// An immutable gift ledger entry.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Gift {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub kind: GiftKind,
    pub coin_value: Coins,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------      NewGift      -----------------------------------------------------------
#[derive(Debug, Clone)]
pub struct NewGift {
    pub sender_id: i64,
    pub receiver_id: i64,
    pub kind: GiftKind,
}

impl NewGift {
    pub fn new(sender_id: i64, receiver_id: i64, kind: GiftKind) -> Self {
        Self { sender_id, receiver_id, kind }
    }

    pub fn cost(&self) -> Coins {
        self.kind.price()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn match_pair_is_normalised() {
        let p = MatchPair::new(42, 7, 13, 9);
        assert_eq!(p, MatchPair { user_a: 13, profile_a: 9, user_b: 42, profile_b: 7 });
        assert_eq!(p, MatchPair::new(13, 9, 42, 7));
    }

    #[test]
    fn gift_kinds_parse_case_insensitively() {
        assert_eq!("STEAK".parse::<GiftKind>().unwrap(), GiftKind::Steak);
        assert_eq!("toy".parse::<GiftKind>().unwrap(), GiftKind::Toy);
        assert!("sausage".parse::<GiftKind>().is_err());
    }

    #[test]
    fn gift_prices_are_positive() {
        for kind in GiftKind::ALL {
            assert!(kind.price().is_positive(), "{kind} must have a positive price");
        }
    }

    #[test]
    fn swipe_decisions_parse() {
        assert_eq!("like".parse::<SwipeDecision>().unwrap(), SwipeDecision::Like);
        assert_eq!("Pass".parse::<SwipeDecision>().unwrap(), SwipeDecision::Pass);
        assert!("superlike".parse::<SwipeDecision>().is_err());
    }

    #[test]
    fn match_partner_views() {
        let m = PetMatch { id: 1, user_a: 3, user_b: 9, profile_a: 30, profile_b: 90, created_at: Utc::now() };
        assert_eq!(m.partner_of(3), 9);
        assert_eq!(m.partner_of(9), 3);
        assert_eq!(m.partner_profile_of(3), 90);
        assert_eq!(m.partner_profile_of(9), 30);
    }
}
