use chrono::{DateTime, Utc};
use pawpaw_engine::{
    db_types::{PetProfile, SwipeDecision},
    social_objects::MatchView,
    traits::GiftReceipt,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeRequest {
    pub profile_id: i64,
    pub decision: SwipeDecision,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeResponse {
    pub success: bool,
    /// Present only when this swipe completed a mutual like.
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub matched: Option<MatchView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftRequest {
    pub receiver_id: i64,
    /// One of the fixed catalogue kinds; anything else is rejected before any wallet is touched.
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftResponse {
    pub success: bool,
    pub new_balance: i64,
}

impl From<&GiftReceipt> for GiftResponse {
    fn from(receipt: &GiftReceipt) -> Self {
        Self { success: true, new_balance: receipt.new_sender_balance.value() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletResponse {
    pub balance: i64,
    pub total_earned: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftView {
    pub id: i64,
    pub sender_id: i64,
    pub kind: String,
    pub coin_value: i64,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfileRequest {
    pub name: String,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub species: String,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub likes_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&PetProfile> for ProfileResponse {
    fn from(p: &PetProfile) -> Self {
        Self {
            id: p.id,
            owner_id: p.owner_id,
            name: p.name.clone(),
            species: p.species.clone(),
            bio: p.bio.clone(),
            photo_url: p.photo_url.clone(),
            likes_count: p.likes_count,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedParams {
    #[serde(default = "default_feed_limit")]
    pub limit: u32,
}

fn default_feed_limit() -> u32 {
    20
}
/// A generic `{success, message}` body for endpoints with nothing better to say.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: std::fmt::Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }
}
