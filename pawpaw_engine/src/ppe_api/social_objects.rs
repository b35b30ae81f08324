use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db_types::{PetMatch, PetProfile};

/// The public face of a pet profile, as embedded in match views and push payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub id: i64,
    pub name: String,
    pub photo_url: Option<String>,
}

impl From<&PetProfile> for ProfileSummary {
    fn from(profile: &PetProfile) -> Self {
        Self { id: profile.id, name: profile.name.clone(), photo_url: profile.photo_url.clone() }
    }
}

/// A match from one participant's perspective. `pet` is the partner's profile summary; it is absent
/// when the partner has since deleted their profile (the match itself is never deleted).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    pub id: i64,
    pub matched_at: DateTime<Utc>,
    pub pet: Option<ProfileSummary>,
}

impl MatchView {
    pub fn new(record: &PetMatch, partner_profile: Option<&PetProfile>) -> Self {
        Self { id: record.id, matched_at: record.created_at, pet: partner_profile.map(ProfileSummary::from) }
    }
}
