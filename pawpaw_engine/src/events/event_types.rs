use crate::{
    db_types::{PetMatch, PetProfile},
    traits::MatchDetails,
};

/// Emitted exactly once per newly-created match, by the request that actually inserted the match
/// row. Carries both full profiles so subscribers can notify either side without a database trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchFoundEvent {
    pub record: PetMatch,
    pub profile_a: PetProfile,
    pub profile_b: PetProfile,
}

impl MatchFoundEvent {
    pub fn new(record: PetMatch, profile_a: PetProfile, profile_b: PetProfile) -> Self {
        Self { record, profile_a, profile_b }
    }
}

impl From<&MatchDetails> for MatchFoundEvent {
    fn from(details: &MatchDetails) -> Self {
        Self::new(details.record.clone(), details.profile_a.clone(), details.profile_b.clone())
    }
}
