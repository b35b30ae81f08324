use thiserror::Error;

use crate::{
    db_types::{NewSwipe, PetMatch},
    traits::{ProfileApiError, ProfileManagement, SwipeOutcome},
};

/// The highest level of behaviour for backends supporting the PawPaw engine's matching flow.
///
/// This behaviour includes:
/// * Recording swipe decisions and enforcing their uniqueness.
/// * Maintaining the denormalised likes counter.
/// * Detecting mutual likes and creating matches exactly once per pair.
#[allow(async_fn_in_trait)]
pub trait SocialGatewayDatabase: Clone + ProfileManagement {
    /// The URL of the database
    fn url(&self) -> &str;

    /// Records a swipe and, in the same atomic transaction, runs its downstream effects:
    /// the likes counter (for a `Like`) and the mutual-match check.
    ///
    /// The sequence inside the transaction is strictly Recorder → Counter → Detector:
    /// * The swiped profile must exist ([`SocialGatewayError::ProfileNotFound`]) and must not belong
    ///   to the swiper ([`SocialGatewayError::SelfSwipe`]).
    /// * The insert is guarded by the `(swiper, profile)` uniqueness invariant. A duplicate aborts
    ///   the whole operation with [`SocialGatewayError::AlreadySwiped`]; no downstream effect runs.
    /// * A mutual like inserts a match guarded by pair uniqueness. Losing a race against the
    ///   reverse swipe is not an error: the existing match is fetched and returned with
    ///   `match_created = false`.
    async fn record_swipe(&self, swipe: NewSwipe) -> Result<SwipeOutcome, SocialGatewayError>;

    /// Fetches the match for the unordered user pair, if one exists.
    async fn fetch_match_for_pair(&self, user_1: i64, user_2: i64) -> Result<Option<PetMatch>, SocialGatewayError>;

    /// Fetches all matches the given user participates in, newest first.
    async fn fetch_matches_for_user(&self, user_id: i64) -> Result<Vec<PetMatch>, SocialGatewayError>;

    /// Recomputes a profile's like count from the swipe rows. The denormalised `likes_count` is
    /// best-effort; this is the reconciliation query when the counter is in doubt.
    async fn count_likes_from_swipes(&self, profile_id: i64) -> Result<i64, SocialGatewayError>;

    /// Closes the database connection.
    async fn close(&mut self) -> Result<(), SocialGatewayError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Error)]
pub enum SocialGatewayError {
    #[error("There is an internal database engine error: {0}")]
    DatabaseError(String),
    #[error("Pet profile {0} does not exist")]
    ProfileNotFound(i64),
    #[error("Users cannot swipe on their own pet's profile")]
    SelfSwipe,
    #[error("User {user_id} has already swiped on profile {profile_id}")]
    AlreadySwiped { user_id: i64, profile_id: i64 },
}

impl From<sqlx::Error> for SocialGatewayError {
    fn from(e: sqlx::Error) -> Self {
        SocialGatewayError::DatabaseError(e.to_string())
    }
}

impl From<ProfileApiError> for SocialGatewayError {
    fn from(e: ProfileApiError) -> Self {
        match e {
            ProfileApiError::ProfileNotFound(id) => SocialGatewayError::ProfileNotFound(id),
            other => SocialGatewayError::DatabaseError(other.to_string()),
        }
    }
}
