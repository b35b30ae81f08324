use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewSwipe, PetMatch},
    events::{EventProducers, MatchFoundEvent},
    traits::{SocialGatewayDatabase, SocialGatewayError, SwipeOutcome},
};

/// `SwipeFlowApi` is the primary API for the discovery flow: recording swipe decisions and
/// reacting to the mutual matches they produce.
pub struct SwipeFlowApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B> Debug for SwipeFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SwipeFlowApi")
    }
}

impl<B> SwipeFlowApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }
}

impl<B> SwipeFlowApi<B>
where B: SocialGatewayDatabase
{
    /// Submit a swipe decision.
    ///
    /// The whole Recorder → Counter → Detector sequence runs atomically in the backend. If this
    /// call created a match (as opposed to being handed an existing one by a concurrent racer),
    /// the `MatchFound` hook subscribers are notified — exactly once per match.
    pub async fn record_swipe(&self, swipe: NewSwipe) -> Result<SwipeOutcome, SocialGatewayError> {
        let outcome = self.db.record_swipe(swipe).await?;
        if outcome.match_created {
            if let Some(details) = &outcome.matched {
                trace!(
                    "🐾️ Swipe [{}] completed a mutual like for pair ({}, {})",
                    outcome.swipe.id,
                    details.record.user_a,
                    details.record.user_b
                );
                self.call_match_found_hook(MatchFoundEvent::from(details)).await;
            }
        }
        Ok(outcome)
    }

    async fn call_match_found_hook(&self, event: MatchFoundEvent) {
        for emitter in &self.producers.match_found_producer {
            debug!("🐾️ Notifying match-found hook subscribers");
            emitter.publish_event(event.clone()).await;
        }
    }

    pub async fn matches_for_user(&self, user_id: i64) -> Result<Vec<PetMatch>, SocialGatewayError> {
        self.db.fetch_matches_for_user(user_id).await
    }

    pub async fn match_for_pair(&self, user_1: i64, user_2: i64) -> Result<Option<PetMatch>, SocialGatewayError> {
        self.db.fetch_match_for_pair(user_1, user_2).await
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
