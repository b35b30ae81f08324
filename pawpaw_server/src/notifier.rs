//! Best-effort push delivery for match events.
//!
//! The registry maps user ids onto their currently-open real-time connections. It is injected as a
//! collaborator so that the in-memory implementation here can be swapped for a multi-instance-aware
//! pub/sub without touching any match logic. Delivery is a convenience UX signal: if a user is not
//! connected, the event is dropped, and the match stays discoverable through the match list.
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
        RwLock,
    },
};

use log::*;
use pawpaw_engine::{events::MatchFoundEvent, social_objects::ProfileSummary};
use serde::Serialize;
use tokio::sync::mpsc;

/// A one-way event pushed over a user's live connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PushEvent {
    Match { pet: ProfileSummary },
}

pub type PushSender = mpsc::UnboundedSender<PushEvent>;

/// The connection-registry collaborator: register/unregister live connections, and deliver to a
/// user *if* they are connected. No queueing, no retry, no delivery guarantee.
pub trait ConnectionRegistry: Send + Sync {
    /// Registers a live connection for the user and returns a handle for unregistering it.
    fn register(&self, user_id: i64, sender: PushSender) -> u64;

    fn unregister(&self, user_id: i64, handle: u64);

    /// Sends the event to each of the user's live connections, returning how many received it.
    /// Zero is a perfectly normal answer.
    fn send_if_present(&self, user_id: i64, event: &PushEvent) -> usize;
}

#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    connections: RwLock<HashMap<i64, Vec<(u64, PushSender)>>>,
    next_handle: AtomicU64,
}

impl ConnectionRegistry for InMemoryConnectionRegistry {
    fn register(&self, user_id: i64, sender: PushSender) -> u64 {
        let handle = self.next_handle.fetch_add(1, Ordering::Relaxed);
        let mut map = self.connections.write().unwrap();
        map.entry(user_id).or_default().push((handle, sender));
        trace!("📡️ Connection {handle} registered for user {user_id}");
        handle
    }

    fn unregister(&self, user_id: i64, handle: u64) {
        let mut map = self.connections.write().unwrap();
        if let Some(senders) = map.get_mut(&user_id) {
            senders.retain(|(h, _)| *h != handle);
            if senders.is_empty() {
                map.remove(&user_id);
            }
        }
        trace!("📡️ Connection {handle} unregistered for user {user_id}");
    }

    fn send_if_present(&self, user_id: i64, event: &PushEvent) -> usize {
        let mut map = self.connections.write().unwrap();
        let Some(senders) = map.get_mut(&user_id) else {
            return 0;
        };
        // A closed sender means the connection went away without unregistering; prune as we go.
        senders.retain(|(_, sender)| sender.send(event.clone()).is_ok());
        let delivered = senders.len();
        if senders.is_empty() {
            map.remove(&user_id);
        }
        delivered
    }
}

/// Builds the `on_match_found` hook: a one-shot push to both matched users' live connections.
/// Offline users are skipped silently — non-delivery is not an error.
pub fn match_found_hook(
    registry: Arc<dyn ConnectionRegistry>,
) -> impl Fn(MatchFoundEvent) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync + 'static {
    move |event: MatchFoundEvent| {
        let registry = Arc::clone(&registry);
        Box::pin(async move {
            let MatchFoundEvent { record, profile_a, profile_b } = event;
            // Each user is shown the *partner's* pet.
            let for_a = PushEvent::Match { pet: ProfileSummary::from(&profile_b) };
            let for_b = PushEvent::Match { pet: ProfileSummary::from(&profile_a) };
            let sent_a = registry.send_if_present(record.user_a, &for_a);
            let sent_b = registry.send_if_present(record.user_b, &for_b);
            debug!(
                "📡️ Match [{}] push: {sent_a} connection(s) for user {}, {sent_b} for user {}",
                record.id, record.user_a, record.user_b
            );
        }) as Pin<Box<dyn Future<Output = ()> + Send>>
    }
}
