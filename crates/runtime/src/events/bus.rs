//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

use super::types::{MovementEvent, ScanEvent, SkillEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Scan requests, digests, cache changes
    Scan,
    /// March planning and submission outcomes
    Movement,
    /// Skill gate decisions
    Skill,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Scan(ScanEvent),
    Movement(MovementEvent),
    Skill(SkillEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Scan(_) => Topic::Scan,
            Event::Movement(_) => Topic::Movement,
            Event::Skill(_) => Topic::Skill,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about.
pub struct EventBus {
    channels: Arc<RwLock<HashMap<Topic, broadcast::Sender<Event>>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let mut channels = HashMap::new();

        // Pre-create channels for each topic
        channels.insert(Topic::Scan, broadcast::channel(capacity).0);
        channels.insert(Topic::Movement, broadcast::channel(capacity).0);
        channels.insert(Topic::Skill, broadcast::channel(capacity).0);

        Self {
            channels: Arc::new(RwLock::new(channels)),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();

        // Use try_read to avoid blocking in async context
        // If we can't get the lock, just skip (events are best-effort)
        match self.channels.try_read() {
            Ok(channels) => {
                if let Some(tx) = channels.get(&topic)
                    && tx.send(event).is_err()
                {
                    // No subscribers for this topic - this is normal, not an error
                    tracing::trace!("No subscribers for topic {:?}", topic);
                }
            }
            Err(_) => {
                // Failed to acquire lock - event bus is likely under heavy contention
                // This is best-effort, so we skip the event
                tracing::debug!("Failed to acquire event bus lock for topic {:?}", topic);
            }
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        let channels = self
            .channels
            .try_read()
            .expect("Failed to acquire read lock on event channels");
        channels
            .get(&topic)
            .expect("Topic channel not initialized")
            .subscribe()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nav_core::Direction;

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::new();
        let mut scan_rx = bus.subscribe(Topic::Scan);
        let mut movement_rx = bus.subscribe(Topic::Movement);

        bus.publish(Event::Scan(ScanEvent::Requested {
            direction: Direction::East,
        }));
        bus.publish(Event::Movement(MovementEvent::Blocked {
            direction: Direction::East,
            reason: "no scan data".into(),
        }));

        let scan_event = scan_rx.recv().await.unwrap();
        assert!(matches!(scan_event, Event::Scan(_)));
        let movement_event = movement_rx.recv().await.unwrap();
        assert!(matches!(movement_event, Event::Movement(_)));
        assert!(scan_rx.try_recv().is_err());
    }
}
