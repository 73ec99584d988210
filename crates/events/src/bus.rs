use crate::messages::{DashboardEvent, Notice};
use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 64;

/// A cheap, cloneable handle for publishing `DashboardEvent`s.
///
/// Publishing never fails: when nobody is listening the event is dropped.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DashboardEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: DashboardEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("No event listeners; event dropped.");
        }
    }

    pub fn notify(&self, notice: Notice) {
        self.publish(DashboardEvent::Notice(notice));
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A long-running listener that hands every received event to `handler`
/// until the channel closes.
pub async fn run_listener<F>(mut event_rx: broadcast::Receiver<DashboardEvent>, mut handler: F)
where
    F: FnMut(DashboardEvent),
{
    loop {
        match event_rx.recv().await {
            Ok(event) => handler(event),
            Err(broadcast::error::RecvError::Lagged(n)) => {
                tracing::warn!("Event listener lagged, skipped {} messages.", n);
            }
            Err(broadcast::error::RecvError::Closed) => {
                tracing::debug!("Event channel closed. Listener shutting down.");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn listener_receives_events_until_the_bus_is_dropped() {
        let bus = EventBus::new();
        let rx = bus.subscribe();

        bus.notify(Notice::success("Data uploaded successfully", "Portfolio data has been updated."));
        bus.publish(DashboardEvent::RecordsReplaced {
            count: 3,
            source: "a.csv".to_string(),
        });
        drop(bus);

        let mut seen = Vec::new();
        run_listener(rx, |event| seen.push(event)).await;

        assert_eq!(seen.len(), 2);
        assert!(matches!(seen[0], DashboardEvent::Notice(_)));
        assert!(matches!(seen[1], DashboardEvent::RecordsReplaced { count: 3, .. }));
    }

    #[test]
    fn publishing_without_listeners_is_harmless() {
        let bus = EventBus::new();
        bus.publish(DashboardEvent::UploadStarted {
            file_name: "a.csv".to_string(),
        });
    }
}
