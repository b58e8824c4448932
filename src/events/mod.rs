use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Events emitted after successful writes. Delivery is best-effort and
/// in-process; a full channel never fails the originating request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Supplier events
    SupplierCreated(Uuid),
    SupplierUpdated(Uuid),
    SupplierDeleted(Uuid),

    // Product events
    ProductCreated(Uuid),
    ProductUpdated(Uuid),
    ProductDeleted(Uuid),

    // Store events
    StoreCreated(Uuid),
    StoreUpdated(Uuid),
    StoreDeleted(Uuid),

    // Relationship events
    SupplyLinked {
        supplier_id: Uuid,
        product_id: Uuid,
        created: bool,
    },
    StockAssigned {
        product_id: Uuid,
        store_id: Uuid,
        quantity: i32,
        created: bool,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    /// Sends an event, logging instead of failing when the channel is
    /// full or closed. Writes never block on the event loop.
    pub fn send_or_log(&self, event: Event) {
        if let Err(e) = self.sender.try_send(event) {
            warn!("Dropping event: {}", e);
        }
    }
}

// Drain the event channel and dispatch each event to its handler.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        info!("Received event: {:?}", event);

        match event {
            Event::StockAssigned {
                product_id,
                store_id,
                quantity,
                created,
            } => {
                if let Err(e) =
                    handle_stock_assigned(product_id, store_id, quantity, created).await
                {
                    error!(
                        "Failed to handle stock assignment: product_id={}, error={}",
                        product_id, e
                    );
                }
            }
            Event::SupplyLinked {
                supplier_id,
                product_id,
                created,
            } => {
                if created {
                    info!(
                        "Supplier {} now supplies product {}",
                        supplier_id, product_id
                    );
                } else {
                    info!(
                        "Supply terms refreshed for supplier {} and product {}",
                        supplier_id, product_id
                    );
                }
            }
            Event::SupplierDeleted(supplier_id) => {
                info!(
                    "Supplier {} deleted; supply links removed with it",
                    supplier_id
                );
            }
            Event::ProductDeleted(product_id) => {
                info!(
                    "Product {} deleted; supply links and stock rows removed with it",
                    product_id
                );
            }
            Event::StoreDeleted(store_id) => {
                info!("Store {} deleted; stock rows removed with it", store_id);
            }
            _ => {
                info!("No specific handler for event: {:?}", event);
            }
        }
    }

    warn!("Event processing loop has ended");
}

async fn handle_stock_assigned(
    product_id: Uuid,
    store_id: Uuid,
    quantity: i32,
    created: bool,
) -> Result<(), String> {
    info!(
        "Processing stock assignment: product={}, store={}, quantity={}, created={}",
        product_id, store_id, quantity, created
    );

    if quantity < crate::config::DEFAULT_LOW_STOCK_THRESHOLD {
        warn!(
            "Low stock alert: product {} has only {} units at store {}",
            product_id, quantity, store_id
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn send_delivers_to_receiver() {
        let (tx, mut rx) = mpsc::channel(4);
        let sender = EventSender::new(tx);

        let id = Uuid::new_v4();
        sender.send(Event::SupplierCreated(id)).await.unwrap();

        assert_matches!(rx.recv().await, Some(Event::SupplierCreated(got)) if got == id);
    }

    #[tokio::test]
    async fn send_or_log_swallows_closed_channel() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let sender = EventSender::new(tx);

        // Must not panic or return an error to the caller.
        sender.send_or_log(Event::ProductDeleted(Uuid::new_v4()));
    }

    #[tokio::test]
    async fn send_or_log_drops_when_full() {
        let (tx, mut rx) = mpsc::channel(1);
        let sender = EventSender::new(tx);

        let first = Uuid::new_v4();
        sender.send_or_log(Event::StoreCreated(first));
        sender.send_or_log(Event::StoreCreated(Uuid::new_v4()));

        assert_matches!(rx.recv().await, Some(Event::StoreCreated(got)) if got == first);
        assert!(rx.try_recv().is_err());
    }
}
