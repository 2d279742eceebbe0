use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{Buyer, Ticket};

/// Destination for purchases recorded from payment webhooks.
///
/// The two writes are independent: nothing ties an upsert and the following
/// insert into one transaction.
#[async_trait]
pub trait PurchaseStore: Send + Sync {
    /// Inserts the buyer, or updates username and first name when the id exists.
    async fn upsert_buyer(&self, buyer: &Buyer) -> Result<(), StoreError>;

    /// Appends a ticket row. Repeated calls with the same ticket add repeated rows.
    async fn insert_ticket(&self, ticket: &Ticket) -> Result<(), StoreError>;
}
