use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::error::StoreError;
use crate::models::{Buyer, Ticket, BUYERS_TABLE, TICKETS_TABLE};
use crate::services::store::PurchaseStore;

/// Purchase store backed by a Supabase project's PostgREST endpoint.
pub struct SupabaseStore {
    client: Client,
    rest_url: String,
    key: String,
}

impl SupabaseStore {
    pub fn new(url: &str, key: &str) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(SupabaseStore {
            client,
            rest_url: format!("{}/rest/v1", url.trim_end_matches('/')),
            key: key.to_string(),
        })
    }

    async fn post_row<T: Serialize>(
        &self,
        table: &'static str,
        query: &str,
        prefer: &str,
        row: &T,
    ) -> Result<(), StoreError> {
        let url = format!("{}/{}{}", self.rest_url, table, query);
        let response = self
            .client
            .post(&url)
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header("Prefer", prefer)
            .json(row)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Rejected {
            table,
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl PurchaseStore for SupabaseStore {
    async fn upsert_buyer(&self, buyer: &Buyer) -> Result<(), StoreError> {
        self.post_row(
            BUYERS_TABLE,
            "?on_conflict=id",
            "resolution=merge-duplicates,return=minimal",
            buyer,
        )
        .await
    }

    async fn insert_ticket(&self, ticket: &Ticket) -> Result<(), StoreError> {
        self.post_row(TICKETS_TABLE, "", "return=minimal", ticket).await
    }
}
