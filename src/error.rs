use thiserror::Error;

/// Failure of a single write against the purchase store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store rejected write to {table} with status {status}: {body}")]
    Rejected {
        table: &'static str,
        status: u16,
        body: String,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Failure while handling a detected payment notification.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("malformed payment notification: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("{0}")]
    InvoicePayload(#[from] InvoicePayloadError),

    #[error("failed to upsert buyer {buyer_id}: {source}")]
    BuyerUpsert {
        buyer_id: i64,
        #[source]
        source: StoreError,
    },

    #[error("failed to insert ticket {purchased_number} for raffle {raffle_id}: {source}")]
    TicketInsert {
        raffle_id: String,
        purchased_number: String,
        #[source]
        source: StoreError,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvoicePayloadError {
    #[error("invoice payload {0:?} has no '_' separating raffle id and number")]
    MissingSeparator(String),

    #[error("invoice payload {0:?} has an empty raffle id or number")]
    EmptyComponent(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no purchase store configured: set SUPABASE_URL and SUPABASE_KEY, or DATABASE_URL")]
    MissingStore,

    #[error("SUPABASE_URL is set but SUPABASE_KEY is missing")]
    MissingSupabaseKey,

    #[error("SUPABASE_KEY is set but SUPABASE_URL is missing")]
    MissingSupabaseUrl,

    #[error("invalid PORT value {0:?}")]
    InvalidPort(String),
}
