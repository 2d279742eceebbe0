use serde::{Deserialize, Serialize};

pub const BUYERS_TABLE: &str = "jugadores";
pub const TICKETS_TABLE: &str = "boletos";

/// Row of the buyers table, keyed by the Telegram user id.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Buyer {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: String,
}

/// Row of the tickets table. Serializes with the store's column names.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Ticket {
    #[serde(rename = "rifa_id")]
    pub raffle_id: String,
    #[serde(rename = "jugador_id")]
    pub buyer_id: i64,
    #[serde(rename = "numero_comprado")]
    pub purchased_number: String,
    #[serde(rename = "telegram_payment_charge_id")]
    pub payment_charge_id: String,
}
