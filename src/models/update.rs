use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{InvoicePayloadError, WebhookError};
use crate::models::purchase::{Buyer, Ticket};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TelegramUser {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct OrderInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SuccessfulPayment {
    pub currency: String,
    pub total_amount: i64,
    pub invoice_payload: String,
    #[serde(default)]
    pub order_info: Option<OrderInfo>,
    pub telegram_payment_charge_id: String,
    pub provider_payment_charge_id: String,
}

#[derive(Debug, Deserialize)]
struct PaymentMessage {
    from: TelegramUser,
    successful_payment: SuccessfulPayment,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PreCheckoutQuery {
    pub id: String,
    pub from: TelegramUser,
    pub currency: String,
    pub total_amount: i64,
    pub invoice_payload: String,
    #[serde(default)]
    pub order_info: Option<OrderInfo>,
}

/// Raffle id and purchased number carried in an invoice payload, e.g. `RAFFLE7_42`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoicePayload {
    pub raffle_id: String,
    pub purchased_number: String,
}

impl FromStr for InvoicePayload {
    type Err = InvoicePayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Components past the second are ignored
        let mut parts = s.split('_');
        let raffle_id = parts.next().unwrap_or_default();
        let purchased_number = parts
            .next()
            .ok_or_else(|| InvoicePayloadError::MissingSeparator(s.to_string()))?;

        Ok(InvoicePayload {
            raffle_id: raffle_id.to_string(),
            purchased_number: purchased_number.to_string(),
        })
    }
}

impl InvoicePayload {
    /// Stricter parse used before the charge: both raffle id and number must be non-empty.
    ///
    /// A completed payment is recorded with whatever [`FromStr`] yields, empty parts included.
    pub fn parse_for_checkout(s: &str) -> Result<Self, InvoicePayloadError> {
        let invoice: InvoicePayload = s.parse()?;
        if invoice.raffle_id.is_empty() || invoice.purchased_number.is_empty() {
            return Err(InvoicePayloadError::EmptyComponent(s.to_string()));
        }
        Ok(invoice)
    }
}

/// Everything a successful payment needs to persist, extracted before any write.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentPurchase {
    pub buyer: Buyer,
    pub ticket: Ticket,
    pub payment: SuccessfulPayment,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateKind {
    Payment(PaymentPurchase),
    PreCheckout(PreCheckoutQuery),
    Other,
}

/// Classifies one webhook delivery.
///
/// Only an update carrying `message.successful_payment` can fail; every other
/// shape, including a malformed pre-checkout query, is [`UpdateKind::Other`].
pub fn classify(update: &Value) -> Result<UpdateKind, WebhookError> {
    if let Some(message) = update.get("message") {
        if message.get("successful_payment").is_some() {
            let message: PaymentMessage = serde_json::from_value(message.clone())?;
            return purchase_from(message).map(UpdateKind::Payment);
        }
    }

    if let Some(query) = update.get("pre_checkout_query") {
        return match serde_json::from_value::<PreCheckoutQuery>(query.clone()) {
            Ok(query) => Ok(UpdateKind::PreCheckout(query)),
            Err(e) => {
                warn!("Ignoring malformed pre_checkout_query: {}", e);
                Ok(UpdateKind::Other)
            }
        };
    }

    Ok(UpdateKind::Other)
}

fn purchase_from(message: PaymentMessage) -> Result<PaymentPurchase, WebhookError> {
    let PaymentMessage { from, successful_payment } = message;
    let invoice: InvoicePayload = successful_payment.invoice_payload.parse()?;

    let buyer = Buyer {
        id: from.id,
        username: from.username,
        first_name: from.first_name,
    };
    let ticket = Ticket {
        raffle_id: invoice.raffle_id,
        buyer_id: buyer.id,
        purchased_number: invoice.purchased_number,
        payment_charge_id: successful_payment.telegram_payment_charge_id.clone(),
    };

    Ok(PaymentPurchase { buyer, ticket, payment: successful_payment })
}
