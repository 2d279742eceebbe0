use actix_web::{web, HttpResponse};
use log::{error, info, warn};
use serde::Serialize;
use serde_json::Value;

use crate::error::WebhookError;
use crate::models::{classify, InvoicePayload, PaymentPurchase, PreCheckoutQuery, UpdateKind};
use crate::services::store::PurchaseStore;
use crate::services::telegram::TelegramBot;
use crate::state::AppState;

const INVALID_INVOICE_MESSAGE: &str = "This raffle ticket could not be verified. Please try again.";

#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl WebhookResponse {
    fn ok() -> Self {
        Self { status: "ok", message: None }
    }

    fn error(message: String) -> Self {
        Self { status: "error", message: Some(message) }
    }
}

// Always answers 200; processing failures only show up in the body
pub async fn process_webhook(
    data: web::Json<Value>,
    state: web::Data<AppState>,
) -> HttpResponse {
    let update = data.into_inner();
    info!("Webhook received: {}", update);

    let outcome = match classify(&update) {
        Ok(UpdateKind::Payment(purchase)) => record_purchase(state.store.as_ref(), &purchase).await,
        Ok(UpdateKind::PreCheckout(query)) => {
            answer_pre_checkout(state.bot.as_deref(), &query).await;
            Ok(())
        }
        Ok(UpdateKind::Other) => Ok(()),
        Err(e) => Err(e),
    };

    match outcome {
        Ok(()) => HttpResponse::Ok().json(WebhookResponse::ok()),
        Err(e) => {
            error!("Error processing payment: {}", e);
            HttpResponse::Ok().json(WebhookResponse::error(e.to_string()))
        }
    }
}

/// Upserts the buyer, then inserts the ticket. A failed insert leaves the upsert committed.
pub async fn record_purchase(
    store: &dyn PurchaseStore,
    purchase: &PaymentPurchase,
) -> Result<(), WebhookError> {
    let buyer = &purchase.buyer;
    let ticket = &purchase.ticket;

    store
        .upsert_buyer(buyer)
        .await
        .map_err(|source| WebhookError::BuyerUpsert { buyer_id: buyer.id, source })?;

    store
        .insert_ticket(ticket)
        .await
        .map_err(|source| WebhookError::TicketInsert {
            raffle_id: ticket.raffle_id.clone(),
            purchased_number: ticket.purchased_number.clone(),
            source,
        })?;

    info!(
        "Payment processed: buyer {} ({}) bought number {} for raffle {} ({} {}, charge {})",
        buyer.first_name,
        buyer.id,
        ticket.purchased_number,
        ticket.raffle_id,
        purchase.payment.total_amount,
        purchase.payment.currency,
        ticket.payment_charge_id,
    );

    Ok(())
}

async fn answer_pre_checkout(bot: Option<&TelegramBot>, query: &PreCheckoutQuery) {
    let rejection = match InvoicePayload::parse_for_checkout(&query.invoice_payload) {
        Ok(_) => None,
        Err(e) => {
            warn!("Declining pre-checkout query {}: {}", query.id, e);
            Some(INVALID_INVOICE_MESSAGE)
        }
    };

    let Some(bot) = bot else {
        info!(
            "TELEGRAM_BOT_TOKEN not set, pre-checkout query {} left unanswered",
            query.id
        );
        return;
    };

    if let Err(e) = bot.answer_pre_checkout_query(&query.id, rejection).await {
        error!("Failed to answer pre-checkout query {}: {}", query.id, e);
    }
}
