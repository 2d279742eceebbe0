use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct AnswerPreCheckoutQueryRequest<'a> {
    pre_checkout_query_id: &'a str,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<&'a str>,
}

#[derive(Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

pub struct TelegramBot {
    client: Client,
    api_url: String,
}

impl TelegramBot {
    pub fn new(api_base: &str, bot_token: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(TelegramBot {
            client,
            api_url: format!("{}/bot{}", api_base.trim_end_matches('/'), bot_token),
        })
    }

    /// Confirms (`error_message` is `None`) or declines a pending checkout.
    pub async fn answer_pre_checkout_query(
        &self,
        query_id: &str,
        error_message: Option<&str>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let request = AnswerPreCheckoutQueryRequest {
            pre_checkout_query_id: query_id,
            ok: error_message.is_none(),
            error_message,
        };

        // Transport errors must not carry the URL: it embeds the bot token
        let url = format!("{}/answerPreCheckoutQuery", self.api_url);
        let response_text = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| e.without_url())?
            .text()
            .await
            .map_err(|e| e.without_url())?;

        let response: TelegramResponse = serde_json::from_str(&response_text)
            .map_err(|e| format!("Failed to parse Telegram response: {}", e))?;

        if response.ok {
            Ok(())
        } else {
            Err(format!("Telegram API error: {:?}", response.description).into())
        }
    }
}
