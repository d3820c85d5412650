// https://core.telegram.org/bots/api#sendmessage

pub mod models;

use reqwest::Client;

use crate::models::{ApiResponse, Message, SendMessageRequest};

#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    #[error("request to Telegram failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Telegram returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Telegram rejected the call: {0}")]
    Api(String),
}

#[derive(Debug, Clone)]
pub struct TelegramOptions {
    pub bot_token: String,
}

#[derive(Debug, Clone)]
pub struct TelegramService {
    options: TelegramOptions,
    client: Client,
}

impl TelegramService {
    pub fn new(options: TelegramOptions) -> Self {
        Self {
            options,
            client: Client::new(),
        }
    }

    /// Send a text message to a chat.
    ///
    /// `parse_mode` selects server-side markup interpretation
    /// (e.g. `"Markdown"`); `None` sends plain text.
    pub async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
        parse_mode: Option<&str>,
    ) -> Result<Message, TelegramError> {
        let url = format!(
            "https://api.telegram.org/bot{token}/sendMessage",
            token = self.options.bot_token
        );

        let body = SendMessageRequest {
            chat_id,
            text,
            parse_mode,
            disable_web_page_preview: Some(true),
        };

        let response = self.client.post(url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TelegramError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let envelope = response.json::<ApiResponse<Message>>().await?;
        if !envelope.ok {
            return Err(TelegramError::Api(
                envelope
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            ));
        }

        envelope
            .result
            .ok_or_else(|| TelegramError::Api("ok response without result".to_string()))
    }
}
