//! Gmail API連携モジュール
//!
//! 認証済みの `Gmail` ハブを受け取り、`GmailClientTrait` として公開する。
//! ハブの構築（OAuth 認証）は呼び出し側の責務。
//!
//! # セキュリティガイドライン
//! - **機密情報のログ出力禁止**: メール本文、件名、送信者/受信者情報などをログに出力しないこと
//! - **メトリクスのみ**: ログに出力できるのは文字数、件数、処理時間などの統計情報のみ

use super::payload::MessagePart;
use crate::gmail_client::GmailClientTrait;
use async_trait::async_trait;
use google_gmail1::api::Scope;
use google_gmail1::{hyper_rustls, Gmail};
use hyper_util::client::legacy::connect::HttpConnector;
use serde::{Deserialize, Serialize};

/// Gmail ハブの具体型
pub type GmailHub = Gmail<hyper_rustls::HttpsConnector<HttpConnector>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageHeader {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GmailMessage {
    pub message_id: String,
    pub headers: Vec<MessageHeader>,
    pub payload: Option<MessagePart>,
}

impl GmailMessage {
    /// google_gmail1 のメッセージ型から変換する
    pub fn from_api(message_id: &str, message: &google_gmail1::api::Message) -> Self {
        let headers = message
            .payload
            .as_ref()
            .and_then(|p| p.headers.as_ref())
            .map(|headers| {
                headers
                    .iter()
                    .filter_map(|h| {
                        Some(MessageHeader {
                            name: h.name.clone()?,
                            value: h.value.clone().unwrap_or_default(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            message_id: message_id.to_string(),
            headers,
            payload: message.payload.as_ref().map(MessagePart::from),
        }
    }
}

pub struct GmailClient {
    hub: GmailHub,
    user_id: String,
}

impl GmailClient {
    /// 認証済みハブからクライアントを作る
    pub fn new(hub: GmailHub, user_id: &str) -> Self {
        Self {
            hub,
            user_id: user_id.to_string(),
        }
    }
}

#[async_trait]
impl GmailClientTrait for GmailClient {
    async fn list_message_ids(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<String>, String> {
        let (_, result) = self
            .hub
            .users()
            .messages_list(&self.user_id)
            .q(query)
            .max_results(max_results)
            .add_scope(Scope::Readonly)
            .doit()
            .await
            .map_err(|e| format!("Failed to list messages: {e}"))?;

        let message_ids: Vec<String> = result
            .messages
            .unwrap_or_default()
            .into_iter()
            .filter_map(|msg| msg.id)
            .collect();

        log::info!("Listed {} message ids", message_ids.len());
        Ok(message_ids)
    }

    async fn get_message(&self, message_id: &str) -> Result<GmailMessage, String> {
        log::debug!("Fetching message: {message_id}");

        let (response, message) = self
            .hub
            .users()
            .messages_get(&self.user_id, message_id)
            .add_scope(Scope::Readonly)
            .format("full")
            .doit()
            .await
            .map_err(|e| format!("Failed to get message {message_id}: {e}"))?;

        log::debug!("Response status: {:?}", response.status());

        if message.payload.is_none() {
            log::warn!("Message {message_id} has no payload");
        }

        Ok(GmailMessage::from_api(message_id, &message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gmail::payload::extract_text;
    use google_gmail1::api::{Message, MessagePartBody, MessagePartHeader};

    #[test]
    fn test_gmail_message_from_api_headers_and_payload() {
        let message = Message {
            payload: Some(google_gmail1::api::MessagePart {
                mime_type: Some("text/plain".to_string()),
                headers: Some(vec![
                    MessagePartHeader {
                        name: Some("Subject".to_string()),
                        value: Some("Sipariş".to_string()),
                        ..Default::default()
                    },
                    MessagePartHeader {
                        name: None,
                        value: Some("dropped".to_string()),
                        ..Default::default()
                    },
                ]),
                body: Some(MessagePartBody {
                    data: Some(b"Order ID: 77".to_vec()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        };

        let msg = GmailMessage::from_api("m1", &message);

        assert_eq!(msg.message_id, "m1");
        assert_eq!(
            msg.headers,
            vec![MessageHeader {
                name: "Subject".to_string(),
                value: "Sipariş".to_string(),
            }]
        );
        assert_eq!(extract_text(msg.payload.as_ref().unwrap()), "Order ID: 77");
    }

    #[test]
    fn test_gmail_message_from_api_without_payload() {
        let msg = GmailMessage::from_api("m2", &Message::default());
        assert!(msg.headers.is_empty());
        assert!(msg.payload.is_none());
    }

    #[test]
    fn test_gmail_message_json_roundtrip_keeps_tree() {
        let msg = GmailMessage {
            message_id: "m3".to_string(),
            headers: vec![],
            payload: Some(MessagePart::Container(vec![MessagePart::leaf(
                "text/plain",
                Some("SGVsbG8"),
            )])),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""mimeType":"text/plain""#));
        let back: GmailMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back.payload, msg.payload);
    }
}
