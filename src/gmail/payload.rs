//! MIME パートツリーから本文テキストを取り出すデコーダー
//!
//! Gmail API の `payload` は `parts` を持つコンテナと、`mimeType` + `body.data` を持つ
//! 葉ノードの再帰構造になっている。ここでは葉ノードの base64url データをデコードし、
//! text/plain を優先、なければ最初の text/html をテキスト化して 1 本の文字列を返す。
//!
//! # セキュリティガイドライン
//! デコード結果（本文）はログに出力しないこと。出力してよいのは長さ・件数のみ。

use crate::parsers::html_text::html_to_text;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Gmail の body.data はパディングの有無が一定しないため、どちらも受け付ける
const BASE64URL_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const MIME_TEXT_PLAIN: &str = "text/plain";
const MIME_TEXT_HTML: &str = "text/html";

/// メッセージ本文の 1 ノード
///
/// 子パートを持つノードは `Container`、それ以外は `Leaf`。
/// `Leaf::data` は base64url エンコードされたままの本文。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawMessagePart", into = "RawMessagePart")]
pub enum MessagePart {
    Container(Vec<MessagePart>),
    Leaf {
        mime_type: String,
        data: Option<String>,
    },
}

impl MessagePart {
    pub fn leaf(mime_type: &str, data: Option<&str>) -> Self {
        MessagePart::Leaf {
            mime_type: mime_type.to_string(),
            data: data.map(str::to_string),
        }
    }

    /// 平文から葉ノードを作る（テストデータ・他ライブラリからの変換用）
    pub fn leaf_from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        MessagePart::Leaf {
            mime_type: mime_type.to_string(),
            data: Some(BASE64URL_LENIENT.encode(bytes)),
        }
    }
}

/// Gmail REST API の JSON 形状（`parts` / `mimeType` / `body.data`）
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMessagePart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parts: Option<Vec<MessagePart>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    body: Option<RawMessagePartBody>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawMessagePartBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<String>,
}

impl From<RawMessagePart> for MessagePart {
    fn from(raw: RawMessagePart) -> Self {
        // parts キーがあればコンテナ扱い（自身の body は見ない）
        if let Some(parts) = raw.parts {
            return MessagePart::Container(parts);
        }
        MessagePart::Leaf {
            mime_type: raw.mime_type.unwrap_or_default(),
            data: raw.body.and_then(|b| b.data),
        }
    }
}

impl From<MessagePart> for RawMessagePart {
    fn from(part: MessagePart) -> Self {
        match part {
            MessagePart::Container(parts) => RawMessagePart {
                parts: Some(parts),
                ..Default::default()
            },
            MessagePart::Leaf { mime_type, data } => RawMessagePart {
                parts: None,
                mime_type: Some(mime_type),
                body: Some(RawMessagePartBody { data }),
            },
        }
    }
}

impl From<&google_gmail1::api::MessagePart> for MessagePart {
    fn from(part: &google_gmail1::api::MessagePart) -> Self {
        if let Some(parts) = &part.parts {
            return MessagePart::Container(parts.iter().map(MessagePart::from).collect());
        }
        // google_gmail1 は body.data をデコード済みバイト列で返すので、
        // デコード経路を 1 本にするため base64url に戻しておく
        let data = part
            .body
            .as_ref()
            .and_then(|b| b.data.as_ref())
            .map(|bytes| BASE64URL_LENIENT.encode(bytes));
        MessagePart::Leaf {
            mime_type: part.mime_type.clone().unwrap_or_default(),
            data,
        }
    }
}

/// デコード済みの葉ノード本文の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextKind {
    Plain,
    Html,
}

/// base64url 文字列を UTF-8 テキストにデコードする
///
/// base64 として不正な場合は `None`。UTF-8 として不正なバイト列は置換文字に置き換え、
/// エラーにはしない。
fn decode_body_data(data: &str) -> Option<String> {
    let bytes = match BASE64URL_LENIENT.decode(data.trim()) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!(
                "Base64 decode failed, dropping part: {:?}, input length: {}",
                e,
                data.len()
            );
            return None;
        }
    };

    let (decoded, had_replacements) = encoding_rs::UTF_8.decode_without_bom_handling(&bytes);
    if had_replacements {
        log::warn!("UTF-8 decode had replacement chars; returning partial content");
    }
    Some(decoded.into_owned())
}

/// 再帰的にMIMEパートを走査し、デコードできた text/plain / text/html を順に集める
fn collect_text_candidates(part: &MessagePart, candidates: &mut Vec<(TextKind, String)>) {
    match part {
        MessagePart::Container(children) => {
            log::debug!("Processing {} child parts", children.len());
            for child in children {
                collect_text_candidates(child, candidates);
            }
        }
        MessagePart::Leaf { mime_type, data } => {
            let kind = match mime_type.as_str() {
                MIME_TEXT_PLAIN => TextKind::Plain,
                MIME_TEXT_HTML => TextKind::Html,
                _ => {
                    log::debug!("  Skipping mime_type: {mime_type}");
                    return;
                }
            };
            let Some(data) = data.as_deref().filter(|d| !d.is_empty()) else {
                log::debug!("  No data in body");
                return;
            };
            if let Some(text) = decode_body_data(data) {
                log::debug!("  Decoded {mime_type} part: {} chars", text.chars().count());
                candidates.push((kind, text));
            }
        }
    }
}

/// パートツリーから本文テキストを 1 本取り出す
///
/// - text/plain が 1 つ以上あれば、それらを半角スペースで連結して返す（HTML は見ない）
/// - なければ最初の text/html をテキスト化して返す
/// - どちらもなければ空文字列
pub fn extract_text(payload: &MessagePart) -> String {
    let mut candidates = Vec::new();
    collect_text_candidates(payload, &mut candidates);

    let plain_texts: Vec<&str> = candidates
        .iter()
        .filter(|(kind, _)| *kind == TextKind::Plain)
        .map(|(_, text)| text.as_str())
        .collect();

    if !plain_texts.is_empty() {
        log::debug!("Using {} text/plain part(s)", plain_texts.len());
        return plain_texts.join(" ");
    }

    candidates
        .iter()
        .find(|(kind, _)| *kind == TextKind::Html)
        .map(|(_, html)| html_to_text(html))
        .unwrap_or_default()
}
