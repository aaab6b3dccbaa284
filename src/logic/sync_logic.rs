//! Gmail 検索・ヘッダー関連のビジネスロジック
//!
//! Gmail API へのアクセスを持たない純粋関数のみ。

use crate::gmail::MessageHeader;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// ヘッダーが見つからなかったときの値
pub const UNKNOWN_HEADER_VALUE: &str = "Unknown";

/// キーワードを OR で連結した検索クエリを構築する
///
/// # Arguments
/// * `keywords` - 検索キーワード
/// * `query` - 追加のクエリ（日付条件など）。指定時は半角スペースで後ろに連結する
///
/// # Examples
/// ```
/// use order_mail_lib::logic::sync_logic::build_keyword_query;
///
/// let keywords = vec!["sipariş".to_string(), "order".to_string()];
/// assert_eq!(build_keyword_query(&keywords, None), "sipariş OR order");
/// assert_eq!(
///     build_keyword_query(&keywords, Some("after:2024-05-01 before:2024-06-01")),
///     "sipariş OR order after:2024-05-01 before:2024-06-01"
/// );
/// ```
pub fn build_keyword_query(keywords: &[String], query: Option<&str>) -> String {
    let keyword_query = keywords.join(" OR ");
    match query.filter(|q| !q.is_empty()) {
        Some(q) => format!("{keyword_query} {q}"),
        None => keyword_query,
    }
}

/// メールヘッダーから取り出した表示用情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailDetails {
    pub subject: String,
    pub sender: String,
    pub date: String,
}

impl Default for EmailDetails {
    fn default() -> Self {
        Self {
            subject: UNKNOWN_HEADER_VALUE.to_string(),
            sender: UNKNOWN_HEADER_VALUE.to_string(),
            date: UNKNOWN_HEADER_VALUE.to_string(),
        }
    }
}

/// Subject / From / Date ヘッダーの値を取り出す
///
/// ヘッダー名は大文字小文字を区別して完全一致で比較し、最初に見つかった値を使う。
/// 見つからない場合は "Unknown"。
pub fn extract_email_details(headers: &[MessageHeader]) -> EmailDetails {
    let find = |name: &str| {
        headers
            .iter()
            .find(|h| h.name == name)
            .map_or_else(|| UNKNOWN_HEADER_VALUE.to_string(), |h| h.value.clone())
    };

    EmailDetails {
        subject: find("Subject"),
        sender: find("From"),
        date: find("Date"),
    }
}

/// メールの日付文字列をパースする
///
/// "Mon, 06 May 2024 10:30" 形式、"2024-05-06 10:30:00" 形式の順に試す。
/// どちらにも一致しなければ None。
pub fn parse_email_date(date_str: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 2] = ["%a, %d %b %Y %H:%M", "%Y-%m-%d %H:%M:%S"];

    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(date_str, fmt).ok())
}
