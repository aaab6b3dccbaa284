//! Gmail API クライアントのトレイト定義とモック対応
//!
//! このモジュールは Gmail API 操作を抽象化し、テスト時にモック可能にします。

use crate::gmail::GmailMessage;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// Gmail API の操作を抽象化するトレイト
///
/// このトレイトを実装することで、本番環境では実際の Gmail API を使用し、
/// テスト環境ではモックを使用してテストできます。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GmailClientTrait: Send + Sync {
    /// 指定されたクエリに一致するメッセージIDを最大 `max_results` 件取得
    async fn list_message_ids(&self, query: &str, max_results: u32)
        -> Result<Vec<String>, String>;

    /// 単一メッセージ（ヘッダーと本文パートツリー）を取得
    async fn get_message(&self, message_id: &str) -> Result<GmailMessage, String>;
}
