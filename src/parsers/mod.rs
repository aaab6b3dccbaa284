use serde::{Deserialize, Serialize};
use std::fmt;

pub mod generic;
pub mod html_text;
pub mod patterns;
pub mod trendyol;

/// 注文番号が見つからなかったときの表示用文字列
pub const ORDER_ID_NOT_FOUND: &str = "Sipariş Numarası bulunamadı";
/// 金額が見つからなかったときの表示用文字列
pub const AMOUNT_NOT_FOUND: &str = "Tutar bulunamadı";

/// パターンテーブルの系統（メールテンプレートの違い）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vendor {
    Generic,
    Trendyol,
}

impl Vendor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vendor::Generic => "generic",
            Vendor::Trendyol => "trendyol",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 本文から抽出した注文情報（見つからないフィールドは None）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedOrder {
    /// 注文番号
    pub order_id: Option<String>,
    /// 合計金額（"149.90" 形式）
    pub total_amount: Option<String>,
}

/// 表示用の注文情報。見つからないフィールドは固定文言で埋める。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub order_id: String,
    pub total_amount: String,
}

impl From<ExtractedOrder> for OrderDetails {
    fn from(order: ExtractedOrder) -> Self {
        Self {
            order_id: order
                .order_id
                .unwrap_or_else(|| ORDER_ID_NOT_FOUND.to_string()),
            total_amount: order
                .total_amount
                .unwrap_or_else(|| AMOUNT_NOT_FOUND.to_string()),
        }
    }
}

/// 1 通のメールから組み立てた注文レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// 注文番号
    pub order_id: Option<String>,
    /// 合計金額
    pub total_amount: Option<String>,
    /// 抽出に使ったパターン系統
    pub source: Vendor,
    /// 件名
    pub subject: String,
    /// 送信者
    pub sender: String,
    /// Date ヘッダーの値
    pub date: String,
}

impl OrderRecord {
    pub fn display_order_id(&self) -> &str {
        self.order_id.as_deref().unwrap_or(ORDER_ID_NOT_FOUND)
    }

    pub fn display_total_amount(&self) -> &str {
        self.total_amount.as_deref().unwrap_or(AMOUNT_NOT_FOUND)
    }
}

/// メール本文から注文情報を抽出するパーサーのトレイト
pub trait EmailParser {
    /// 正規化済みの本文から注文番号と合計金額を抽出する
    fn extract(&self, full_text: &str) -> ExtractedOrder;
}

/// パターン系統から適切なパーサーを取得する
pub fn get_parser(vendor: Vendor) -> Box<dyn EmailParser> {
    match vendor {
        Vendor::Generic => Box::new(generic::GenericParser),
        Vendor::Trendyol => Box::new(trendyol::TrendyolParser),
    }
}
