//! Trendyol 注文メール用パーサー
//!
//! "Sipariş Numaranız: 123" 形式のラベルと "#123 numaralı siparişiniz" 形式の文、
//! "Sepet Tutarı" / "Ödenecek Tutar" などのラベル付き合計に対応する。
//! 通貨は TL/TRY/₺/$/USD のみ（ユーロ表記は扱わない）。

use super::patterns::{FieldKind, PatternTable};
use super::{EmailParser, ExtractedOrder};
use once_cell::sync::Lazy;

static ORDER_ID_PATTERNS: Lazy<PatternTable> = Lazy::new(|| {
    PatternTable::compile(
        FieldKind::OrderId,
        &[
            r"(?:Sipariş Numaranız:|Sipariş Numarası:|Sipariş No:|Order ID:) *(\d+)",
            r"#(\d+)\s+numaralı\s+siparişi",
        ],
    )
});

static AMOUNT_PATTERNS: Lazy<PatternTable> = Lazy::new(|| {
    PatternTable::compile(
        FieldKind::Amount,
        &[
            r"(?:Sepet Tutarı|Toplam Tutar|Toplam|Ödenecek Tutar)[^\d]*?([\d.,]+)\s*(?:TL|TRY|₺|\$|USD)",
            r"([\d.,]+)\s*(?:TL|TRY|₺|\$|USD)",
            r"[₺$]\s*([\d.,]+)",
        ],
    )
});

pub fn extract_order_id(full_text: &str) -> Option<String> {
    ORDER_ID_PATTERNS.extract(full_text)
}

pub fn extract_amount(full_text: &str) -> Option<String> {
    AMOUNT_PATTERNS.extract(full_text)
}

/// Trendyol 注文メール用パーサー
pub struct TrendyolParser;

impl EmailParser for TrendyolParser {
    fn extract(&self, full_text: &str) -> ExtractedOrder {
        ExtractedOrder {
            order_id: extract_order_id(full_text),
            total_amount: extract_amount(full_text),
        }
    }
}
