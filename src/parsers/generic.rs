//! 汎用（ベンダー非依存）注文メール用パーサー
//!
//! トルコ語・英語のラベル（Sipariş Numarası / Order ID / Toplam / Total など）と
//! "#12345" 形式の注文番号、TL/TRY/₺/$/USD/€/EUR の通貨表記に対応する。

use super::patterns::{FieldKind, PatternTable};
use super::{EmailParser, ExtractedOrder};
use crate::logic::text::normalize_whitespace;
use once_cell::sync::Lazy;

static ORDER_ID_PATTERNS: Lazy<PatternTable> = Lazy::new(|| {
    PatternTable::compile(
        FieldKind::OrderId,
        &[
            r"(Sipariş Numarası[:#]?|Sipariş No[:#]?|Order ID[:#]?|Order Number[:#]?)[^\d]*(\d+)",
            r"(SİPARİŞ NO[:#\.]?|Order ID[:#\.]?)[^\d]*(\d+)",
            r"#(\d+)",
            r"(\d+)\s+numaralı\s+siparişini\s+aldık",
        ],
    )
});

static AMOUNT_PATTERNS: Lazy<PatternTable> = Lazy::new(|| {
    PatternTable::compile(
        FieldKind::Amount,
        &[
            r"(?:Toplam|Tutar|Amount|Total)[^0-9₺TL$USD€EUR]*?([\d.,]+)\s*(?:TL|TRY|₺|\$|USD|€|EUR)",
            r"([\d.,]+)\s*(?:TL|TRY|₺|\$|USD|€|EUR)",
            r"[₺$€]\s*([\d.,]+)",
        ],
    )
});

/// 注文番号を抽出する
pub fn extract_order_id(full_text: &str) -> Option<String> {
    ORDER_ID_PATTERNS.extract(full_text)
}

/// 合計金額を抽出する（"149.90" のような小数 2 桁表記）
///
/// 複数行にまたがるラベルと金額を拾えるよう、照合前に空白を畳み込む。
pub fn extract_amount(full_text: &str) -> Option<String> {
    AMOUNT_PATTERNS.extract(&normalize_whitespace(full_text))
}

/// 汎用注文メール用パーサー
pub struct GenericParser;

impl EmailParser for GenericParser {
    fn extract(&self, full_text: &str) -> ExtractedOrder {
        ExtractedOrder {
            order_id: extract_order_id(full_text),
            total_amount: extract_amount(full_text),
        }
    }
}
