//! 注文情報の組み立て
//!
//! HTML または平文の本文をテキスト化・正規化し、パターン系統ごとのパーサーで
//! 注文番号と合計金額を抽出する。外部依存を持たない純粋関数のみ。

use crate::gmail::payload::{extract_text, MessagePart};
use crate::logic::sync_logic::EmailDetails;
use crate::logic::text::normalize_for_matching;
use crate::parsers::html_text::html_to_text;
use crate::parsers::{get_parser, ExtractedOrder, OrderDetails, OrderRecord, Vendor};

/// テキスト化済みの本文から注文情報を抽出する
pub fn extract_order(full_text: &str, vendor: Vendor) -> ExtractedOrder {
    let text = normalize_for_matching(full_text);
    get_parser(vendor).extract(&text)
}

/// HTML 本文から注文情報を抽出し、見つからないフィールドを固定文言で埋めて返す
///
/// マークアップを含まない文字列を渡した場合もそのままテキストとして扱われる。
pub fn extract_order_details(html_content: &str, vendor: Vendor) -> OrderDetails {
    OrderDetails::from(extract_order(&html_to_text(html_content), vendor))
}

/// 汎用パターンで抽出する
pub fn extract_generic_order_details(html_content: &str) -> OrderDetails {
    extract_order_details(html_content, Vendor::Generic)
}

/// Trendyol パターンで抽出する
pub fn extract_trendyol_order_details(html_content: &str) -> OrderDetails {
    extract_order_details(html_content, Vendor::Trendyol)
}

/// メッセージ本文とヘッダー情報から注文レコードを組み立てる
pub fn build_order_record(
    payload: &MessagePart,
    details: EmailDetails,
    vendor: Vendor,
) -> OrderRecord {
    let body = extract_text(payload);
    let ExtractedOrder {
        order_id,
        total_amount,
    } = extract_order(&body, vendor);

    OrderRecord {
        order_id,
        total_amount,
        source: vendor,
        subject: details.subject,
        sender: details.sender,
        date: details.date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::{AMOUNT_NOT_FOUND, ORDER_ID_NOT_FOUND};

    const SAMPLE_GENERIC_HTML: &str = r#"
<html><body>
  <table>
    <tr><td>Sipariş Numarası:</td><td>123456</td></tr>
    <tr><td>Toplam</td><td>149,90 TL</td></tr>
  </table>
  <p>Teşekkürler</p>
</body></html>
"#;

    const SAMPLE_TRENDYOL_HTML: &str = r#"
<html><body>
  <div>Merhaba,</div>
  <div>#734512 numaralı siparişin hazırlanıyor.</div>
  <div><span>Sepet Tutarı</span><span>1.250 TL</span></div>
  <div><span>Ödenecek Tutar:</span><span>259,99 TL</span></div>
</body></html>
"#;

    #[test]
    fn test_extract_order_details_generic_html() {
        let details = extract_order_details(SAMPLE_GENERIC_HTML, Vendor::Generic);
        assert_eq!(details.order_id, "123456");
        assert_eq!(details.total_amount, "149.90");
    }

    #[test]
    fn test_extract_order_details_trendyol_html() {
        let details = extract_trendyol_order_details(SAMPLE_TRENDYOL_HTML);
        assert_eq!(details.order_id, "734512");
        // 最初のラベル（Sepet Tutarı）が採用される。"1.250" はドット小数として扱われる
        assert_eq!(details.total_amount, "1.25");
    }

    #[test]
    fn test_extract_order_details_not_found_sentinels() {
        let details = extract_generic_order_details("<p>Bültenimize hoş geldiniz</p>");
        assert_eq!(details.order_id, ORDER_ID_NOT_FOUND);
        assert_eq!(details.total_amount, AMOUNT_NOT_FOUND);
    }

    #[test]
    fn test_extract_order_details_plain_text_input() {
        let details = extract_generic_order_details("Your order #98765 has shipped. Total: 20 USD");
        assert_eq!(details.order_id, "98765");
        assert_eq!(details.total_amount, "20.00");
    }

    #[test]
    fn test_extract_order_fullwidth_digits() {
        let order = extract_order("Sipariş No：１２３４", Vendor::Generic);
        assert_eq!(order.order_id.as_deref(), Some("1234"));
    }

    #[test]
    fn test_build_order_record_from_payload() {
        let payload = MessagePart::Container(vec![MessagePart::leaf_from_bytes(
            "text/plain",
            "Sipariş Numaranız: 555\nToplam Tutar: 42,00 TL".as_bytes(),
        )]);
        let details = EmailDetails {
            subject: "Siparişin alındı".to_string(),
            sender: "Trendyol <noreply@trendyol.com>".to_string(),
            date: "Mon, 06 May 2024 10:00".to_string(),
        };

        let record = build_order_record(&payload, details, Vendor::Trendyol);

        assert_eq!(record.order_id.as_deref(), Some("555"));
        assert_eq!(record.total_amount.as_deref(), Some("42.00"));
        assert_eq!(record.source, Vendor::Trendyol);
        assert_eq!(record.subject, "Siparişin alındı");
        assert_eq!(record.sender, "Trendyol <noreply@trendyol.com>");
        assert_eq!(record.date, "Mon, 06 May 2024 10:00");
    }

    #[test]
    fn test_build_order_record_empty_payload() {
        let record = build_order_record(
            &MessagePart::Container(vec![]),
            EmailDetails::default(),
            Vendor::Generic,
        );
        assert_eq!(record.order_id, None);
        assert_eq!(record.total_amount, None);
        assert_eq!(record.subject, "Unknown");
    }
}
