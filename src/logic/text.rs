//! 本文テキストの正規化

use unicode_normalization::UnicodeNormalization;

/// 連続する空白（改行・CR・タブ・NBSP を含む）を半角スペース 1 つにまとめる
///
/// 前後の空白は取り除く。正規化済みの文字列に再適用しても変化しない。
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// パターン照合用の正規化
///
/// NFKC で全角数字・全角コロンなどを半角に寄せてから空白を畳み込む。
pub fn normalize_for_matching(text: &str) -> String {
    let composed: String = text.nfkc().collect();
    normalize_whitespace(&composed)
}

/// トルコ語の i 系 4 文字（i / I / ı / İ）を `i` に畳み込む
///
/// `regex` の大文字小文字無視は単純ケースフォールディングのみで、`İ` と `i`、
/// `ı` と `I` を同一視しない。照合する側とパターン側の両方に適用して揃える。
pub fn fold_turkish_i(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'I' | 'ı' | 'İ' => 'i',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace_newlines_and_tabs() {
        assert_eq!(
            normalize_whitespace("Toplam\r\nTutar:\t 149,90\n\nTL"),
            "Toplam Tutar: 149,90 TL"
        );
    }

    #[test]
    fn test_normalize_whitespace_trims_edges() {
        assert_eq!(normalize_whitespace("   a  b   "), "a b");
    }

    #[test]
    fn test_normalize_whitespace_nbsp() {
        assert_eq!(normalize_whitespace("149,90\u{00A0}TL"), "149,90 TL");
    }

    #[test]
    fn test_normalize_whitespace_idempotent() {
        let once = normalize_whitespace(" Sipariş \n No:  1 ");
        assert_eq!(normalize_whitespace(&once), once);
    }

    #[test]
    fn test_normalize_whitespace_empty() {
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace(" \n\t "), "");
    }

    #[test]
    fn test_normalize_for_matching_fullwidth_digits() {
        assert_eq!(
            normalize_for_matching("Sipariş No：１２３\n"),
            "Sipariş No:123"
        );
    }

    #[test]
    fn test_normalize_for_matching_composes_turkish_letters() {
        // s + U+0327 (combining cedilla) → ş
        assert_eq!(normalize_for_matching("Sipari\u{0073}\u{0327}"), "Sipariş");
    }

    #[test]
    fn test_fold_turkish_i_all_variants() {
        assert_eq!(fold_turkish_i("SİPARİŞ NUMARASI"), "SiPARiŞ NUMARASi");
        assert_eq!(fold_turkish_i("numaralı Id"), "numarali id");
    }

    #[test]
    fn test_fold_turkish_i_keeps_other_letters() {
        assert_eq!(fold_turkish_i("Ödenecek Tutar: 10 TL"), "Ödenecek Tutar: 10 TL");
    }
}
