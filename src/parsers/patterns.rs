//! 正規表現テーブルによるフィールド抽出
//!
//! 各テーブルは「特定性の高いラベル付きパターン → ゆるいパターン」の順に並べ、
//! 最初にマッチしたものを採用する。

use crate::logic::text::fold_turkish_i;
use regex::{Regex, RegexBuilder};

/// 抽出するフィールドの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    OrderId,
    Amount,
}

/// 1 つの候補パターンと、値として採用するキャプチャグループ番号
#[derive(Debug)]
pub struct Pattern {
    regex: Regex,
    group: usize,
}

impl Pattern {
    /// 大文字小文字を区別せずにコンパイルする
    ///
    /// パターン中のトルコ語の i 系文字は `fold_turkish_i` で畳み込んでおき、
    /// 照合時に同じ畳み込みを施したテキストと突き合わせる。
    ///
    /// 注文番号はグループが 2 つ以上なら 2 番目（ラベル + 値）、それ以外は 1 番目。
    /// 金額は常に 1 番目。
    pub fn new(source: &str, kind: FieldKind) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(&fold_turkish_i(source))
            .case_insensitive(true)
            .build()?;
        // captures_len() はグループ 0（全体）を含む
        let group = match kind {
            FieldKind::OrderId if regex.captures_len() > 2 => 2,
            _ => 1,
        };
        Ok(Self { regex, group })
    }

    /// `text` は `fold_turkish_i` 適用済みであること
    fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(self.group))
            .map(|m| m.as_str())
    }
}

/// 順序付きのパターンテーブル
#[derive(Debug)]
pub struct PatternTable {
    kind: FieldKind,
    patterns: Vec<Pattern>,
}

impl PatternTable {
    /// 静的なパターン文字列からテーブルを作る
    ///
    /// # Panics
    /// パターンが正規表現として不正な場合。テーブルはソースに埋め込まれた定数のみなので、
    /// テストで全テーブルのコンパイルを確認している。
    pub fn compile(kind: FieldKind, sources: &[&str]) -> Self {
        let patterns = sources
            .iter()
            .map(|src| {
                Pattern::new(src, kind).unwrap_or_else(|e| {
                    panic!("Failed to compile static pattern {src:?}: {e}")
                })
            })
            .collect();
        Self { kind, patterns }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// 先頭から順に試し、最初に値が取れたものを返す
    ///
    /// 金額テーブルでは `normalize_amount` に失敗したマッチは「不一致」とみなし、
    /// 次のパターンへ進む。
    pub fn extract(&self, text: &str) -> Option<String> {
        let folded = fold_turkish_i(text);
        self.patterns.iter().enumerate().find_map(|(i, pattern)| {
            let captured = pattern.capture(&folded)?.trim();
            let value = match self.kind {
                FieldKind::OrderId => Some(captured.to_string()),
                FieldKind::Amount => {
                    let normalized = normalize_amount(captured);
                    if normalized.is_none() {
                        log::debug!("Pattern #{i} matched an unparsable amount, trying next");
                    }
                    normalized
                }
            };
            if value.is_some() {
                log::debug!("{:?} extracted by pattern #{i}", self.kind);
            }
            value
        })
    }
}

/// 金額文字列を小数点以下 2 桁の固定小数表記に正規化する
///
/// カンマを含む場合はカンマを小数点とみなしてドットに置き換える。
/// 桁区切りのドットは除去しないため、"1.234,56" は "1.234.56" となり `None` になる。
pub fn normalize_amount(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let candidate = if trimmed.contains(',') {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };
    let value: f64 = candidate.parse().ok()?;
    Some(format!("{value:.2}"))
}
