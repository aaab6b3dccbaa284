//! HTML メール本文のテキスト化
//!
//! テキストノードごとに前後の空白を取り除き、空のノードを捨てて半角スペースで連結する。
//! `<script>` / `<style>` / `<template>` の中身は本文として扱わない。

use crate::logic::text::normalize_whitespace;
use scraper::{Html, Node};

const SKIPPED_ELEMENTS: [&str; 3] = ["script", "style", "template"];

/// HTML を表示テキストに変換する（空白は 1 つに畳み込む）
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut fragments: Vec<&str> = Vec::new();
    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let in_skipped = node
            .parent()
            .and_then(|p| p.value().as_element().map(|e| e.name()))
            .is_some_and(|name| SKIPPED_ELEMENTS.contains(&name));
        if in_skipped {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            fragments.push(trimmed);
        }
    }

    normalize_whitespace(&fragments.join(" "))
}
