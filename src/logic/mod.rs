//! ビジネスロジック
//!
//! Gmail API へのアクセスを持たない純粋関数（listing のみクライアントを受け取る）。

pub mod date_range;
pub mod dedup;
pub mod email_parser;
pub mod listing;
pub mod sync_logic;
pub mod text;
