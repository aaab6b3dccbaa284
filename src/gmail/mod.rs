//! Gmail関連モジュール

pub mod client;
pub mod payload;

// clientモジュールから公開されている型をre-export
pub use client::{GmailClient, GmailHub, GmailMessage, MessageHeader};

// payloadモジュールから公開されている型と関数をre-export
pub use payload::{extract_text, MessagePart};
