//! 通販メールから注文番号と合計金額を抽出するライブラリ
//!
//! - `gmail`: Gmail のメッセージ型と本文パートのデコード
//! - `parsers`: ベンダーごとのパターンテーブルと注文レコード
//! - `logic`: 正規化・期間計算・重複判定・一覧取得

use std::io::Write;

pub mod config;
pub mod gmail;
pub mod gmail_client;
pub mod logic;
pub mod parsers;

/// ロガーを初期化する
///
/// リリースビルドではWarnレベル以上、デバッグビルドではInfoレベル以上のログを出力する。
/// `RUST_LOG` が設定されていればそちらが優先される。
pub fn init_logger() -> Result<(), String> {
    #[cfg(debug_assertions)]
    let default_level = log::LevelFilter::Info;
    #[cfg(not(debug_assertions))]
    let default_level = log::LevelFilter::Warn;

    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .format(|buf, record| {
            // 受信側の現地時刻（トルコ時間）で出力する
            writeln!(
                buf,
                "[{} {:5} {}] {}",
                chrono::Utc::now()
                    .with_timezone(&chrono_tz::Europe::Istanbul)
                    .format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .map_err(|e| format!("Failed to initialize logger: {e}"))
}
