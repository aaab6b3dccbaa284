//! メール一覧取得と注文収集
//!
//! Gmail クライアントで検索・取得したメッセージを、デコーダー・抽出器・重複判定に
//! 順番に流す薄い層。メッセージは 1 通ずつ逐次処理する。
//! Gmail API のエラーは警告ログを出して読み飛ばし、処理全体は止めない。

use crate::config::AppConfig;
use crate::gmail_client::GmailClientTrait;
use crate::logic::date_range::get_date_range_for_month;
use crate::logic::dedup::is_duplicate_order;
use crate::logic::email_parser::build_order_record;
use crate::logic::sync_logic::{build_keyword_query, extract_email_details, EmailDetails};
use crate::parsers::{OrderRecord, Vendor};

/// キーワード（と追加クエリ）に一致するメッセージIDを取得する
///
/// API エラー時は空の一覧を返す。
pub async fn list_emails<C>(
    client: &C,
    keywords: &[String],
    max_results: u32,
    query: Option<&str>,
) -> Vec<String>
where
    C: GmailClientTrait + ?Sized,
{
    let merged_query = build_keyword_query(keywords, query);

    match client.list_message_ids(&merged_query, max_results).await {
        Ok(ids) => ids,
        Err(e) => {
            log::warn!("Gmail API error: {e}");
            Vec::new()
        }
    }
}

/// 一致したメッセージごとに件名・送信者・日付を取得する
///
/// 個別メッセージの取得に失敗した場合はそのメッセージだけ読み飛ばす。
pub async fn list_emails_with_details<C>(
    client: &C,
    keywords: &[String],
    max_results: u32,
    query: Option<&str>,
) -> Vec<EmailDetails>
where
    C: GmailClientTrait + ?Sized,
{
    let message_ids = list_emails(client, keywords, max_results, query).await;

    let mut email_details = Vec::with_capacity(message_ids.len());
    for message_id in message_ids {
        match client.get_message(&message_id).await {
            Ok(msg) => email_details.push(extract_email_details(&msg.headers)),
            Err(e) => log::warn!("Gmail API error when fetching message {message_id}: {e}"),
        }
    }
    email_details
}

/// 指定した年月に受信したメッセージIDを取得する
pub async fn list_emails_with_month<C>(
    client: &C,
    keywords: &[String],
    year: i32,
    month: u32,
    max_results: u32,
) -> Vec<String>
where
    C: GmailClientTrait + ?Sized,
{
    let range = get_date_range_for_month(year, month);
    list_emails(client, keywords, max_results, Some(&range.to_query())).await
}

/// 1 ベンダー分のメールから注文を抽出し、重複していないものを `orders` に追加する
///
/// # Returns
/// 追加した件数
pub async fn collect_vendor_orders<C>(
    client: &C,
    vendor: Vendor,
    keywords: &[String],
    max_results: u32,
    orders: &mut Vec<OrderRecord>,
) -> usize
where
    C: GmailClientTrait + ?Sized,
{
    let message_ids = list_emails(client, keywords, max_results, None).await;
    log::info!("{vendor}: {} candidate messages", message_ids.len());

    let mut added = 0;
    for message_id in message_ids {
        let msg = match client.get_message(&message_id).await {
            Ok(msg) => msg,
            Err(e) => {
                log::warn!("Gmail API error when fetching message {message_id}: {e}");
                continue;
            }
        };
        let Some(payload) = msg.payload.as_ref() else {
            log::debug!("Message {message_id} has no payload, skipping");
            continue;
        };

        let record = build_order_record(payload, extract_email_details(&msg.headers), vendor);
        if is_duplicate_order(orders, &record) {
            log::debug!("Message {message_id} skipped as duplicate or without order id");
            continue;
        }
        orders.push(record);
        added += 1;
    }

    log::info!("{vendor}: {added} orders added");
    added
}

/// 設定されたすべてのベンダーについて注文を収集する
///
/// ベンダーは設定順に処理し、注文は見つかった順に返す。
pub async fn process_all_orders<C>(client: &C, config: &AppConfig) -> Vec<OrderRecord>
where
    C: GmailClientTrait + ?Sized,
{
    let mut orders = Vec::new();
    for vendor_config in &config.vendors {
        collect_vendor_orders(
            client,
            vendor_config.vendor,
            &vendor_config.keywords,
            config.listing.max_results,
            &mut orders,
        )
        .await;
    }
    orders
}
