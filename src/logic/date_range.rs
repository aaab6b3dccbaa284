//! 月単位の検索期間の計算

use serde::{Deserialize, Serialize};

/// 検索期間（start は含む、end は含まない）。どちらも "YYYY-MM-DD"。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    /// Gmail 検索クエリ用の "after:<start> before:<end>" を返す
    pub fn to_query(&self) -> String {
        format!("after:{} before:{}", self.start, self.end)
    }
}

/// 指定した年月の 1 日から翌月 1 日までの期間を返す
///
/// 12 月は翌年 1 月 1 日に繰り上がる。月の範囲（1〜12）は検証しないが、
/// 極端な値でもパニックはしない（年の繰り上がりは wrapping）。
///
/// # Examples
/// ```
/// use order_mail_lib::logic::date_range::get_date_range_for_month;
///
/// let range = get_date_range_for_month(2024, 12);
/// assert_eq!(range.start, "2024-12-01");
/// assert_eq!(range.end, "2025-01-01");
/// assert_eq!(range.to_query(), "after:2024-12-01 before:2025-01-01");
/// ```
pub fn get_date_range_for_month(year: i32, month: u32) -> DateRange {
    let start = format!("{year}-{month:02}-01");
    let end = match month.checked_add(1).filter(|next| *next < 13) {
        Some(next_month) => format!("{year}-{next_month:02}-01"),
        None => format!("{}-01-01", year.wrapping_add(1)),
    };
    DateRange { start, end }
}
