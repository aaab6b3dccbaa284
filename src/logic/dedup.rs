//! 注文の重複判定

use crate::parsers::OrderRecord;

/// 新しい注文をスキップすべきか（重複扱いか）を判定する
///
/// - 注文番号がない（None / 空文字）場合は重複扱い
/// - 既存の注文に同じ注文番号があれば重複
/// - 注文番号があり、既存と重ならない場合のみ false
pub fn is_duplicate_order(existing_orders: &[OrderRecord], new_order: &OrderRecord) -> bool {
    let Some(new_id) = new_order.order_id.as_deref().filter(|id| !id.is_empty()) else {
        return true;
    };

    existing_orders
        .iter()
        .any(|order| order.order_id.as_deref() == Some(new_id))
}
