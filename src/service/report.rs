use crate::models::{
    BarcodeSlot, MatchResult, ProductRecord, Report, ReportRow, ReportTable, StockIndex,
    SummaryCounts,
};
use crate::service::barcode::base_of;

/// 构建报表
///
/// `matches` 与 `products` 一一对应; `max_matches` 必须在建任何一行之前确定,
/// 每行都补齐到 `max_matches` 个槽位 (空条码 + 数量 0)。
/// 槽位数量按基础条码在索引中查找, 而不是该条码自己那条记录的数量。
///
/// # Panics
///
/// `products` 与 `matches` 长度不一致时 panic。
pub fn build_report(
    products: &[ProductRecord],
    matches: &[MatchResult],
    stock_index: &StockIndex,
    max_matches: usize,
) -> Report {
    assert_eq!(
        products.len(),
        matches.len(),
        "每个商品必须对应一个匹配结果"
    );

    let rows: Vec<ReportRow> = products
        .iter()
        .zip(matches)
        .map(|(product, matched)| build_row(product, matched, stock_index, max_matches))
        .collect();

    let need_rows: Vec<ReportRow> = rows
        .iter()
        .filter(|r| r.needs_procurement())
        .cloned()
        .collect();

    let summary = SummaryCounts {
        in_stock: rows.len() - need_rows.len(),
        need_to_procure: need_rows.len(),
    };

    tracing::info!(
        "报表生成完成: 商品: {}, 有货: {}, 需采购: {}, 条码列: {}",
        rows.len(),
        summary.in_stock,
        summary.need_to_procure,
        max_matches
    );

    Report {
        final_output: ReportTable { max_matches, rows },
        need_to_procure: ReportTable {
            max_matches,
            rows: need_rows,
        },
        summary,
    }
}

fn build_row(
    product: &ProductRecord,
    matched: &MatchResult,
    stock_index: &StockIndex,
    max_matches: usize,
) -> ReportRow {
    let slots: Vec<BarcodeSlot> = (0..max_matches)
        .map(|i| match matched.barcodes.get(i) {
            Some(barcode) => BarcodeSlot {
                quantity: stock_index.quantity_for_base(base_of(barcode)),
                barcode: Some(barcode.clone()),
            },
            None => BarcodeSlot::empty(),
        })
        .collect();

    let total_quantity = slots
        .iter()
        .fold(0i64, |acc, s| acc.saturating_add(s.quantity));

    ReportRow {
        group_id: product.group_id.clone(),
        name: product.name.clone(),
        category: product.category.clone(),
        brand: product.brand.clone(),
        quantity_hint: product.quantity_hint.clone(),
        slots,
        total_quantity,
    }
}
