use crate::models::{StockIndex, StockRecord};
use crate::service::barcode::{base_of, normalize};

/// 构建库存索引: 按基础条码汇总库存, 同时收集全部规范条码
///
/// 数量原样累加 (含 0 和负数), 汇总结果与记录顺序无关。
pub fn build_index(stock_records: &[StockRecord]) -> StockIndex {
    let mut index = StockIndex::new();
    let mut blank = 0usize;

    for record in stock_records {
        let canonical = normalize(&record.raw_barcode);
        if canonical.is_empty() {
            blank += 1;
        }
        let base = base_of(&canonical).to_string();
        index.add(canonical, base, record.in_stock_qty);
    }

    if blank > 0 {
        tracing::warn!("库存表中有 {} 条记录条码为空", blank);
    }
    tracing::info!(
        "库存索引构建完成: {} 条记录, {} 个条码, {} 个基础条码",
        stock_records.len(),
        index.barcode_count(),
        index.base_count()
    );

    index
}
