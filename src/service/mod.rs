pub mod aggregator;
pub mod barcode;
pub mod matcher;
pub mod report;

pub use aggregator::build_index;
pub use barcode::{base_of, normalize};
pub use matcher::{match_all, Matcher};
pub use report::build_report;

use crate::models::{ProductRecord, Report, StockRecord};

/// 对账入口: 库存索引 -> 条码匹配 -> 报表
///
/// 纯内存计算, 每次调用只使用传入的数据。
pub fn reconcile(products: &[ProductRecord], stock_records: &[StockRecord]) -> Report {
    let index = build_index(stock_records);
    let (matches, max_matches) = match_all(products, &index);
    build_report(products, &matches, &index, max_matches)
}
