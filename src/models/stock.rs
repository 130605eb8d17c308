use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// 门店库存记录 (Instock 表的一行)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub store_name: String,
    pub raw_barcode: String,
    pub in_stock_qty: i64,
}

/// 库存索引
///
/// - `base_quantities`: 基础条码 -> 汇总库存
/// - `barcodes`: 库存表中出现过的全部规范化条码, 用于精确匹配
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockIndex {
    base_quantities: IndexMap<String, i64>,
    barcodes: IndexSet<String>,
}

impl StockIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// 累加一条已规范化的库存记录, 汇总溢出时饱和到 i64 边界
    pub fn add(&mut self, canonical: String, base: String, qty: i64) {
        let total = self.base_quantities.entry(base).or_insert(0);
        *total = total.saturating_add(qty);
        self.barcodes.insert(canonical);
    }

    /// 规范化条码是否在库存表中精确出现
    pub fn contains(&self, canonical: &str) -> bool {
        self.barcodes.contains(canonical)
    }

    /// 基础条码的汇总库存, 不存在时为 0
    pub fn quantity_for_base(&self, base: &str) -> i64 {
        self.base_quantities.get(base).copied().unwrap_or(0)
    }

    pub fn base_count(&self) -> usize {
        self.base_quantities.len()
    }

    pub fn barcode_count(&self) -> usize {
        self.barcodes.len()
    }

    pub fn base_quantities(&self) -> impl Iterator<Item = (&str, i64)> {
        self.base_quantities.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_accumulates_by_base() {
        let mut index = StockIndex::new();
        index.add("222-A".into(), "222".into(), 5);
        index.add("222-B".into(), "222".into(), 3);
        index.add("333".into(), "333".into(), -2);

        assert_eq!(index.quantity_for_base("222"), 8);
        assert_eq!(index.quantity_for_base("333"), -2);
        assert_eq!(index.quantity_for_base("999"), 0);
        assert!(index.contains("222-A"));
        assert!(!index.contains("222"));
        assert_eq!(index.base_count(), 2);
        assert_eq!(index.barcode_count(), 3);
    }

    #[test]
    fn add_saturates_instead_of_overflowing() {
        let mut index = StockIndex::new();
        index.add("1".into(), "1".into(), i64::MAX);
        index.add("1-A".into(), "1".into(), i64::MAX);
        assert_eq!(index.quantity_for_base("1"), i64::MAX);

        index.add("2".into(), "2".into(), i64::MIN);
        index.add("2-A".into(), "2".into(), -1);
        assert_eq!(index.quantity_for_base("2"), i64::MIN);
    }
}
