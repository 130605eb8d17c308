use serde::{Deserialize, Serialize};

/// 报表固定的商品属性列
pub const ATTRIBUTE_COLUMNS: [&str; 5] = ["Group ID", "Product Name", "Category", "Brand", "Quantity"];

pub const TOTAL_QUANTITY_COLUMN: &str = "Total Quantity";

pub const SUMMARY_IN_STOCK: &str = "Total In Stock";
pub const SUMMARY_NEED_TO_PROCURE: &str = "Need to Procure";

/// 匹配槽位: 第 i 个匹配条码及其按基础条码解析出的库存
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarcodeSlot {
    pub barcode: Option<String>,
    pub quantity: i64,
}

impl BarcodeSlot {
    pub fn empty() -> Self {
        Self {
            barcode: None,
            quantity: 0,
        }
    }
}

/// 报表行 (每个商品一行)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub group_id: String,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub quantity_hint: String,
    /// 长度恒等于本次运行的 max_matches
    pub slots: Vec<BarcodeSlot>,
    pub total_quantity: i64,
}

impl ReportRow {
    pub fn needs_procurement(&self) -> bool {
        self.total_quantity <= 0
    }

    /// 按列顺序展开成单元格, None 表示空值
    pub fn cells(&self) -> Vec<Option<String>> {
        let mut cells = Vec::with_capacity(ATTRIBUTE_COLUMNS.len() + self.slots.len() * 2 + 1);
        cells.push(Some(self.group_id.clone()));
        cells.push(Some(self.name.clone()));
        cells.push(Some(self.category.clone()));
        cells.push(Some(self.brand.clone()));
        cells.push(Some(self.quantity_hint.clone()));
        cells.extend(self.slots.iter().map(|s| s.barcode.clone()));
        cells.extend(self.slots.iter().map(|s| Some(s.quantity.to_string())));
        cells.push(Some(self.total_quantity.to_string()));
        cells
    }
}

/// 宽表: 列数随本次运行的 max_matches 变化
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTable {
    pub max_matches: usize,
    pub rows: Vec<ReportRow>,
}

impl ReportTable {
    /// 列头: 属性列, Matched Barcode 1..K, Quantity 1..K, Total Quantity
    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = ATTRIBUTE_COLUMNS.iter().map(|c| c.to_string()).collect();
        columns.extend((1..=self.max_matches).map(|i| format!("Matched Barcode {}", i)));
        columns.extend((1..=self.max_matches).map(|i| format!("Quantity {}", i)));
        columns.push(TOTAL_QUANTITY_COLUMN.to_string());
        columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 汇总: 有货 / 需采购
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCounts {
    pub in_stock: usize,
    pub need_to_procure: usize,
}

impl SummaryCounts {
    pub fn total(&self) -> usize {
        self.in_stock + self.need_to_procure
    }

    /// (Metric, Value) 两行
    pub fn rows(&self) -> [(&'static str, usize); 2] {
        [
            (SUMMARY_IN_STOCK, self.in_stock),
            (SUMMARY_NEED_TO_PROCURE, self.need_to_procure),
        ]
    }
}

/// 一次对账的完整产出
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub final_output: ReportTable,
    pub need_to_procure: ReportTable,
    pub summary: SummaryCounts,
}
