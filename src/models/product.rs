use serde::{Deserialize, Serialize};

/// 商品主档记录 (1500 SKU 清单的一行)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub group_id: String,
    pub name: String,
    pub category: String,
    pub brand: String,
    /// 主档中的 Quantity 列, 原样透传到报表
    pub quantity_hint: String,
    /// 原始条码列表, 来源为 EAN 列按 ';' 切分, 保持原顺序
    pub barcode_list: Vec<String>,
}

impl ProductRecord {
    /// 切分 EAN 列, 不做任何清洗
    pub fn split_barcodes(raw_ean: &str) -> Vec<String> {
        raw_ean.split(';').map(str::to_string).collect()
    }
}

/// 单个商品的匹配结果: 在库存表中精确出现过的规范化条码 (保序, 不去重)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub barcodes: Vec<String>,
}

impl MatchResult {
    pub fn len(&self) -> usize {
        self.barcodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.barcodes.is_empty()
    }
}
