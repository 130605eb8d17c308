use crate::models::{MatchResult, ProductRecord, StockIndex};
use crate::service::barcode::normalize;

/// 条码匹配器
///
/// 对每个商品, 找出其条码列表中在库存表里精确出现过的条码;
/// 同时记录本次运行中最大的匹配数, 报表列数由它决定。
pub struct Matcher<'a> {
    index: &'a StockIndex,
    max_matches: usize,
}

impl<'a> Matcher<'a> {
    pub fn new(index: &'a StockIndex) -> Self {
        Self {
            index,
            max_matches: 0,
        }
    }

    /// 匹配单个商品
    ///
    /// 精确匹配规范条码 (不是基础条码), 保持主档顺序, 重复条码保留。
    /// 空串也按普通条码处理: 库存表里有空条码记录时, 空 EAN 会匹配到它。
    pub fn match_product(&mut self, product: &ProductRecord) -> MatchResult {
        let barcodes: Vec<String> = product
            .barcode_list
            .iter()
            .map(|raw| normalize(raw))
            .filter(|ean| self.index.contains(ean))
            .collect();

        self.max_matches = self.max_matches.max(barcodes.len());
        MatchResult { barcodes }
    }

    pub fn max_matches(&self) -> usize {
        self.max_matches
    }
}

/// 匹配全部商品, 返回 (逐商品结果, 最大匹配数)
pub fn match_all(products: &[ProductRecord], index: &StockIndex) -> (Vec<MatchResult>, usize) {
    let mut matcher = Matcher::new(index);
    let total = products.len();
    let mut matched = 0usize;
    let mut results = Vec::with_capacity(total);

    for (idx, product) in products.iter().enumerate() {
        let result = matcher.match_product(product);
        if !result.is_empty() {
            matched += 1;
        }
        tracing::debug!(
            "商品 {} ({}) 匹配到 {} 个条码",
            product.group_id,
            product.name,
            result.len()
        );
        results.push(result);

        // 进度日志 (每100个商品或第一个商品)
        let current = idx + 1;
        if current % 100 == 0 || current == 1 {
            tracing::info!("匹配进度: {}/{}, 已匹配: {}", current, total, matched);
        }
    }

    tracing::info!(
        "匹配完成: 商品: {}, 已匹配: {}, 最大匹配数: {}",
        total,
        matched,
        matcher.max_matches()
    );

    (results, matcher.max_matches())
}
