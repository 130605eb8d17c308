//! 条码规范化
//!
//! 表格导出时数值列常被写成浮点 ("6901234567890.0"), 空单元格会变成 "nan",
//! 这里把这些痕迹清掉, 得到规范条码; 规范条码在第一个 '-' 之前的部分是基础条码。

/// 规范化原始条码, 不会失败, 无法使用的输入得到空串
///
/// 单轮清洗: 去首尾空白, 删除 "nan"/"NaN" 子串, 去掉结尾的 ".0"。
/// 清洗反复执行直到结果不再变化, 因此 `normalize(normalize(x)) == normalize(x)`。
pub fn normalize(raw: &str) -> String {
    let mut current = clean_once(raw);
    loop {
        let next = clean_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_once(raw: &str) -> String {
    let mut out = raw.trim().replace("nan", "").replace("NaN", "");
    if out.ends_with(".0") {
        out.truncate(out.len() - 2);
    }
    out
}

/// 基础条码: 第一个 '-' 之前的前缀 (去掉规格/包装后缀)
pub fn base_of(canonical: &str) -> &str {
    canonical
        .split_once('-')
        .map_or(canonical, |(base, _)| base)
}
