//! 表格加载
//!
//! 按扩展名选择分隔符 (.csv / .tsv), 先校验必需列, 缺列时一次性报出全部缺失列名,
//! 校验通过后才解析成类型化记录。

use crate::error::{ReconcileError, Result};
use crate::models::{ProductRecord, StockRecord};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const CATALOG_COLUMNS: [&str; 6] = ["Group ID", "Product Name", "EAN", "Category", "Brand", "Quantity"];
pub const LEDGER_COLUMNS: [&str; 3] = ["Store Name", "Barcode", "In Stock Qty"];

/// 商品主档原始行
#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Group ID", default)]
    group_id: String,
    #[serde(rename = "Product Name", default)]
    name: String,
    #[serde(rename = "EAN", default)]
    ean: String,
    #[serde(rename = "Category", default)]
    category: String,
    #[serde(rename = "Brand", default)]
    brand: String,
    #[serde(rename = "Quantity", default)]
    quantity: String,
}

/// 库存表原始行 (数量先按文本读入, 再单独解析以便报出行号)
#[derive(Debug, Deserialize)]
struct LedgerRow {
    #[serde(rename = "Store Name", default)]
    store_name: String,
    #[serde(rename = "Barcode", default)]
    barcode: String,
    #[serde(rename = "In Stock Qty", default)]
    in_stock_qty: String,
}

/// 根据扩展名确定分隔符
pub fn delimiter_for(path: &Path) -> Result<u8> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("csv") => Ok(b','),
        Some("tsv") => Ok(b'\t'),
        _ => Err(ReconcileError::UnsupportedFileType {
            path: path.to_path_buf(),
        }),
    }
}

/// 从文件加载商品主档
pub fn load_catalog(path: &Path) -> Result<Vec<ProductRecord>> {
    let (file, delimiter) = open_table(path)?;
    let products = read_catalog(file, delimiter, path)?;
    tracing::info!("已加载商品主档 {}: {} 个商品", path.display(), products.len());
    Ok(products)
}

/// 从文件加载库存表
pub fn load_ledger(path: &Path) -> Result<Vec<StockRecord>> {
    let (file, delimiter) = open_table(path)?;
    let records = read_ledger(file, delimiter, path)?;
    tracing::info!("已加载库存表 {}: {} 条记录", path.display(), records.len());
    Ok(records)
}

fn open_table(path: &Path) -> Result<(File, u8)> {
    if !path.exists() {
        tracing::error!("输入文件不存在: {}", path.display());
        return Err(ReconcileError::MissingFile {
            path: path.to_path_buf(),
        });
    }
    let delimiter = delimiter_for(path)?;
    Ok((File::open(path)?, delimiter))
}

fn reader_for<R: Read>(reader: R, delimiter: u8) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// 校验必需列, 返回全部缺失的列名
fn check_columns<R: Read>(csv_reader: &mut csv::Reader<R>, required: &[&str], source: &Path) -> Result<()> {
    let headers = csv_reader.headers()?;
    let missing: Vec<String> = required
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        tracing::error!("Missing columns {:?} in {}", missing, source.display());
        Err(ReconcileError::MissingColumns {
            path: source.to_path_buf(),
            columns: missing,
        })
    }
}

/// 从任意 reader 解析商品主档, `source` 仅用于错误信息
pub fn read_catalog<R: Read>(reader: R, delimiter: u8, source: &Path) -> Result<Vec<ProductRecord>> {
    let mut csv_reader = reader_for(reader, delimiter);
    check_columns(&mut csv_reader, &CATALOG_COLUMNS, source)?;

    let mut products = Vec::new();
    for result in csv_reader.deserialize() {
        let row: CatalogRow = result?;
        products.push(ProductRecord {
            group_id: row.group_id,
            name: row.name,
            category: row.category,
            brand: row.brand,
            quantity_hint: row.quantity,
            barcode_list: ProductRecord::split_barcodes(&row.ean),
        });
    }
    Ok(products)
}

/// 从任意 reader 解析库存表, `source` 仅用于错误信息
pub fn read_ledger<R: Read>(reader: R, delimiter: u8, source: &Path) -> Result<Vec<StockRecord>> {
    let mut csv_reader = reader_for(reader, delimiter);
    check_columns(&mut csv_reader, &LEDGER_COLUMNS, source)?;

    let mut records = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let row: LedgerRow = result?;
        let in_stock_qty =
            parse_quantity(&row.in_stock_qty).ok_or_else(|| ReconcileError::InvalidQuantity {
                path: source.to_path_buf(),
                line: line_num as u64 + 2,
                value: row.in_stock_qty.clone(),
            })?;
        records.push(StockRecord {
            store_name: row.store_name,
            raw_barcode: row.barcode,
            in_stock_qty,
        });
    }
    Ok(records)
}

/// 解析库存数量: 空值/NaN 视为 0, 接受 "5.0" 这类整数值浮点写法
///
/// 超出 i64 范围的值 (如 "1e30") 视为无效, 不做饱和截断。
pub fn parse_quantity(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") {
        return Some(0);
    }
    if let Ok(v) = s.parse::<i64>() {
        return Some(v);
    }
    match s.parse::<f64>() {
        // i64::MAX as f64 == 2^63, 已超出范围, 所以上界用 '<'
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 => {
            Some(v as i64)
        }
        _ => None,
    }
}
