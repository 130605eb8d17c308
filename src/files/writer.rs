//! 报表输出
//!
//! 三个分区: Summary / Final Output / Need to Procure。
//! JSON 格式写成单个文件; CSV 格式写成一个目录, 每个分区一个文件。

use crate::config::OutputFormat;
use crate::error::Result;
use crate::models::{Report, ReportRow, ReportTable, StockRecord, SummaryCounts};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const SECTION_SUMMARY: &str = "Summary";
pub const SECTION_FINAL_OUTPUT: &str = "Final Output";
pub const SECTION_NEED_TO_PROCURE: &str = "Need to Procure";

pub const SECTION_NAMES: [&str; 3] = [SECTION_SUMMARY, SECTION_FINAL_OUTPUT, SECTION_NEED_TO_PROCURE];

/// 报表文档 (JSON 输出)
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub store: String,
    pub generated_at: DateTime<Utc>,
    pub sections: IndexMap<String, Section>,
}

/// 单个分区: 列头 + 行
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ReportDocument {
    pub fn new(store: &str, report: &Report) -> Self {
        let mut sections = IndexMap::new();
        sections.insert(SECTION_SUMMARY.to_string(), summary_section(&report.summary));
        sections.insert(SECTION_FINAL_OUTPUT.to_string(), table_section(&report.final_output));
        sections.insert(
            SECTION_NEED_TO_PROCURE.to_string(),
            table_section(&report.need_to_procure),
        );
        Self {
            store: store.to_string(),
            generated_at: Utc::now(),
            sections,
        }
    }
}

fn summary_section(summary: &SummaryCounts) -> Section {
    Section {
        columns: vec!["Metric".to_string(), "Value".to_string()],
        rows: summary
            .rows()
            .iter()
            .map(|(metric, value)| vec![Value::from(*metric), Value::from(*value)])
            .collect(),
    }
}

fn table_section(table: &ReportTable) -> Section {
    Section {
        columns: table.columns(),
        rows: table.rows.iter().map(json_row).collect(),
    }
}

/// 属性列为字符串, 空槽位为 null, 数量列为数值
fn json_row(row: &ReportRow) -> Vec<Value> {
    let mut cells = vec![
        Value::from(row.group_id.as_str()),
        Value::from(row.name.as_str()),
        Value::from(row.category.as_str()),
        Value::from(row.brand.as_str()),
        Value::from(row.quantity_hint.as_str()),
    ];
    cells.extend(row.slots.iter().map(|s| match &s.barcode {
        Some(b) => Value::from(b.as_str()),
        None => Value::Null,
    }));
    cells.extend(row.slots.iter().map(|s| Value::from(s.quantity)));
    cells.push(Value::from(row.total_quantity));
    cells
}

/// 门店名: 库存表第一个非空 Store Name, 否则使用默认名称
pub fn store_label(ledger: &[StockRecord], default_label: &str) -> String {
    ledger
        .iter()
        .map(|r| r.store_name.trim())
        .find(|name| !name.is_empty() && !name.eq_ignore_ascii_case("nan"))
        .unwrap_or(default_label)
        .to_string()
}

/// 输出文件名主干 `<store>_output`, 文件名中不允许的字符替换为 '_'
pub fn output_stem(store: &str) -> String {
    let safe: String = store
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{}_output", safe)
}

/// 写 Summary 分区 (Metric, Value)
pub fn write_summary_csv<W: Write>(summary: &SummaryCounts, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["Metric", "Value"])?;
    for (metric, value) in summary.rows() {
        csv_writer.write_record([metric.to_string(), value.to_string()])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// 写宽表分区, 空槽位写成空单元格
pub fn write_table_csv<W: Write>(table: &ReportTable, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(table.columns())?;
    for row in &table.rows {
        csv_writer.write_record(row.cells().into_iter().map(Option::unwrap_or_default))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// 写 JSON 文档
pub fn write_json<W: Write>(document: &ReportDocument, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, document)?;
    Ok(())
}

/// 写出完整报表, 返回输出位置 (JSON 为文件, CSV 为目录)
///
/// 写入失败时不会留下不完整的输出。
pub fn write_report(report: &Report, store: &str, dir: &Path, format: OutputFormat) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let stem = output_stem(store);

    let location = match format {
        OutputFormat::Json => {
            let path = dir.join(format!("{}.json", stem));
            write_staged(&path, |staging| {
                let mut out = BufWriter::new(File::create(staging)?);
                write_json(&ReportDocument::new(store, report), &mut out)?;
                out.flush()?;
                Ok(())
            })?;
            path
        }
        OutputFormat::Csv => {
            let out_dir = dir.join(&stem);
            write_staged(&out_dir, |staging| {
                fs::create_dir_all(staging)?;
                write_summary_csv(
                    &report.summary,
                    File::create(staging.join(format!("{}.csv", SECTION_SUMMARY)))?,
                )?;
                write_table_csv(
                    &report.final_output,
                    File::create(staging.join(format!("{}.csv", SECTION_FINAL_OUTPUT)))?,
                )?;
                write_table_csv(
                    &report.need_to_procure,
                    File::create(staging.join(format!("{}.csv", SECTION_NEED_TO_PROCURE)))?,
                )
            })?;
            out_dir
        }
    };

    tracing::info!("报表已写出: {}", location.display());
    Ok(location)
}

/// 先写到同目录下的临时位置, 全部成功后再改名为 `target`
///
/// `write` 失败时删除临时位置并返回原错误; 已存在的旧输出只在改名前才被替换。
pub fn write_staged<F>(target: &Path, write: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let staging = staging_path(target);
    remove_path(&staging)?;

    if let Err(e) = write(&staging) {
        tracing::error!("写出 {} 失败, 清理临时输出: {}", target.display(), e);
        remove_path(&staging).ok();
        return Err(e);
    }

    if target.is_dir() {
        fs::remove_dir_all(target)?;
    }
    fs::rename(&staging, target)?;
    Ok(())
}

fn staging_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{}.partial", name))
}

fn remove_path(path: &Path) -> std::io::Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)
    } else if path.exists() {
        fs::remove_file(path)
    } else {
        Ok(())
    }
}
