use crate::error::Result;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 默认配置文件名 (工作目录下, 可选)
pub const DEFAULT_CONFIG_FILE: &str = "reconcile.toml";

/// 环境变量前缀, 例如 RECONCILE_OUTPUT__DIR
pub const ENV_PREFIX: &str = "RECONCILE";

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// 商品主档 (1500 SKU 清单)
    pub catalog: PathBuf,
    /// 门店库存表
    pub ledger: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub format: OutputFormat,
    /// 库存表没有门店名时使用的名称
    pub default_store_label: String,
}

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// 单个 JSON 文件, 三个命名分区
    Json,
    /// 一个目录, 每个分区一个 CSV
    Csv,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input: InputConfig {
                catalog: PathBuf::from("1500Skus.csv"),
                ledger: PathBuf::from("Instock.csv"),
            },
            output: OutputConfig {
                dir: PathBuf::from("."),
                format: OutputFormat::Json,
                default_store_label: "Supermarket".to_string(),
            },
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// 分层加载配置: 默认值 < 配置文件 < 环境变量
    ///
    /// 显式给出的配置文件必须存在; 默认的 `reconcile.toml` 不存在时忽略。
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("input.catalog", "1500Skus.csv")?
            .set_default("input.ledger", "Instock.csv")?
            .set_default("output.dir", ".")?
            .set_default("output.format", "json")?
            .set_default("output.default_store_label", "Supermarket")?
            .set_default("log_level", "info")?;

        builder = match path {
            Some(p) => builder.add_source(File::from(p).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let app: Self = config.try_deserialize()?;
        app.level()?;
        Ok(app)
    }

    /// 解析 log_level, 无法识别的级别视为配置错误
    pub fn level(&self) -> Result<tracing::Level> {
        self.log_level.trim().parse().map_err(|_| {
            ConfigError::Message(format!(
                "invalid log_level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ))
            .into()
        })
    }
}
