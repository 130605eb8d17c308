use clap::Parser;
use std::path::PathBuf;
use stock_reconcile::{files, reconcile, AppConfig, OutputFormat};
use tracing::{error, info, Level};
use tracing_subscriber::fmt::time::ChronoLocal;

/// 库存对账: 商品主档 x 门店库存 -> 有货/需采购报表
#[derive(Debug, Parser)]
#[command(name = "stock-reconcile", version, about)]
struct Cli {
    /// 配置文件 (默认读取 ./reconcile.toml, 不存在则忽略)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 商品主档 (.csv / .tsv)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// 门店库存表 (.csv / .tsv)
    #[arg(long)]
    ledger: Option<PathBuf>,

    /// 输出目录
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// 输出格式
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// 日志详细程度 (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// 命令行参数优先级最高
    fn apply(&self, config: &mut AppConfig) {
        if let Some(p) = &self.catalog {
            config.input.catalog = p.clone();
        }
        if let Some(p) = &self.ledger {
            config.input.ledger = p.clone();
        }
        if let Some(p) = &self.output_dir {
            config.output.dir = p.clone();
        }
        if let Some(f) = self.format {
            config.output.format = f;
        }
        match self.verbose {
            0 => {}
            1 => config.log_level = "debug".to_string(),
            _ => config.log_level = "trace".to_string(),
        }
    }
}

fn init_logging(level: Level) {
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .with_max_level(level)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 加载配置 (失败时用默认级别初始化日志, 保证错误能写进日志)
    let mut config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            init_logging(Level::INFO);
            error!("配置加载失败: {}", e);
            return Err(e.into());
        }
    };
    cli.apply(&mut config);

    // 初始化日志 - 使用本地时间格式
    init_logging(config.level()?);

    info!("Starting reconcile with config: {:?}", config);

    // 1. 加载输入 (缺文件/缺列直接失败, 不产生任何输出)
    let products = files::load_catalog(&config.input.catalog)?;
    let ledger = files::load_ledger(&config.input.ledger)?;

    // 2. 对账
    let report = reconcile(&products, &ledger);

    // 3. 写出报表
    let store = files::store_label(&ledger, &config.output.default_store_label);
    let location = files::write_report(&report, &store, &config.output.dir, config.output.format)?;

    let message = format!(
        "Final output saved in '{}' with three sections ({}). In stock: {}, need to procure: {}",
        location.display(),
        files::writer::SECTION_NAMES.join(", "),
        report.summary.in_stock,
        report.summary.need_to_procure
    );
    info!("{}", message);
    println!("{}", message); // 同时输出到控制台

    Ok(())
}
