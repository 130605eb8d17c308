pub mod product;
pub mod report;
pub mod stock;

pub use product::{MatchResult, ProductRecord};
pub use report::{BarcodeSlot, Report, ReportRow, ReportTable, SummaryCounts};
pub use stock::{StockIndex, StockRecord};
