pub mod loader;
pub mod writer;

pub use loader::{load_catalog, load_ledger, read_catalog, read_ledger};
pub use writer::{store_label, write_report, ReportDocument};
