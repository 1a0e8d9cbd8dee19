//! Clear command implementation

use crate::config::Config;
use crate::error::Result;
use crate::session::{ClearReport, Session};
use crate::store::QdrantStore;

/// Run the clear flow: drop the configured collection if it exists
pub async fn cmd_clear(config: &Config) -> Result<ClearReport> {
    let store = QdrantStore::connect(config).await?;
    let mut session = Session::new(config.clone(), store);
    session.clear().await
}

/// Print a clear report to console
pub fn print_clear_report(report: &ClearReport) {
    if report.existed {
        println!("✓ Database cleared");
    } else {
        println!("✓ Database already empty");
    }
}
