//! Process command implementation

use crate::config::Config;
use crate::error::Result;
use crate::progress::spinner;
use crate::session::{ProcessReport, Session};
use crate::store::QdrantStore;

/// Run the process flow against the configured collection
pub async fn cmd_process(config: &Config, urls: &[String]) -> Result<ProcessReport> {
    let store = QdrantStore::connect(config).await?;
    let mut session = Session::new(config.clone(), store);

    let bar = spinner("Loading and indexing articles...");
    let result = session.process(urls).await;
    bar.finish_and_clear();

    result
}

/// Print a process report to console
pub fn print_process_report(report: &ProcessReport) {
    println!("✓ Articles processed successfully");
    println!("  Articles indexed: {}", report.articles);
    println!("  Chunks created: {}", report.chunks);
    println!("  Sources:");
    for source in &report.sources {
        println!("    - {}", source);
    }
}
