//! Ask command implementation

use crate::config::Config;
use crate::error::{Error, Result};
use crate::progress::spinner;
use crate::session::{Answer, Session};
use crate::store::QdrantStore;

/// Run the question flow. A fresh process cannot carry the handle of an
/// earlier run, so the session first attaches to the configured
/// collection if it exists.
pub async fn cmd_ask(config: &Config, question: &str) -> Result<Answer> {
    let store = QdrantStore::connect(config).await?;
    let mut session = Session::new(config.clone(), store);

    if !session.attach().await? {
        return Err(Error::NoIndex);
    }

    let bar = spinner("Analyzing articles...");
    let result = session.ask(question).await;
    bar.finish_and_clear();

    result
}

/// Print an answer with its sources to console
pub fn print_answer(answer: &Answer) {
    println!("\nAnswer:\n");
    println!("{}", answer.text.trim());

    if !answer.sources.is_empty() {
        println!("\nSources:");
        for source in &answer.sources {
            println!("- {}", source);
        }
    }
}
