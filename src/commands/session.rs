//! Interactive session command
//!
//! A line-oriented stand-in for the original single-page UI: the session
//! holds the index handle across interactions, URLs are staged with
//! `process`, free text is asked as a question, and `clear` drops the
//! index. Errors are printed and the loop keeps going.

use crate::commands::{print_answer, print_clear_report, print_process_report};
use crate::config::Config;
use crate::error::Result;
use crate::progress::spinner;
use crate::session::Session;
use crate::store::QdrantStore;
use std::io::Write as _;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};

/// Run the interactive session loop
pub async fn cmd_session(config: &Config) -> Result<()> {
    let store = QdrantStore::connect(config).await?;
    let mut session = Session::new(config.clone(), store);

    // Pick up an index left behind by an earlier run, if any
    match session.attach().await {
        Ok(true) => println!("Attached to existing collection '{}'", config.collection_name),
        Ok(false) => {}
        Err(e) => eprintln!("✗ {}", e),
    }

    println!("newsdesk interactive session ({} URLs max)", config.fetch.max_urls);
    print_help();

    let mut lines = BufReader::new(stdin()).lines();

    loop {
        print!("newsdesk> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((head, tail)) => (head, tail.trim()),
            None => (line, ""),
        };

        match command {
            "quit" | "exit" => break,

            "help" => print_help(),

            "process" => {
                let urls: Vec<String> =
                    rest.split_whitespace().map(|s| s.to_string()).collect();
                let bar = spinner("Loading and indexing articles...");
                let result = session.process(&urls).await;
                bar.finish_and_clear();

                match result {
                    Ok(report) => print_process_report(&report),
                    Err(e) => eprintln!("✗ Processing failed: {}", e),
                }
            }

            "clear" => match session.clear().await {
                Ok(report) => print_clear_report(&report),
                Err(e) => eprintln!("✗ Clear failed: {}", e),
            },

            // Anything else is a question
            _ => {
                if !session.has_index() {
                    eprintln!("✗ No articles indexed yet: use 'process <URL>...' first");
                    continue;
                }

                let bar = spinner("Analyzing articles...");
                let result = session.ask(line).await;
                bar.finish_and_clear();

                match result {
                    Ok(answer) => print_answer(&answer),
                    Err(e) => eprintln!("✗ Error generating answer: {}", e),
                }
            }
        }
    }

    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  process <URL> [URL ...]   fetch and index articles (replaces the index)");
    println!("  clear                     drop the indexed articles");
    println!("  help                      show this help");
    println!("  quit                      leave the session");
    println!("Any other input is asked as a question against the indexed articles.");
}
