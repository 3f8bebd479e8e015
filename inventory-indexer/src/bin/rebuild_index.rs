//! Operational index rebuild tool.
//!
//! Verifies connectivity, rebuilds the search index from the relational
//! store, and runs a smoke-test search. Run with `--clean` to drop and
//! recreate the index first.
//!
//! ```text
//! cargo run --bin rebuild-index -- --clean
//! ```

use std::env;
use std::process::exit;

use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use inventory_indexer::Dependencies;
use inventory_indexer_shared::{SearchFilters, SearchPage};

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let clean = env::args().any(|arg| arg == "--clean" || arg == "-c");

    info!(clean, "Starting index rebuild");

    let deps = match Dependencies::new().await {
        Ok(deps) => deps,
        Err(e) => {
            error!(error = %e, "Initialization failed");
            exit(1);
        }
    };

    let summary = match deps.loader.rebuild(clean).await {
        Ok(summary) => summary,
        Err(e) => {
            error!(error = %e, "Rebuild failed");
            exit(1);
        }
    };

    info!(
        fetched = summary.fetched,
        indexed = summary.indexed,
        failed = summary.failed,
        "Rebuild complete"
    );

    for sample in &summary.sample_errors {
        error!(sample = %sample, "Sample item-level failure");
    }

    // Smoke test: the index should answer a match-all query. A failure
    // here is diagnostic only; the rebuild itself already completed.
    match deps
        .search_client
        .search("", &SearchFilters::default(), SearchPage::with_size(3))
        .await
    {
        Ok(response) => {
            info!(total = response.total, "Smoke-test search succeeded");
            for hit in &response.hits {
                info!(id = %hit.document.id, title = %hit.document.title, "Indexed item");
            }
        }
        Err(e) => {
            error!(error = %e, "Smoke-test search failed");
        }
    }
}
