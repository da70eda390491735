//! kvtrace - Call-counting, call-history and TTL-cache wrappers
//!
//! Demo driver: exercises the cached counter, prints its replay, and
//! optionally fetches a URL twice through the page cache.

use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kvtrace::counter::STORE_OP_NAME;
use kvtrace::wrap::print_replay;
use kvtrace::{
    spawn_cleanup_task, CachedCounter, Config, HttpFetcher, MemoryStore, PageCache, StoreHandle,
};

/// Entry point for the kvtrace demo.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the shared store handle and background sweep
/// 4. Store a couple of values through the counted, recorded operation
/// 5. Print the recorded call history
/// 6. If a URL argument was given, fetch it twice through the page cache
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kvtrace=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: page_ttl={}s, http_timeout={}s, cleanup_interval={}s",
        config.page_ttl, config.http_timeout, config.cleanup_interval
    );

    // Create the shared store and start the background expiry sweep
    let store = StoreHandle::new(MemoryStore::new());
    let cleanup_handle = spawn_cleanup_task(store.clone(), config.cleanup_interval);

    // Exercise the counted, recorded store operation
    let counter = CachedCounter::new(store.clone());
    let key = counter.store("hello")?;
    info!("stored \"hello\" under key {}", key);
    info!("read back: {:?}", counter.get_str(&key)?);
    counter.store(42i64)?;
    info!("store called {} times", counter.call_count()?);

    print_replay(&store, STORE_OP_NAME)?;

    // Optional: fetch a URL twice through the TTL page cache
    if let Some(url) = std::env::args().nth(1) {
        let fetcher = HttpFetcher::new(Duration::from_secs(config.http_timeout))?;
        let pages = PageCache::new(
            store.clone(),
            fetcher,
            Duration::from_secs(config.page_ttl),
        );

        let body = pages.get_page(&url).await?;
        info!("fetched {} ({} bytes)", url, body.len());

        // Second access within the TTL is served from cache
        pages.get_page(&url).await?;
        info!("{} accessed {} times", url, pages.access_count(&url)?);
    }

    cleanup_handle.abort();
    Ok(())
}
