use job_board::listings::{fetch_listing, JobFeed, ListingSink, ListingStore};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};
use tracing::info;

/// Listing fetched at startup, shared read-only by request handlers.
pub(crate) type SharedListings = Arc<RwLock<ListingStore>>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) listings: SharedListings,
}

/// Performs the single startup fetch and loads the shared store on success.
/// A failed fetch leaves the store as it was.
pub(crate) async fn populate_listings<F: JobFeed>(feed: F, listings: SharedListings) {
    let Some(batch) = fetch_listing(&feed).await else {
        return;
    };

    let count = batch.records.len();
    listings
        .write()
        .expect("listing lock poisoned")
        .load(batch.records);
    info!(records = count, "job listing store loaded");
}
