use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::fetcher::DetailSource;
use crate::model::Resource;

/// Enrichment stats returned after completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichStats {
    pub total: usize,
    pub enriched: usize,
    pub failed: usize,
    pub groups: usize,
}

/// Attach details to every resource, `batch_size` concurrent fetches at a time.
///
/// Groups run strictly one after another; a group starts only once every fetch
/// of the previous group has settled. Output order is input order. A resource
/// whose fetch fails is passed through without details.
pub async fn enrich_all<S>(
    source: Arc<S>,
    resources: Vec<Resource>,
    batch_size: usize,
) -> (Vec<Resource>, EnrichStats)
where
    S: DetailSource + 'static,
{
    let batch_size = batch_size.max(1);
    let total = resources.len();
    let mut stats = EnrichStats {
        total,
        ..Default::default()
    };

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    info!("Total resources to process: {}", total);
    let mut out = Vec::with_capacity(total);
    let mut pending = resources.into_iter();

    loop {
        let group: Vec<Resource> = pending.by_ref().take(batch_size).collect();
        if group.is_empty() {
            break;
        }
        info!(
            "Processing batch {} starting at index {} ({} resources)",
            stats.groups + 1,
            out.len(),
            group.len()
        );

        let handles: Vec<_> = group
            .iter()
            .map(|resource| {
                let source = Arc::clone(&source);
                let name = resource.name.clone();
                tokio::spawn(async move { source.fetch_details(&name).await })
            })
            .collect();

        // Awaiting in input order keeps output positional; every task is already running.
        for (resource, handle) in group.into_iter().zip(handles) {
            let enriched = match handle.await {
                Ok(Ok(details)) => {
                    stats.enriched += 1;
                    resource.with_details(details)
                }
                Ok(Err(e)) => {
                    warn!("Failed to fetch details for {}: {}", resource.name, e);
                    stats.failed += 1;
                    resource
                }
                Err(e) => {
                    warn!("Detail task for {} did not complete: {}", resource.name, e);
                    stats.failed += 1;
                    resource
                }
            };
            out.push(enriched);
            pb.inc(1);
        }

        stats.groups += 1;
    }

    pb.finish_and_clear();
    info!(
        "Enriched {} of {} resources ({} failed) in {} batches",
        stats.enriched, stats.total, stats.failed, stats.groups
    );
    (out, stats)
}
