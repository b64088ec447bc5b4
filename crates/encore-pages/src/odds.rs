//! Live gacha odds: the remote lookup seam and the per-request fan-out.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use encore_sync::CompletionBarrier;
use tracing::debug;

use crate::domain::Gacha;

/// Odds published by the live endpoint for one gacha.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveOdds {
    /// Rarity tier -> overall pull chance, in percent.
    pub tiers: HashMap<String, f64>,
    /// Card id -> individual pull chance, in percent.
    pub per_card: HashMap<u32, f64>,
}

/// Remote odds lookup. One call per gacha; a lookup that fails or returns
/// nothing is an absence, never an error a page has to handle.
#[async_trait]
pub trait OddsService: Send + Sync {
    async fn live_rates(&self, gacha_id: u32) -> Option<LiveOdds>;
}

/// Fan out one odds lookup per running gacha and fan the results back in.
///
/// Every gacha in `gachas` counts toward the barrier: gachas outside their
/// window report an immediate absence instead of spending a remote call,
/// matching the lookups a live page actually needs. The returned map holds
/// only the lookups that produced data; with no gachas at all the barrier
/// still resolves (empty) without blocking.
pub async fn collect_live_odds<S>(
    service: Arc<S>,
    gachas: &[Gacha],
    now: DateTime<Utc>,
) -> HashMap<u32, LiveOdds>
where
    S: OddsService + 'static,
{
    let (reporter, completion) = CompletionBarrier::new(gachas.len());

    for gacha in gachas {
        if !gacha.is_running(now) {
            reporter.report(gacha.id, None);
            continue;
        }

        let service = Arc::clone(&service);
        let reporter = reporter.clone();
        let id = gacha.id;
        tokio::spawn(async move {
            reporter.report(id, service.live_rates(id).await);
        });
    }
    drop(reporter);

    let results = completion.wait().await;
    debug!(
        gachas = gachas.len(),
        resolved = results.len(),
        "live odds fan-out complete"
    );
    results
}
