//! Single-gacha table page: the card pool plus live odds when the gacha
//! is currently running.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

use crate::domain::{ContentDirectory, Gacha, GachaCard};
use crate::odds::{LiveOdds, OddsService, collect_live_odds};

#[derive(Debug, Error)]
pub enum PageError {
    /// The page's primary datum is missing; the router turns this into a
    /// 404, unlike auxiliary data which merely degrades the view.
    #[error("gacha {0} not found")]
    GachaNotFound(u32),

    #[error("no gacha is currently running; an explicit id is required")]
    NoCurrentGacha,
}

/// Everything the gacha table renders from.
#[derive(Debug, Clone)]
pub struct GachaTableView {
    pub gacha: Gacha,
    /// Pool sorted by the game's own sort order.
    pub cards: Vec<GachaCard>,
    /// Live odds, present only for a running gacha whose lookup succeeded.
    pub odds: Option<LiveOdds>,
    /// Per-card pull chance for the pool, derived from `odds`; cards the
    /// endpoint did not mention show as 0.0.
    pub relative_odds: Option<HashMap<u32, f64>>,
}

/// Build the table for `gacha_id`, or for the first currently-running
/// gacha when no id is given.
pub async fn gacha_table<D, S>(
    directory: &D,
    odds: Arc<S>,
    gacha_id: Option<u32>,
    now: DateTime<Utc>,
) -> Result<GachaTableView, PageError>
where
    D: ContentDirectory,
    S: OddsService + 'static,
{
    let gacha = match gacha_id {
        Some(id) => directory
            .gacha_by_id(id)
            .ok_or(PageError::GachaNotFound(id))?,
        None => directory
            .gachas(now)
            .into_iter()
            .next()
            .ok_or(PageError::NoCurrentGacha)?,
    };

    let mut cards = directory.cards_in_gacha(gacha.id);
    cards.sort_by_key(|c| c.sort_order);

    // The odds endpoint only answers for running gachas; a historical
    // table renders without the odds columns.
    let odds = collect_live_odds(odds, std::slice::from_ref(&gacha), now)
        .await
        .remove(&gacha.id);

    let relative_odds = odds.as_ref().map(|o| {
        cards
            .iter()
            .map(|c| (c.card_id, o.per_card.get(&c.card_id).copied().unwrap_or(0.0)))
            .collect()
    });

    if odds.is_none() {
        debug!(gacha = gacha.id, "rendering gacha table without live odds");
    }

    Ok(GachaTableView {
        gacha,
        cards,
        odds,
        relative_odds,
    })
}
