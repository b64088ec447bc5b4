//! Home page assembly: events, running gachas, their live odds, and
//! birthdays, gathered best-effort.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, Utc};

use crate::domain::{ContentDirectory, Event, Gacha};
use crate::odds::{LiveOdds, OddsService, collect_live_odds};

/// Nudge Feb 29 to Mar 1. The birthday table has no leap-day entries, so
/// a leap day would otherwise render an empty birthday list.
pub fn effective_now(now: DateTime<Utc>) -> DateTime<Utc> {
    if now.month() == 2 && now.day() == 29 {
        now + Duration::days(1)
    } else {
        now
    }
}

/// Everything the home page renders from.
#[derive(Debug, Clone)]
pub struct HomeView {
    pub events: Vec<Event>,
    pub gachas: Vec<Gacha>,
    /// Live odds per gacha id; gachas whose lookup failed are absent and
    /// the page omits their odds block.
    pub live_odds: HashMap<u32, LiveOdds>,
    pub birthdays: Vec<u32>,
}

impl HomeView {
    /// Gather the home page's data. The odds fan-out is the only remote
    /// work; everything else reads the in-memory domain repository.
    pub async fn assemble<D, S>(directory: &D, odds: Arc<S>, now: DateTime<Utc>) -> Self
    where
        D: ContentDirectory,
        S: OddsService + 'static,
    {
        let now = effective_now(now);

        let events = directory.events(now);
        let gachas = directory.gachas(now);
        let birthdays = directory.birthdays(now);
        let live_odds = collect_live_odds(odds, &gachas, now).await;

        Self {
            events,
            gachas,
            live_odds,
            birthdays,
        }
    }
}
