//! Page-level aggregation over the game's content database and the live
//! remote lookups that decorate it.
//!
//! The domain repository and the odds endpoint are collaborators behind
//! traits; this crate owns only the fan-out/fan-in choreography: one
//! fresh [`encore_sync::CompletionBarrier`] per request, one odds lookup
//! per running gacha, and best-effort assembly once everything reports.
//! A failed auxiliary lookup degrades the page; only missing primary data
//! (the requested gacha itself) surfaces as a not-found error.

mod domain;
mod gacha;
mod home;
mod odds;

pub use domain::{ContentDirectory, Event, Gacha, GachaCard};
pub use gacha::{GachaTableView, PageError, gacha_table};
pub use home::{HomeView, effective_now};
pub use odds::{LiveOdds, OddsService, collect_live_odds};
