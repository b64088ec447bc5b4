//! Domain-layer collaborator interface and the records pages consume.
//!
//! The repository behind [`ContentDirectory`] is out of scope here: it
//! owns the opened master database and its in-memory caches. Pages only
//! read from it and must not assume anything about how fresh it is.

use chrono::{DateTime, Utc};

/// A promotional gacha and its availability window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gacha {
    pub id: u32,
    pub name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Gacha {
    /// Whether the gacha is live at `now`. Live gachas are the only ones
    /// worth a remote odds lookup.
    pub fn is_running(&self, now: DateTime<Utc>) -> bool {
        now >= self.start && now <= self.end
    }
}

/// An in-game event window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: u32,
    pub name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// One card slot in a gacha's pool.
#[derive(Debug, Clone, PartialEq)]
pub struct GachaCard {
    pub card_id: u32,
    pub is_limited: bool,
    pub sort_order: i32,
}

/// The card/character/event repository, treated as opaque.
pub trait ContentDirectory: Send + Sync {
    /// Events whose window contains `now`.
    fn events(&self, now: DateTime<Utc>) -> Vec<Event>;

    /// Gachas whose window contains `now`.
    fn gachas(&self, now: DateTime<Utc>) -> Vec<Gacha>;

    /// Look a gacha up by id, running or not.
    fn gacha_by_id(&self, id: u32) -> Option<Gacha>;

    /// The card pool of a gacha, unordered.
    fn cards_in_gacha(&self, gacha_id: u32) -> Vec<GachaCard>;

    /// Character ids with a birthday at `now`'s date.
    fn birthdays(&self, now: DateTime<Utc>) -> Vec<u32>;
}
