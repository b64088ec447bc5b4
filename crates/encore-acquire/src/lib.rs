//! Remote artifact acquisition for the game's versioned content database.
//!
//! The asset servers publish, per resource version, an index of manifest
//! variants keyed by platform and quality. Resolving a version means
//! fetching that index, selecting the right variant, unwrapping the
//! proprietary container it ships in, and persisting the decoded SQLite
//! image in a keyed on-disk cache. Named records inside a resolved
//! manifest (the master database, most importantly) are then fetched
//! content-addressed by their hash.
//!
//! Layers:
//! - [`net`] - transport seam; production impl behind the `reqwest` feature
//! - [`cache`] - flat keyed artifact store with atomic placement
//! - [`pipeline`] - the acquisition orchestration itself
//!
//! Nothing here retries: every failure is terminal for the attempt and the
//! caller decides whether the result was load-bearing.

mod cache;
mod config;
mod db;
mod error;
mod fs;
mod net;
mod pipeline;

pub use cache::ArtifactCache;
pub use config::AcquireConfig;
pub use db::{ManifestDb, RecordEntry};
pub use error::{AcquireError, Result};
pub use fs::atomic_write;
pub use net::{FetchedBody, RemoteTransport};
pub use pipeline::AcquisitionPipeline;

#[cfg(feature = "reqwest")]
pub use net::ReqwestTransport;
