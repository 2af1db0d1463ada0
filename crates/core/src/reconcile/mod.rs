//! Reconciliation of CSV entries against the music library.
//!
//! Processing is strictly sequential: one artist (or entry) is fully handled,
//! then paced, before the next one starts.
//!
//! - **Artists modes**: every unique artist is looked up in the library
//!   snapshot, and created from the first lookup candidate when missing.
//! - **Specific albums mode**: each unique (artist, album) pair resolves its
//!   artist (creating it if needed), fetches the artist's albums fresh, and
//!   monitors the matching album.

mod cache;
mod engine;
mod types;

pub use cache::ArtistCache;
pub use engine::Reconciler;
pub use types::{ReconcileError, RunSummary};
