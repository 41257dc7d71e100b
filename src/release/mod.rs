//! Explicit release of off-heap buffer storage.
//!
//! - [`force_release`] - Free a direct buffer now, via the process-wide [`Releaser`]
//! - [`Releaser`] - Injectable service that memoizes release-hook discovery
//! - [`ReleaseOutcome`] - What a release attempt did
//!
//! Release is best effort: only misuse is an error, everything else is
//! logged and reported as an outcome.

mod hook;
mod releaser;

pub use hook::{
    CleanerDiscovery, RegionCleaner, ReleaseFailure, ReleaseHook, ReleaseHookProvider,
    SystemCleanerDiscovery,
};
pub use releaser::{ReleaseOutcome, Releaser, force_release};
