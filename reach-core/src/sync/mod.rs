//! Contact sync pipeline and published state.
//!
//! One sync cycle runs load → upload → fetch → merge and publishes the
//! result into the shared [`SyncState`]. Remote failures never escape a
//! cycle: they degrade to a local-only view.
//!
//! # State Machine
//!
//! ```text
//! Idle ──► LoadingLocal ──► UploadingRemote ──► Merged
//!               │                  │
//!               │ (no contacts)    │ (remote failure)
//!               ▼                  ▼
//!           LocalOnly ◄────────────┘
//! ```
//!
//! # Concurrency
//!
//! Cycles may overlap (e.g. repeated permission grants). Nothing is
//! cancelled; every cycle publishes through the same `watch` channel, so the
//! last one to publish wins.

mod orchestrator;
mod state;

pub(crate) use orchestrator::lock_tracker;
pub use orchestrator::{SharedState, SyncOrchestrator, SyncPhase};
pub use state::SyncState;
