#![forbid(unsafe_code)]

//! Post-update callback hooks for partial-page refreshes.
//!
//! In a server-driven web UI, a partial-page (AJAX) update replaces specific
//! elements without a full navigation. Application code often needs to react
//! to those replacements — re-attach behaviors, re-measure, re-decorate. This
//! crate provides the glue:
//!
//! - [`PostUpdateHooks`]: a registry of callbacks plus the transient list of
//!   changed-element identifiers for the current update cycle. The host
//!   framework reports which elements changed; the hooks resolve the
//!   identifiers to live element handles and invoke every registered callback
//!   with the resolved set, in registration order.
//! - [`ElementResolver`]: the single seam to the host environment — an
//!   identifier-to-element lookup. Misses are non-fatal.
//! - [`PageReadyHooks`]: listeners fired when a page becomes ready (full
//!   reload or anchor update), carrying the page URL.
//!
//! # Architecture
//!
//! The hooks hold no reference to the host framework. The host drives the
//! cycle through [`UpdateCycleListener::update_completed`] (or the split
//! [`PostUpdateHooks::set_updated_ids`] / [`PostUpdateHooks::fire`] pair),
//! supplying its element lookup at fire time. Everything is single-threaded
//! and event-driven: one update cycle at a time, no synchronization.
//!
//! # Invariants
//!
//! 1. Callbacks are invoked in registration order.
//! 2. Resolved elements are passed in identifier order; unresolvable
//!    identifiers contribute nothing.
//! 3. After a firing cycle completes, the pending identifier list is empty.
//! 4. A panicking callback does not prevent subsequent callbacks from
//!    running; the panic is reported via `tracing` at error level.

pub mod element;
pub mod hooks;
pub mod page;

pub use element::{ElementId, ElementResolver, MapResolver};
pub use hooks::{FirePolicy, PostUpdateHooks, UpdateCycleListener};
pub use page::PageReadyHooks;
