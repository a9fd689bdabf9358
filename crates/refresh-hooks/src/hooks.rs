#![forbid(unsafe_code)]

//! Post-update callback registry and firing cycle.
//!
//! # Design
//!
//! [`PostUpdateHooks`] owns two pieces of state: the callback registry
//! (append-only, invoked in registration order) and the pending list of
//! changed-element identifiers for the current update cycle. The host
//! framework replaces the pending list wholesale after each partial-page
//! update, then fires; firing resolves the identifiers through an
//! [`ElementResolver`], hands the resolved elements to every callback, and
//! clears the pending list.
//!
//! # Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | `register()` | O(1) amortized |
//! | `set_updated_ids()` | O(I) where I = identifiers |
//! | `fire()` | O(I · lookup + C) where C = callbacks |
//!
//! # Failure Modes
//!
//! - **Unresolvable identifier**: contributes nothing to the element set;
//!   logged at debug level.
//! - **Panicking callback**: caught and logged at error level; subsequent
//!   callbacks still run. The pending list is cleared regardless.

use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::{debug, error, trace};

use crate::element::{ElementId, ElementResolver};

/// A registered post-update callback.
type Callback<E> = Box<dyn FnMut(&[E])>;

/// Behavior of [`PostUpdateHooks::fire`] when no identifiers are pending.
///
/// Hosts differ on whether a cycle with no changed elements should still
/// notify callbacks. [`FirePolicy::Guarded`] is the default since it never
/// invokes callbacks with an empty element collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FirePolicy {
    /// Fire only when at least one identifier is pending (default).
    #[default]
    Guarded,
    /// Fire on every cycle, passing an empty element set when nothing is
    /// pending.
    Always,
}

/// Notification entry point the host framework invokes once per completed
/// partial-page update.
pub trait UpdateCycleListener<E> {
    /// Called after an update cycle with the identifiers of the replaced
    /// elements and the host's element lookup.
    fn update_completed(&mut self, ids: Vec<ElementId>, resolver: &dyn ElementResolver<Element = E>);
}

/// Registry of post-update callbacks plus the transient changed-identifier
/// list for the current update cycle.
///
/// Owned by whatever bootstraps the page or session and handed by `&mut` to
/// code that registers callbacks. `E` is the host's element handle type.
///
/// # Invariants
///
/// 1. Callbacks fire in registration order; registering the same callback
///    twice fires it twice.
/// 2. `set_updated_ids` replaces the pending list wholesale.
/// 3. After `fire` returns, the pending list is empty.
pub struct PostUpdateHooks<E> {
    callbacks: Vec<Callback<E>>,
    pending: Vec<ElementId>,
    policy: FirePolicy,
}

impl<E> Default for PostUpdateHooks<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for PostUpdateHooks<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostUpdateHooks")
            .field("callbacks", &self.callbacks.len())
            .field("pending", &self.pending)
            .field("policy", &self.policy)
            .finish()
    }
}

impl<E> PostUpdateHooks<E> {
    /// Create hooks with the default [`FirePolicy::Guarded`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(FirePolicy::default())
    }

    /// Create hooks with an explicit fire policy.
    #[must_use]
    pub fn with_policy(policy: FirePolicy) -> Self {
        Self {
            callbacks: Vec::new(),
            pending: Vec::new(),
            policy,
        }
    }

    /// The configured fire policy.
    #[must_use]
    pub fn policy(&self) -> FirePolicy {
        self.policy
    }

    /// Register a callback to run after each update cycle.
    ///
    /// Callbacks receive the resolved elements of the cycle, in identifier
    /// order. Registration cannot fail and cannot be undone; the same
    /// callback registered twice fires twice.
    pub fn register(&mut self, callback: impl FnMut(&[E]) + 'static) {
        self.callbacks.push(Box::new(callback));
        trace!(callbacks = self.callbacks.len(), "registered post-update callback");
    }

    /// Replace the pending changed-identifier list wholesale.
    ///
    /// Called by the host framework once per update cycle, before [`fire`].
    /// Identifiers are not validated; unresolvable ones simply contribute no
    /// element when the cycle fires.
    ///
    /// [`fire`]: Self::fire
    pub fn set_updated_ids(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.pending.clear();
        self.pending.extend(ids);
    }

    /// Identifiers pending for the current cycle.
    #[must_use]
    pub fn pending_ids(&self) -> &[ElementId] {
        &self.pending
    }

    /// Check if any identifiers are pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }

    /// Resolve the pending identifiers and invoke every registered callback
    /// with the resolved element set, then clear the pending list.
    ///
    /// Under [`FirePolicy::Guarded`] this is a no-op when nothing is pending.
    /// A callback that panics is caught and logged; the remaining callbacks
    /// still run.
    pub fn fire(&mut self, resolver: &dyn ElementResolver<Element = E>) {
        if self.pending.is_empty() && self.policy == FirePolicy::Guarded {
            return;
        }

        let ids = std::mem::take(&mut self.pending);
        let mut elements = Vec::with_capacity(ids.len());
        for id in &ids {
            match resolver.resolve(id) {
                Some(element) => elements.push(element),
                None => debug!(id = %id, "updated element no longer present"),
            }
        }
        debug!(
            pending = ids.len(),
            resolved = elements.len(),
            callbacks = self.callbacks.len(),
            "firing post-update callbacks"
        );

        for (index, callback) in self.callbacks.iter_mut().enumerate() {
            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| callback(elements.as_slice()))) {
                error!(
                    callback = index,
                    panic = panic_message(payload.as_ref()),
                    "post-update callback panicked"
                );
            }
        }
    }
}

impl<E> UpdateCycleListener<E> for PostUpdateHooks<E> {
    fn update_completed(&mut self, ids: Vec<ElementId>, resolver: &dyn ElementResolver<Element = E>) {
        self.set_updated_ids(ids);
        self.fire(resolver);
    }
}

/// Best-effort extraction of a panic payload's message.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string panic payload>")
}
