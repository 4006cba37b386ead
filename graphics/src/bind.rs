//! The bindable-resource protocol and its scope guard.
//!
//! The graphics API exposes a handful of global "currently active" slots
//! (current program, current vertex array). [`Bindable`] models a
//! resource that occupies exactly one such slot; [`BindGuard`] pins the
//! resource active for a lexical scope and restores whatever occupied
//! the slot before, on every exit path out of that scope.

/// A resource occupying exactly one global binding slot.
///
/// `bind` activates the resource in its slot and returns a snapshot of
/// the slot's previous occupant; `unbind` restores that snapshot. The
/// snapshot type is resource-specific and opaque to guard users.
pub trait Bindable {
    /// Saved state of the slot captured by [`bind`](Self::bind).
    type Snapshot;

    /// Activate this resource in its slot, returning the previous state.
    fn bind(&self) -> Self::Snapshot;

    /// Restore the slot to a previously captured state.
    fn unbind(&self, snapshot: Self::Snapshot);
}

/// Scope guard keeping a [`Bindable`] active until drop.
///
/// Construction binds the target and captures the previous slot state;
/// drop restores it exactly once, on every exit path out of the owning
/// scope: fall-through, early return, or unwinding.
///
/// Guards over *different* slot kinds nest freely and release in LIFO
/// order. Two guards over the same slot in one scope leave the slot in
/// an unspecified state and must be avoided by callers.
#[must_use = "the previous binding is restored when the guard is dropped"]
pub struct BindGuard<'a, B: Bindable> {
    target: &'a B,
    snapshot: Option<B::Snapshot>,
}

impl<'a, B: Bindable> BindGuard<'a, B> {
    /// Bind `target` and capture the previous slot state.
    pub fn new(target: &'a B) -> Self {
        let snapshot = target.bind();
        Self {
            target,
            snapshot: Some(snapshot),
        }
    }
}

impl<B: Bindable> Drop for BindGuard<'_, B> {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.target.unbind(snapshot);
        }
    }
}
