//! Protocol-level reference counting for self-managed participants.
//!
//! A Subscription that frees its state once both sides of the unsubscribe
//! handshake are done (the Subscriber called `cancel`, the Publisher sent a
//! terminal signal) counts those holds with a [`RefCountedRelease`].

use std::cell::{Cell, RefCell};

use crate::util::protocol_assert;

/// Owns a resource and drops it the first time the hold count reaches zero.
///
/// Later increments and decrements never drop it again. It is safe for the
/// resource's own `Drop` to touch this counter, and for a closure passed to
/// [`with`](Self::with) to drop the last hold: the resource then goes away
/// once that closure returns.
pub struct RefCountedRelease<T> {
  resource: RefCell<Option<T>>,
  count: Cell<usize>,
  release_pending: Cell<bool>,
}

impl<T> RefCountedRelease<T> {
  pub fn new(resource: T, initial_count: usize) -> Self {
    Self {
      resource: RefCell::new(Some(resource)),
      count: Cell::new(initial_count),
      release_pending: Cell::new(false),
    }
  }

  #[inline]
  pub fn count(&self) -> usize { self.count.get() }

  /// `false` once the last hold was dropped.
  pub fn is_alive(&self) -> bool {
    !self.release_pending.get() && self.resource.borrow().is_some()
  }

  /// Runs `f` on the resource while it is alive.
  pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
    if self.release_pending.get() {
      return None;
    }
    let _release = ReleaseAfterBorrow(self);
    let resource = self.resource.borrow();
    let result = resource.as_ref().map(f);
    drop(resource);
    result
  }

  #[inline]
  pub fn increment(&self) { self.count.set(self.count.get() + 1); }

  pub fn decrement(&self) {
    let count = self.count.get();
    protocol_assert!(count > 0, "RefCountedRelease decremented below zero");
    if count == 0 {
      return;
    }
    self.count.set(count - 1);
    if count == 1 {
      self.release();
    }
  }

  // Deferred while a `with` call still borrows the resource.
  fn release(&self) {
    let resource = match self.resource.try_borrow_mut() {
      Ok(mut slot) => slot.take(),
      Err(_) => {
        self.release_pending.set(true);
        return;
      }
    };
    self.release_pending.set(false);
    drop(resource);
  }

  /// Returns a handle that decrements once, when it is dropped or on an
  /// explicit [`DeferredDecrement::decrement`].
  ///
  /// ```rust
  /// use rxstreams::ref_count::RefCountedRelease;
  ///
  /// let holds = RefCountedRelease::new(String::from("state"), 1);
  /// {
  ///   let _handle = holds.decrement_deferred();
  ///   // Arbitrary cleanup that still reads the resource.
  ///   assert_eq!(holds.with(|s| s.len()), Some(5));
  /// }
  /// assert!(!holds.is_alive());
  /// ```
  pub fn decrement_deferred(&self) -> DeferredDecrement<'_, T> {
    DeferredDecrement { owner: Some(self) }
  }
}

/// Pending decrement of a [`RefCountedRelease`].
#[must_use]
pub struct DeferredDecrement<'a, T> {
  owner: Option<&'a RefCountedRelease<T>>,
}

impl<T> DeferredDecrement<'_, T> {
  /// Decrements now. Later calls and the eventual drop are no-ops.
  pub fn decrement(&mut self) {
    if let Some(owner) = self.owner.take() {
      owner.decrement();
    }
  }
}

impl<T> Drop for DeferredDecrement<'_, T> {
  fn drop(&mut self) { self.decrement(); }
}

struct ReleaseAfterBorrow<'a, T>(&'a RefCountedRelease<T>);

impl<T> Drop for ReleaseAfterBorrow<'_, T> {
  fn drop(&mut self) {
    if self.0.release_pending.get() {
      self.0.release();
    }
  }
}

#[cfg(test)]
mod tests {
  use std::rc::Rc;

  use super::*;

  struct Tracked(Rc<Cell<usize>>);

  impl Drop for Tracked {
    fn drop(&mut self) { self.0.set(self.0.get() + 1); }
  }

  fn tracked() -> (Tracked, Rc<Cell<usize>>) {
    let drops = Rc::new(Cell::new(0));
    (Tracked(drops.clone()), drops)
  }

  #[rxstreams_macro::test]
  fn increment_and_decrement() {
    let (resource, drops) = tracked();
    let holds = RefCountedRelease::new(resource, 0);

    holds.increment();
    holds.increment();
    holds.decrement();
    holds.increment();
    holds.decrement();
    assert_eq!(drops.get(), 0);
    holds.decrement();
    assert_eq!(drops.get(), 1);
    assert!(!holds.is_alive());

    holds.increment();
    holds.decrement();
    assert_eq!(drops.get(), 1);
  }

  #[rxstreams_macro::test]
  fn deferred_decrement_on_drop() {
    let (resource, drops) = tracked();
    let holds = RefCountedRelease::new(resource, 1);
    {
      let _handle = holds.decrement_deferred();
      assert_eq!(drops.get(), 0);
    }
    assert_eq!(drops.get(), 1);
  }

  #[rxstreams_macro::test]
  fn explicit_deferred_decrement_happens_once() {
    let (resource, drops) = tracked();
    let holds = RefCountedRelease::new(resource, 1);
    {
      let mut handle = holds.decrement_deferred();
      assert_eq!(drops.get(), 0);
      handle.decrement();
      assert_eq!(drops.get(), 1);
      handle.decrement();
    }
    assert_eq!(holds.count(), 0);
    assert_eq!(drops.get(), 1);
  }

  #[rxstreams_macro::test]
  fn last_hold_dropped_while_lent_out() {
    let (resource, drops) = tracked();
    let holds = RefCountedRelease::new(resource, 1);

    let seen = holds.with(|_| {
      holds.decrement();
      assert!(!holds.is_alive());
      assert_eq!(holds.with(|_| ()), None);
      drops.get()
    });
    assert_eq!(seen, Some(0));
    assert_eq!(drops.get(), 1);
    assert_eq!(holds.with(|_| ()), None);
  }

  #[rxstreams_macro::test]
  fn deferred_decrement_inside_a_lent_out_resource() {
    let holds = RefCountedRelease::new(String::from("state"), 2);
    holds.decrement();
    let len = holds.with(|state| {
      let _hold = holds.decrement_deferred();
      state.len()
    });
    assert_eq!(len, Some(5));
    assert!(!holds.is_alive());
    assert_eq!(holds.count(), 0);
  }

  #[rxstreams_macro::test(violation)]
  fn decrement_below_zero_is_a_violation() {
    let (resource, _drops) = tracked();
    let holds = RefCountedRelease::new(resource, 0);
    holds.decrement();
  }
}
