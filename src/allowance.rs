//! Demand accounting for Publishers.

use crate::subscription::UNBOUNDED;

/// Outstanding demand granted through `request(n)`.
///
/// Saturates at [`UNBOUNDED`]; once there, acquiring never decrements.
///
/// A Publisher can use [`release`](Self::release) to bound the synchronous
/// recursion between `request` and `on_next`:
///
/// ```rust
/// use std::cell::{Cell, RefCell};
///
/// use rxstreams::allowance::Allowance;
///
/// struct Counter {
///   allowance: Cell<Allowance>,
///   emitted: RefCell<Vec<u32>>,
/// }
///
/// impl Counter {
///   fn request(&self, n: usize) {
///     let mut allowance = self.allowance.get();
///     let previous = allowance.release(n);
///     self.allowance.set(allowance);
///     if previous > 0 {
///       // Re-entered from a nested `request`, or nothing left to deliver:
///       // the outer frame drains the new demand.
///       return;
///     }
///     loop {
///       let mut allowance = self.allowance.get();
///       let granted = allowance.try_acquire(1);
///       self.allowance.set(allowance);
///       if !granted {
///         break;
///       }
///       let next = self.emitted.borrow().len() as u32;
///       self.emitted.borrow_mut().push(next);
///       if next == 0 {
///         // A subscriber asking for more from inside `on_next`.
///         self.request(2);
///       }
///     }
///   }
/// }
///
/// let counter = Counter { allowance: Cell::new(Allowance::new()), emitted: RefCell::default() };
/// counter.request(3);
/// assert_eq!(*counter.emitted.borrow(), vec![0, 1, 2, 3, 4]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Allowance {
  value: usize,
}

impl Allowance {
  #[inline]
  pub fn new() -> Self { Self::default() }

  #[inline]
  pub fn with_value(value: usize) -> Self { Self { value } }

  #[inline]
  pub fn value(&self) -> usize { self.value }

  /// Takes `n` units if available. Always succeeds once unbounded.
  pub fn try_acquire(&mut self, n: usize) -> bool {
    if self.is_unbounded() {
      return true;
    }
    if !self.can_acquire(n) {
      return false;
    }
    self.value -= n;
    true
  }

  /// Adds `n` units, saturating at [`UNBOUNDED`], and returns the value
  /// before the call.
  pub fn release(&mut self, n: usize) -> usize {
    let previous = self.value;
    self.value = self.value.saturating_add(n);
    previous
  }

  #[inline]
  pub fn can_acquire(&self, n: usize) -> bool { self.value >= n }

  #[inline]
  pub fn is_unbounded(&self) -> bool { self.value == UNBOUNDED }

  /// Takes everything. Returns [`UNBOUNDED`] without decrementing when
  /// unbounded.
  #[inline]
  pub fn drain(&mut self) -> usize { self.drain_with_limit(UNBOUNDED) }

  /// Takes at most `limit` units and returns how many were taken.
  pub fn drain_with_limit(&mut self, limit: usize) -> usize {
    if self.is_unbounded() {
      return self.value;
    }
    let taken = limit.min(self.value);
    self.value -= taken;
    taken
  }
}
