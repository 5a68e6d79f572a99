use std::{
  cell::RefCell,
  fmt::{Debug, Formatter},
  ops::Deref,
};

use crate::{
  subscription::{Subscription, SubscriptionRef},
  util::protocol_assert,
};

/// Exclusive owner of at most one Subscription reference.
///
/// `cancel` reaches the pointee at most once, and always before the guard
/// either takes a different reference through [`reset`](Self::reset) or is
/// dropped while still holding a live one. An RAII counterpart of the
/// unsubscribe handshake: when this structure falls out of scope the held
/// Subscription is cancelled.
///
/// Like [`SubscriberGuard`](super::SubscriberGuard), the guard is
/// parameterised by the pointer `P` it holds and clones it into the call
/// frame before forwarding `request`, so a Subscription may cancel, reset or
/// release this guard from inside its own `request`.
///
/// If you want to cancel immediately, call [`cancel`](Self::cancel) or wrap
/// the guard in its own scope.
#[must_use]
pub struct SubscriptionGuard<P = SubscriptionRef>
where
  P: Clone + Deref,
  P::Target: Subscription,
{
  slot: RefCell<Option<P>>,
}

impl<P> SubscriptionGuard<P>
where
  P: Clone + Deref,
  P::Target: Subscription,
{
  #[inline]
  pub fn new(subscription: P) -> Self { Self { slot: RefCell::new(Some(subscription)) } }

  #[inline]
  pub fn empty() -> Self { Self { slot: RefCell::new(None) } }

  #[inline]
  pub fn is_empty(&self) -> bool { self.slot.borrow().is_none() }

  #[inline]
  pub fn get(&self) -> Option<P> { self.slot.borrow().clone() }

  /// Moves the held reference into a new guard, leaving this one empty.
  pub fn take(&self) -> Self { Self { slot: RefCell::new(self.release()) } }

  /// Gives up ownership without cancelling.
  #[inline]
  pub fn release(&self) -> Option<P> { self.slot.borrow_mut().take() }

  /// Replaces the held reference with `subscription`, cancelling the previous
  /// one first.
  pub fn reset(&self, subscription: Option<P>) {
    let previous = self.slot.replace(subscription);
    if let Some(previous) = previous {
      tracing::trace!("subscription guard reset, cancelling the previous subscription");
      previous.cancel();
    }
  }

  /// Forwards `n` units of demand. `n` must be positive.
  pub fn request(&self, n: usize) {
    protocol_assert!(n > 0, "request({n}) through a SubscriptionGuard");
    let subscription = self.get();
    protocol_assert!(subscription.is_some(), "request through an empty SubscriptionGuard");
    match subscription {
      Some(subscription) if n > 0 => subscription.request(n),
      _ => {}
    }
  }

  /// Cancels and empties the guard. A no-op if the guard is empty.
  pub fn cancel(&self) {
    if let Some(subscription) = self.release() {
      subscription.cancel();
    }
  }
}

impl<P> Drop for SubscriptionGuard<P>
where
  P: Clone + Deref,
  P::Target: Subscription,
{
  #[inline]
  fn drop(&mut self) {
    if let Some(subscription) = self.slot.get_mut().take() {
      tracing::trace!("subscription guard dropped, cancelling the held subscription");
      subscription.cancel();
    }
  }
}

impl<P> Default for SubscriptionGuard<P>
where
  P: Clone + Deref,
  P::Target: Subscription,
{
  fn default() -> Self { Self::empty() }
}

impl<P> Debug for SubscriptionGuard<P>
where
  P: Clone + Deref,
  P::Target: Subscription,
{
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SubscriptionGuard")
      .field("is_empty", &self.is_empty())
      .finish()
  }
}
