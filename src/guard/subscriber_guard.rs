use std::{
  cell::RefCell,
  convert::Infallible,
  fmt::{Debug, Formatter},
  marker::PhantomData,
  ops::Deref,
};

use crate::{
  subscriber::{Subscriber, SubscriberRef},
  subscription::SubscriptionRef,
  util::protocol_assert,
};

/// Exclusive owner of at most one Subscriber reference.
///
/// A guard only guarantees that the terminal signal reaches its pointee
/// exactly once: either an explicit [`on_complete`](Self::on_complete) /
/// [`on_error`](Self::on_error), or the default `on_complete` delivered when
/// the reference is replaced by [`reset`](Self::reset) or the guard is
/// dropped. `on_subscribe` must still be delivered by the caller.
///
/// # Pointer-Based Design
///
/// The guard is parameterised by the smart pointer `P` it holds rather than by
/// the Subscriber type:
/// - `SubscriberRef<T, E>` (`Rc<dyn Subscriber<T, E>>`), the default
/// - `Rc<Concrete>` when the concrete type is known
/// - `Arc<..>` when the Subscriber lives in a shared allocation
///
/// # Reentrancy
///
/// Every method takes `&self` and no borrow of the guard's storage is held
/// while the Subscriber runs. Before forwarding a call the guard clones `P`
/// into the call frame, so the Subscriber stays alive until the call returns
/// even if the call itself resets, releases or terminates this very guard.
///
/// # Moves
///
/// Moving a guard delivers nothing. [`take`](Self::take) moves the reference
/// out of a guard that is only reachable through `&self`, leaving it empty.
/// Assigning over a live guard drops it, so its pointee is completed first.
///
/// The guard is not synchronised; all signals to one Subscriber must already
/// be ordered by its Publisher.
pub struct SubscriberGuard<T, E = Infallible, P = SubscriberRef<T, E>>
where
  P: Clone + Deref,
  P::Target: Subscriber<T, E>,
{
  slot: RefCell<Option<P>>,
  _hint: PhantomData<fn(T, E)>,
}

impl<T, E, P> SubscriberGuard<T, E, P>
where
  P: Clone + Deref,
  P::Target: Subscriber<T, E>,
{
  /// Takes ownership of `subscriber`.
  #[inline]
  pub fn new(subscriber: P) -> Self { Self::from_slot(Some(subscriber)) }

  /// A guard holding nothing. Dropping it is a no-op.
  #[inline]
  pub fn empty() -> Self { Self::from_slot(None) }

  #[inline]
  fn from_slot(slot: Option<P>) -> Self { Self { slot: RefCell::new(slot), _hint: PhantomData } }

  #[inline]
  pub fn is_empty(&self) -> bool { self.slot.borrow().is_none() }

  /// A strong copy of the held reference.
  #[inline]
  pub fn get(&self) -> Option<P> { self.slot.borrow().clone() }

  /// Moves the held reference into a new guard, leaving this one empty.
  /// No signal is delivered.
  pub fn take(&self) -> Self { Self::from_slot(self.release()) }

  /// Gives up ownership without delivering any signal. The caller becomes
  /// responsible for the terminal signal of the returned reference.
  #[inline]
  pub fn release(&self) -> Option<P> { self.slot.borrow_mut().take() }

  /// Replaces the held reference with `subscriber`. The previous reference,
  /// if any, receives `on_complete`.
  pub fn reset(&self, subscriber: Option<P>) {
    let previous = self.slot.replace(subscriber);
    if let Some(previous) = previous {
      tracing::trace!("subscriber guard reset, completing the previous subscriber");
      previous.on_complete();
    }
  }

  pub fn on_subscribe(&self, subscription: SubscriptionRef) {
    let subscriber = self.get();
    protocol_assert!(subscriber.is_some(), "on_subscribe through an empty SubscriberGuard");
    if let Some(subscriber) = subscriber {
      subscriber.on_subscribe(subscription);
    }
  }

  pub fn on_next(&self, value: T) {
    let subscriber = self.get();
    protocol_assert!(subscriber.is_some(), "on_next through an empty SubscriberGuard");
    if let Some(subscriber) = subscriber {
      subscriber.on_next(value);
    }
  }

  /// Completes and empties the guard. A no-op if the guard is empty, which
  /// makes a second terminal signal impossible.
  pub fn on_complete(&self) {
    if let Some(subscriber) = self.release() {
      subscriber.on_complete();
    }
  }

  /// Fails and empties the guard. A no-op if the guard is empty; `err` is
  /// dropped in that case.
  pub fn on_error(&self, err: E) {
    if let Some(subscriber) = self.release() {
      subscriber.on_error(err);
    }
  }
}

impl<T, E, P> Drop for SubscriberGuard<T, E, P>
where
  P: Clone + Deref,
  P::Target: Subscriber<T, E>,
{
  fn drop(&mut self) {
    if let Some(subscriber) = self.slot.get_mut().take() {
      tracing::trace!("subscriber guard dropped, completing the held subscriber");
      subscriber.on_complete();
    }
  }
}

impl<T, E, P> Default for SubscriberGuard<T, E, P>
where
  P: Clone + Deref,
  P::Target: Subscriber<T, E>,
{
  fn default() -> Self { Self::empty() }
}

impl<T, E, P> Debug for SubscriberGuard<T, E, P>
where
  P: Clone + Deref,
  P::Target: Subscriber<T, E>,
{
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SubscriberGuard")
      .field("is_empty", &self.is_empty())
      .finish()
  }
}
