//! Subscriber trait
//!
//! The Subscriber consumes a demand-gated sequence: one `on_subscribe`, zero
//! or more `on_next` bounded by granted demand, then at most one of
//! `on_complete`/`on_error`.

use std::{convert::Infallible, rc::Rc};

use crate::subscription::SubscriptionRef;

/// Consumer of a potentially infinite sequence of `T`, failing with `E`.
///
/// ```text
/// Unsubscribed --on_subscribe--> Active --on_next--> Active
///                                Active --on_complete|on_error--> Terminated
/// ```
///
/// Per the unsubscribe handshake the Publisher always sends a terminal signal
/// last, even when the Subscriber initiated the shutdown through
/// [`Subscription::cancel`](crate::subscription::Subscription::cancel). A
/// Subscriber may release everything it owns in `on_complete`/`on_error`.
///
/// Every method takes `&self`. Signals can arrive reentrantly (for example an
/// `on_next` delivered from inside this Subscriber's own `request` call), so
/// implementations must not hold a `RefCell` borrow across a call into their
/// Subscription.
pub trait Subscriber<T, E = Infallible> {
  /// Finishes the subscribe handshake. Delivered exactly once, first.
  ///
  /// The Subscriber keeps the handle and must call `cancel` on it as its last
  /// signal.
  fn on_subscribe(&self, subscription: SubscriptionRef);

  /// Delivers the next element. Only legal while Active and within demand.
  ///
  /// After `request(1); cancel()` an element may still arrive during or after
  /// the `cancel` call.
  fn on_next(&self, value: T);

  /// Terminates the sequence gracefully. Nothing follows.
  fn on_complete(&self);

  /// Terminates the sequence with an error payload. Nothing follows.
  fn on_error(&self, err: E);
}

/// Shared handle to a type-erased Subscriber.
pub type SubscriberRef<T, E = Infallible> = Rc<dyn Subscriber<T, E>>;

impl<T, E, S> Subscriber<T, E> for Rc<S>
where
  S: Subscriber<T, E> + ?Sized,
{
  #[inline]
  fn on_subscribe(&self, subscription: SubscriptionRef) { (**self).on_subscribe(subscription) }

  #[inline]
  fn on_next(&self, value: T) { (**self).on_next(value) }

  #[inline]
  fn on_complete(&self) { (**self).on_complete() }

  #[inline]
  fn on_error(&self, err: E) { (**self).on_error(err) }
}
