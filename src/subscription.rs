//! Subscription trait
//!
//! A Subscription is the demand/cancellation handle bridging one Publisher and
//! one Subscriber. It is handed to the Subscriber in
//! [`Subscriber::on_subscribe`](crate::subscriber::Subscriber::on_subscribe).

use std::rc::Rc;

/// Reserved demand value meaning "deliver without bound".
pub const UNBOUNDED: usize = usize::MAX;

/// Demand and cancellation handle for one Publisher/Subscriber pairing.
///
/// # Unsubscribe handshake
///
/// The Subscriber must send `cancel` as its last signal to the Subscription,
/// even when the Publisher ended the stream first with `on_complete` or
/// `on_error`. An implementation may therefore free everything it owns inside
/// `cancel`.
///
/// It is legal for a Publisher to call `on_next` synchronously from `request`,
/// and for a Subscriber to call `request` from `on_next`. Implementations must
/// bound that recursion; see [`Allowance::release`](crate::allowance::Allowance::release)
/// and [`Trampoline`](crate::trampoline::Trampoline).
pub trait Subscription {
  /// Grants `n` more elements of demand. `n` must be positive; [`UNBOUNDED`]
  /// lifts the limit. Calls are cumulative.
  fn request(&self, n: usize);

  /// Asks the Publisher to stop. Elements already covered by granted demand
  /// may still arrive, followed by exactly one terminal signal.
  ///
  /// Nothing may be called on the Subscription during or after `cancel`.
  fn cancel(&self);
}

/// Shared handle to a type-erased Subscription.
pub type SubscriptionRef = Rc<dyn Subscription>;

impl<S: Subscription + ?Sized> Subscription for Rc<S> {
  #[inline]
  fn request(&self, n: usize) { (**self).request(n) }

  #[inline]
  fn cancel(&self) { (**self).cancel() }
}

impl<S: Subscription + ?Sized> Subscription for Box<S> {
  #[inline]
  fn request(&self, n: usize) { (**self).request(n) }

  #[inline]
  fn cancel(&self) { (**self).cancel() }
}
