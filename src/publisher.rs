//! Publisher trait

use std::convert::Infallible;

use crate::subscriber::SubscriberRef;

/// Source of a demand-gated sequence of `T` that may fail with `E`.
///
/// A Publisher only mediates the creation of Subscriptions. It may be a
/// temporary; nothing requires it to outlive its Subscribers, and neither the
/// Subscriber nor the Subscription owns it.
pub trait Publisher<T, E = Infallible> {
  /// Attaches `subscriber` and delivers exactly one
  /// [`on_subscribe`](crate::subscriber::Subscriber::on_subscribe) to it.
  ///
  /// May be called several times for independent subscriptions; multicast
  /// behaviour is up to the implementation.
  ///
  /// The Publisher keeps `subscriber` until it has delivered the terminal
  /// signal. Wrapping it in a
  /// [`SubscriberGuard`](crate::guard::SubscriberGuard) makes that terminal
  /// signal exactly-once.
  fn subscribe(&self, subscriber: SubscriberRef<T, E>);
}
