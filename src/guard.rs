//! Ownership guards
//!
//! Wrappers around a shared Subscriber or Subscription reference that make the
//! terminal side of the protocol exactly-once and reentrancy safe:
//!
//! | Guard | Terminal signal | Default on reset/drop |
//! |-------|-----------------|-----------------------|
//! | [`SubscriberGuard`] | `on_complete` / `on_error` | `on_complete` |
//! | [`SubscriptionGuard`] | `cancel` | `cancel` |
//!
//! The guarantee is per guard. The same Subscriber wrapped by two guards (for
//! example after subscribing to two Publishers) can observe two terminal
//! signals.

mod subscriber_guard;
mod subscription_guard;

pub use subscriber_guard::SubscriberGuard;
pub use subscription_guard::SubscriptionGuard;
