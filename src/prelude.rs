//! Prelude module for convenient imports

pub use crate::{
  allowance::Allowance,
  error::ProtocolViolation,
  guard::{SubscriberGuard, SubscriptionGuard},
  publisher::Publisher,
  ref_count::{DeferredDecrement, RefCountedRelease},
  state::{DemandSignal, Signal, SubscriberState, SubscriptionState},
  subscriber::{Subscriber, SubscriberRef},
  subscription::{Subscription, SubscriptionRef, UNBOUNDED},
  trampoline::Trampoline,
};
