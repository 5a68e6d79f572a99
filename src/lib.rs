//! # rxstreams: exactly-once lifecycle guards for Reactive Streams
//!
//! The three Reactive Streams capabilities, [`Publisher`], [`Subscriber`] and
//! [`Subscription`], plus the ownership guards that sit between callers and
//! those capabilities.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//!
//! use rxstreams::prelude::*;
//!
//! #[derive(Default)]
//! struct Printer(RefCell<Vec<String>>);
//!
//! impl Subscriber<i32> for Printer {
//!   fn on_subscribe(&self, subscription: SubscriptionRef) { subscription.request(UNBOUNDED); }
//!   fn on_next(&self, value: i32) { self.0.borrow_mut().push(format!("next {value}")); }
//!   fn on_complete(&self) { self.0.borrow_mut().push("complete".into()); }
//!   fn on_error(&self, err: std::convert::Infallible) { match err {} }
//! }
//!
//! let printer = Rc::new(Printer::default());
//! {
//!   let guard: SubscriberGuard<i32> = SubscriberGuard::new(printer.clone() as SubscriberRef<i32>);
//!   guard.on_next(1);
//!   guard.on_next(2);
//!   // Dropping the guard completes the subscriber exactly once.
//! }
//! assert_eq!(*printer.0.borrow(), ["next 1", "next 2", "complete"]);
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Publisher`] | Attaches Subscribers and hands them a Subscription |
//! | [`Subscriber`] | Consumes `on_subscribe`, `on_next`, then one terminal signal |
//! | [`Subscription`] | Carries demand (`request`) and `cancel` back upstream |
//! | [`SubscriberGuard`] | Exactly-once `on_complete`/`on_error` over a shared Subscriber |
//! | [`SubscriptionGuard`] | Exactly-once `cancel` over a shared Subscription |
//!
//! ## Feature Flags
//!
//! - **`strict-protocol`**: keep protocol assertions (signals through an empty
//!   guard, `request(0)`) in release builds. Without it they only fire in
//!   debug builds.
//!
//! [`Publisher`]: publisher::Publisher
//! [`Subscriber`]: subscriber::Subscriber
//! [`Subscription`]: subscription::Subscription
//! [`SubscriberGuard`]: guard::SubscriberGuard
//! [`SubscriptionGuard`]: guard::SubscriptionGuard

pub mod allowance;
pub mod error;
pub mod guard;
pub mod prelude;
pub mod publisher;
pub mod ref_count;
pub mod state;
pub mod subscriber;
pub mod subscription;
pub mod trampoline;

mod util;

#[cfg(test)]
mod mock;

pub use prelude::*;

#[cfg(all(doctest, not(target_arch = "wasm32")))]
mod __markdown_doctests {
  mod readme {
    #![doc = include_str!("../README.md")]
  }
}
