//! Protocol violation errors.
//!
//! Element errors are not represented here: the user-defined `E` carried by
//! `on_error` is data and flows through the normal terminal path.

use thiserror::Error;

use crate::state::Signal;

/// A signal that breaks the Publisher/Subscriber/Subscription call order.
///
/// Returned by the checkers in [`state`](crate::state). The guards never
/// produce it; they assert instead.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolViolation {
  /// A signal other than `on_subscribe` reached an unsubscribed Subscriber.
  #[error("{0} delivered before on_subscribe")]
  BeforeSubscribe(Signal),

  /// `on_subscribe` reached a Subscriber twice.
  #[error("on_subscribe delivered more than once")]
  DuplicateSubscribe,

  /// Any signal reached a Subscriber after `on_complete`/`on_error`.
  #[error("{0} delivered after a terminal signal")]
  AfterTerminal(Signal),

  /// `request(0)`.
  #[error("request(0) is not a positive demand")]
  ZeroDemand,

  /// `request(n)` reached a Subscription after `cancel`.
  #[error("request({0}) after cancel")]
  RequestAfterCancel(usize),
}

impl ProtocolViolation {
  /// Returns a short stable label (snake_case) for use in logs.
  pub fn as_label(&self) -> &'static str {
    match self {
      ProtocolViolation::BeforeSubscribe(_) => "before_subscribe",
      ProtocolViolation::DuplicateSubscribe => "duplicate_subscribe",
      ProtocolViolation::AfterTerminal(_) => "after_terminal",
      ProtocolViolation::ZeroDemand => "zero_demand",
      ProtocolViolation::RequestAfterCancel(_) => "request_after_cancel",
    }
  }
}
