//! Protocol state machines
//!
//! Plain-value trackers for the legal call order on either side of a
//! subscription. Publisher and Subscriber implementations can keep one next to
//! their own state to catch out-of-order signals early, and conformance tests
//! use them to check what a participant actually received.

use std::fmt;

use crate::error::ProtocolViolation;

/// A signal travelling from Publisher to Subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
  Subscribe,
  Next,
  Complete,
  Error,
}

impl Signal {
  #[inline]
  pub fn is_terminal(self) -> bool { matches!(self, Signal::Complete | Signal::Error) }
}

impl fmt::Display for Signal {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Signal::Subscribe => "on_subscribe",
      Signal::Next => "on_next",
      Signal::Complete => "on_complete",
      Signal::Error => "on_error",
    };
    f.write_str(name)
  }
}

/// Lifecycle of a Subscriber.
///
/// `Terminated` is absorbing: every signal after it is a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubscriberState {
  #[default]
  Unsubscribed,
  Active,
  Terminated,
}

impl SubscriberState {
  /// Returns the state after `signal`, or the rule it breaks.
  pub fn apply(self, signal: Signal) -> Result<Self, ProtocolViolation> {
    use SubscriberState::*;
    match (self, signal) {
      (Unsubscribed, Signal::Subscribe) => Ok(Active),
      (Unsubscribed, signal) => Err(ProtocolViolation::BeforeSubscribe(signal)),
      (Active, Signal::Subscribe) => Err(ProtocolViolation::DuplicateSubscribe),
      (Active, Signal::Next) => Ok(Active),
      (Active, Signal::Complete | Signal::Error) => Ok(Terminated),
      (Terminated, signal) => Err(ProtocolViolation::AfterTerminal(signal)),
    }
  }

  /// Applies `signal` in place. The state is left untouched on error.
  pub fn advance(&mut self, signal: Signal) -> Result<(), ProtocolViolation> {
    *self = self.apply(signal)?;
    Ok(())
  }

  #[inline]
  pub fn is_terminated(&self) -> bool { *self == SubscriberState::Terminated }
}

/// A signal travelling from Subscriber to Subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemandSignal {
  Request(usize),
  Cancel,
}

/// Lifecycle of a Subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubscriptionState {
  #[default]
  Open,
  Cancelled,
}

impl SubscriptionState {
  /// Returns the state after `signal`, or the rule it breaks.
  ///
  /// A repeated `cancel` is accepted: callers cannot tell it apart from a
  /// single one.
  pub fn apply(self, signal: DemandSignal) -> Result<Self, ProtocolViolation> {
    use SubscriptionState::*;
    match (self, signal) {
      (Open, DemandSignal::Request(0)) => Err(ProtocolViolation::ZeroDemand),
      (Open, DemandSignal::Request(_)) => Ok(Open),
      (Cancelled, DemandSignal::Request(n)) => Err(ProtocolViolation::RequestAfterCancel(n)),
      (_, DemandSignal::Cancel) => Ok(Cancelled),
    }
  }

  pub fn advance(&mut self, signal: DemandSignal) -> Result<(), ProtocolViolation> {
    *self = self.apply(signal)?;
    Ok(())
  }

  #[inline]
  pub fn is_cancelled(&self) -> bool { *self == SubscriptionState::Cancelled }
}
