//! Example: Self-Managed Participants
//!
//! A Publisher and a Subscriber that manage their own lifetime through guards.
//! Nothing outside them keeps the Subscription alive: it is freed once the
//! unsubscribe handshake finishes on both sides.
//!
//! The Subscriber asks for one element at a time from inside `on_next`. The
//! follow-up requests go through a [`Trampoline`], so the stack stays flat no
//! matter how many elements are delivered.

use std::{
  cell::Cell,
  rc::{Rc, Weak},
};

use rxstreams::prelude::*;

// ==================================================================================
// 1. The Publisher
// ==================================================================================

/// Counts down from `from` to 1, then completes.
struct Countdown {
  from: u32,
}

struct CountdownSubscription {
  subscriber: SubscriberGuard<u32>,
  allowance: Cell<Allowance>,
  remaining: Cell<u32>,
  // Released after the terminal signal and the Subscriber's cancel.
  holds: RefCountedRelease<&'static str>,
}

impl Publisher<u32> for Countdown {
  fn subscribe(&self, subscriber: SubscriberRef<u32>) {
    let subscription = Rc::new(CountdownSubscription {
      subscriber: SubscriberGuard::new(subscriber),
      allowance: Cell::new(Allowance::new()),
      remaining: Cell::new(self.from),
      holds: RefCountedRelease::new("countdown state", 2),
    });
    subscription.subscriber.on_subscribe(subscription.clone());
  }
}

impl CountdownSubscription {
  fn complete(&self) {
    if !self.subscriber.is_empty() {
      let _hold = self.holds.decrement_deferred();
      self.subscriber.on_complete();
    }
  }
}

impl Subscription for CountdownSubscription {
  fn request(&self, n: usize) {
    let mut allowance = self.allowance.get();
    let previous = allowance.release(n);
    self.allowance.set(allowance);
    if previous > 0 {
      return;
    }
    while self.remaining.get() > 0 {
      let mut allowance = self.allowance.get();
      let granted = allowance.try_acquire(1);
      self.allowance.set(allowance);
      if !granted {
        return;
      }
      let value = self.remaining.get();
      self.remaining.set(value - 1);
      self.subscriber.on_next(value);
    }
    self.complete();
  }

  fn cancel(&self) {
    let _hold = self.holds.decrement_deferred();
    self.complete();
  }
}

impl Drop for CountdownSubscription {
  fn drop(&mut self) {
    println!("[Countdown] subscription freed (state alive: {})", self.holds.is_alive());
  }
}

// ==================================================================================
// 2. The Subscriber
// ==================================================================================

struct Printer {
  name: &'static str,
  subscription: SubscriptionGuard,
  trampoline: Rc<Trampoline<'static>>,
  // Stop after this many elements; `None` takes everything.
  limit: Cell<Option<u32>>,
}

impl Printer {
  fn new(name: &'static str, trampoline: &Rc<Trampoline<'static>>, limit: Option<u32>) -> Rc<Self> {
    Rc::new(Printer {
      name,
      subscription: SubscriptionGuard::empty(),
      trampoline: trampoline.clone(),
      limit: Cell::new(limit),
    })
  }

  fn request_one(&self) {
    if let Some(subscription) = self.subscription.get() {
      self.trampoline.schedule(move || subscription.request(1));
    }
  }
}

impl Subscriber<u32> for Printer {
  fn on_subscribe(&self, subscription: SubscriptionRef) {
    println!("[{}] on_subscribe", self.name);
    self.subscription.reset(Some(subscription));
  }

  fn on_next(&self, value: u32) {
    println!("[{}] on_next({value})", self.name);
    match self.limit.get() {
      Some(1) => self.subscription.cancel(),
      Some(n) => {
        self.limit.set(Some(n - 1));
        self.request_one();
      }
      None => self.request_one(),
    }
  }

  fn on_complete(&self) {
    println!("[{}] on_complete", self.name);
    self.subscription.cancel();
  }

  fn on_error(&self, err: std::convert::Infallible) { match err {} }
}

impl Drop for Printer {
  fn drop(&mut self) { println!("[{}] dropped", self.name); }
}

// ==================================================================================
// 3. Run
// ==================================================================================

fn main() {
  let trampoline = Rc::new(Trampoline::new());

  println!("--- Countdown runs to completion ---");
  let printer = Printer::new("all", &trampoline, None);
  Countdown { from: 3 }.subscribe(printer.clone());
  printer.request_one();
  drop(printer);

  println!("--- Subscriber cancels after the first element ---");
  let printer = Printer::new("first", &trampoline, Some(1));
  Countdown { from: 1_000_000 }.subscribe(printer.clone());
  let weak: Weak<Printer> = Rc::downgrade(&printer);
  printer.request_one();
  drop(printer);
  assert!(weak.upgrade().is_none());
}
