//! Recording test doubles for the unit tests.
//!
//! Every call lands in a shared [`Log`] as `"<name>.<signal>"`, and each double
//! checks the call order it receives against [`state`](crate::state).

use std::{
  cell::{Cell, RefCell},
  fmt::Debug,
  rc::Rc,
};

use crate::{
  state::{DemandSignal, Signal, SubscriberState, SubscriptionState},
  subscriber::Subscriber,
  subscription::{Subscription, SubscriptionRef},
};

pub(crate) type Log = Rc<RefCell<Vec<String>>>;

pub(crate) fn new_log() -> Log { Rc::new(RefCell::new(Vec::new())) }

pub(crate) fn entries(log: &Log) -> Vec<String> { log.borrow().clone() }

type Hook<A> = RefCell<Option<Box<dyn Fn(A)>>>;

pub(crate) struct MockSubscriber<T, E = String> {
  name: &'static str,
  log: Log,
  state: Cell<SubscriberState>,
  subscription: RefCell<Option<SubscriptionRef>>,
  on_next_hook: Hook<&'static str>,
  on_subscribe_hook: Hook<&'static str>,
  _hint: std::marker::PhantomData<fn(T, E)>,
}

impl<T, E> MockSubscriber<T, E> {
  pub(crate) fn new(name: &'static str, log: &Log) -> Rc<Self> {
    Rc::new(Self {
      name,
      log: log.clone(),
      state: Cell::new(SubscriberState::Unsubscribed),
      subscription: RefCell::new(None),
      on_next_hook: RefCell::new(None),
      on_subscribe_hook: RefCell::new(None),
      _hint: std::marker::PhantomData,
    })
  }

  /// A subscriber that already went through `on_subscribe`.
  pub(crate) fn active(name: &'static str, log: &Log) -> Rc<Self> {
    let subscriber = Self::new(name, log);
    subscriber.state.set(SubscriberState::Active);
    subscriber
  }

  /// Runs `hook` once, inside the next `on_next`, after the call was logged.
  pub(crate) fn on_next_do(&self, hook: impl Fn(&'static str) + 'static) {
    *self.on_next_hook.borrow_mut() = Some(Box::new(hook));
  }

  pub(crate) fn on_subscribe_do(&self, hook: impl Fn(&'static str) + 'static) {
    *self.on_subscribe_hook.borrow_mut() = Some(Box::new(hook));
  }

  pub(crate) fn state(&self) -> SubscriberState { self.state.get() }

  fn record(&self, signal: Signal, entry: String) {
    let next = self
      .state
      .get()
      .apply(signal)
      .unwrap_or_else(|violation| panic!("{}: {violation}", self.name));
    self.state.set(next);
    self.log.borrow_mut().push(entry);
  }

  fn run(&self, hook: &Hook<&'static str>) {
    let hook = hook.borrow_mut().take();
    if let Some(hook) = hook {
      hook(self.name);
      self.log.borrow_mut().push(format!("{}.hook_returned", self.name));
    }
  }
}

impl<T: Debug, E: Debug> Subscriber<T, E> for MockSubscriber<T, E> {
  fn on_subscribe(&self, subscription: SubscriptionRef) {
    self.record(Signal::Subscribe, format!("{}.on_subscribe", self.name));
    *self.subscription.borrow_mut() = Some(subscription);
    self.run(&self.on_subscribe_hook);
  }

  fn on_next(&self, value: T) {
    self.record(Signal::Next, format!("{}.on_next({value:?})", self.name));
    self.run(&self.on_next_hook);
  }

  fn on_complete(&self) {
    self.record(Signal::Complete, format!("{}.on_complete", self.name));
    self.subscription.borrow_mut().take();
  }

  fn on_error(&self, err: E) {
    self.record(Signal::Error, format!("{}.on_error({err:?})", self.name));
    self.subscription.borrow_mut().take();
  }
}

impl<T, E> Drop for MockSubscriber<T, E> {
  fn drop(&mut self) { self.log.borrow_mut().push(format!("{}.drop", self.name)); }
}

pub(crate) struct MockSubscription {
  name: &'static str,
  log: Log,
  state: Cell<SubscriptionState>,
  on_request_hook: Hook<usize>,
  on_cancel_hook: Hook<()>,
}

impl MockSubscription {
  pub(crate) fn new(name: &'static str, log: &Log) -> Rc<Self> {
    Rc::new(Self {
      name,
      log: log.clone(),
      state: Cell::new(SubscriptionState::Open),
      on_request_hook: RefCell::new(None),
      on_cancel_hook: RefCell::new(None),
    })
  }

  /// Runs `hook` once, inside the next `request`, after the call was logged.
  pub(crate) fn on_request_do(&self, hook: impl Fn(usize) + 'static) {
    *self.on_request_hook.borrow_mut() = Some(Box::new(hook));
  }

  pub(crate) fn on_cancel_do(&self, hook: impl Fn(()) + 'static) {
    *self.on_cancel_hook.borrow_mut() = Some(Box::new(hook));
  }

  pub(crate) fn state(&self) -> SubscriptionState { self.state.get() }

  fn record(&self, signal: DemandSignal, entry: String) {
    let next = self
      .state
      .get()
      .apply(signal)
      .unwrap_or_else(|violation| panic!("{}: {violation}", self.name));
    self.state.set(next);
    self.log.borrow_mut().push(entry);
  }
}

impl Subscription for MockSubscription {
  fn request(&self, n: usize) {
    self.record(DemandSignal::Request(n), format!("{}.request({n})", self.name));
    let hook = self.on_request_hook.borrow_mut().take();
    if let Some(hook) = hook {
      hook(n);
      self.log.borrow_mut().push(format!("{}.hook_returned", self.name));
    }
  }

  fn cancel(&self) {
    self.record(DemandSignal::Cancel, format!("{}.cancel", self.name));
    let hook = self.on_cancel_hook.borrow_mut().take();
    if let Some(hook) = hook {
      hook(());
      self.log.borrow_mut().push(format!("{}.hook_returned", self.name));
    }
  }
}

impl Drop for MockSubscription {
  fn drop(&mut self) { self.log.borrow_mut().push(format!("{}.drop", self.name)); }
}
