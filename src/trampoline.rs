//! Trampoline for stack-bounded synchronous delivery.
//!
//! Long operator chains deliver `request`/`on_next` synchronously. When each
//! hop calls the next one directly the stack grows with the chain. Routing the
//! hops through a shared [`Trampoline`] turns nested calls into queued work that
//! the outermost frame drains in FIFO order.

use std::cell::{Cell, RefCell};

use smallvec::SmallVec;

type Task<'a> = Box<dyn FnOnce() + 'a>;

/// Single-threaded work queue drained by the outermost caller.
#[derive(Default)]
pub struct Trampoline<'a> {
  draining: Cell<bool>,
  queue: RefCell<SmallVec<[Task<'a>; 4]>>,
}

impl<'a> Trampoline<'a> {
  pub fn new() -> Self { Self::default() }

  /// Runs `task` now if no drain is in progress, otherwise queues it behind
  /// the tasks already waiting.
  ///
  /// A panicking task unwinds out of the outermost `schedule`. Tasks still
  /// waiting stay queued in order and run on the next call.
  pub fn schedule(&self, task: impl FnOnce() + 'a) {
    self.queue.borrow_mut().push(Box::new(task));
    if self.draining.replace(true) {
      return;
    }
    let _reset = ResetOnExit(&self.draining);
    loop {
      let batch = std::mem::take(&mut *self.queue.borrow_mut());
      if batch.is_empty() {
        break;
      }
      tracing::trace!(tasks = batch.len(), "trampoline draining");
      let mut batch = Requeue { queue: &self.queue, tasks: batch.into_iter() };
      for task in &mut batch.tasks {
        task();
      }
    }
  }

  /// `true` while a [`schedule`](Self::schedule) call is draining the queue.
  #[inline]
  pub fn is_draining(&self) -> bool { self.draining.get() }

  #[inline]
  pub fn pending(&self) -> usize { self.queue.borrow().len() }
}

struct ResetOnExit<'a>(&'a Cell<bool>);

impl Drop for ResetOnExit<'_> {
  fn drop(&mut self) { self.0.set(false); }
}

/// Tasks of the batch being drained. Whatever is left when it drops (only
/// after a task panicked) goes back to the front of the queue.
struct Requeue<'t, 'a> {
  queue: &'t RefCell<SmallVec<[Task<'a>; 4]>>,
  tasks: smallvec::IntoIter<[Task<'a>; 4]>,
}

impl<'a> Drop for Requeue<'_, 'a> {
  fn drop(&mut self) {
    let unrun: SmallVec<[Task<'a>; 4]> = self.tasks.by_ref().collect();
    if !unrun.is_empty() {
      tracing::debug!(tasks = unrun.len(), "trampoline task panicked, requeueing the rest");
      self.queue.borrow_mut().insert_many(0, unrun);
    }
  }
}
