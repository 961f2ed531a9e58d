//! Bounded event queue between producers and the polling loop.
//!
//! Producers (network handlers, sensor interrupts) post events; the polling
//! loop drains them once per cycle. Backed by `heapless::Deque` and guarded by
//! a critical section, so posting from an interrupt is fine.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// Returned when posting to a full queue, carries the rejected event back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull<T>(pub T);

/// A bounded multi-producer queue with a single draining consumer.
///
/// Every access runs inside a critical section, so [`Producer::post`] is
/// usable from interrupt handlers as well as from tasks. The queue is meant
/// to live in a `static` and hand out `'static` handles.
///
/// Posting never blocks. When the queue is full the event is handed back
/// inside [`QueueFull`] and the caller decides whether to drop it.
pub struct EventQueue<T, const SIZE: usize> {
    inner: Mutex<RefCell<Deque<T, SIZE>>>,
}

impl<T, const SIZE: usize> EventQueue<T, SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Handle for posting events.
    pub const fn producer(&self) -> Producer<'_, T, SIZE> {
        Producer { queue: self }
    }

    /// Handle for draining events.
    pub const fn consumer(&self) -> Consumer<'_, T, SIZE> {
        Consumer { queue: self }
    }

    fn post(&self, event: T) -> Result<(), QueueFull<T>> {
        critical_section::with(|cs| {
            self.inner
                .borrow(cs)
                .borrow_mut()
                .push_back(event)
                .map_err(QueueFull)
        })
    }

    fn take(&self) -> Option<T> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }
}

impl<T, const SIZE: usize> Default for EventQueue<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Posting side of an [`EventQueue`].
pub struct Producer<'a, T, const SIZE: usize> {
    queue: &'a EventQueue<T, SIZE>,
}

impl<T, const SIZE: usize> Clone for Producer<'_, T, SIZE> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const SIZE: usize> Copy for Producer<'_, T, SIZE> {}

impl<T, const SIZE: usize> Producer<'_, T, SIZE> {
    /// Post an event without blocking.
    pub fn post(&self, event: T) -> Result<(), QueueFull<T>> {
        self.queue.post(event)
    }
}

/// Draining side of an [`EventQueue`].
pub struct Consumer<'a, T, const SIZE: usize> {
    queue: &'a EventQueue<T, SIZE>,
}

impl<T, const SIZE: usize> Clone for Consumer<'_, T, SIZE> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const SIZE: usize> Copy for Consumer<'_, T, SIZE> {}

impl<'a, T, const SIZE: usize> Consumer<'a, T, SIZE> {
    /// Take the oldest pending event.
    pub fn try_take(&self) -> Option<T> {
        self.queue.take()
    }

    /// Number of pending events.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Iterate over events until the queue is empty.
    ///
    /// Each step takes its own critical section, so producers can keep
    /// posting while the loop drains.
    pub fn drain(&self) -> Drain<'a, T, SIZE> {
        Drain { queue: self.queue }
    }
}

/// Iterator returned by [`Consumer::drain`].
pub struct Drain<'a, T, const SIZE: usize> {
    queue: &'a EventQueue<T, SIZE>,
}

impl<T, const SIZE: usize> Iterator for Drain<'_, T, SIZE> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.queue.take()
    }
}
