//! Lock-free single-producer/single-consumer event ring.
//!
//! `head` is only written by the producer (the sampler) and `tail` only by
//! the consumer (the dispatcher). A slot is written before `head` is
//! published past it, and read before `tail` is published past it, so
//! neither side ever needs a lock. One slot stays unused to tell a full
//! ring from an empty one: at most `C - 1` events are buffered.

use super::event::ButtonEvent;
use portable_atomic::{AtomicU32, AtomicUsize, Ordering};

pub struct EventQueue<const C: usize> {
    slots: [AtomicU32; C],
    head: AtomicUsize,
    tail: AtomicUsize,
    dropped: AtomicU32,
}

impl<const C: usize> EventQueue<C> {
    #[allow(clippy::declare_interior_mutable_const)]
    const EMPTY_SLOT: AtomicU32 = AtomicU32::new(0);

    pub const fn new() -> Self {
        const { assert!(C >= 2, "event queue needs at least two slots") };
        Self {
            slots: [Self::EMPTY_SLOT; C],
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Number of events the ring can hold at once.
    pub const fn capacity(&self) -> usize {
        C - 1
    }

    /// Enqueue an event. Producer side only.
    ///
    /// Returns `false` and drops the event if the ring is full; events
    /// already queued are never evicted.
    pub fn push(&self, event: ButtonEvent) -> bool {
        let head = self.head.load(Ordering::Relaxed);
        let next = (head + 1) % C;

        if next == self.tail.load(Ordering::Acquire) {
            let dropped = self.dropped.load(Ordering::Relaxed).saturating_add(1);
            self.dropped.store(dropped, Ordering::Relaxed);
            warn!("Event queue full, dropping {}", event.raw());
            return false;
        }

        self.slots[head].store(event.raw(), Ordering::Relaxed);
        self.head.store(next, Ordering::Release);
        true
    }

    /// Dequeue the oldest event. Consumer side only.
    pub fn pop(&self) -> Option<ButtonEvent> {
        let tail = self.tail.load(Ordering::Relaxed);

        if tail == self.head.load(Ordering::Acquire) {
            return None;
        }

        let raw = self.slots[tail].load(Ordering::Relaxed);
        self.tail.store((tail + 1) % C, Ordering::Release);
        ButtonEvent::from_raw(raw)
    }

    /// Reset both cursors and discard buffered events.
    ///
    /// Must not race with [`push`](Self::push) or [`pop`](Self::pop):
    /// call it while the tick source is stopped or before it starts.
    pub fn clear(&self) {
        self.head.store(0, Ordering::Relaxed);
        self.tail.store(0, Ordering::Relaxed);
        for slot in &self.slots {
            slot.store(0, Ordering::Relaxed);
        }
        self.dropped.store(0, Ordering::Relaxed);
        portable_atomic::fence(Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        (head + C - tail) % C
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Events refused because the ring was full, since the last clear.
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl<const C: usize> Default for EventQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}
