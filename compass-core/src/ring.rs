//! Interrupt-safe single-producer single-consumer byte queues.
//!
//! One ring carries received bytes from the UART interrupt context to the
//! main loop; a second carries outbound bytes the other way. Each side owns
//! exactly one index: the producer advances `write`, the consumer advances
//! `read`. Neither side ever blocks, takes a lock, or masks interrupts.

use core::cell::UnsafeCell;

use portable_atomic::{AtomicUsize, Ordering};

/// Fixed-capacity byte ring.
///
/// `N` is the storage size; one slot always stays empty to tell a full ring
/// from an empty one, so the usable capacity is `N - 1`.
///
/// The ring itself is inert storage. [`split`](Self::split) hands out the
/// [`Producer`] and [`Consumer`] halves, which may then live in different
/// execution contexts (one of them an interrupt handler).
pub struct RingBuffer<const N: usize> {
    storage: [UnsafeCell<u8>; N],
    read: AtomicUsize,
    write: AtomicUsize,
}

// SAFETY: a slot is written only by the producer before it publishes the
// advanced write index, and read only by the consumer after it observes that
// index. The split borrow guarantees one producer and one consumer, so no
// slot is ever accessed from two contexts at once.
unsafe impl<const N: usize> Sync for RingBuffer<N> {}

impl<const N: usize> RingBuffer<N> {
    /// Create an empty ring.
    #[must_use]
    pub const fn new() -> Self {
        const { assert!(N >= 2, "ring needs at least one usable slot") };
        Self {
            storage: [const { UnsafeCell::new(0) }; N],
            read: AtomicUsize::new(0),
            write: AtomicUsize::new(0),
        }
    }

    /// Usable capacity of the ring.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Number of bytes currently queued.
    #[must_use]
    pub fn len(&self) -> usize {
        let read = self.read.load(Ordering::SeqCst);
        let write = self.write.load(Ordering::SeqCst);
        if write >= read {
            write - read
        } else {
            N - read + write
        }
    }

    /// Whether the ring holds no bytes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read.load(Ordering::SeqCst) == self.write.load(Ordering::SeqCst)
    }

    /// Split the ring into its producer and consumer halves.
    ///
    /// The exclusive borrow is what makes the halves unique; place the ring
    /// in a static cell to get `'static` halves for interrupt handlers.
    pub fn split(&mut self) -> (Producer<'_, N>, Consumer<'_, N>) {
        let ring = &*self;
        (Producer { ring }, Consumer { ring })
    }
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Write half of a [`RingBuffer`].
pub struct Producer<'a, const N: usize> {
    ring: &'a RingBuffer<N>,
}

impl<const N: usize> Producer<'_, N> {
    /// Append one byte.
    ///
    /// Returns `false` and discards the byte when the ring is full; the
    /// queue contents are never overwritten.
    pub fn try_push(&mut self, byte: u8) -> bool {
        let write = self.ring.write.load(Ordering::SeqCst);
        let next = (write + 1) % N;
        if next == self.ring.read.load(Ordering::SeqCst) {
            return false;
        }
        // SAFETY: `write` is not yet published, so the consumer will not
        // touch this slot until the store below.
        unsafe { self.ring.storage[write].get().write(byte) };
        self.ring.write.store(next, Ordering::SeqCst);
        true
    }

    /// Whether the consumer has drained everything queued so far.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Bytes currently queued.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ring.len()
    }
}

/// Read half of a [`RingBuffer`].
pub struct Consumer<'a, const N: usize> {
    ring: &'a RingBuffer<N>,
}

impl<const N: usize> Consumer<'_, N> {
    /// Remove and return the oldest byte, or `None` when the ring is empty.
    pub fn try_pop(&mut self) -> Option<u8> {
        let read = self.ring.read.load(Ordering::SeqCst);
        if read == self.ring.write.load(Ordering::SeqCst) {
            return None;
        }
        // SAFETY: the slot at `read` was published by the producer's write
        // index store and will not be reused until `read` advances past it.
        let byte = unsafe { self.ring.storage[read].get().read() };
        self.ring.read.store((read + 1) % N, Ordering::SeqCst);
        Some(byte)
    }

    /// Whether the ring holds no bytes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Bytes currently queued.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ring.len()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec::Vec;

    use super::*;

    #[test]
    fn test_new_ring_is_empty() {
        let mut ring = RingBuffer::<8>::new();
        let (producer, mut consumer) = ring.split();

        assert!(producer.is_empty());
        assert_eq!(producer.len(), 0);
        assert_eq!(consumer.try_pop(), None);
    }

    #[test]
    fn test_capacity_is_storage_minus_one() {
        let ring = RingBuffer::<8>::new();
        assert_eq!(ring.capacity(), 7);
    }

    #[test]
    fn test_fill_to_capacity_then_reject() {
        let mut ring = RingBuffer::<8>::new();
        let (mut producer, mut consumer) = ring.split();

        for i in 0..7u8 {
            assert!(producer.try_push(i), "push {} should fit", i);
        }
        assert_eq!(producer.len(), 7);

        // Full: the push fails and nothing already queued is disturbed.
        assert!(!producer.try_push(99));
        assert_eq!(producer.len(), 7);

        for i in 0..7u8 {
            assert_eq!(consumer.try_pop(), Some(i));
        }
        assert_eq!(consumer.try_pop(), None);
    }

    #[test]
    fn test_space_reopens_after_pop() {
        let mut ring = RingBuffer::<4>::new();
        let (mut producer, mut consumer) = ring.split();

        assert!(producer.try_push(1));
        assert!(producer.try_push(2));
        assert!(producer.try_push(3));
        assert!(!producer.try_push(4));

        assert_eq!(consumer.try_pop(), Some(1));
        assert!(producer.try_push(4));
        assert!(!producer.try_push(5));

        assert_eq!(consumer.try_pop(), Some(2));
        assert_eq!(consumer.try_pop(), Some(3));
        assert_eq!(consumer.try_pop(), Some(4));
        assert_eq!(consumer.try_pop(), None);
    }

    #[test]
    fn test_fifo_order_across_many_wraparounds() {
        let mut ring = RingBuffer::<4>::new();
        let (mut producer, mut consumer) = ring.split();

        // 3-in 3-out on a 3-slot ring forces the indices around the ring
        // repeatedly.
        let mut expected = 0u8;
        for round in 0..100u8 {
            for k in 0..3 {
                assert!(producer.try_push(round.wrapping_mul(3).wrapping_add(k)));
            }
            for _ in 0..3 {
                assert_eq!(consumer.try_pop(), Some(expected));
                expected = expected.wrapping_add(1);
            }
        }
    }

    #[test]
    fn test_len_agrees_on_both_halves() {
        let mut ring = RingBuffer::<16>::new();
        let (mut producer, mut consumer) = ring.split();

        for i in 0..5 {
            producer.try_push(i);
        }
        assert_eq!(producer.len(), 5);
        assert_eq!(consumer.len(), 5);

        consumer.try_pop();
        consumer.try_pop();
        assert_eq!(producer.len(), 3);
        assert_eq!(consumer.len(), 3);
    }

    #[test]
    fn test_concurrent_producer_and_consumer() {
        // The firmware runs the producer in interrupt context; two threads
        // are the host-side stand-in. Every byte must arrive exactly once,
        // in order, with pushes spinning while the ring is full.
        let mut ring = RingBuffer::<8>::new();
        let (mut producer, mut consumer) = ring.split();

        const TOTAL: usize = 10_000;

        std::thread::scope(|scope| {
            scope.spawn(move || {
                for i in 0..TOTAL {
                    let byte = (i % 251) as u8;
                    while !producer.try_push(byte) {
                        std::thread::yield_now();
                    }
                }
            });

            let mut received = Vec::with_capacity(TOTAL);
            while received.len() < TOTAL {
                match consumer.try_pop() {
                    Some(byte) => received.push(byte),
                    None => std::thread::yield_now(),
                }
            }

            assert_eq!(consumer.try_pop(), None);
            for (i, &byte) in received.iter().enumerate() {
                assert_eq!(byte, (i % 251) as u8, "byte {} out of order", i);
            }
        });
    }
}
