//! Host-side storage for samples drained from the on-chip FIFO.
use byteorder::{BigEndian, ByteOrder};

use crate::registers::{BYTES_PER_CHANNEL, FIFO_DEPTH, SAMPLE_MASK};

/// Default capacity of the host-side ring.
pub const STORAGE_SIZE: usize = 4;

/// LED channel of a sample.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Red,
    Ir,
    Green,
}

/// One FIFO record. Channels that were not sampled read 0.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    pub red: u32,
    pub ir: u32,
    pub green: u32,
}

impl Sample {
    /// Decodes one record of `active_leds` 3-byte big-endian words, in the
    /// device's slot order red, IR, green.
    pub fn decode(raw: &[u8], active_leds: u8) -> Self {
        let mut words = raw
            .chunks_exact(BYTES_PER_CHANNEL)
            .take(active_leds.into())
            .map(|word| BigEndian::read_u24(word) & SAMPLE_MASK);

        Self {
            red: words.next().unwrap_or(0),
            ir: words.next().unwrap_or(0),
            green: words.next().unwrap_or(0),
        }
    }

    pub const fn channel(&self, channel: Channel) -> u32 {
        match channel {
            Channel::Red => self.red,
            Channel::Ir => self.ir,
            Channel::Green => self.green,
        }
    }
}

/// Bytes one FIFO record occupies for the given number of active LEDs.
pub const fn record_len(active_leds: u8) -> usize {
    active_leds as usize * BYTES_PER_CHANNEL
}

/// Records waiting on-chip given the 5-bit FIFO pointers.
pub const fn pending_samples(write_ptr: u8, read_ptr: u8) -> u8 {
    write_ptr.wrapping_sub(read_ptr) % FIFO_DEPTH
}

/// Largest burst that fits `max_transfer` without splitting a record.
pub const fn burst_len(max_transfer: usize, record_len: usize) -> usize {
    max_transfer - (max_transfer % record_len)
}

/// Fixed-capacity ring of decoded samples.
///
/// `head` is the slot of the newest sample and `tail` the slot of the oldest
/// unconsumed one. Writing into a full ring overwrites the oldest unconsumed
/// sample, so `available()` saturates at `N`.
#[derive(Debug, Clone)]
pub struct SampleBuffer<const N: usize = STORAGE_SIZE> {
    samples: [Sample; N],
    head: usize,
    tail: usize,
    len: usize,
}

impl<const N: usize> Default for SampleBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SampleBuffer<N> {
    /// Empty ring. A zero capacity is rejected at compile time:
    ///
    /// ```compile_fail
    /// let _ = max3010x::SampleBuffer::<0>::new();
    /// ```
    pub const fn new() -> Self {
        const { assert!(N > 0, "SampleBuffer needs at least one slot") };
        Self {
            samples: [Sample { red: 0, ir: 0, green: 0 }; N],
            // The first write lands in slot 0.
            head: N - 1,
            tail: 0,
            len: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub const fn head(&self) -> usize {
        self.head
    }

    pub const fn tail(&self) -> usize {
        self.tail
    }

    pub const fn available(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push(&mut self, sample: Sample) {
        self.head = (self.head + 1) % N;
        self.samples[self.head] = sample;

        if self.len == N {
            self.tail = (self.tail + 1) % N;
        } else {
            self.len += 1;
        }
    }

    /// Newest sample, regardless of what has been consumed.
    pub fn most_recent(&self) -> Sample {
        self.samples[self.head]
    }

    /// Oldest unconsumed sample.
    pub fn next_queued(&self) -> Sample {
        self.samples[self.tail]
    }

    /// Drops the oldest unconsumed sample, if any.
    pub fn advance(&mut self) {
        if self.len > 0 {
            self.tail = (self.tail + 1) % N;
            self.len -= 1;
        }
    }

    /// Pops the oldest unconsumed sample.
    pub fn pop(&mut self) -> Option<Sample> {
        if self.is_empty() {
            return None;
        }
        let sample = self.next_queued();
        self.advance();
        Some(sample)
    }
}
