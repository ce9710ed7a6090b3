//! Framed queue adapter.
//!
//! Moves a framed byte stream from a producer domain of `IN_W`-byte words to
//! a consumer domain of `OUT_W`-byte words through a `DEPTH`-byte ring.
//!
//! # Pointers
//!
//! The producer owns `wr_ptr` (committed) and `wr_temp` (including the frame
//! in progress); the consumer owns `rd_ptr`. Each side sees the other's
//! pointer only through a Gray-coded [`SyncChain`], so its view is always a
//! little stale and always conservative: the producer never overwrites
//! unread data and the consumer never reads uncommitted data.
//!
//! Gray coding only protects a pointer that moves by one between samples.
//! `rd_ptr` and `wr_ptr` in streaming mode can move by a whole word, and a
//! frame commit moves `wr_ptr` by the whole frame length. The model stays
//! exact because each [`SyncChain`] stage registers the full `u32` in one
//! step, so the far side sees either the old pointer or the new one.
//!
//! # Frame mode
//!
//! With `frame_fifo` set, `wr_ptr` only advances when an end-of-frame word is
//! admitted, so the consumer sees a frame whole or not at all. Dropping a
//! frame rewinds `wr_temp` to `wr_ptr`. Frames that cannot fit even in an
//! empty ring are dropped as overflow regardless of the back-pressure
//! policy. Only the end-of-frame word may be partial; the depth is a
//! multiple of both widths.
//!
//! # Resets
//!
//! Each side takes its own domain's reset. The raw reset register of each
//! side is re-timed into the other through a [`ResetSync`], so a reset on
//! either side clears the whole queue. Reset pulses are expected to outlast
//! the reset cascade of the slower side.
//!
//! The status event crossing is never reset; its output is masked while the
//! consumer is in reset.

use crate::cdc::{ResetSync, SyncChain, ToggleSink, ToggleSource};
use crate::driver::config::QueueConfig;
use crate::driver::error::ConfigResult;
use crate::driver::status::QueueStatus;
use crate::internal::constants::MAX_OUTPUT_PIPELINE;

use super::gray::{bin_to_gray, gray_to_bin};
use super::ring::{ByteRing, Slot, occupancy};
use super::stream::Beat;

/// Producer-domain result of one clock edge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WriteResult {
    /// The offered word was transferred at this edge
    pub accepted: bool,
    /// Producer-domain status pulses
    pub status: QueueStatus,
}

/// Consumer-domain result of one clock edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReadResult<const W: usize> {
    /// Word transferred to the consumer at this edge
    pub beat: Option<Beat<W>>,
    /// Producer status pulses, synchronized into the consumer domain
    pub status: QueueStatus,
}

impl<const W: usize> Default for ReadResult<W> {
    fn default() -> Self {
        Self {
            beat: None,
            status: QueueStatus::IDLE,
        }
    }
}

/// Dual-domain framed queue with width adaptation.
pub struct FramedQueueAdapter<const DEPTH: usize, const IN_W: usize, const OUT_W: usize> {
    config: QueueConfig,
    ring: ByteRing<DEPTH>,

    // Producer domain
    wr_ptr: u32,
    wr_temp: u32,
    dropping: bool,
    producer_rst: bool,
    producer_in_reset: bool,
    rd_sync: SyncChain<u32>,
    consumer_rst_sync: ResetSync,
    status_source: ToggleSource,
    producer_status: QueueStatus,

    // Consumer domain
    rd_ptr: u32,
    consumer_rst: bool,
    consumer_in_reset: bool,
    wr_sync: SyncChain<u32>,
    producer_rst_sync: ResetSync,
    status_sink: ToggleSink,
    consumer_status: QueueStatus,
    pipeline: [Option<Beat<OUT_W>>; MAX_OUTPUT_PIPELINE],
}

impl<const DEPTH: usize, const IN_W: usize, const OUT_W: usize>
    FramedQueueAdapter<DEPTH, IN_W, OUT_W>
{
    /// Create an empty queue
    pub fn new(config: QueueConfig) -> ConfigResult<Self> {
        config.validate(DEPTH, IN_W, OUT_W)?;
        Ok(Self {
            config,
            ring: ByteRing::new(),
            wr_ptr: 0,
            wr_temp: 0,
            dropping: false,
            producer_rst: false,
            producer_in_reset: false,
            rd_sync: SyncChain::new(config.sync_stages, 0)?,
            consumer_rst_sync: ResetSync::released(config.reset_stages)?,
            status_source: ToggleSource::new(),
            producer_status: QueueStatus::IDLE,
            rd_ptr: 0,
            consumer_rst: false,
            consumer_in_reset: false,
            wr_sync: SyncChain::new(config.sync_stages, 0)?,
            producer_rst_sync: ResetSync::released(config.reset_stages)?,
            status_sink: ToggleSink::new(config.sync_stages)?,
            consumer_status: QueueStatus::IDLE,
            pipeline: [None; MAX_OUTPUT_PIPELINE],
        })
    }

    /// Queue policy
    pub const fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Producer side was held in reset at its last edge
    pub const fn producer_in_reset(&self) -> bool {
        self.producer_in_reset
    }

    /// Consumer side was held in reset at its last edge
    pub const fn consumer_in_reset(&self) -> bool {
        self.consumer_in_reset
    }

    // =========================================================================
    // Producer Domain
    // =========================================================================

    /// Whether a full `IN_W` word offered now would be transferred at the
    /// next producer edge.
    pub fn producer_ready(&self) -> bool {
        if self.producer_in_reset {
            return false;
        }
        let free = self.producer_free();
        if !self.config.frame_fifo {
            return free >= IN_W;
        }
        self.config.drop_when_full
            || self.dropping
            || self.frame_len() + IN_W > DEPTH
            || free >= IN_W
    }

    /// One producer clock edge.
    ///
    /// `input` is the word presented this cycle; it is transferred if
    /// [`Self::producer_ready`] held before the edge.
    pub fn clock_producer(&mut self, rst: bool, input: Option<&Beat<IN_W>>) -> WriteResult {
        let ready = self.producer_ready();
        self.producer_rst = rst;
        let peer_rst = self.consumer_rst_sync.clock(self.consumer_rst);
        if rst || peer_rst {
            self.reset_producer();
            return WriteResult::default();
        }
        self.producer_in_reset = false;

        let mut status = QueueStatus::IDLE;
        let accepted = match input {
            Some(beat) if ready => {
                self.admit(beat, &mut status);
                true
            }
            _ => false,
        };

        self.rd_sync.clock(bin_to_gray(self.rd_ptr));
        self.status_source.clock(status.bits());
        self.producer_status = status;
        WriteResult { accepted, status }
    }

    /// Status pulses of the last producer edge
    pub const fn producer_status(&self) -> QueueStatus {
        self.producer_status
    }

    /// Bytes the producer considers used, including the frame in progress
    pub fn producer_occupancy(&self) -> usize {
        occupancy(self.wr_temp, self.rd_synced())
    }

    fn producer_free(&self) -> usize {
        DEPTH.saturating_sub(self.producer_occupancy())
    }

    fn frame_len(&self) -> usize {
        occupancy(self.wr_temp, self.wr_ptr)
    }

    fn rd_synced(&self) -> u32 {
        gray_to_bin(self.rd_sync.output())
    }

    fn admit(&mut self, beat: &Beat<IN_W>, status: &mut QueueStatus) {
        let n = beat.len();

        if !self.config.frame_fifo {
            if n > 0 {
                self.write_bytes(beat);
                self.wr_ptr = self.wr_temp;
            }
            return;
        }

        let frame_len = self.frame_len();
        if self.dropping || frame_len + n > DEPTH || n > self.producer_free() {
            self.dropping = true;
            if beat.last {
                self.wr_temp = self.wr_ptr;
                self.dropping = false;
                status.overflow = true;
                #[cfg(feature = "defmt")]
                defmt::debug!("queue overflow: frame dropped");
            }
            return;
        }

        self.write_bytes(beat);
        if !beat.last {
            return;
        }
        if n == 0 {
            if frame_len == 0 {
                return;
            }
            let end = self.ring.get_mut(self.wr_temp.wrapping_sub(1));
            end.last = true;
            end.user = beat.user;
        }

        if self.config.drop_bad_frame && beat.user {
            self.wr_temp = self.wr_ptr;
            status.bad_frame = true;
            #[cfg(feature = "defmt")]
            defmt::debug!("queue: bad frame dropped");
        } else {
            self.wr_ptr = self.wr_temp;
            status.good_frame = true;
        }
    }

    fn write_bytes(&mut self, beat: &Beat<IN_W>) {
        let n = beat.len();
        for (i, data) in beat.bytes().enumerate() {
            let end = beat.last && i + 1 == n;
            self.ring.write(
                self.wr_temp,
                Slot {
                    data,
                    last: end,
                    user: end && beat.user,
                },
            );
            self.wr_temp = self.wr_temp.wrapping_add(1);
        }
    }

    fn reset_producer(&mut self) {
        self.wr_ptr = 0;
        self.wr_temp = 0;
        self.dropping = false;
        self.rd_sync.reset();
        self.producer_status = QueueStatus::IDLE;
        self.producer_in_reset = true;
    }

    // =========================================================================
    // Consumer Domain
    // =========================================================================

    /// Whether a word is presented to the consumer in the current cycle
    pub fn output_valid(&self) -> bool {
        self.pipeline[self.stages() - 1].is_some()
    }

    /// One consumer clock edge; `ready` is the consumer's acceptance.
    pub fn clock_consumer(&mut self, rst: bool, ready: bool) -> ReadResult<OUT_W> {
        self.consumer_rst = rst;
        let peer_rst = self.producer_rst_sync.clock(self.producer_rst);
        if rst || peer_rst {
            self.status_sink.clock(self.status_source.level());
            self.reset_consumer();
            return ReadResult::default();
        }
        self.consumer_in_reset = false;

        let stages = self.stages();
        let beat = if ready {
            self.pipeline[stages - 1].take()
        } else {
            None
        };
        for i in (1..stages).rev() {
            if self.pipeline[i].is_none() {
                self.pipeline[i] = self.pipeline[i - 1].take();
            }
        }
        if self.pipeline[0].is_none() {
            self.pipeline[0] = self.pack();
        }

        self.wr_sync.clock(bin_to_gray(self.wr_ptr));
        let status = QueueStatus::from_bits(self.status_sink.clock(self.status_source.level()));
        self.consumer_status = status;
        ReadResult { beat, status }
    }

    /// Synchronized status pulses of the last consumer edge
    pub const fn consumer_status(&self) -> QueueStatus {
        self.consumer_status
    }

    /// Committed bytes the consumer can see but has not read
    pub fn consumer_occupancy(&self) -> usize {
        occupancy(gray_to_bin(self.wr_sync.output()), self.rd_ptr)
    }

    /// True when the consumer sees no data and the output pipeline is empty
    pub fn is_empty(&self) -> bool {
        self.consumer_occupancy() == 0 && self.pipeline.iter().all(Option::is_none)
    }

    fn stages(&self) -> usize {
        self.config.output_pipeline as usize
    }

    fn pack(&mut self) -> Option<Beat<OUT_W>> {
        let avail = self.consumer_occupancy();
        if avail == 0 {
            return None;
        }

        let mut beat = Beat::<OUT_W>::default();
        let mut count = 0;
        while count < OUT_W && count < avail {
            let slot = *self.ring.get(self.rd_ptr.wrapping_add(count as u32));
            beat.data[count] = slot.data;
            beat.keep |= 1 << count;
            count += 1;
            if slot.last {
                beat.last = true;
                beat.user = slot.user;
                break;
            }
        }
        if !beat.last && count < OUT_W {
            return None;
        }

        self.rd_ptr = self.rd_ptr.wrapping_add(count as u32);
        Some(beat)
    }

    fn reset_consumer(&mut self) {
        self.rd_ptr = 0;
        self.wr_sync.reset();
        self.consumer_status = QueueStatus::IDLE;
        self.pipeline = [None; MAX_OUTPUT_PIPELINE];
        self.consumer_in_reset = true;
    }
}

impl<const DEPTH: usize, const IN_W: usize, const OUT_W: usize> core::fmt::Debug
    for FramedQueueAdapter<DEPTH, IN_W, OUT_W>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FramedQueueAdapter")
            .field("depth", &DEPTH)
            .field("in_width", &IN_W)
            .field("out_width", &OUT_W)
            .field("wr_ptr", &self.wr_ptr)
            .field("wr_temp", &self.wr_temp)
            .field("rd_ptr", &self.rd_ptr)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec;
    use std::vec::Vec;

    use super::*;
    use crate::driver::error::ConfigError;
    use crate::testing::{QueueRun, frame, frame_beats, run_queue};

    fn always(_: u64) -> bool {
        true
    }

    #[test]
    fn rejects_invalid_geometry() {
        let result = FramedQueueAdapter::<48, 1, 1>::new(QueueConfig::new());
        assert_eq!(result.err(), Some(ConfigError::InvalidDepth));

        let result = FramedQueueAdapter::<64, 1, 1>::new(QueueConfig::streaming().with_drop_when_full(true));
        assert_eq!(result.err(), Some(ConfigError::DropRequiresFrameMode));
    }

    #[test]
    fn good_frame_is_delivered_intact() {
        let mut queue = FramedQueueAdapter::<128, 1, 1>::new(QueueConfig::tx_default()).unwrap();
        let input = vec![frame(64, 0x10, false)];

        let run = run_queue(&mut queue, &input, 8, 8, always);

        assert_eq!(run.frames, input);
        assert_eq!(run.producer.good_frame, 1);
        assert_eq!(run.consumer.good_frame, 1);
        assert_eq!(run.producer.overflow + run.producer.bad_frame, 0);
    }

    #[test]
    fn bad_frame_is_excised_with_one_pulse() {
        let mut queue = FramedQueueAdapter::<128, 1, 1>::new(QueueConfig::rx_default()).unwrap();
        let input = vec![frame(40, 0x20, true)];

        let run = run_queue(&mut queue, &input, 8, 8, always);

        assert!(run.frames.is_empty());
        assert_eq!(run.output_words, 0);
        assert_eq!(run.producer.bad_frame, 1);
        assert_eq!(run.consumer.bad_frame, 1);
        assert_eq!(run.producer.good_frame, 0);
    }

    #[test]
    fn bad_frame_is_forwarded_when_not_dropping() {
        let mut queue = FramedQueueAdapter::<128, 1, 1>::new(QueueConfig::new()).unwrap();
        let input = vec![frame(20, 0x30, true), frame(20, 0x40, false)];

        let run = run_queue(&mut queue, &input, 8, 8, always);

        assert_eq!(run.frames, input);
        assert_eq!(run.producer.bad_frame, 0);
        assert_eq!(run.producer.good_frame, 2);
    }

    #[test]
    fn frames_beyond_capacity_are_dropped_whole_when_full() {
        let config = QueueConfig::rx_default();
        let mut queue = FramedQueueAdapter::<64, 1, 1>::new(config).unwrap();
        let input = vec![
            frame(30, 0x01, false),
            frame(30, 0x02, false),
            frame(30, 0x03, false),
            frame(30, 0x04, false),
        ];

        // Consumer stalls until every frame has been offered.
        let run = run_queue(&mut queue, &input, 8, 8, |cycle| cycle > 200);

        assert_eq!(run.frames, input[..2].to_vec());
        assert_eq!(run.producer.overflow, 2);
        assert_eq!(run.consumer.overflow, 2);
        assert_eq!(run.producer.good_frame, 2);
        assert_eq!(run.stalled_cycles, 0);
    }

    #[test]
    fn back_pressure_stalls_without_loss() {
        let mut queue = FramedQueueAdapter::<64, 1, 1>::new(QueueConfig::new()).unwrap();
        let input = vec![
            frame(30, 0x01, false),
            frame(30, 0x02, false),
            frame(30, 0x03, false),
        ];

        let run = run_queue(&mut queue, &input, 8, 8, |cycle| cycle > 100);

        assert_eq!(run.frames, input);
        assert_eq!(run.producer.overflow, 0);
        assert!(run.stalled_cycles > 0);
    }

    #[test]
    fn oversize_frame_is_dropped_even_with_back_pressure() {
        let mut queue = FramedQueueAdapter::<32, 1, 1>::new(QueueConfig::new()).unwrap();
        let input = vec![frame(40, 0x55, false), frame(10, 0x66, false)];

        let run = run_queue(&mut queue, &input, 8, 8, always);

        assert_eq!(run.frames, input[1..].to_vec());
        assert_eq!(run.producer.overflow, 1);
    }

    #[test]
    fn downsizes_wide_words_to_bytes() {
        let mut queue = FramedQueueAdapter::<256, 8, 1>::new(QueueConfig::tx_default()).unwrap();
        let input = vec![frame(64, 0x00, false), frame(61, 0x80, false)];

        // Producer at 125 MHz feeding an 8-bit consumer at the same rate.
        let run = run_queue(&mut queue, &input, 8000, 8000, always);

        assert_eq!(run.frames, input);
        assert_eq!(run.producer.good_frame, 2);
    }

    #[test]
    fn upsizes_bytes_to_wide_words() {
        let mut queue = FramedQueueAdapter::<256, 1, 8>::new(QueueConfig::rx_default()).unwrap();
        let input = vec![frame(60, 0x11, false), frame(67, 0x22, false)];

        let run = run_queue(&mut queue, &input, 8000, 6400, always);

        assert_eq!(run.frames, input);
        // 60 bytes -> 8 words, 67 bytes -> 9 words
        assert_eq!(run.output_words, 17);
    }

    #[test]
    fn works_across_unrelated_clock_rates() {
        for (producer, consumer) in [(8000u64, 6737u64), (6737, 8000), (8000, 30_011)] {
            let mut queue =
                FramedQueueAdapter::<128, 1, 1>::new(QueueConfig::rx_default()).unwrap();
            let input: Vec<_> = (0..6).map(|i| frame(20 + i, i as u8 * 16, false)).collect();

            let run: QueueRun = run_queue(&mut queue, &input, producer, consumer, always);

            let delivered = run.frames.len() as u32;
            assert_eq!(delivered + run.producer.overflow, 6);
            for got in &run.frames {
                assert!(input.contains(got));
            }
        }
    }

    #[test]
    fn streaming_mode_forwards_before_end_of_frame() {
        let mut queue = FramedQueueAdapter::<64, 1, 1>::new(QueueConfig::streaming()).unwrap();
        let beat = Beat::<1>::byte(0xAB, false);

        queue.clock_producer(false, Some(&beat));
        let mut seen = None;
        for _ in 0..8 {
            if let Some(out) = queue.clock_consumer(false, true).beat {
                seen = Some(out);
            }
        }

        let out = seen.expect("byte forwarded without end-of-frame");
        assert_eq!(out.data[0], 0xAB);
        assert!(!out.last);
    }

    #[test]
    fn frame_mode_holds_data_until_end_of_frame() {
        let mut queue = FramedQueueAdapter::<64, 1, 1>::new(QueueConfig::new()).unwrap();

        for byte in 0..10u8 {
            queue.clock_producer(false, Some(&Beat::byte(byte, false)));
        }
        for _ in 0..10 {
            assert!(queue.clock_consumer(false, true).beat.is_none());
        }
        assert!(queue.is_empty());
        assert_eq!(queue.producer_occupancy(), 10);
    }

    #[test]
    fn frame_commit_crosses_as_one_pointer_jump() {
        let mut queue = FramedQueueAdapter::<128, 8, 1>::new(QueueConfig::new()).unwrap();
        let data = frame(40, 0x50, false).0;
        let mut seen = Vec::new();

        for beat in frame_beats::<8>(&data, false) {
            assert!(queue.clock_producer(false, Some(&beat)).accepted);
            queue.clock_consumer(false, false);
            seen.push(gray_to_bin(queue.wr_sync.output()));
        }
        for _ in 0..4 {
            queue.clock_consumer(false, false);
            seen.push(gray_to_bin(queue.wr_sync.output()));
        }

        assert!(seen.iter().all(|&ptr| ptr == 0 || ptr == 40));
        assert_eq!(seen.last(), Some(&40));
    }

    #[test]
    fn producer_reset_clears_both_sides() {
        let mut queue = FramedQueueAdapter::<64, 1, 1>::new(QueueConfig::new()).unwrap();
        for byte in 0..5u8 {
            queue.clock_producer(false, Some(&Beat::byte(byte, byte == 4)));
        }
        for _ in 0..3 {
            queue.clock_consumer(false, false);
        }
        assert!(!queue.is_empty());

        let result = queue.clock_producer(true, Some(&Beat::byte(9, true)));
        assert!(!result.accepted);
        assert!(!queue.producer_ready());

        queue.clock_consumer(false, true);
        assert!(queue.is_empty());
        assert!(queue.producer_in_reset() && queue.consumer_in_reset());

        // Release: the consumer holds reset for the cascade length.
        for _ in 0..8 {
            queue.clock_producer(false, None);
            assert!(queue.clock_consumer(false, true).beat.is_none());
        }
        assert!(queue.producer_ready());
        assert!(!queue.consumer_in_reset());
        assert_eq!(queue.producer_occupancy(), 0);
    }
}
