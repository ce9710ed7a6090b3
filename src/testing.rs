//! Testing utilities and mock implementations
//!
//! A host-side MAC model and helpers for driving the queues and the
//! front-end cycle by cycle.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use std::collections::VecDeque;
use std::vec::Vec;

use crate::driver::status::QueueStatus;
use crate::phy::{MacCore, PhyBeat, RxEvents, Speed, TxEvents};
use crate::queue::{Beat, FramedQueueAdapter};
use crate::sim::{ClockSchedule, ClockSpec};

/// Idle receive cycles the mock inserts after each frame
pub const MOCK_RX_GAP: u8 = 12;

// =============================================================================
// Frame Helpers
// =============================================================================

/// Test frame of `len` bytes counting up from `seed`, with its error flag.
pub fn frame(len: usize, seed: u8, bad: bool) -> (Vec<u8>, bool) {
    let data = (0..len).map(|i| seed.wrapping_add(i as u8)).collect();
    (data, bad)
}

/// Split a frame into `W`-byte words; the error flag rides on the last one.
pub fn frame_beats<const W: usize>(data: &[u8], bad: bool) -> Vec<Beat<W>> {
    let count = data.len().div_ceil(W);
    data.chunks(W)
        .enumerate()
        .map(|(i, chunk)| {
            let last = i + 1 == count;
            Beat::from_slice(chunk, last)
                .unwrap()
                .with_error(last && bad)
        })
        .collect()
}

/// Reassembles frames from stream words.
#[derive(Debug, Default)]
pub struct FrameCollector {
    frames: Vec<(Vec<u8>, bool)>,
    current: Vec<u8>,
    words: usize,
}

impl FrameCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<const W: usize>(&mut self, beat: &Beat<W>) {
        self.current.extend(beat.bytes());
        self.words += 1;
        if beat.last {
            self.frames
                .push((core::mem::take(&mut self.current), beat.user));
        }
    }

    /// Completed frames with their error flags
    pub fn frames(&self) -> &[(Vec<u8>, bool)] {
        &self.frames
    }

    /// Words seen
    pub fn words(&self) -> usize {
        self.words
    }
}

// =============================================================================
// Queue Bench
// =============================================================================

/// Pulses counted per status lane
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatusCount {
    pub overflow: u32,
    pub bad_frame: u32,
    pub good_frame: u32,
}

impl StatusCount {
    pub fn add(&mut self, status: QueueStatus) {
        self.overflow += u32::from(status.overflow);
        self.bad_frame += u32::from(status.bad_frame);
        self.good_frame += u32::from(status.good_frame);
    }
}

/// Outcome of [`run_queue`]
#[derive(Debug, Default)]
pub struct QueueRun {
    /// Frames delivered to the consumer
    pub frames: Vec<(Vec<u8>, bool)>,
    /// Producer-domain status pulses
    pub producer: StatusCount,
    /// Status pulses seen in the consumer domain
    pub consumer: StatusCount,
    /// Consumer words transferred
    pub output_words: usize,
    /// Producer cycles where a word was offered but not taken
    pub stalled_cycles: usize,
}

/// Consumer cycles without output, after all input is in, that end a run
const DRAIN_IDLE_CYCLES: usize = 500;

/// Safety cap on producer cycles per run
const MAX_RUN_CYCLES: u64 = 1_000_000;

/// Push `frames` through `queue` with independent producer and consumer
/// clocks, the consumer accepting whenever `ready(consumer_cycle)` holds.
pub fn run_queue<const D: usize, const I: usize, const O: usize>(
    queue: &mut FramedQueueAdapter<D, I, O>,
    frames: &[(Vec<u8>, bool)],
    producer_period_ps: u64,
    consumer_period_ps: u64,
    ready: impl Fn(u64) -> bool,
) -> QueueRun {
    let beats: Vec<Beat<I>> = frames
        .iter()
        .flat_map(|(data, bad)| frame_beats::<I>(data, *bad))
        .collect();
    let mut sched = ClockSchedule::new([
        ClockSpec::new(producer_period_ps),
        ClockSpec::new(consumer_period_ps).with_phase(consumer_period_ps / 3),
    ])
    .unwrap();

    let mut run = QueueRun::default();
    let mut collector = FrameCollector::new();
    let mut next = 0;
    let mut idle = 0;

    while idle < DRAIN_IDLE_CYCLES && sched.cycles(0) < MAX_RUN_CYCLES {
        let edges = sched.advance();
        if edges.contains(0) {
            let write = queue.clock_producer(false, beats.get(next));
            if write.accepted {
                next += 1;
            } else if next < beats.len() {
                run.stalled_cycles += 1;
            }
            run.producer.add(write.status);
        }
        if edges.contains(1) {
            let read = queue.clock_consumer(false, ready(sched.cycles(1)));
            run.consumer.add(read.status);
            match read.beat {
                Some(beat) => {
                    collector.push(&beat);
                    idle = 0;
                }
                None if next >= beats.len() => idle += 1,
                None => {}
            }
        }
    }

    run.output_words = collector.words();
    run.frames = collector.frames;
    run
}

// =============================================================================
// Mock MAC
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TxState {
    Idle,
    Frame,
    Gap(u8),
}

#[derive(Debug, Clone)]
struct RxFrame {
    data: Vec<u8>,
    bad_frame: bool,
    bad_fcs: bool,
}

/// Byte-level MAC model.
///
/// Transmit: takes one byte per cycle, records completed frames, waits
/// `ifg_delay` cycles after each frame and reports underflow when data runs
/// dry mid-frame. Receive: plays back injected frames one byte per cycle
/// with [`MOCK_RX_GAP`] idle cycles between them.
///
/// # Example
///
/// ```ignore
/// let mut mac = MockMac::new();
/// mac.inject_rx(&[0x55; 64], false, true); // bad checksum
/// mac.set_speed(Speed::Mbps100);
/// ```
#[derive(Debug)]
pub struct MockMac {
    tx_state: TxState,
    current: Vec<u8>,
    sent: Vec<Vec<u8>>,
    aborted: usize,
    underflows: u32,
    force_underflow: bool,
    frames_started: usize,
    gap: u32,
    min_gap: Option<u32>,
    speed: Speed,
    rx_frames: VecDeque<RxFrame>,
    rx_pos: usize,
    rx_gap: u8,
}

impl Default for MockMac {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMac {
    pub fn new() -> Self {
        Self {
            tx_state: TxState::Idle,
            current: Vec::new(),
            sent: Vec::new(),
            aborted: 0,
            underflows: 0,
            force_underflow: false,
            frames_started: 0,
            gap: 0,
            min_gap: None,
            speed: Speed::default(),
            rx_frames: VecDeque::new(),
            rx_pos: 0,
            rx_gap: 0,
        }
    }

    /// Frames transmitted without error
    pub fn sent(&self) -> &[Vec<u8>] {
        &self.sent
    }

    /// Frames that reached the MAC with the error flag set
    pub fn aborted(&self) -> usize {
        self.aborted
    }

    /// Underflows reported
    pub fn underflows(&self) -> u32 {
        self.underflows
    }

    /// Shortest idle stretch seen between two transmitted frames
    pub fn min_gap(&self) -> Option<u32> {
        self.min_gap
    }

    /// Report underflow on the next transmit cycle
    pub fn force_underflow(&mut self) {
        self.force_underflow = true;
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    /// Queue a frame for reception; empty frames are ignored
    pub fn inject_rx(&mut self, data: &[u8], bad_frame: bool, bad_fcs: bool) {
        if data.is_empty() {
            return;
        }
        self.rx_frames.push_back(RxFrame {
            data: data.to_vec(),
            bad_frame,
            bad_fcs,
        });
    }

    /// Frames still waiting to be received
    pub fn rx_pending(&self) -> usize {
        self.rx_frames.len()
    }

    fn abort_tx(&mut self, ifg_delay: u8) -> TxEvents {
        self.underflows += 1;
        self.current.clear();
        self.tx_state = Self::after_frame(ifg_delay);
        TxEvents { underflow: true }
    }

    fn accept(&mut self, beat: PhyBeat, ifg_delay: u8) {
        if self.tx_state == TxState::Idle {
            if self.frames_started > 0 {
                self.min_gap = Some(self.min_gap.map_or(self.gap, |g| g.min(self.gap)));
            }
            self.frames_started += 1;
            self.gap = 0;
        }

        self.current.extend(beat.bytes());
        if !beat.last {
            self.tx_state = TxState::Frame;
            return;
        }

        let data = core::mem::take(&mut self.current);
        if beat.user {
            self.aborted += 1;
        } else {
            self.sent.push(data);
        }
        self.tx_state = Self::after_frame(ifg_delay);
    }

    fn after_frame(ifg_delay: u8) -> TxState {
        if ifg_delay == 0 {
            TxState::Idle
        } else {
            TxState::Gap(ifg_delay)
        }
    }
}

impl MacCore for MockMac {
    fn tx_ready(&self) -> bool {
        !matches!(self.tx_state, TxState::Gap(_))
    }

    fn clock_tx(&mut self, beat: Option<PhyBeat>, ifg_delay: u8) -> TxEvents {
        if self.force_underflow {
            self.force_underflow = false;
            return self.abort_tx(ifg_delay);
        }

        match (self.tx_state, beat) {
            (TxState::Gap(n), _) => {
                self.gap += 1;
                self.tx_state = if n <= 1 { TxState::Idle } else { TxState::Gap(n - 1) };
            }
            (TxState::Idle, None) => self.gap += 1,
            (TxState::Frame, None) => return self.abort_tx(ifg_delay),
            (_, Some(beat)) => self.accept(beat, ifg_delay),
        }
        TxEvents::default()
    }

    fn clock_rx(&mut self) -> RxEvents {
        if self.rx_gap > 0 {
            self.rx_gap -= 1;
            return RxEvents::default();
        }
        let Some(frame) = self.rx_frames.front() else {
            return RxEvents::default();
        };

        let byte = frame.data[self.rx_pos];
        self.rx_pos += 1;
        if self.rx_pos < frame.data.len() {
            return RxEvents {
                beat: Some(Beat::byte(byte, false)),
                ..RxEvents::default()
            };
        }

        let events = RxEvents {
            beat: Some(Beat::byte(byte, true).with_error(frame.bad_frame || frame.bad_fcs)),
            bad_frame: frame.bad_frame,
            bad_fcs: frame.bad_fcs,
        };
        self.rx_frames.pop_front();
        self.rx_pos = 0;
        self.rx_gap = MOCK_RX_GAP;
        events
    }

    fn speed(&self) -> Speed {
        self.speed
    }

    fn reset_tx(&mut self) {
        self.tx_state = TxState::Idle;
        self.current.clear();
        self.force_underflow = false;
        self.gap = 0;
    }

    fn reset_rx(&mut self) {
        self.rx_frames.clear();
        self.rx_pos = 0;
        self.rx_gap = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_beats_split_and_flag_last() {
        let (data, _) = frame(19, 0, false);
        let beats = frame_beats::<8>(&data, true);

        assert_eq!(beats.len(), 3);
        assert!(!beats[0].last && !beats[0].user);
        assert!(beats[2].last && beats[2].user);
        assert_eq!(beats[2].len(), 3);
    }

    #[test]
    fn collector_reassembles() {
        let (data, _) = frame(19, 7, false);
        let mut collector = FrameCollector::new();
        for beat in frame_beats::<8>(&data, false) {
            collector.push(&beat);
        }

        assert_eq!(collector.frames(), &[(data, false)]);
        assert_eq!(collector.words(), 3);
    }

    #[test]
    fn mock_mac_transmits_and_waits_gap() {
        let mut mac = MockMac::new();
        mac.clock_tx(Some(Beat::byte(1, false)), 2);
        mac.clock_tx(Some(Beat::byte(2, true)), 2);

        assert_eq!(mac.sent(), &[std::vec![1, 2]]);
        assert!(!mac.tx_ready());
        mac.clock_tx(None, 2);
        mac.clock_tx(None, 2);
        assert!(mac.tx_ready());
    }

    #[test]
    fn mock_mac_underflows_mid_frame() {
        let mut mac = MockMac::new();
        mac.clock_tx(Some(Beat::byte(1, false)), 0);

        assert!(mac.clock_tx(None, 0).underflow);
        assert_eq!(mac.underflows(), 1);
        assert!(mac.sent().is_empty());
    }

    #[test]
    fn mock_mac_plays_back_rx_frames() {
        let mut mac = MockMac::new();
        mac.inject_rx(&[1, 2], false, true);

        let first = mac.clock_rx();
        assert_eq!(first.beat.map(|b| b.data[0]), Some(1));
        let second = mac.clock_rx();
        let beat = second.beat.unwrap();
        assert!(beat.last && beat.user);
        assert!(second.bad_fcs && !second.bad_frame);
        assert_eq!(mac.rx_pending(), 0);
        assert!(mac.clock_rx().beat.is_none());
    }
}
