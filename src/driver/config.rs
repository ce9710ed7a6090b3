//! Configuration types for the MAC front-end

use crate::cdc::chain::validate_depth;
use crate::driver::error::{ConfigError, ConfigResult};
use crate::internal::constants::{
    DEFAULT_IFG_DELAY, DEFAULT_OUTPUT_PIPELINE, DEFAULT_RESET_STAGES, DEFAULT_SYNC_STAGES,
    MAX_OUTPUT_PIPELINE, MAX_WORD_BYTES,
};

/// Framed queue policy
///
/// Fixed per queue instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueConfig {
    /// Frame-atomic mode: a frame becomes visible to the consumer only once
    /// its end-of-frame word has been admitted
    pub frame_fifo: bool,
    /// Excise frames whose end-of-frame word carries the error flag
    pub drop_bad_frame: bool,
    /// Never back-pressure the producer; discard the newest frame instead
    pub drop_when_full: bool,
    /// Registered output stages on the consumer side (1..=4)
    pub output_pipeline: u8,
    /// Resynchronization chain depth for pointers and status
    pub sync_stages: u8,
    /// Cascade length of the cross-side reset synchronizers
    pub reset_stages: u8,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl QueueConfig {
    /// Frame-atomic queue with back-pressure and no drop policies
    #[must_use]
    pub const fn new() -> Self {
        Self {
            frame_fifo: true,
            drop_bad_frame: false,
            drop_when_full: false,
            output_pipeline: DEFAULT_OUTPUT_PIPELINE,
            sync_stages: DEFAULT_SYNC_STAGES,
            reset_stages: DEFAULT_RESET_STAGES,
        }
    }

    /// Transmit-path default: frame mode, drop bad frames, back-pressure.
    ///
    /// The MAC must never underflow mid-frame, so frames are only released
    /// once complete, and a producer-aborted frame never reaches the wire.
    #[must_use]
    pub const fn tx_default() -> Self {
        Self::new().with_drop_bad_frame(true)
    }

    /// Receive-path default: frame mode, drop bad frames, drop when full.
    ///
    /// The MAC cannot be stalled, so overflow discards the newest frame.
    #[must_use]
    pub const fn rx_default() -> Self {
        Self::new()
            .with_drop_bad_frame(true)
            .with_drop_when_full(true)
    }

    /// Plain word FIFO without frame semantics
    #[must_use]
    pub const fn streaming() -> Self {
        Self::new().with_frame_fifo(false)
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Enable or disable frame-atomic mode
    #[must_use]
    pub const fn with_frame_fifo(mut self, enabled: bool) -> Self {
        self.frame_fifo = enabled;
        self
    }

    /// Enable or disable bad-frame dropping
    #[must_use]
    pub const fn with_drop_bad_frame(mut self, enabled: bool) -> Self {
        self.drop_bad_frame = enabled;
        self
    }

    /// Enable or disable drop-on-full
    #[must_use]
    pub const fn with_drop_when_full(mut self, enabled: bool) -> Self {
        self.drop_when_full = enabled;
        self
    }

    /// Set the consumer-side output pipeline length
    #[must_use]
    pub const fn with_output_pipeline(mut self, stages: u8) -> Self {
        self.output_pipeline = stages;
        self
    }

    /// Set the pointer/status resynchronization depth
    #[must_use]
    pub const fn with_sync_stages(mut self, stages: u8) -> Self {
        self.sync_stages = stages;
        self
    }

    /// Set the cross-side reset cascade length
    #[must_use]
    pub const fn with_reset_stages(mut self, stages: u8) -> Self {
        self.reset_stages = stages;
        self
    }

    /// Check the policy against a concrete geometry.
    ///
    /// `depth` must be a power of two and a multiple of both word widths.
    pub fn validate(&self, depth: usize, in_width: usize, out_width: usize) -> ConfigResult<()> {
        validate_width(in_width)?;
        validate_width(out_width)?;
        if depth == 0
            || !depth.is_power_of_two()
            || depth % in_width != 0
            || depth % out_width != 0
        {
            return Err(ConfigError::InvalidDepth);
        }
        if self.output_pipeline == 0 || self.output_pipeline as usize > MAX_OUTPUT_PIPELINE {
            return Err(ConfigError::InvalidPipeline);
        }
        if (self.drop_bad_frame || self.drop_when_full) && !self.frame_fifo {
            return Err(ConfigError::DropRequiresFrameMode);
        }
        validate_depth(self.sync_stages)?;
        validate_depth(self.reset_stages)
    }
}

/// Check a stream word width.
pub(crate) const fn validate_width(width: usize) -> ConfigResult<()> {
    if width == 0 || width > MAX_WORD_BYTES {
        return Err(ConfigError::InvalidWidth);
    }
    Ok(())
}

/// Where received frames cross into the logic domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxQueueMode {
    /// The front-end owns the receive queue
    #[default]
    Internal,
    /// An external queue takes the raw receive stream and hands the
    /// logic-domain stream back in
    External,
}

/// Complete front-end configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrontEndConfig {
    /// Transmit queue policy (producer: logic, consumer: transmit)
    pub tx_queue: QueueConfig,
    /// Receive queue policy (producer: receive, consumer: logic).
    ///
    /// The MAC cannot be stalled, so an internal receive queue must have
    /// `drop_when_full` set.
    pub rx_queue: QueueConfig,
    /// Internal or external receive queue
    pub rx_queue_mode: RxQueueMode,
    /// Inter-frame gap in transmit cycles
    pub ifg_delay: u8,
    /// Resynchronization depth for status events and the speed vector
    pub sync_stages: u8,
    /// Cascade length of the external queue reset synchronizer
    pub reset_stages: u8,
    /// Minimum transmit cycles the speed vector is expected to hold a value
    pub speed_min_hold: u32,
}

impl Default for FrontEndConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FrontEndConfig {
    /// Create a new configuration with defaults
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tx_queue: QueueConfig::tx_default(),
            rx_queue: QueueConfig::rx_default(),
            rx_queue_mode: RxQueueMode::Internal,
            ifg_delay: DEFAULT_IFG_DELAY,
            sync_stages: DEFAULT_SYNC_STAGES,
            reset_stages: DEFAULT_RESET_STAGES,
            speed_min_hold: 0,
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the transmit queue policy
    #[must_use]
    pub const fn with_tx_queue(mut self, queue: QueueConfig) -> Self {
        self.tx_queue = queue;
        self
    }

    /// Set the receive queue policy
    #[must_use]
    pub const fn with_rx_queue(mut self, queue: QueueConfig) -> Self {
        self.rx_queue = queue;
        self
    }

    /// Select the internal or external receive queue
    #[must_use]
    pub const fn with_rx_queue_mode(mut self, mode: RxQueueMode) -> Self {
        self.rx_queue_mode = mode;
        self
    }

    /// Set the inter-frame gap
    #[must_use]
    pub const fn with_ifg_delay(mut self, cycles: u8) -> Self {
        self.ifg_delay = cycles;
        self
    }

    /// Set the status/speed resynchronization depth
    #[must_use]
    pub const fn with_sync_stages(mut self, stages: u8) -> Self {
        self.sync_stages = stages;
        self
    }

    /// Set the external queue reset cascade length
    #[must_use]
    pub const fn with_reset_stages(mut self, stages: u8) -> Self {
        self.reset_stages = stages;
        self
    }

    /// Set the expected speed vector hold time
    #[must_use]
    pub const fn with_speed_min_hold(mut self, cycles: u32) -> Self {
        self.speed_min_hold = cycles;
        self
    }

    /// Check everything that does not depend on queue geometry
    pub fn validate(&self) -> ConfigResult<()> {
        if self.rx_queue_mode == RxQueueMode::Internal && !self.rx_queue.drop_when_full {
            return Err(ConfigError::RxQueueBackPressure);
        }
        validate_depth(self.sync_stages)?;
        validate_depth(self.reset_stages)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
