//! Error types for the MAC front-end
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Construction-time parameter validation failures
//! - [`StreamError`]: Malformed stream words built by callers
//!
//! Transport and capacity problems (underflow, bad checksum, queue overflow)
//! are not errors here. They are reported as status pulses and the pipeline
//! keeps running.
//!
//! The unified [`Error`] enum wraps both domain errors.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration errors
///
/// Returned when a front-end, queue or synchronizer is built with
/// parameters that select no valid behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Invalid configuration parameter
    InvalidConfig,
    /// Resynchronization chain or reset cascade depth out of range
    InvalidSyncStages,
    /// Stream word width is zero or wider than the keep mask
    InvalidWidth,
    /// Queue depth is zero or not a multiple of both word widths
    InvalidDepth,
    /// Output pipeline length out of range
    InvalidPipeline,
    /// Drop policy selected without frame-atomic mode
    DropRequiresFrameMode,
    /// Internal receive queue would back-pressure a MAC that cannot stall
    RxQueueBackPressure,
    /// Clock period of zero
    InvalidClockPeriod,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::InvalidConfig => "invalid configuration",
            ConfigError::InvalidSyncStages => "invalid synchronizer depth",
            ConfigError::InvalidWidth => "invalid stream word width",
            ConfigError::InvalidDepth => "invalid queue depth",
            ConfigError::InvalidPipeline => "invalid output pipeline length",
            ConfigError::DropRequiresFrameMode => "drop policy requires frame mode",
            ConfigError::RxQueueBackPressure => "receive queue must drop when full",
            ConfigError::InvalidClockPeriod => "invalid clock period",
        }
    }
}

// =============================================================================
// Stream Errors
// =============================================================================

/// Stream word construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StreamError {
    /// More bytes than the word width
    TooLong,
    /// Word carries no valid bytes
    Empty,
}

impl core::fmt::Display for StreamError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StreamError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            StreamError::TooLong => "data longer than word width",
            StreamError::Empty => "word has no valid bytes",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// ```ignore
/// match MacFrontEnd::new(mac, config) {
///     Err(ConfigError::DropRequiresFrameMode) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// Stream error
    Stream(StreamError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Stream(e) => write!(f, "stream: {}", e.as_str()),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<StreamError> for Error {
    fn from(e: StreamError) -> Self {
        Error::Stream(e)
    }
}

/// Result type alias for front-end operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for stream word construction
pub type StreamResult<T> = core::result::Result<T, StreamError>;

// =============================================================================
// Unit Tests
// =============================================================================
