//! # Driver Error Handling
//!
//! This module defines the DriverError enum, which represents the different
//! error types that can occur in the cc1101-rs crate.

use thiserror::Error;

use crate::hal::HalError;
use crate::options::PacketLengthMode;
use crate::status::MarcState;

/// Represents the different error types that can occur while driving a CC1101.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Indicates a fault in the underlying SPI transport.
    #[error("SPI transport error: {0}")]
    Hal(#[from] HalError),

    /// Indicates the transport returned a response of the wrong length.
    #[error("SPI response length mismatch: sent {sent} bytes, received {received}")]
    ResponseLengthMismatch { sent: usize, received: usize },

    /// Indicates the chip failed to echo the leading status byte on every
    /// byte of a burst write, which points at bus corruption.
    #[error(
        "Status byte echo mismatch during burst write to 0x{register:02X}: \
         byte {offset} echoed 0x{echoed:02X}, expected 0x{status:02X}"
    )]
    StatusEchoMismatch {
        register: u8,
        offset: usize,
        status: u8,
        echoed: u8,
    },

    /// Indicates the PARTNUM status register did not identify a CC1101.
    #[error("Unexpected chip part number 0x{actual:02X} (expected 0x{expected:02X})")]
    UnexpectedPartNumber { actual: u8, expected: u8 },

    /// Indicates an unsupported silicon revision.
    #[error("Unexpected chip version 0x{actual:02X} (expected 0x{expected:02X})")]
    UnexpectedChipVersion { actual: u8, expected: u8 },

    /// Indicates the radio state machine was not in the state required to
    /// proceed with session setup.
    #[error("Unexpected radio control state {actual:?} (expected {expected:?})")]
    UnexpectedMarcState {
        actual: MarcState,
        expected: MarcState,
    },

    /// Indicates an operation that requires the radio to be idle was
    /// attempted in another state.
    #[error("Device must be idle before transmission (radio control state: {0:?})")]
    NotIdle(MarcState),

    /// Indicates the MARCSTATE register held a value outside the documented
    /// state set.
    #[error("Unknown radio control state: 0x{0:02X}")]
    UnknownMarcState(u8),

    /// Indicates the MDMCFG2 modulation field held a reserved bit pattern.
    #[error("Unknown modulation format: 0b{0:03b}")]
    UnknownModulationFormat(u8),

    /// Indicates the PKTCTRL0 length-configuration field held a reserved
    /// bit pattern.
    #[error("Unknown packet length mode: 0b{0:02b}")]
    UnknownPacketLengthMode(u8),

    /// Indicates a value that does not fit the target register bitfield.
    #[error("Value {value} does not fit field {field} (maximum {max})")]
    FieldValueOutOfRange {
        field: &'static str,
        value: u8,
        max: u8,
    },

    /// Indicates a base frequency outside the range of the 24-bit frequency
    /// control word.
    #[error("Frequency {0} Hz is outside the representable range")]
    FrequencyOutOfRange(f64),

    /// Indicates a symbol rate that cannot be encoded as a
    /// mantissa/exponent pair.
    #[error("Unsupported symbol rate: {0} baud")]
    UnsupportedSymbolRate(f64),

    /// Indicates a preamble length below the minimum of one byte.
    #[error(
        "Invalid preamble length: {0} bytes; select SyncMode::Disabled \
         to drop the preamble instead"
    )]
    InvalidPreambleLength(u32),

    /// Indicates a preamble length without an exact register encoding.
    #[error("Unsupported preamble length: {0} bytes")]
    UnsupportedPreambleLength(u32),

    /// Indicates a packet length outside 1..=255.
    #[error("Invalid packet length: {0} bytes; must be between 1 and 255")]
    InvalidPacketLength(u8),

    /// Indicates a sync word of the wrong size.
    #[error("Sync word must be exactly 2 bytes, got {0}")]
    InvalidSyncWordLength(usize),

    /// Indicates an empty transmit payload.
    #[error("Payload must not be empty")]
    EmptyPayload,

    /// Indicates a transmit payload longer than the configured maximum.
    #[error("Payload of {length} bytes exceeds maximum packet length of {maximum} bytes")]
    PayloadTooLong { length: usize, maximum: u8 },

    /// Indicates a transmit payload that does not match the fixed packet
    /// length.
    #[error("Expected payload of exactly {expected} bytes, got {actual}")]
    PayloadLengthMismatch { expected: u8, actual: usize },

    /// Indicates a FIFO transmission attempt in a packet length mode
    /// without FIFO framing rules.
    #[error("Transmission requires fixed or variable packet length mode (current: {0:?})")]
    UnsupportedLengthMode(PacketLengthMode),
}
