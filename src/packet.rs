//! # Packet Framing and Received Records
//!
//! Pure helpers for the FIFO transceive protocol: framing outgoing payloads
//! according to the packet length mode, and splitting RX FIFO contents into
//! payload and the appended status trailer. Keeping these free of bus access
//! makes the framing rules testable without hardware.

use std::fmt;

use crate::constants::RSSI_OFFSET_DB;
use crate::error::DriverError;
use crate::options::PacketLengthMode;

/// A packet read out of the RX FIFO together with the two appended status
/// bytes (datasheet section 20, "Received Packet Status Bytes").
///
/// Built once per successful FIFO read and handed to the caller; the driver
/// keeps no copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedPacket {
    /// Payload bytes, without the length prefix in variable length mode
    pub payload: Vec<u8>,
    /// Raw RSSI index from the first trailer byte
    pub rssi_index: u8,
    /// CRC check result, bit 7 of the second trailer byte
    pub checksum_valid: bool,
    /// Link quality indication, bits 6:0 of the second trailer byte
    pub link_quality_indicator: u8,
}

impl ReceivedPacket {
    /// Received signal strength in dBm.
    ///
    /// The index is signed-magnitude around 256: values at or above 128
    /// represent negative offsets. The result is half the offset minus the
    /// fixed calibration constant (datasheet section 17.3).
    pub fn rssi_dbm(&self) -> f64 {
        if self.rssi_index >= 128 {
            (f64::from(self.rssi_index) - 256.0) / 2.0 - RSSI_OFFSET_DB
        } else {
            f64::from(self.rssi_index) / 2.0 - RSSI_OFFSET_DB
        }
    }
}

impl fmt::Display for ReceivedPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ReceivedPacket(RSSI {}dBm, 0x{})",
            self.rssi_dbm().round(),
            hex::encode(&self.payload)
        )
    }
}

/// Frames a payload for the TX FIFO according to the packet length mode.
///
/// In variable mode the payload must be non-empty and no longer than the
/// configured maximum; its length is prepended as the first FIFO byte,
/// which the emptiness check keeps from ever being zero. In fixed mode the
/// payload must match the configured length exactly and is written
/// verbatim. Infinite mode has no FIFO framing rules and is rejected.
pub fn frame_transmit_payload(
    mode: PacketLengthMode,
    configured_length: u8,
    payload: &[u8],
) -> Result<Vec<u8>, DriverError> {
    match mode {
        PacketLengthMode::Variable => {
            if payload.is_empty() {
                return Err(DriverError::EmptyPayload);
            }
            if payload.len() > usize::from(configured_length) {
                return Err(DriverError::PayloadTooLong {
                    length: payload.len(),
                    maximum: configured_length,
                });
            }
            let mut framed = Vec::with_capacity(payload.len() + 1);
            framed.push(payload.len() as u8);
            framed.extend_from_slice(payload);
            Ok(framed)
        }
        PacketLengthMode::Fixed => {
            if payload.len() != usize::from(configured_length) {
                return Err(DriverError::PayloadLengthMismatch {
                    expected: configured_length,
                    actual: payload.len(),
                });
            }
            Ok(payload.to_vec())
        }
        PacketLengthMode::Infinite => Err(DriverError::UnsupportedLengthMode(mode)),
    }
}

/// Splits an RX FIFO read into payload and the two-byte status trailer.
/// The buffer must hold at least the trailer.
pub fn split_rx_record(mut buffer: Vec<u8>) -> ReceivedPacket {
    debug_assert!(buffer.len() >= 2);
    let trailer = buffer.split_off(buffer.len() - 2);
    ReceivedPacket {
        payload: buffer,
        rssi_index: trailer[0],
        checksum_valid: trailer[1] >> 7 == 1,
        link_quality_indicator: trailer[1] & 0x7F,
    }
}
