//! # Radio Option Enumerations
//!
//! Closed enumerations for the CC1101 configuration bitfields that hold
//! discrete choices rather than numeric quantities. Each maps exactly onto
//! its register field bit pattern; patterns the datasheet marks reserved are
//! rejected on decode instead of panicking.

use crate::error::DriverError;

/// Modulation format, MDMCFG2 bits 6:4 (datasheet section 16).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ModulationFormat {
    /// Binary frequency shift keying
    Fsk2 = 0b000,
    /// Gaussian-shaped binary frequency shift keying
    Gfsk = 0b001,
    /// Amplitude shift keying / on-off keying
    AskOok = 0b011,
    /// Quaternary frequency shift keying
    Fsk4 = 0b100,
    /// Minimum shift keying
    Msk = 0b111,
}

impl ModulationFormat {
    /// Returns the register field bit pattern.
    pub fn bits(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for ModulationFormat {
    type Error = DriverError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Ok(match bits {
            0b000 => ModulationFormat::Fsk2,
            0b001 => ModulationFormat::Gfsk,
            0b011 => ModulationFormat::AskOok,
            0b100 => ModulationFormat::Fsk4,
            0b111 => ModulationFormat::Msk,
            other => return Err(DriverError::UnknownModulationFormat(other)),
        })
    }
}

/// Sync word qualifier mode, MDMCFG2 bits 1:0 (datasheet section 17.1).
///
/// Selects how many bits of the transmitted sync word a receiver must match
/// before accepting a packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SyncMode {
    /// No preamble and no sync word
    Disabled = 0b00,
    /// Transmit 16 sync bits, accept when 15 of 16 match
    Match15Of16 = 0b01,
    /// Transmit 16 sync bits, accept when all 16 match
    Match16Of16 = 0b10,
    /// Transmit the sync word twice (32 bits), accept when 30 of 32 match
    Match30Of32 = 0b11,
}

impl SyncMode {
    /// Returns the register field bit pattern.
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Decodes the two-bit field; all patterns are defined.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => SyncMode::Disabled,
            0b01 => SyncMode::Match15Of16,
            0b10 => SyncMode::Match16Of16,
            _ => SyncMode::Match30Of32,
        }
    }
}

/// Packet format, PKTCTRL0 bits 5:4 (datasheet section 27.1).
///
/// FIFO mode is the driver's normal operating mode; asynchronous serial
/// hands modulation over to the GDO pins for bit-level control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TransceiveMode {
    /// Normal mode using the TX and RX FIFOs
    Fifo = 0b00,
    /// Synchronous serial mode, data on GDO0
    SynchronousSerial = 0b01,
    /// Random TX mode, transmits pseudo-random data
    RandomTransmission = 0b10,
    /// Asynchronous serial mode, TX data on GDO0
    AsynchronousSerial = 0b11,
}

impl TransceiveMode {
    /// Returns the register field bit pattern.
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Decodes the two-bit field; all patterns are defined.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => TransceiveMode::Fifo,
            0b01 => TransceiveMode::SynchronousSerial,
            0b10 => TransceiveMode::RandomTransmission,
            _ => TransceiveMode::AsynchronousSerial,
        }
    }
}

/// Packet length configuration, PKTCTRL0 bits 1:0 (datasheet section 15.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PacketLengthMode {
    /// Fixed length packets, length set by the PKTLEN register
    Fixed = 0b00,
    /// Variable length packets, length given by the first payload byte
    Variable = 0b01,
    /// Infinite packet length, framing left to the application
    Infinite = 0b10,
}

impl PacketLengthMode {
    /// Returns the register field bit pattern.
    pub fn bits(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for PacketLengthMode {
    type Error = DriverError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Ok(match bits {
            0b00 => PacketLengthMode::Fixed,
            0b01 => PacketLengthMode::Variable,
            0b10 => PacketLengthMode::Infinite,
            other => return Err(DriverError::UnknownPacketLengthMode(other)),
        })
    }
}

/// General purpose I/O pins of the chip.
///
/// During asynchronous transmission GDO0 is the serial data input; the
/// caller toggles the wired GPIO line directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GdoPin {
    /// GDO0, configured via IOCFG0
    Gdo0,
}
