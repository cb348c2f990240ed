//! # Hardware Abstraction Layer for the SPI Transport
//!
//! This module defines the HAL trait the driver talks through and provides
//! platform-specific implementations. The trait models a full-duplex SPI
//! link: every byte shifted out clocks one byte back in, which the bus
//! layer relies on for status echo checking.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::SPI_CLOCK_SPEED_HZ;

/// Errors that can occur during HAL operations
#[derive(Debug, Error)]
pub enum HalError {
    #[error("SPI transfer failed: {0}")]
    Spi(String),

    #[error("failed to open SPI transport: {0}")]
    Open(String),

    #[error("SPI transport is not open")]
    NotOpen,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// SPI transport configuration.
///
/// Bus and slave select follow the platform's numbering. The default clock
/// speed is deliberately slow; the transceiver tolerates much faster clocks
/// but long jumper wires on a breadboard do not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpiConfig {
    /// SPI bus number
    pub bus: u8,
    /// Chip select line on that bus
    pub slave_select: u8,
    /// Clock frequency in Hz
    pub clock_speed_hz: u32,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            bus: 0,
            slave_select: 0,
            clock_speed_hz: SPI_CLOCK_SPEED_HZ,
        }
    }
}

/// Hardware Abstraction Layer trait for the SPI link to the transceiver
pub trait Hal {
    /// Acquire the underlying transport
    fn open(&mut self) -> Result<(), HalError>;

    /// Release the underlying transport; safe to call more than once
    fn close(&mut self) -> Result<(), HalError>;

    /// Reconfigure the SPI clock frequency
    fn set_clock_speed(&mut self, speed_hz: u32) -> Result<(), HalError>;

    /// Full-duplex transfer: shift out `write` and return the bytes clocked
    /// back in, one per byte written
    fn transfer(&mut self, write: &[u8]) -> Result<Vec<u8>, HalError>;
}

// Scripted in-memory transport for tests and examples
pub mod mock;

// Platform implementations
#[cfg(feature = "raspberry-pi")]
pub mod raspberry_pi;

pub use mock::MockHal;

#[cfg(feature = "raspberry-pi")]
pub use raspberry_pi::RaspberryPiHal;
