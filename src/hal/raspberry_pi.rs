//! # Raspberry Pi HAL Implementation
//!
//! SPI transport implementation for Raspberry Pi 4 and 5 using the rppal
//! crate. The transceiver talks plain 4-wire SPI, so no GPIO control beyond
//! the hardware chip select is needed.
//!
//! ## Hardware Setup
//!
//! ### SPI0 Pins (recommended)
//! ```text
//! Pi Pin │ BCM GPIO │ CC1101 Pin │ Function
//! ───────┼──────────┼────────────┼─────────────
//! 19     │ GPIO 10  │ SI         │ SPI data out
//! 21     │ GPIO 9   │ SO         │ SPI data in
//! 23     │ GPIO 11  │ SCLK       │ SPI clock
//! 24     │ GPIO 8   │ CSn        │ Chip select
//! ```
//!
//! SPI must be enabled in `/boot/config.txt` (add `dtparam=spi=on`). The
//! module is a 3.3V part; never feed it from the Pi's 5V rail.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use cc1101_rs::hal::raspberry_pi::RaspberryPiHal;
//! use cc1101_rs::hal::SpiConfig;
//! use cc1101_rs::Cc1101Driver;
//!
//! let hal = RaspberryPiHal::new(SpiConfig::default());
//! let mut driver = Cc1101Driver::connect(hal)?;
//! # Ok::<(), cc1101_rs::DriverError>(())
//! ```

use rppal::spi::{Bus, Mode, SlaveSelect, Spi};

use crate::hal::{Hal, HalError, SpiConfig};

/// Raspberry Pi SPI transport for the transceiver.
///
/// The underlying `/dev/spidev` handle is held only between `open` and
/// `close`, so the bus can be shared with other chip selects while the
/// session is down.
pub struct RaspberryPiHal {
    config: SpiConfig,
    spi: Option<Spi>,
    bus_info: String,
}

impl RaspberryPiHal {
    /// Create a transport for the given bus configuration. No hardware is
    /// touched until `open` is called.
    pub fn new(config: SpiConfig) -> Self {
        let bus_info = format!("SPI{} CE{}", config.bus, config.slave_select);
        Self {
            config,
            spi: None,
            bus_info,
        }
    }

    fn select_lines(&self) -> Result<(Bus, SlaveSelect), HalError> {
        let bus = match self.config.bus {
            0 => Bus::Spi0,
            1 => Bus::Spi1,
            other => {
                return Err(HalError::InvalidConfig(format!(
                    "invalid SPI bus {other}, only 0 and 1 are supported"
                )))
            }
        };
        let slave_select = match self.config.slave_select {
            0 => SlaveSelect::Ss0,
            1 => SlaveSelect::Ss1,
            2 => SlaveSelect::Ss2,
            other => {
                return Err(HalError::InvalidConfig(format!(
                    "invalid slave select {other}, only 0 to 2 are supported"
                )))
            }
        };
        Ok((bus, slave_select))
    }
}

impl Hal for RaspberryPiHal {
    fn open(&mut self) -> Result<(), HalError> {
        if self.spi.is_some() {
            return Ok(());
        }
        let (bus, slave_select) = self.select_lines()?;
        // CC1101 samples on the rising edge with an idle-low clock, Mode 0.
        let spi = Spi::new(bus, slave_select, self.config.clock_speed_hz, Mode::Mode0)
            .map_err(|e| HalError::Open(e.to_string()))?;
        log::info!(
            "Raspberry Pi HAL opened: {} at {} Hz",
            self.bus_info,
            self.config.clock_speed_hz
        );
        self.spi = Some(spi);
        Ok(())
    }

    fn close(&mut self) -> Result<(), HalError> {
        if self.spi.take().is_some() {
            log::info!("Raspberry Pi HAL closed: {}", self.bus_info);
        }
        Ok(())
    }

    fn set_clock_speed(&mut self, speed_hz: u32) -> Result<(), HalError> {
        let spi = self.spi.as_mut().ok_or(HalError::NotOpen)?;
        spi.set_clock_speed(speed_hz)
            .map_err(|e| HalError::Spi(e.to_string()))?;
        self.config.clock_speed_hz = speed_hz;
        Ok(())
    }

    fn transfer(&mut self, write: &[u8]) -> Result<Vec<u8>, HalError> {
        let spi = self.spi.as_mut().ok_or(HalError::NotOpen)?;
        let mut response = vec![0u8; write.len()];
        let transferred = spi
            .transfer(&mut response, write)
            .map_err(|e| {
                log::error!("SPI transfer failed on {}: {}", self.bus_info, e);
                HalError::Spi(e.to_string())
            })?;
        response.truncate(transferred);
        Ok(response)
    }
}
