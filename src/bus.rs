//! # SPI Bus Transaction Layer
//!
//! Typed register transactions on top of the raw HAL transfer. Every
//! transaction is framed as a header byte (6-bit address plus the two
//! access-mode bits) followed by data bytes, and every byte shifted out
//! clocks a byte of chip status back in. This layer validates the
//! transaction shape: response length must match the request, and write
//! transactions must echo the leading status byte for every data byte.
//!
//! Addresses 0x30 to 0x3D are shared between command strobes and the read
//! only status registers; the burst bit picks the register meaning, so
//! status reads always go out with that bit set.

use crate::error::DriverError;
use crate::hal::Hal;
use crate::registers::{
    Config, Status, Strobe, FIFO_ADDRESS, READ_BURST, READ_SINGLE_BYTE, WRITE_BURST,
    WRITE_SINGLE_BYTE,
};
use crate::status::ChipStatus;

/// Register-level SPI transaction engine.
///
/// Owns the transport for the lifetime of a session. An optional observer
/// receives the chip status byte of every transaction, letting callers
/// watch FIFO fill levels or mode transitions without parsing log output.
pub struct SpiBus<H: Hal> {
    hal: H,
    status_observer: Option<Box<dyn FnMut(ChipStatus) + Send>>,
}

impl<H: Hal> SpiBus<H> {
    pub fn new(hal: H) -> Self {
        Self {
            hal,
            status_observer: None,
        }
    }

    /// Install a callback invoked with the chip status byte of every
    /// transaction, replacing any previous observer
    pub fn set_status_observer(&mut self, observer: impl FnMut(ChipStatus) + Send + 'static) {
        self.status_observer = Some(Box::new(observer));
    }

    pub fn clear_status_observer(&mut self) {
        self.status_observer = None;
    }

    pub fn open(&mut self) -> Result<(), DriverError> {
        self.hal.open()?;
        Ok(())
    }

    pub fn close(&mut self) -> Result<(), DriverError> {
        self.hal.close()?;
        Ok(())
    }

    pub fn set_clock_speed(&mut self, speed_hz: u32) -> Result<(), DriverError> {
        self.hal.set_clock_speed(speed_hz)?;
        Ok(())
    }

    fn transfer(&mut self, frame: &[u8]) -> Result<Vec<u8>, DriverError> {
        let response = self.hal.transfer(frame)?;
        if response.len() != frame.len() {
            return Err(DriverError::ResponseLengthMismatch {
                sent: frame.len(),
                received: response.len(),
            });
        }
        log::debug!(
            "SPI transfer 0x{} -> 0x{}",
            hex::encode(frame),
            hex::encode(&response)
        );
        if let Some(observer) = self.status_observer.as_mut() {
            observer(ChipStatus(response[0]));
        }
        Ok(response)
    }

    /// Write transfer with echo validation: the chip repeats its status
    /// byte for every data byte it accepts
    fn checked_write(&mut self, frame: &[u8]) -> Result<ChipStatus, DriverError> {
        let response = self.transfer(frame)?;
        let status = response[0];
        for (offset, echoed) in response.iter().enumerate().skip(1) {
            if *echoed != status {
                return Err(DriverError::StatusEchoMismatch {
                    register: frame[0],
                    offset,
                    status,
                    echoed: *echoed,
                });
            }
        }
        Ok(ChipStatus(status))
    }

    /// Read one configuration register
    pub fn read_single(&mut self, register: Config) -> Result<u8, DriverError> {
        let frame = [register.addr() | READ_SINGLE_BYTE, 0];
        let response = self.transfer(&frame)?;
        Ok(response[1])
    }

    /// Read `count` configuration registers starting at `start`, the
    /// address auto-incrementing on chip
    pub fn read_burst(&mut self, start: Config, count: usize) -> Result<Vec<u8>, DriverError> {
        let mut frame = vec![0u8; count + 1];
        frame[0] = start.addr() | READ_BURST;
        let mut response = self.transfer(&frame)?;
        Ok(response.split_off(1))
    }

    /// Read one status register. The burst bit selects the status space
    /// over the strobe sharing its address; burst access does not exist
    /// for these registers.
    pub fn read_status_register(&mut self, register: Status) -> Result<u8, DriverError> {
        let frame = [register.addr() | READ_BURST, 0];
        let response = self.transfer(&frame)?;
        Ok(response[1])
    }

    /// Issue a command strobe, a single header byte with no data phase
    pub fn command_strobe(&mut self, strobe: Strobe) -> Result<ChipStatus, DriverError> {
        let frame = [strobe.addr() | WRITE_SINGLE_BYTE];
        let response = self.transfer(&frame)?;
        Ok(ChipStatus(response[0]))
    }

    /// Write one configuration register
    pub fn write_single(&mut self, register: Config, value: u8) -> Result<(), DriverError> {
        let frame = [register.addr() | WRITE_SINGLE_BYTE, value];
        self.checked_write(&frame)?;
        Ok(())
    }

    /// Write consecutive configuration registers starting at `start`
    pub fn write_burst(&mut self, start: Config, values: &[u8]) -> Result<(), DriverError> {
        let mut frame = Vec::with_capacity(values.len() + 1);
        frame.push(start.addr() | WRITE_BURST);
        frame.extend_from_slice(values);
        self.checked_write(&frame)?;
        Ok(())
    }

    /// Read `count` bytes out of the RX FIFO
    pub fn read_rx_fifo(&mut self, count: usize) -> Result<Vec<u8>, DriverError> {
        let mut frame = vec![0u8; count + 1];
        frame[0] = FIFO_ADDRESS | READ_BURST;
        let mut response = self.transfer(&frame)?;
        Ok(response.split_off(1))
    }

    /// Write a framed packet into the TX FIFO
    pub fn write_tx_fifo(&mut self, values: &[u8]) -> Result<(), DriverError> {
        let mut frame = Vec::with_capacity(values.len() + 1);
        frame.push(FIFO_ADDRESS | WRITE_BURST);
        frame.extend_from_slice(values);
        self.checked_write(&frame)?;
        Ok(())
    }
}
