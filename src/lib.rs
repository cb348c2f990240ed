//! # cc1101-rs - A Rust Crate for the TI CC1101 Sub-GHz Transceiver
//!
//! The cc1101-rs crate provides register-level control of the Texas
//! Instruments CC1101 radio over SPI: session management with chip identity
//! verification, typed access to the configuration, status, strobe and FIFO
//! address spaces, conversion between register encodings and physical
//! quantities, and a FIFO-based packet transceive protocol.
//!
//! ## Features
//!
//! - Exclusive device sessions with reset, identity check and a known
//!   baseline configuration on connect
//! - Typed SPI transactions with response length and status echo validation
//! - Carrier frequency, symbol rate, filter bandwidth and preamble length
//!   expressed in physical units, converted exactly as the chip does
//! - Variable and fixed length packet transmit and receive with appended
//!   RSSI and link quality decoding
//! - Asynchronous transmission guard handing bit-level modulation control
//!   to a GDO pin
//! - Injectable chip status observer for per-transaction diagnostics
//! - Scripted mock transport for hardware-free testing
//! - Raspberry Pi SPI transport behind the `raspberry-pi` feature
//!
//! ## Usage
//!
//! To use the cc1101-rs crate in your Rust project, add the following to
//! your Cargo.toml file:
//!
//! ```toml
//! [dependencies]
//! cc1101-rs = "0.1.0"
//! ```
//!
//! Then, in your Rust code, you can import the necessary modules and
//! functions:
//!
//! ```rust
//! use cc1101_rs::{
//!     Cc1101Driver, ChipIdentity, DriverError, MarcState, ModulationFormat,
//!     PacketLengthMode, ReceivedPacket, SyncMode, init_logger,
//! };
//! ```

pub mod bus;
pub mod constants;
pub mod convert;
pub mod driver;
pub mod error;
pub mod hal;
pub mod logging;
pub mod options;
pub mod packet;
pub mod registers;
pub mod status;

pub use crate::error::DriverError;
pub use crate::logging::{init_logger, log_info};

// Core driver types
pub use driver::{AsyncTransmission, Cc1101Driver, ChipIdentity};
pub use packet::ReceivedPacket;

// Radio configuration options
pub use options::{GdoPin, ModulationFormat, PacketLengthMode, SyncMode, TransceiveMode};

// Chip state reporting
pub use status::{ChipState, ChipStatus, MarcState};

// Transport abstraction
pub use hal::{Hal, HalError, MockHal, SpiConfig};
#[cfg(feature = "raspberry-pi")]
pub use hal::RaspberryPiHal;
