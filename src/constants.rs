//! CC1101 Device Constants
//!
//! This module defines fixed device parameters of the CC1101 transceiver,
//! based on the datasheet (TI SWRS061I).

/// Crystal oscillator frequency of the common CC1101 module layouts (26 MHz)
pub const CRYSTAL_OSCILLATOR_FREQUENCY_HERTZ: f64 = 26_000_000.0;

/// Scale factor between the 24-bit frequency control word and Hertz
/// (f_xosc / 2^16, datasheet section 21)
pub const FREQUENCY_CONTROL_WORD_HERTZ_FACTOR: f64 =
    CRYSTAL_OSCILLATOR_FREQUENCY_HERTZ / 65_536.0;

/// SPI clock rate the chip is driven at, determined empirically
pub const SPI_CLOCK_SPEED_HZ: u32 = 55_700;

/// PARTNUM status register value identifying a CC1101
pub const EXPECTED_PART_NUMBER: u8 = 0x00;

/// VERSION status register value of the supported silicon revision
pub const EXPECTED_VERSION: u8 = 0x14;

/// Offset in dB subtracted when converting the RSSI index to dBm
/// (datasheet section 17.3)
pub const RSSI_OFFSET_DB: f64 = 74.0;

/// Power amplifier table index selected during initialization
pub const DEFAULT_POWER_AMPLIFIER_INDEX: u8 = 1;

/// MCSM0 value written during initialization: calibrate the frequency
/// synthesizer when going from IDLE to RX or TX, default power-on timeout
pub const MCSM0_BASELINE: u8 = 0b010100;
