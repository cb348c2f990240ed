//! # CC1101 Register Definitions and Constants
//!
//! This module contains the register addresses, command strobes, access-mode
//! flags and bit field definitions for the TI CC1101 transceiver. These
//! definitions are based on the CC1101 datasheet (SWRS061I).
//!
//! ## Address Spaces
//!
//! The SPI address byte selects one of four disjoint spaces:
//! - 0x00-0x2E: Configuration registers (read/write, burst-capable)
//! - 0x30-0x3D with the burst bit set: Status registers (read-only)
//! - 0x30-0x3D without the burst bit: Command strobes (address-only)
//! - 0x3F: FIFO access (TX FIFO on writes, RX FIFO on reads, burst-capable)
//!
//! Each space gets its own type below so they cannot be conflated at a call
//! site: status registers cannot be burst-read, strobes carry no data byte,
//! and the FIFO cannot be strobed.

use crate::error::DriverError;

// =============================================================================
// Access-Mode Header Flags
// =============================================================================

/// Header flag for a single-byte register write
pub const WRITE_SINGLE_BYTE: u8 = 0x00;

/// Header flag for a burst register write
pub const WRITE_BURST: u8 = 0x40;

/// Header flag for a single-byte register read
pub const READ_SINGLE_BYTE: u8 = 0x80;

/// Header flag for a burst register read
pub const READ_BURST: u8 = 0xC0;

/// FIFO access address: TX FIFO on writes, RX FIFO on reads
pub const FIFO_ADDRESS: u8 = 0x3F;

// =============================================================================
// Configuration Registers (0x00-0x2E)
// =============================================================================

/// Configuration register addresses (datasheet table 43).
///
/// Readable and writable, single or burst access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Config {
    /// GDO2 output pin configuration
    Iocfg2 = 0x00,
    /// GDO1 output pin configuration
    Iocfg1 = 0x01,
    /// GDO0 output pin configuration
    Iocfg0 = 0x02,
    /// RX FIFO and TX FIFO thresholds
    Fifothr = 0x03,
    /// Sync word, high byte
    Sync1 = 0x04,
    /// Sync word, low byte
    Sync0 = 0x05,
    /// Packet length
    Pktlen = 0x06,
    /// Packet automation control
    Pktctrl1 = 0x07,
    /// Packet automation control
    Pktctrl0 = 0x08,
    /// Device address
    Addr = 0x09,
    /// Channel number
    Channr = 0x0A,
    /// Frequency synthesizer control
    Fsctrl1 = 0x0B,
    /// Frequency synthesizer control
    Fsctrl0 = 0x0C,
    /// Frequency control word, high byte
    Freq2 = 0x0D,
    /// Frequency control word, middle byte
    Freq1 = 0x0E,
    /// Frequency control word, low byte
    Freq0 = 0x0F,
    /// Modem configuration (channel bandwidth, symbol rate exponent)
    Mdmcfg4 = 0x10,
    /// Modem configuration (symbol rate mantissa)
    Mdmcfg3 = 0x11,
    /// Modem configuration (modulation, Manchester, sync mode)
    Mdmcfg2 = 0x12,
    /// Modem configuration (FEC, preamble, channel spacing exponent)
    Mdmcfg1 = 0x13,
    /// Modem configuration (channel spacing mantissa)
    Mdmcfg0 = 0x14,
    /// Modem deviation setting
    Deviatn = 0x15,
    /// Main radio control state machine configuration
    Mcsm2 = 0x16,
    /// Main radio control state machine configuration
    Mcsm1 = 0x17,
    /// Main radio control state machine configuration
    Mcsm0 = 0x18,
    /// Frequency offset compensation configuration
    Foccfg = 0x19,
    /// Bit synchronization configuration
    Bscfg = 0x1A,
    /// AGC control
    Agcctrl2 = 0x1B,
    /// AGC control
    Agcctrl1 = 0x1C,
    /// AGC control
    Agcctrl0 = 0x1D,
    /// Event 0 timeout, high byte
    Worevt1 = 0x1E,
    /// Event 0 timeout, low byte
    Worevt0 = 0x1F,
    /// Wake on radio control
    Worctrl = 0x20,
    /// Front end RX configuration
    Frend1 = 0x21,
    /// Front end TX configuration (power amplifier index)
    Frend0 = 0x22,
    /// Frequency synthesizer calibration
    Fscal3 = 0x23,
    /// Frequency synthesizer calibration
    Fscal2 = 0x24,
    /// Frequency synthesizer calibration
    Fscal1 = 0x25,
    /// Frequency synthesizer calibration
    Fscal0 = 0x26,
    /// RC oscillator configuration
    Rcctrl1 = 0x27,
    /// RC oscillator configuration
    Rcctrl0 = 0x28,
    /// Frequency synthesizer calibration control
    Fstest = 0x29,
    /// Production test
    Ptest = 0x2A,
    /// AGC test
    Agctest = 0x2B,
    /// Various test settings
    Test2 = 0x2C,
    /// Various test settings
    Test1 = 0x2D,
    /// Various test settings
    Test0 = 0x2E,
}

impl Config {
    /// All configuration registers in address order, for whole-space dumps.
    pub const ALL: [Config; 47] = [
        Config::Iocfg2,
        Config::Iocfg1,
        Config::Iocfg0,
        Config::Fifothr,
        Config::Sync1,
        Config::Sync0,
        Config::Pktlen,
        Config::Pktctrl1,
        Config::Pktctrl0,
        Config::Addr,
        Config::Channr,
        Config::Fsctrl1,
        Config::Fsctrl0,
        Config::Freq2,
        Config::Freq1,
        Config::Freq0,
        Config::Mdmcfg4,
        Config::Mdmcfg3,
        Config::Mdmcfg2,
        Config::Mdmcfg1,
        Config::Mdmcfg0,
        Config::Deviatn,
        Config::Mcsm2,
        Config::Mcsm1,
        Config::Mcsm0,
        Config::Foccfg,
        Config::Bscfg,
        Config::Agcctrl2,
        Config::Agcctrl1,
        Config::Agcctrl0,
        Config::Worevt1,
        Config::Worevt0,
        Config::Worctrl,
        Config::Frend1,
        Config::Frend0,
        Config::Fscal3,
        Config::Fscal2,
        Config::Fscal1,
        Config::Fscal0,
        Config::Rcctrl1,
        Config::Rcctrl0,
        Config::Fstest,
        Config::Ptest,
        Config::Agctest,
        Config::Test2,
        Config::Test1,
        Config::Test0,
    ];

    /// Returns the register address.
    pub fn addr(self) -> u8 {
        self as u8
    }
}

// =============================================================================
// Status Registers (0x30-0x3D, read with the burst bit set)
// =============================================================================

/// Status register addresses (datasheet table 44).
///
/// Status registers share their numeric range with the command strobes; the
/// hardware disambiguates them by requiring the burst bit in the header even
/// though only a single byte is read. Consecutive burst reads are not
/// available for these addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    /// Chip part number
    Partnum = 0x30,
    /// Chip version number
    Version = 0x31,
    /// Frequency offset estimate
    Freqest = 0x32,
    /// Demodulator estimate for link quality
    Lqi = 0x33,
    /// Received signal strength indication
    Rssi = 0x34,
    /// Main radio control state machine state
    Marcstate = 0x35,
    /// WOR timer, high byte
    Wortime1 = 0x36,
    /// WOR timer, low byte
    Wortime0 = 0x37,
    /// Current GDOx status and packet status
    Pktstatus = 0x38,
    /// Current setting from the PLL calibration module
    VcoVcDac = 0x39,
    /// Underflow flag and number of bytes in the TX FIFO
    Txbytes = 0x3A,
    /// Overflow flag and number of bytes in the RX FIFO
    Rxbytes = 0x3B,
    /// Last RC oscillator calibration result, high bits
    Rcctrl1Status = 0x3C,
    /// Last RC oscillator calibration result, low bits
    Rcctrl0Status = 0x3D,
}

impl Status {
    /// Returns the register address (without the burst bit).
    pub fn addr(self) -> u8 {
        self as u8
    }
}

// =============================================================================
// Command Strobes (0x30-0x3D, address-only)
// =============================================================================

/// Command strobe addresses (datasheet table 42).
///
/// A strobe is a single header byte with no data byte; it triggers a state
/// transition in the main radio control state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Strobe {
    /// Reset chip
    Sres = 0x30,
    /// Enable and calibrate the frequency synthesizer
    Sfstxon = 0x31,
    /// Turn off the crystal oscillator
    Sxoff = 0x32,
    /// Calibrate the frequency synthesizer and turn it off
    Scal = 0x33,
    /// Enable RX
    Srx = 0x34,
    /// Enable TX (in IDLE, with calibration first if configured)
    Stx = 0x35,
    /// Exit RX/TX, turn off the frequency synthesizer
    Sidle = 0x36,
    /// Start automatic wake-on-radio polling
    Swor = 0x38,
    /// Enter power-down mode when CSn goes high
    Spwd = 0x39,
    /// Flush the RX FIFO (only in IDLE or RXFIFO_OVERFLOW states)
    Sfrx = 0x3A,
    /// Flush the TX FIFO (only in IDLE or TXFIFO_UNDERFLOW states)
    Sftx = 0x3B,
    /// Reset the real-time clock to Event1
    Sworrst = 0x3C,
    /// No operation; returns the chip status byte
    Snop = 0x3D,
}

impl Strobe {
    /// Returns the strobe address.
    pub fn addr(self) -> u8 {
        self as u8
    }
}

// =============================================================================
// Configuration Register Bitfields
// =============================================================================

/// Location of a named bitfield within a configuration register.
///
/// Several logically independent settings share single register bytes, so
/// every field mutation goes through one read-merge-write routine driven by
/// these descriptors instead of masks scattered across call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegField {
    /// Register owning the field
    pub register: Config,
    /// Mask selecting the field's bits within the register byte
    pub mask: u8,
    /// Right shift aligning the field to bit 0
    pub shift: u8,
    /// Datasheet name, used in error and log context
    pub name: &'static str,
}

impl RegField {
    const fn new(register: Config, mask: u8, shift: u8, name: &'static str) -> Self {
        RegField {
            register,
            mask,
            shift,
            name,
        }
    }

    /// Largest value the field can hold.
    pub const fn max_value(self) -> u8 {
        self.mask >> self.shift
    }

    /// Fails unless `value` fits the field width.
    pub fn check(self, value: u8) -> Result<(), DriverError> {
        if value > self.max_value() {
            return Err(DriverError::FieldValueOutOfRange {
                field: self.name,
                value,
                max: self.max_value(),
            });
        }
        Ok(())
    }

    /// Extracts the field from a register byte.
    pub fn extract(self, byte: u8) -> u8 {
        (byte & self.mask) >> self.shift
    }

    /// Returns `byte` with the field replaced by `value`, all other bits
    /// preserved. `value` must already have been checked against the field
    /// width.
    pub fn merge(self, byte: u8, value: u8) -> u8 {
        (byte & !self.mask) | ((value << self.shift) & self.mask)
    }
}

/// Modulation format, MDMCFG2 bits 6:4
pub const MOD_FORMAT: RegField = RegField::new(Config::Mdmcfg2, 0b0111_0000, 4, "MDMCFG2.MOD_FORMAT");

/// Manchester encoding enable, MDMCFG2 bit 3
pub const MANCHESTER_EN: RegField =
    RegField::new(Config::Mdmcfg2, 0b0000_1000, 3, "MDMCFG2.MANCHESTER_EN");

/// Sync word qualifier mode, MDMCFG2 bits 1:0
pub const SYNC_MODE: RegField = RegField::new(Config::Mdmcfg2, 0b0000_0011, 0, "MDMCFG2.SYNC_MODE");

/// Minimum number of preamble bytes, MDMCFG1 bits 6:4
pub const NUM_PREAMBLE: RegField =
    RegField::new(Config::Mdmcfg1, 0b0111_0000, 4, "MDMCFG1.NUM_PREAMBLE");

/// Channel filter bandwidth exponent, MDMCFG4 bits 7:6
pub const CHANBW_E: RegField = RegField::new(Config::Mdmcfg4, 0b1100_0000, 6, "MDMCFG4.CHANBW_E");

/// Channel filter bandwidth mantissa, MDMCFG4 bits 5:4
pub const CHANBW_M: RegField = RegField::new(Config::Mdmcfg4, 0b0011_0000, 4, "MDMCFG4.CHANBW_M");

/// Symbol rate exponent, MDMCFG4 bits 3:0
pub const DRATE_E: RegField = RegField::new(Config::Mdmcfg4, 0b0000_1111, 0, "MDMCFG4.DRATE_E");

/// Symbol rate mantissa, the whole of MDMCFG3
pub const DRATE_M: RegField = RegField::new(Config::Mdmcfg3, 0b1111_1111, 0, "MDMCFG3.DRATE_M");

/// Data whitening enable, PKTCTRL0 bit 6
pub const WHITE_DATA: RegField = RegField::new(Config::Pktctrl0, 0b0100_0000, 6, "PKTCTRL0.WHITE_DATA");

/// Packet format (transceive mode), PKTCTRL0 bits 5:4
pub const PKT_FORMAT: RegField = RegField::new(Config::Pktctrl0, 0b0011_0000, 4, "PKTCTRL0.PKT_FORMAT");

/// CRC calculation and check enable, PKTCTRL0 bit 2
pub const CRC_EN: RegField = RegField::new(Config::Pktctrl0, 0b0000_0100, 2, "PKTCTRL0.CRC_EN");

/// Packet length configuration, PKTCTRL0 bits 1:0
pub const LENGTH_CONFIG: RegField =
    RegField::new(Config::Pktctrl0, 0b0000_0011, 0, "PKTCTRL0.LENGTH_CONFIG");

/// Power amplifier table index, FREND0 bits 2:0
pub const PA_POWER: RegField = RegField::new(Config::Frend0, 0b0000_0111, 0, "FREND0.PA_POWER");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_spaces_are_disjoint() {
        for config in Config::ALL {
            assert!(config.addr() <= 0x2E);
        }
        assert!(Status::Partnum.addr() >= 0x30 && Status::Rcctrl0Status.addr() <= 0x3D);
        assert!(Strobe::Sres.addr() >= 0x30 && Strobe::Snop.addr() <= 0x3D);
        assert_eq!(FIFO_ADDRESS, 0x3F);
    }

    #[test]
    fn config_all_is_in_address_order() {
        for (index, register) in Config::ALL.iter().enumerate() {
            assert_eq!(register.addr() as usize, index);
        }
    }

    #[test]
    fn field_extract_and_merge_preserve_unrelated_bits() {
        let byte = 0b1010_1101;
        assert_eq!(MOD_FORMAT.extract(byte), 0b010);
        let merged = MOD_FORMAT.merge(byte, 0b011);
        assert_eq!(merged, 0b1011_1101);
        assert_eq!(merged & !MOD_FORMAT.mask, byte & !MOD_FORMAT.mask);
    }

    #[test]
    fn field_check_rejects_values_wider_than_the_field() {
        assert!(PA_POWER.check(0b111).is_ok());
        assert!(PA_POWER.check(0b1000).is_err());
        assert_eq!(DRATE_E.max_value(), 0x0F);
        assert!(DRATE_E.check(16).is_err());
    }
}
