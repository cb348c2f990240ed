//! # Chip Status Decoding
//!
//! The CC1101 answers every SPI byte with a status byte on MISO. This module
//! decodes that byte and the MARCSTATE status register, which is the
//! authoritative view of the main radio control state machine.

use crate::error::DriverError;

/// Chip status byte returned on every SPI transaction (datasheet table 23).
///
/// Decoded per transaction for diagnostics only; the driver never branches
/// on it. State decisions go through [`MarcState`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipStatus(pub u8);

impl ChipStatus {
    /// CHIP_RDYn flag, bit 7. Should always read low during SPI traffic;
    /// high means the crystal has not stabilized yet.
    pub fn ready(self) -> bool {
        self.0 & 0x80 == 0
    }

    /// Coarse device state, bits 6:4.
    pub fn state(self) -> ChipState {
        ChipState::from_bits((self.0 >> 4) & 0b111)
    }

    /// FIFO byte count, bits 3:0, saturated at 15. Counts bytes available
    /// in the RX FIFO when the transaction was a read, bytes free in the
    /// TX FIFO when it was a write.
    pub fn fifo_bytes_available(self) -> u8 {
        self.0 & 0x0F
    }
}

/// Coarse device state reported in the chip status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipState {
    /// Idle
    Idle,
    /// Receive mode
    Rx,
    /// Transmit mode
    Tx,
    /// Frequency synthesizer on, ready to transmit
    Fstxon,
    /// Frequency synthesizer calibration running
    Calibrate,
    /// PLL settling
    Settling,
    /// RX FIFO overflowed, flush with SFRX
    RxFifoOverflow,
    /// TX FIFO underflowed, flush with SFTX
    TxFifoUnderflow,
}

impl ChipState {
    fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0b000 => ChipState::Idle,
            0b001 => ChipState::Rx,
            0b010 => ChipState::Tx,
            0b011 => ChipState::Fstxon,
            0b100 => ChipState::Calibrate,
            0b101 => ChipState::Settling,
            0b110 => ChipState::RxFifoOverflow,
            _ => ChipState::TxFifoUnderflow,
        }
    }
}

/// Main radio control state machine states read from the MARCSTATE status
/// register (datasheet table 32).
///
/// The state machine itself lives on the chip; the driver only queries it
/// and gates operations on expected states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MarcState {
    /// Sleep
    Sleep = 0x00,
    /// Idle
    Idle = 0x01,
    /// Crystal oscillator off
    Xoff = 0x02,
    /// VCO voltage regulator power-up
    VcoonMc = 0x03,
    /// Regulator power-up
    RegonMc = 0x04,
    /// Manual calibration
    Mancal = 0x05,
    /// VCO power-up
    Vcoon = 0x06,
    /// Regulator on
    Regon = 0x07,
    /// Calibration started
    Startcal = 0x08,
    /// Bandwidth boost during settling
    Bwboost = 0x09,
    /// Frequency synthesizer lock
    FsLock = 0x0A,
    /// IF ADC power-up
    Ifadcon = 0x0B,
    /// Calibration ending
    Endcal = 0x0C,
    /// Receive mode
    Rx = 0x0D,
    /// Receive ending
    RxEnd = 0x0E,
    /// Receive restart
    RxRst = 0x0F,
    /// Switching from RX to TX
    TxrxSwitch = 0x10,
    /// RX FIFO overflowed
    RxfifoOverflow = 0x11,
    /// Frequency synthesizer on, ready to transmit
    Fstxon = 0x12,
    /// Transmit mode
    Tx = 0x13,
    /// Transmission ending
    TxEnd = 0x14,
    /// Switching from TX to RX
    RxtxSwitch = 0x15,
    /// TX FIFO underflowed
    TxfifoUnderflow = 0x16,
}

impl TryFrom<u8> for MarcState {
    type Error = DriverError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0x00 => MarcState::Sleep,
            0x01 => MarcState::Idle,
            0x02 => MarcState::Xoff,
            0x03 => MarcState::VcoonMc,
            0x04 => MarcState::RegonMc,
            0x05 => MarcState::Mancal,
            0x06 => MarcState::Vcoon,
            0x07 => MarcState::Regon,
            0x08 => MarcState::Startcal,
            0x09 => MarcState::Bwboost,
            0x0A => MarcState::FsLock,
            0x0B => MarcState::Ifadcon,
            0x0C => MarcState::Endcal,
            0x0D => MarcState::Rx,
            0x0E => MarcState::RxEnd,
            0x0F => MarcState::RxRst,
            0x10 => MarcState::TxrxSwitch,
            0x11 => MarcState::RxfifoOverflow,
            0x12 => MarcState::Fstxon,
            0x13 => MarcState::Tx,
            0x14 => MarcState::TxEnd,
            0x15 => MarcState::RxtxSwitch,
            0x16 => MarcState::TxfifoUnderflow,
            other => return Err(DriverError::UnknownMarcState(other)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_byte_fields() {
        let status = ChipStatus(0b0001_1111);
        assert!(status.ready());
        assert_eq!(status.state(), ChipState::Rx);
        assert_eq!(status.fifo_bytes_available(), 15);

        let not_ready = ChipStatus(0b1000_0000);
        assert!(!not_ready.ready());
        assert_eq!(not_ready.state(), ChipState::Idle);
        assert_eq!(not_ready.fifo_bytes_available(), 0);
    }

    #[test]
    fn status_byte_covers_all_coarse_states() {
        let expected = [
            ChipState::Idle,
            ChipState::Rx,
            ChipState::Tx,
            ChipState::Fstxon,
            ChipState::Calibrate,
            ChipState::Settling,
            ChipState::RxFifoOverflow,
            ChipState::TxFifoUnderflow,
        ];
        for (bits, state) in expected.iter().enumerate() {
            assert_eq!(ChipStatus((bits as u8) << 4).state(), *state);
        }
    }

    #[test]
    fn marc_state_decodes_documented_values() {
        assert_eq!(MarcState::try_from(0x01).unwrap(), MarcState::Idle);
        assert_eq!(MarcState::try_from(0x0D).unwrap(), MarcState::Rx);
        assert_eq!(MarcState::try_from(0x11).unwrap(), MarcState::RxfifoOverflow);
        assert_eq!(MarcState::try_from(0x13).unwrap(), MarcState::Tx);
        assert_eq!(MarcState::try_from(0x16).unwrap(), MarcState::TxfifoUnderflow);
    }

    #[test]
    fn marc_state_rejects_undocumented_values() {
        for value in 0x17..=0xFF {
            assert!(matches!(
                MarcState::try_from(value),
                Err(DriverError::UnknownMarcState(v)) if v == value
            ));
        }
    }
}
