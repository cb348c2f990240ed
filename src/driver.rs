//! # CC1101 Radio Driver
//!
//! This module provides the high-level driver for the TI CC1101 sub-GHz
//! transceiver. A driver value represents one exclusive session with one
//! chip: construction verifies the silicon identity and applies a known
//! baseline configuration, and dropping the driver releases the transport.
//!
//! ## Architecture
//!
//! The driver follows a layered architecture:
//! ```text
//! ┌─────────────────────────────────┐
//! │        Application Layer        │
//! ├─────────────────────────────────┤
//! │     Cc1101Driver (this file)    │
//! ├─────────────────────────────────┤
//! │   SpiBus transaction framing    │
//! ├─────────────────────────────────┤
//! │    Platform-specific HAL impl   │
//! └─────────────────────────────────┘
//! ```
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use cc1101_rs::hal::MockHal;
//! use cc1101_rs::Cc1101Driver;
//!
//! let hal = MockHal::new();
//! let mut driver = Cc1101Driver::connect(hal)?;
//!
//! driver.set_base_frequency_hertz(433.92e6)?;
//! driver.set_symbol_rate_baud(2_400.0)?;
//! driver.transmit(b"\x01\x02\x03")?;
//! # Ok::<(), cc1101_rs::DriverError>(())
//! ```

use crate::bus::SpiBus;
use crate::constants::{
    DEFAULT_POWER_AMPLIFIER_INDEX, EXPECTED_PART_NUMBER, EXPECTED_VERSION, MCSM0_BASELINE,
    SPI_CLOCK_SPEED_HZ,
};
use crate::convert::{
    filter_bandwidth_floating_point_to_real, frequency_control_word_to_hertz,
    hertz_to_frequency_control_word, preamble_length_bytes_to_index,
    preamble_length_index_to_bytes, symbol_rate_floating_point_to_real,
    symbol_rate_real_to_floating_point,
};
use crate::error::DriverError;
use crate::hal::Hal;
use crate::options::{
    GdoPin, ModulationFormat, PacketLengthMode, SyncMode, TransceiveMode,
};
use crate::packet::{frame_transmit_payload, split_rx_record, ReceivedPacket};
use crate::registers::{
    Config, RegField, Status, Strobe, CHANBW_E, CHANBW_M, CRC_EN, DRATE_E, DRATE_M,
    LENGTH_CONFIG, MANCHESTER_EN, MOD_FORMAT, NUM_PREAMBLE, PA_POWER, PKT_FORMAT, SYNC_MODE,
    WHITE_DATA,
};
use crate::status::{ChipStatus, MarcState};

/// Expected values of the identity status registers.
///
/// The defaults match production CC1101 silicon. Clones and partition
/// variants that report different values can be accepted through
/// [`Cc1101Driver::connect_with_identity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipIdentity {
    /// Expected PARTNUM register value
    pub part_number: u8,
    /// Expected VERSION register value
    pub version: u8,
}

impl Default for ChipIdentity {
    fn default() -> Self {
        Self {
            part_number: EXPECTED_PART_NUMBER,
            version: EXPECTED_VERSION,
        }
    }
}

/// Driver for one CC1101 transceiver session.
///
/// All methods take `&mut self`; the chip has a single state machine and
/// concurrent register access would interleave read-merge-write cycles.
pub struct Cc1101Driver<H: Hal> {
    bus: SpiBus<H>,
    session_open: bool,
}

impl<H: Hal> core::fmt::Debug for Cc1101Driver<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cc1101Driver")
            .field("session_open", &self.session_open)
            .finish_non_exhaustive()
    }
}

impl<H: Hal> Cc1101Driver<H> {
    /// Open a session with the chip behind `hal`.
    ///
    /// Opens the transport, resets the chip, verifies PARTNUM and VERSION,
    /// and applies the baseline configuration: OOK modulation, power
    /// amplifier index 1, data whitening off, and calibration on every
    /// transition out of idle. Fails if the radio control state machine
    /// does not settle in idle afterwards.
    ///
    /// On any failure the transport is closed before the error is
    /// returned, so a failed connect never leaves the chip select held.
    pub fn connect(hal: H) -> Result<Self, DriverError> {
        Self::connect_with_identity(hal, ChipIdentity::default())
    }

    /// Like [`connect`](Self::connect), accepting non-default identity
    /// register values.
    pub fn connect_with_identity(hal: H, identity: ChipIdentity) -> Result<Self, DriverError> {
        let mut bus = SpiBus::new(hal);
        bus.open()?;
        let mut driver = Self {
            bus,
            session_open: true,
        };
        if let Err(error) = driver.start_session(identity) {
            if let Err(close_error) = driver.bus.close() {
                log::warn!("failed to close transport after connect error: {close_error}");
            }
            driver.session_open = false;
            return Err(error);
        }
        Ok(driver)
    }

    fn start_session(&mut self, identity: ChipIdentity) -> Result<(), DriverError> {
        self.bus.set_clock_speed(SPI_CLOCK_SPEED_HZ)?;
        self.bus.command_strobe(Strobe::Sres)?;
        let part_number = self.bus.read_status_register(Status::Partnum)?;
        if part_number != identity.part_number {
            return Err(DriverError::UnexpectedPartNumber {
                actual: part_number,
                expected: identity.part_number,
            });
        }
        let version = self.bus.read_status_register(Status::Version)?;
        if version != identity.version {
            return Err(DriverError::UnexpectedChipVersion {
                actual: version,
                expected: identity.version,
            });
        }
        self.set_modulation_format(ModulationFormat::AskOok)?;
        self.set_power_amplifier_index(DEFAULT_POWER_AMPLIFIER_INDEX)?;
        self.disable_data_whitening()?;
        self.bus.write_single(Config::Mcsm0, MCSM0_BASELINE)?;
        let state = self.marc_state()?;
        if state != MarcState::Idle {
            return Err(DriverError::UnexpectedMarcState {
                actual: state,
                expected: MarcState::Idle,
            });
        }
        log::info!(
            "connected to CC1101 (part number 0x{part_number:02X}, version 0x{version:02X})"
        );
        Ok(())
    }

    /// End the session and release the transport.
    pub fn disconnect(mut self) -> Result<(), DriverError> {
        self.session_open = false;
        self.bus.close()
    }

    /// Install a callback invoked with the chip status byte of every SPI
    /// transaction. Useful for watching FIFO fill levels or catching a
    /// deasserted CHIP_RDYn without scraping log output.
    pub fn set_status_observer(&mut self, observer: impl FnMut(ChipStatus) + Send + 'static) {
        self.bus.set_status_observer(observer);
    }

    /// Remove the status observer installed by
    /// [`set_status_observer`](Self::set_status_observer).
    pub fn clear_status_observer(&mut self) {
        self.bus.clear_status_observer();
    }

    // -------------------------------------------------------------------------
    // Register field plumbing
    // -------------------------------------------------------------------------

    fn read_field(&mut self, field: RegField) -> Result<u8, DriverError> {
        let byte = self.bus.read_single(field.register)?;
        Ok(field.extract(byte))
    }

    /// Read-merge-write of one register field, leaving the register's other
    /// fields untouched. The value is checked against the field width
    /// before the register is read, so an out-of-range value costs no bus
    /// traffic.
    fn write_field(&mut self, field: RegField, value: u8) -> Result<(), DriverError> {
        field.check(value)?;
        let current = self.bus.read_single(field.register)?;
        self.bus
            .write_single(field.register, field.merge(current, value))
    }

    // -------------------------------------------------------------------------
    // State machine
    // -------------------------------------------------------------------------

    /// Current state of the main radio control state machine.
    pub fn marc_state(&mut self) -> Result<MarcState, DriverError> {
        let raw = self.bus.read_status_register(Status::Marcstate)?;
        MarcState::try_from(raw & 0b0001_1111)
    }

    // -------------------------------------------------------------------------
    // Physical quantities
    // -------------------------------------------------------------------------

    /// Carrier frequency in Hz, decoded from the 24-bit frequency control
    /// word.
    pub fn get_base_frequency_hertz(&mut self) -> Result<f64, DriverError> {
        let word = self.bus.read_burst(Config::Freq2, 3)?;
        Ok(frequency_control_word_to_hertz([word[0], word[1], word[2]]))
    }

    /// Program the carrier frequency, rounded to the nearest control word
    /// step of roughly 397 Hz.
    pub fn set_base_frequency_hertz(&mut self, hertz: f64) -> Result<(), DriverError> {
        let word = hertz_to_frequency_control_word(hertz)?;
        self.bus.write_burst(Config::Freq2, &word)
    }

    /// Symbol rate in baud, decoded from the mantissa/exponent pair.
    pub fn get_symbol_rate_baud(&mut self) -> Result<f64, DriverError> {
        let mantissa = self.read_field(DRATE_M)?;
        let exponent = self.read_field(DRATE_E)?;
        Ok(symbol_rate_floating_point_to_real(mantissa, exponent))
    }

    /// Program the symbol rate, rounded to the nearest representable
    /// mantissa/exponent pair.
    pub fn set_symbol_rate_baud(&mut self, baud: f64) -> Result<(), DriverError> {
        let (mantissa, exponent) = symbol_rate_real_to_floating_point(baud)?;
        // An exponent of 16 is mathematically valid but does not fit the
        // 4-bit field; refuse before either register is touched.
        DRATE_E.check(exponent)?;
        self.write_field(DRATE_M, mantissa)?;
        self.write_field(DRATE_E, exponent)
    }

    /// Receive channel filter bandwidth in Hz.
    pub fn get_filter_bandwidth_hertz(&mut self) -> Result<f64, DriverError> {
        let mdmcfg4 = self.bus.read_single(Config::Mdmcfg4)?;
        Ok(filter_bandwidth_floating_point_to_real(
            CHANBW_M.extract(mdmcfg4),
            CHANBW_E.extract(mdmcfg4),
        ))
    }

    /// Minimum number of transmitted preamble bytes.
    pub fn get_preamble_length_bytes(&mut self) -> Result<u32, DriverError> {
        let index = self.read_field(NUM_PREAMBLE)?;
        Ok(u32::from(preamble_length_index_to_bytes(index)))
    }

    /// Program the preamble length. Only the eight datasheet lengths
    /// (2, 3, 4, 6, 8, 12, 16 and 24 bytes) have register encodings.
    pub fn set_preamble_length_bytes(&mut self, length: u32) -> Result<(), DriverError> {
        let index = preamble_length_bytes_to_index(length)?;
        self.write_field(NUM_PREAMBLE, index)
    }

    // -------------------------------------------------------------------------
    // Modem options
    // -------------------------------------------------------------------------

    pub fn get_modulation_format(&mut self) -> Result<ModulationFormat, DriverError> {
        ModulationFormat::try_from(self.read_field(MOD_FORMAT)?)
    }

    pub fn set_modulation_format(&mut self, format: ModulationFormat) -> Result<(), DriverError> {
        self.write_field(MOD_FORMAT, format.bits())
    }

    /// Enable Manchester encoding on both the transmit and receive paths.
    pub fn enable_manchester_code(&mut self) -> Result<(), DriverError> {
        self.write_field(MANCHESTER_EN, 1)
    }

    pub fn get_sync_mode(&mut self) -> Result<SyncMode, DriverError> {
        Ok(SyncMode::from_bits(self.read_field(SYNC_MODE)?))
    }

    pub fn set_sync_mode(&mut self, mode: SyncMode) -> Result<(), DriverError> {
        self.write_field(SYNC_MODE, mode.bits())
    }

    /// The 16-bit sync word, most significant byte first.
    pub fn get_sync_word(&mut self) -> Result<[u8; 2], DriverError> {
        let word = self.bus.read_burst(Config::Sync1, 2)?;
        Ok([word[0], word[1]])
    }

    /// Program the sync word; exactly two bytes, most significant first.
    pub fn set_sync_word(&mut self, sync_word: &[u8]) -> Result<(), DriverError> {
        if sync_word.len() != 2 {
            return Err(DriverError::InvalidSyncWordLength(sync_word.len()));
        }
        self.bus.write_burst(Config::Sync1, sync_word)
    }

    // -------------------------------------------------------------------------
    // Packet control
    // -------------------------------------------------------------------------

    pub fn get_packet_length_mode(&mut self) -> Result<PacketLengthMode, DriverError> {
        PacketLengthMode::try_from(self.read_field(LENGTH_CONFIG)?)
    }

    pub fn set_packet_length_mode(&mut self, mode: PacketLengthMode) -> Result<(), DriverError> {
        self.write_field(LENGTH_CONFIG, mode.bits())
    }

    /// Packet length register: the exact packet size in fixed length mode,
    /// the maximum allowed payload size in variable length mode.
    pub fn get_packet_length_bytes(&mut self) -> Result<u8, DriverError> {
        self.bus.read_single(Config::Pktlen)
    }

    /// Program the packet length register. Zero is not a valid packet
    /// size in either length mode.
    pub fn set_packet_length_bytes(&mut self, length: u8) -> Result<(), DriverError> {
        if length == 0 {
            return Err(DriverError::InvalidPacketLength(length));
        }
        self.bus.write_single(Config::Pktlen, length)
    }

    /// Turn off CRC generation on transmit and CRC checking on receive.
    pub fn disable_checksum(&mut self) -> Result<(), DriverError> {
        self.write_field(CRC_EN, 0)
    }

    fn disable_data_whitening(&mut self) -> Result<(), DriverError> {
        self.write_field(WHITE_DATA, 0)
    }

    fn set_transceive_mode(&mut self, mode: TransceiveMode) -> Result<(), DriverError> {
        self.write_field(PKT_FORMAT, mode.bits())
    }

    /// Index into the power amplifier table used while transmitting.
    pub fn get_power_amplifier_index(&mut self) -> Result<u8, DriverError> {
        self.read_field(PA_POWER)
    }

    /// Select the power amplifier table index (0 to 7). Only the three
    /// index bits of FREND0 are replaced; the LODIV buffer current in the
    /// same register keeps its value.
    pub fn set_power_amplifier_index(&mut self, index: u8) -> Result<(), DriverError> {
        self.write_field(PA_POWER, index)
    }

    // -------------------------------------------------------------------------
    // Transceive
    // -------------------------------------------------------------------------

    /// Frame `payload` for the current packet length mode and transmit it.
    ///
    /// The radio must be idle; transmission from any other state is
    /// refused before the TX FIFO is touched. The FIFO is flushed first,
    /// so a packet left over from an aborted transmission cannot leak
    /// ahead of this one.
    pub fn transmit(&mut self, payload: &[u8]) -> Result<(), DriverError> {
        let mode = self.get_packet_length_mode()?;
        let configured_length = self.get_packet_length_bytes()?;
        let framed = frame_transmit_payload(mode, configured_length, payload)?;
        let state = self.marc_state()?;
        if state != MarcState::Idle {
            return Err(DriverError::NotIdle(state));
        }
        self.bus.command_strobe(Strobe::Sftx)?;
        self.bus.write_tx_fifo(&framed)?;
        log::info!("transmitting 0x{}", hex::encode(&framed));
        self.bus.command_strobe(Strobe::Stx)?;
        Ok(())
    }

    /// Put the radio in receive mode.
    pub fn enable_receive_mode(&mut self) -> Result<(), DriverError> {
        self.bus.command_strobe(Strobe::Srx)?;
        Ok(())
    }

    /// Take one received packet out of the RX FIFO, if a complete one is
    /// waiting.
    ///
    /// A packet is complete once the FIFO holds at least the two appended
    /// status bytes; with fewer bytes than that there is nothing to parse
    /// and `None` is returned.
    pub fn receive(&mut self) -> Result<Option<ReceivedPacket>, DriverError> {
        let count = self.bus.read_status_register(Status::Rxbytes)?;
        if count < 2 {
            return Ok(None);
        }
        let buffer = self.bus.read_rx_fifo(usize::from(count))?;
        let packet = split_rx_record(buffer);
        log::debug!("received {packet}");
        Ok(Some(packet))
    }

    /// Start an asynchronous transmission.
    ///
    /// Switches the chip to asynchronous serial mode and keys the
    /// transmitter; the caller then drives the modulation directly on the
    /// returned guard's GDO pin. Dropping the guard idles the radio and
    /// restores FIFO mode.
    pub fn asynchronous_transmission(
        &mut self,
    ) -> Result<AsyncTransmission<'_, H>, DriverError> {
        self.set_transceive_mode(TransceiveMode::AsynchronousSerial)?;
        self.bus.command_strobe(Strobe::Stx)?;
        Ok(AsyncTransmission { driver: self })
    }

    fn end_asynchronous_transmission(&mut self) -> Result<(), DriverError> {
        self.bus.command_strobe(Strobe::Sidle)?;
        self.set_transceive_mode(TransceiveMode::Fifo)
    }

    // -------------------------------------------------------------------------
    // Diagnostics
    // -------------------------------------------------------------------------

    /// Snapshot of the whole configuration register space in address
    /// order, read in one burst.
    pub fn configuration_registers(&mut self) -> Result<Vec<(Config, u8)>, DriverError> {
        let values = self.bus.read_burst(Config::Iocfg2, Config::ALL.len())?;
        Ok(Config::ALL.iter().copied().zip(values).collect())
    }

    /// One-line summary of the settings that matter when two stations
    /// fail to hear each other.
    pub fn config_summary(&mut self) -> Result<String, DriverError> {
        let marc_state = self.marc_state()?;
        let base_frequency_mhz = self.get_base_frequency_hertz()? / 1e6;
        let symbol_rate_kbaud = self.get_symbol_rate_baud()? / 1000.0;
        let modulation_format = self.get_modulation_format()?;
        let sync_mode = self.get_sync_mode()?;
        let preamble_length = self.get_preamble_length_bytes()?;
        let sync_word = self.get_sync_word()?;
        let length_mode = self.get_packet_length_mode()?;
        let packet_length = self.get_packet_length_bytes()?;
        let power_amplifier_index = self.get_power_amplifier_index()?;
        let length_relation = match length_mode {
            PacketLengthMode::Variable => "<=",
            PacketLengthMode::Fixed | PacketLengthMode::Infinite => "=",
        };
        Ok(format!(
            "CC1101(marcstate={marc_state:?}, base_frequency={base_frequency_mhz:.2}MHz, \
             symbol_rate={symbol_rate_kbaud:.2}kBaud, modulation_format={modulation_format:?}, \
             sync_mode={sync_mode:?}, preamble_length={preamble_length}B, sync_word=0x{}, \
             packet_length{length_relation}{packet_length}B, \
             power_amplifier_index={power_amplifier_index})",
            hex::encode(sync_word)
        ))
    }
}

impl<H: Hal> Drop for Cc1101Driver<H> {
    fn drop(&mut self) {
        if self.session_open {
            if let Err(error) = self.bus.close() {
                log::warn!("failed to close SPI transport: {error}");
            }
        }
    }
}

/// Guard for an in-progress asynchronous transmission.
///
/// While the guard lives, the transmitter is keyed and every level change
/// on the GDO0 pin goes out over the air. Dropping the guard idles the
/// radio and restores normal FIFO operation; a failure doing so is logged,
/// since `Drop` has nowhere to report it.
pub struct AsyncTransmission<'a, H: Hal> {
    driver: &'a mut Cc1101Driver<H>,
}

impl<H: Hal> AsyncTransmission<'_, H> {
    /// The pin carrying the serial transmit data.
    pub fn pin(&self) -> GdoPin {
        GdoPin::Gdo0
    }
}

impl<H: Hal> Drop for AsyncTransmission<'_, H> {
    fn drop(&mut self) {
        if let Err(error) = self.driver.end_asynchronous_transmission() {
            log::warn!("failed to end asynchronous transmission: {error}");
        }
    }
}
