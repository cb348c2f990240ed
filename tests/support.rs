// Shared mock scripting helpers for the driver integration tests.

use cc1101_rs::MockHal;

/// Chip status byte used in scripted responses: ready, idle, 15 FIFO bytes.
pub const STATUS: u8 = 0x0F;

/// Queue the eleven responses of a successful connect sequence: the reset
/// strobe, both identity reads, three read-merge-write baseline settings,
/// the MCSM0 write and the final state probe. Register reads answer with
/// the chip's documented reset values.
pub fn script_connect(hal: &MockHal) {
    hal.queue_response(&[STATUS]); // SRES
    hal.queue_response(&[STATUS, 0x00]); // PARTNUM
    hal.queue_response(&[STATUS, 0x14]); // VERSION
    hal.queue_response(&[STATUS, 0x02]); // MDMCFG2 read
    hal.queue_response(&[STATUS, STATUS]); // MDMCFG2 write echo
    hal.queue_response(&[STATUS, 0x10]); // FREND0 read
    hal.queue_response(&[STATUS, STATUS]); // FREND0 write echo
    hal.queue_response(&[STATUS, 0x45]); // PKTCTRL0 read
    hal.queue_response(&[STATUS, STATUS]); // PKTCTRL0 write echo
    hal.queue_response(&[STATUS, STATUS]); // MCSM0 write echo
    hal.queue_response(&[STATUS, 0x01]); // MARCSTATE read, idle
}
