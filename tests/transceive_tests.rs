//! FIFO transceive protocol tests: framing per packet length mode, the
//! idle precondition, RX record splitting and the asynchronous
//! transmission guard.

mod support;

use cc1101_rs::{Cc1101Driver, DriverError, GdoPin, MarcState, MockHal, PacketLengthMode};
use support::{script_connect, STATUS};

fn connected_driver(hal: &MockHal) -> Cc1101Driver<MockHal> {
    script_connect(hal);
    let driver = Cc1101Driver::connect(hal.clone()).unwrap();
    hal.clear();
    driver
}

#[test]
fn variable_length_transmit_prefixes_the_payload_length() {
    let hal = MockHal::new();
    let mut driver = connected_driver(&hal);

    hal.queue_response(&[STATUS, 0x05]); // PKTCTRL0: variable length
    hal.queue_response(&[STATUS, 20]); // PKTLEN: maximum payload
    hal.queue_response(&[STATUS, 0x01]); // MARCSTATE: idle
    hal.queue_response(&[STATUS]); // SFTX
    hal.queue_response(&[STATUS; 12]); // FIFO write echo
    hal.queue_response(&[STATUS]); // STX

    driver.transmit(&[0x2A; 10]).unwrap();

    let transfers = hal.transfers();
    assert_eq!(transfers.len(), 6);
    assert_eq!(transfers[2], vec![0xF5, 0x00]); // idle check before the FIFO
    assert_eq!(transfers[3], vec![0x3B]); // flush TX FIFO
    let mut expected_fifo = vec![0x7F, 10];
    expected_fifo.extend_from_slice(&[0x2A; 10]);
    assert_eq!(transfers[4], expected_fifo);
    assert_eq!(transfers[5], vec![0x35]); // STX
}

#[test]
fn variable_length_transmit_rejects_empty_and_oversized_payloads() {
    let hal = MockHal::new();
    let mut driver = connected_driver(&hal);

    hal.queue_response(&[STATUS, 0x05]);
    hal.queue_response(&[STATUS, 20]);
    let err = driver.transmit(&[]).unwrap_err();
    assert!(matches!(err, DriverError::EmptyPayload));

    hal.queue_response(&[STATUS, 0x05]);
    hal.queue_response(&[STATUS, 20]);
    let err = driver.transmit(&[0u8; 21]).unwrap_err();
    assert!(matches!(
        err,
        DriverError::PayloadTooLong {
            length: 21,
            maximum: 20,
        }
    ));

    // Neither attempt may reach the FIFO or strobe anything.
    for frame in hal.transfers() {
        assert_eq!(frame.len(), 2);
        assert_ne!(frame[0], 0x7F);
    }
}

#[test]
fn fixed_length_transmit_requires_the_exact_payload() {
    let hal = MockHal::new();
    let mut driver = connected_driver(&hal);

    hal.queue_response(&[STATUS, 0x04]); // PKTCTRL0: fixed length
    hal.queue_response(&[STATUS, 8]);
    let err = driver.transmit(&[0u8; 7]).unwrap_err();
    assert!(matches!(
        err,
        DriverError::PayloadLengthMismatch {
            expected: 8,
            actual: 7,
        }
    ));
    assert_eq!(hal.transfers().len(), 2);

    hal.queue_response(&[STATUS, 0x04]);
    hal.queue_response(&[STATUS, 8]);
    hal.queue_response(&[STATUS, 0x01]);
    hal.queue_response(&[STATUS]);
    hal.queue_response(&[STATUS; 9]);
    hal.queue_response(&[STATUS]);

    driver.transmit(b"\x01\x02\x03\x04\x05\x06\x07\x08").unwrap();

    let transfers = hal.transfers();
    // Fixed mode writes the payload verbatim, no length byte.
    assert_eq!(
        transfers[6],
        vec![0x7F, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]
    );
}

#[test]
fn transmit_refuses_a_radio_that_is_not_idle() {
    let hal = MockHal::new();
    let mut driver = connected_driver(&hal);

    hal.queue_response(&[STATUS, 0x05]);
    hal.queue_response(&[STATUS, 20]);
    hal.queue_response(&[STATUS, 0x0D]); // MARCSTATE: receiving

    let err = driver.transmit(&[0xAA; 4]).unwrap_err();

    assert!(matches!(err, DriverError::NotIdle(MarcState::Rx)));
    // Mode read, length read, state read; nothing else went out.
    assert_eq!(hal.transfers().len(), 3);
}

#[test]
fn transmit_in_infinite_length_mode_is_unsupported() {
    let hal = MockHal::new();
    let mut driver = connected_driver(&hal);

    hal.queue_response(&[STATUS, 0x06]); // PKTCTRL0: infinite length
    hal.queue_response(&[STATUS, 8]);

    let err = driver.transmit(&[0u8; 8]).unwrap_err();

    assert!(matches!(
        err,
        DriverError::UnsupportedLengthMode(PacketLengthMode::Infinite)
    ));
    assert_eq!(hal.transfers().len(), 2);
}

#[test]
fn receive_returns_nothing_below_the_status_trailer_size() {
    let hal = MockHal::new();
    let mut driver = connected_driver(&hal);

    hal.queue_response(&[STATUS, 0]);
    assert!(driver.receive().unwrap().is_none());

    hal.queue_response(&[STATUS, 1]);
    assert!(driver.receive().unwrap().is_none());

    // Only the RXBYTES probes went out, never a FIFO read.
    assert_eq!(hal.transfers(), vec![vec![0xFB, 0x00], vec![0xFB, 0x00]]);
}

#[test]
fn receive_splits_payload_and_status_trailer() {
    let hal = MockHal::new();
    let mut driver = connected_driver(&hal);

    hal.queue_response(&[STATUS, 5]); // RXBYTES
    hal.queue_response(&[STATUS, 0x41, 0x42, 0x43, 0x80, 0x2A]);

    let packet = driver.receive().unwrap().unwrap();

    assert_eq!(packet.payload, vec![0x41, 0x42, 0x43]);
    assert_eq!(packet.rssi_index, 0x80);
    assert!((packet.rssi_dbm() - (-138.0)).abs() < 1e-9);
    assert!(!packet.checksum_valid);
    assert_eq!(packet.link_quality_indicator, 0x2A);
    assert_eq!(hal.transfers()[1], vec![0xFF, 0, 0, 0, 0, 0]);
}

#[test]
fn receive_reports_crc_pass_from_the_trailer_bit() {
    let hal = MockHal::new();
    let mut driver = connected_driver(&hal);

    hal.queue_response(&[STATUS, 4]);
    hal.queue_response(&[STATUS, 0x99, 0x88, 0x0A, 0xC6]);

    let packet = driver.receive().unwrap().unwrap();

    assert_eq!(packet.payload, vec![0x99, 0x88]);
    assert!(packet.checksum_valid);
    assert_eq!(packet.link_quality_indicator, 0x46);
    assert!((packet.rssi_dbm() - (-69.0)).abs() < 1e-9);
}

#[test]
fn enable_receive_mode_strobes_the_receiver_on() {
    let hal = MockHal::new();
    let mut driver = connected_driver(&hal);

    hal.queue_response(&[STATUS]);
    driver.enable_receive_mode().unwrap();

    assert_eq!(hal.transfers(), vec![vec![0x34]]);
}

#[test]
fn asynchronous_transmission_guard_restores_fifo_mode() {
    let hal = MockHal::new();
    let mut driver = connected_driver(&hal);

    hal.queue_response(&[STATUS, 0x05]); // PKTCTRL0 read
    hal.queue_response(&[STATUS, STATUS]); // PKTCTRL0 write echo
    hal.queue_response(&[STATUS]); // STX
    hal.queue_response(&[STATUS]); // SIDLE on drop
    hal.queue_response(&[STATUS, 0x35]); // PKTCTRL0 read on drop
    hal.queue_response(&[STATUS, STATUS]); // PKTCTRL0 write echo

    {
        let transmission = driver.asynchronous_transmission().unwrap();
        assert_eq!(transmission.pin(), GdoPin::Gdo0);
    }

    assert_eq!(
        hal.transfers(),
        vec![
            vec![0x88, 0x00], // read packet format
            vec![0x08, 0x35], // asynchronous serial mode
            vec![0x35],       // STX
            vec![0x36],       // SIDLE
            vec![0x88, 0x00], // read packet format
            vec![0x08, 0x05], // back to FIFO mode
        ]
    );
}

#[test]
fn echo_mismatch_surfaces_and_the_session_stays_usable() {
    let hal = MockHal::new();
    let mut driver = connected_driver(&hal);

    hal.queue_response(&[STATUS, STATUS, 0x07]);
    let err = driver.set_sync_word(&[0xD3, 0x91]).unwrap_err();
    assert!(matches!(
        err,
        DriverError::StatusEchoMismatch {
            register: 0x44,
            offset: 2,
            status: STATUS,
            echoed: 0x07,
        }
    ));

    // The violation poisons nothing; the next query talks normally.
    hal.queue_response(&[STATUS, 0x01]);
    assert_eq!(driver.marc_state().unwrap(), MarcState::Idle);
}
