//! Mock SPI transport for testing
//!
//! This module provides a scripted SPI transport that can be used to test
//! the driver without requiring actual hardware. Responses are queued ahead
//! of time; every transfer is recorded for later inspection. Clones share
//! state, so a test can keep a handle while the driver owns the other.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::hal::{Hal, HalError};

#[derive(Debug)]
struct MockState {
    /// Scripted responses, consumed front to back
    responses: VecDeque<Vec<u8>>,
    /// Every byte sequence shifted out, in order
    transfers: Vec<Vec<u8>>,
    /// Simulated one-shot error
    next_error: Option<HalError>,
    /// Byte used to fabricate responses when the script runs dry
    default_status: u8,
    clock_speed_hz: Option<u32>,
    open: bool,
    open_count: u32,
    close_count: u32,
}

/// Scripted SPI transport that simulates the transceiver's full-duplex echo
#[derive(Clone)]
pub struct MockHal {
    state: Arc<Mutex<MockState>>,
}

impl Default for MockHal {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHal {
    pub fn new() -> Self {
        MockHal {
            state: Arc::new(Mutex::new(MockState {
                responses: VecDeque::new(),
                transfers: Vec::new(),
                next_error: None,
                default_status: 0x0F,
                clock_speed_hz: None,
                open: false,
                open_count: 0,
                close_count: 0,
            })),
        }
    }

    /// Queue the response for one upcoming transfer
    pub fn queue_response(&self, response: &[u8]) {
        let mut state = self.state.lock().unwrap();
        state.responses.push_back(response.to_vec());
    }

    /// Change the status byte used for unscripted transfers
    pub fn set_default_status(&self, status: u8) {
        self.state.lock().unwrap().default_status = status;
    }

    /// Set an error to be returned by the next transfer
    pub fn set_next_error(&self, error: HalError) {
        self.state.lock().unwrap().next_error = Some(error);
    }

    /// Get every byte sequence the driver has shifted out so far
    pub fn transfers(&self) -> Vec<Vec<u8>> {
        self.state.lock().unwrap().transfers.clone()
    }

    /// Forget recorded transfers and any unconsumed responses
    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap();
        state.transfers.clear();
        state.responses.clear();
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().unwrap().open
    }

    pub fn open_count(&self) -> u32 {
        self.state.lock().unwrap().open_count
    }

    pub fn close_count(&self) -> u32 {
        self.state.lock().unwrap().close_count
    }

    /// Clock speed from the most recent `set_clock_speed` call
    pub fn clock_speed_hz(&self) -> Option<u32> {
        self.state.lock().unwrap().clock_speed_hz
    }
}

impl Hal for MockHal {
    fn open(&mut self) -> Result<(), HalError> {
        let mut state = self.state.lock().unwrap();
        state.open = true;
        state.open_count += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), HalError> {
        let mut state = self.state.lock().unwrap();
        state.open = false;
        state.close_count += 1;
        Ok(())
    }

    fn set_clock_speed(&mut self, speed_hz: u32) -> Result<(), HalError> {
        self.state.lock().unwrap().clock_speed_hz = Some(speed_hz);
        Ok(())
    }

    fn transfer(&mut self, write: &[u8]) -> Result<Vec<u8>, HalError> {
        let mut state = self.state.lock().unwrap();
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }
        if !state.open {
            return Err(HalError::NotOpen);
        }
        state.transfers.push(write.to_vec());
        let response = state
            .responses
            .pop_front()
            .unwrap_or_else(|| vec![state.default_status; write.len()]);
        Ok(response)
    }
}
