//! Connection handshake state machine.
//!
//! The sequence is fixed: switch the pad to USB baud, handshake, read the
//! three calibration blocks from SPI flash, enable the IMU and rumble,
//! select the standard `0x30` report format, and drop USB timeouts.
//! Each step's frame is retransmitted once on a mismatched ack, then the
//! step is abandoned so one deaf command cannot wedge the controller.

use tracing::{debug, warn};

use crate::{REPORT_SIMPLE_ACK, REPORT_SUBCOMMAND_ACK, spi};

/// Simple commands carried in a two-byte `0x80` frame.
const CMD_BAUD: u8 = 0x03;
const CMD_HANDSHAKE: u8 = 0x02;
const CMD_NO_TIMEOUT: u8 = 0x04;

/// Subcommands carried in a 32-byte `0x01` frame.
const SUBCMD_SPI_READ: u8 = 0x10;
const SUBCMD_ENABLE_IMU: u8 = 0x40;
const SUBCMD_ENABLE_RUMBLE: u8 = 0x48;
const SUBCMD_REPORT_FORMAT: u8 = 0x03;

const STEP_DONE: u8 = 99;
const SUBCOMMAND_FRAME_LEN: usize = 32;

/// One outgoing handshake frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandshakeFrame {
    /// `[0x80, command]`.
    Simple([u8; 2]),
    /// 32-byte `0x01` frame with rumble header and subcommand payload.
    Subcommand([u8; SUBCOMMAND_FRAME_LEN]),
}

impl HandshakeFrame {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            HandshakeFrame::Simple(frame) => frame,
            HandshakeFrame::Subcommand(frame) => frame,
        }
    }
}

/// Handshake progress. Create one per connection, call
/// [`next_frame`](Handshake::next_frame) whenever the transport is ready
/// to send, and feed every incoming `0x81`/`0x21` report to
/// [`handle_ack`](Handshake::handle_ack).
#[derive(Debug)]
pub struct Handshake {
    step: u8,
    last_command: u8,
    repeat_count: u8,
    packet_counter: u8,
    initial_pass: bool,
}

impl Default for Handshake {
    fn default() -> Self {
        Self::new()
    }
}

impl Handshake {
    pub fn new() -> Self {
        Self { step: 0, last_command: 0, repeat_count: 0, packet_counter: 0, initial_pass: true }
    }

    /// Whether the full sequence has run.
    pub fn is_complete(&self) -> bool {
        self.step == STEP_DONE
    }

    /// True until the final step has executed once. Input decoding stays
    /// in first-report mode while this holds.
    pub fn initial_pass(&self) -> bool {
        self.initial_pass
    }

    /// Frame to send for the current step, or `None` when the sequence is
    /// complete. Calling again without an intervening ack resends the
    /// same step's frame (with a fresh packet counter for subcommands).
    pub fn next_frame(&mut self) -> Option<HandshakeFrame> {
        let frame = match self.step {
            0 => self.simple(CMD_BAUD),
            1 => self.simple(CMD_HANDSHAKE),
            2 => self.spi_read(spi::IMU_CALIBRATION, 0x18),
            3 => self.spi_read(spi::IMU_HORIZONTAL_OFFSET, 6),
            4 => self.spi_read(spi::STICK_CALIBRATION, 0x19),
            5 => {
                // The pad acks IMU enable unreliably; fire and advance.
                let frame = self.subcommand(SUBCMD_ENABLE_IMU, &[0x01]);
                self.step = 6;
                return Some(frame);
            }
            6 => self.simple(CMD_NO_TIMEOUT),
            7 => self.subcommand(SUBCMD_ENABLE_RUMBLE, &[0x01]),
            8 => self.subcommand(SUBCMD_REPORT_FORMAT, &[0x30]),
            9 => self.simple(CMD_NO_TIMEOUT),
            10 => {
                debug!("handshake complete");
                self.step = STEP_DONE;
                self.initial_pass = false;
                return None;
            }
            _ => return None,
        };
        Some(frame)
    }

    /// Digests an ack report and advances the step it acknowledges.
    pub fn handle_ack(&mut self, report: &[u8]) {
        match report.first() {
            Some(&REPORT_SIMPLE_ACK) => {
                if report.get(1) == Some(&self.last_command) {
                    self.advance();
                } else if self.repeat_count == 0 {
                    warn!(step = self.step, "unexpected ack, retrying command once");
                    self.repeat_count = 1;
                } else {
                    warn!(step = self.step, "command unacknowledged twice, skipping");
                    self.advance();
                }
            }
            Some(&REPORT_SUBCOMMAND_ACK) => self.advance(),
            _ => {}
        }
    }

    fn advance(&mut self) {
        self.repeat_count = 0;
        if self.step < STEP_DONE {
            self.step += 1;
        }
    }

    fn simple(&mut self, command: u8) -> HandshakeFrame {
        self.last_command = command;
        HandshakeFrame::Simple([0x80, command])
    }

    fn subcommand(&mut self, subcommand: u8, payload: &[u8]) -> HandshakeFrame {
        let mut frame = [0u8; SUBCOMMAND_FRAME_LEN];
        frame[0] = 0x01;
        frame[1] = self.packet_counter;
        self.packet_counter = (self.packet_counter + 1) & 0x0F;
        // Neutral rumble for both motors.
        frame[2..10].copy_from_slice(&[0x00, 0x01, 0x40, 0x40, 0x00, 0x01, 0x40, 0x40]);
        frame[10] = subcommand;
        frame[11..11 + payload.len()].copy_from_slice(payload);
        HandshakeFrame::Subcommand(frame)
    }

    fn spi_read(&mut self, address: u16, length: u8) -> HandshakeFrame {
        let [low, high] = address.to_le_bytes();
        self.subcommand(SUBCMD_SPI_READ, &[low, high, 0x00, 0x00, length])
    }
}
