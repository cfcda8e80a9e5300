//! Blocking driver for the HiTechnic Matrix motor/servo controller.
//!
//! The Matrix controller (type string `"M4S4cont"`) drives four DC motors
//! with encoders and four hobby servos, and is controlled entirely through
//! single-byte registers over I2C.
//!
//! # Architecture
//!
//! The crate is split into layers:
//!
//! - **[`SmBus`]** — the three addressed register primitives the driver
//!   needs. [`I2cBus`] implements it for any blocking `embedded-hal` I2C
//!   peripheral; tests and other transports can implement it directly.
//! - **`driver`** (crate-private) — typed register reads and writes bound to
//!   one device address.
//! - **[`MatrixController`]** (public) — validated, channel-addressed API
//!   for status, timeout, servos and motors.
//!
//! # Quick start
//!
//! ```no_run
//! use matrix_driver::{I2cBus, MatrixController, DEFAULT_ADDRESS};
//!
//! # fn example(i2c: impl embedded_hal::i2c::I2c) {
//! let mut matrix = MatrixController::new(I2cBus::new(i2c), DEFAULT_ADDRESS);
//!
//! let info = matrix.get_info().unwrap();
//! assert!(info.is_matrix_controller());
//!
//! // Enable servos 1 and 2, disable 3, leave 4 alone.
//! let enabled = matrix.set_servos(&[1, 1, 0, -1]).unwrap();
//! # }
//! ```
//!
//! # Features
//!
//! - **`defmt`** — Trace every register transaction and enable
//!   `defmt::Format` implementations on public types.

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to later modules.
mod fmt;

pub use bus::{I2cBus, SmBus};
pub use codec::{decode_i8, encode_i8};
pub use controller::MatrixController;
pub use error::ControllerError;
pub use modes::{MotorMode, MotorModeFlags, ServoState};
pub use registers::{CHANNEL_COUNT, DEFAULT_ADDRESS};
pub use status::{ControllerInfo, ControllerStatus, MotorStatus};

mod bus;
mod codec;
mod controller;
mod driver;
mod error;
mod modes;
pub mod registers;
mod status;
