#![warn(missing_docs)]
//! # This projects library
//!
//! This library simulates a single elevator car serving a building, dispatching requests with LOOK scheduling.
//!
//! ## Overview
//! - **config**: Static parameters and the startup [config::LiftConfig].
//! - **error**: The [error::LiftError] type.
//! - **init**: Command-line parsing and config file loading.
//! - **print**: Colour coded, timestamped terminal output.
//! - **lift_state**: Direction, doors, actions, events and the car container.
//! - **elevator_logic**: The request board, the state machine and the stepping task driving the car.
//! - **command**: Parsing of input lines and the stdin reader.

pub mod config;

pub mod error;

pub mod init;

pub mod print;

pub mod lift_state;

pub mod elevator_logic;

pub mod command;
