//! Line-oriented command input.
//!
//! One command per line, floors are 1-based:
//! - `m <floor>`: move to floor (pressed inside the car)
//! - `cu <floor>`: call from floor, wanting up
//! - `cd <floor>`: call from floor, wanting down
//!
//! Lines that are not one of these are dropped without a word. Floors outside the building
//! are reported and otherwise ignored.

use std::str::FromStr;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::elevator_logic::Lift;
use crate::error::LiftError;
use crate::lift_state::Dirn;
use crate::print;

#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A parsed input line. Floors are 1-based, exactly as typed.
pub enum Command {
    Move(i64),
    Call(i64, Dirn),
}

impl FromStr for Command {
    type Err = LiftError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let malformed = || LiftError::MalformedCommand(line.to_string());
        let mut parts = line.split_whitespace();

        let (Some(order), Some(floor), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };
        let floor: i64 = floor.parse().map_err(|_| malformed())?;

        match order {
            "m" => Ok(Command::Move(floor)),
            "cu" => Ok(Command::Call(floor, Dirn::Up)),
            "cd" => Ok(Command::Call(floor, Dirn::Down)),
            _ => Err(malformed()),
        }
    }
}

impl Command {
    /// Hands the command to the lift, converting the floor to a 0-based index.
    pub async fn apply(self, lift: &Lift) -> Result<(), LiftError> {
        let floor = match self {
            Command::Move(floor) | Command::Call(floor, _) => floor,
        };
        let Some(index) = floor.checked_sub(1) else {
            return Err(LiftError::InvalidFloorRequest {
                floor,
                floor_count: lift.config().floor_count,
            });
        };
        match self {
            Command::Move(_) => lift.submit_move(index).await,
            Command::Call(_, dirn) => lift.submit_call(index, dirn).await,
        }
    }
}

/// Reads commands from `reader` until it ends, feeding them to `lift`.
///
/// ## Parameters
/// - `reader`: line source, normally stdin
/// - `lift`: the lift to send requests to
///
/// ## Returns
/// `Ok` at end of input, or the read error.
pub async fn read_commands<R>(reader: R, lift: Lift) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(_) => continue,
        };
        if let Err(e) = command.apply(&lift).await {
            print::err(e.to_string());
        }
    }
    Ok(())
}
