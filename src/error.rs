//! Error types shared by the configuration layer, the request board and the command parser.

use thiserror::Error;

/// Everything that can go wrong when talking to the lift.
///
/// None of these are fatal to a running lift. [LiftError::InvalidConfiguration] is fatal
/// at startup only, and makes the binary exit with status 2.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LiftError {
    /// Floor count outside the allowed range, or a non-positive height, speed or doors delay.
    #[error("{0}")]
    InvalidConfiguration(String),

    /// A call or move naming a floor the building does not have.
    ///
    /// `floor` is the 1-based floor number the caller asked for.
    #[error("Lift called to floor {floor}, but floors go from 1 to {floor_count}")]
    InvalidFloorRequest {
        /// Requested floor, 1-based
        floor: i64,
        /// Number of floors in the building
        floor_count: usize,
    },

    /// An input line that is not one of the known commands.
    #[error("Malformed command: {0:?}")]
    MalformedCommand(String),
}
