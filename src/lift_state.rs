//! Data types describing the car: direction, doors, the next action and the car container itself.

use std::fmt;

#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Direction the car is scanning in. Kept across recomputes, so the car finishes one sweep before turning.
pub enum Dirn {
    Up,
    Down,
}

impl Dirn {
    /// The other scan direction
    pub fn opposite(self) -> Dirn {
        match self {
            Dirn::Up => Dirn::Down,
            Dirn::Down => Dirn::Up,
        }
    }
}

#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// State of the car doors
pub enum DoorState {
    Opened,
    Closed,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The single next physical action the stepping loop will perform
pub enum Action {
    MoveUp,
    MoveDown,
    OpenDoors,
    CloseDoors,
    Stop,
}

impl Action {
    /// Move action for a scan direction
    pub fn moving(dirn: Dirn) -> Action {
        match dirn {
            Dirn::Up => Action::MoveUp,
            Dirn::Down => Action::MoveDown,
        }
    }
}

/// Represents the state of the car. Only the stepping loop writes to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevatorContainer {
    /// The number of floors the car can access
    pub floor_count: usize,

    /// Floor the car is at, 0-based.
    /// Default: 0
    pub floor: usize,

    /// [Dirn]
    /// Default: [Dirn::Up]
    pub dirn: Dirn,

    /// [DoorState]
    /// Default: [DoorState::Closed]
    pub door: DoorState,

    /// [Action]
    /// Default: [Action::Stop]
    pub action: Action,

    /// Whether the last step was a floor transit. Arrivals are only announced after one.
    /// Default: false
    pub moving: bool,
}

impl ElevatorContainer {
    /// A car parked at the bottom floor, doors closed, ready to go up.
    pub fn new(floor_count: usize) -> Self {
        Self {
            floor_count,
            floor: 0,
            dirn: Dirn::Up,
            door: DoorState::Closed,
            action: Action::Stop,
            moving: false,
        }
    }
}

/// Something the car did, reported in the order it happened.
///
/// Floors are 0-based here; the `Display` impl prints them 1-based.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiftEvent {
    FloorArrived { floor: usize },
    DoorsOpened { floor: usize },
    DoorsClosed { floor: usize },
    /// The car has serviced everything and settled into [Action::Stop]
    Idle { floor: usize },
}

impl fmt::Display for LiftEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiftEvent::FloorArrived { floor } => write!(f, "{} floor", floor + 1),
            LiftEvent::DoorsOpened { .. } => write!(f, "Doors opened"),
            LiftEvent::DoorsClosed { .. } => write!(f, "Doors closed"),
            LiftEvent::Idle { floor } => write!(f, "Idle at floor {}", floor + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_container() {
        let container = ElevatorContainer::new(7);
        assert_eq!(container.floor, 0);
        assert_eq!(container.dirn, Dirn::Up);
        assert_eq!(container.door, DoorState::Closed);
        assert_eq!(container.action, Action::Stop);
        assert!(!container.moving);
    }

    #[test]
    fn test_event_lines() {
        assert_eq!(LiftEvent::FloorArrived { floor: 4 }.to_string(), "5 floor");
        assert_eq!(LiftEvent::DoorsOpened { floor: 4 }.to_string(), "Doors opened");
        assert_eq!(LiftEvent::DoorsClosed { floor: 4 }.to_string(), "Doors closed");
    }
}
