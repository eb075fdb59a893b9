//! The request board: every outstanding call and move, per floor.
//!
//! A floor holds three independent flags: a call wanting up, a call wanting down, and a move
//! (selected from inside the car). Both call flags can be set at once, and each is cleared on
//! its own when the car services the floor in that direction.
//!
//! # Overview
//! - [`RequestBoard::submit_call`] / [`RequestBoard::submit_move`] set flags and raise the recompute signal.
//! - [`RequestBoard::clear_at`] is used by the dispatcher when a stop is serviced.
//! - [`RequestBoard::has_pending`], [`RequestBoard::has_request_ahead`] and
//!   [`RequestBoard::has_any_ahead`] answer the questions the LOOK scan asks.
//!
//! The board does no locking itself; the lift keeps it behind the same mutex as the car state.

use crate::error::LiftError;
use crate::lift_state::Dirn;

/// Outstanding requests for every floor of the building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBoard {
    call_up: Vec<bool>,
    call_down: Vec<bool>,
    moves: Vec<bool>,
    need_update: bool,
}

impl RequestBoard {
    /// An empty board for a building with `floor_count` floors.
    pub fn new(floor_count: usize) -> Self {
        Self {
            call_up: vec![false; floor_count],
            call_down: vec![false; floor_count],
            moves: vec![false; floor_count],
            need_update: false,
        }
    }

    /// Number of floors on the board
    pub fn floor_count(&self) -> usize {
        self.moves.len()
    }

    /// Registers a floor-panel call at `floor` (0-based) wanting to travel in `dirn`.
    ///
    /// Submitting the same call twice before it is serviced has no further effect.
    ///
    /// ## Returns
    /// [LiftError::InvalidFloorRequest] if `floor` is outside the building. The board is left unchanged.
    pub fn submit_call(&mut self, floor: i64, dirn: Dirn) -> Result<(), LiftError> {
        let floor = self.index(floor)?;
        match dirn {
            Dirn::Up => self.call_up[floor] = true,
            Dirn::Down => self.call_down[floor] = true,
        }
        self.need_update = true;
        Ok(())
    }

    /// Registers an in-car request to travel to `floor` (0-based).
    ///
    /// ## Returns
    /// [LiftError::InvalidFloorRequest] if `floor` is outside the building. The board is left unchanged.
    pub fn submit_move(&mut self, floor: i64) -> Result<(), LiftError> {
        let floor = self.index(floor)?;
        self.moves[floor] = true;
        self.need_update = true;
        Ok(())
    }

    /// Clears the move at `floor` and the call wanting `dirn` there. The opposite call is kept.
    pub fn clear_at(&mut self, floor: usize, dirn: Dirn) {
        if floor >= self.floor_count() {
            return;
        }
        self.moves[floor] = false;
        match dirn {
            Dirn::Up => self.call_up[floor] = false,
            Dirn::Down => self.call_down[floor] = false,
        }
    }

    /// True if any call or move is set anywhere.
    pub fn has_pending(&self) -> bool {
        self.call_up.iter().chain(&self.call_down).chain(&self.moves).any(|set| *set)
    }

    /// Is there a call wanting `dirn` at `floor`?
    pub fn call_at(&self, floor: usize, dirn: Dirn) -> bool {
        let calls = match dirn {
            Dirn::Up => &self.call_up,
            Dirn::Down => &self.call_down,
        };
        calls.get(floor).copied().unwrap_or(false)
    }

    /// Is there a move request for `floor`?
    pub fn move_at(&self, floor: usize) -> bool {
        self.moves.get(floor).copied().unwrap_or(false)
    }

    /// True if a call wanting `dirn`, or a move, is set strictly beyond `from` in direction `dirn`.
    pub fn has_request_ahead(&self, from: usize, dirn: Dirn) -> bool {
        self.floors_ahead(from, dirn)
            .any(|floor| self.move_at(floor) || self.call_at(floor, dirn))
    }

    /// Like [RequestBoard::has_request_ahead], but calls wanting the opposite direction count too.
    ///
    /// The car has to travel to those floors before it can turn around and serve them,
    /// so this is what decides whether the current sweep is exhausted.
    pub fn has_any_ahead(&self, from: usize, dirn: Dirn) -> bool {
        self.has_request_ahead(from, dirn)
            || self
                .floors_ahead(from, dirn)
                .any(|floor| self.call_at(floor, dirn.opposite()))
    }

    /// Whether a request arrived since the last [RequestBoard::take_update].
    pub fn needs_update(&self) -> bool {
        self.need_update
    }

    /// Reads and lowers the recompute signal.
    pub fn take_update(&mut self) -> bool {
        std::mem::take(&mut self.need_update)
    }

    /// Floors strictly beyond `from`. Only ever used with `any`, so the order is irrelevant.
    fn floors_ahead(&self, from: usize, dirn: Dirn) -> std::ops::Range<usize> {
        match dirn {
            Dirn::Up => from.saturating_add(1)..self.floor_count(),
            Dirn::Down => 0..from.min(self.floor_count()),
        }
    }

    fn index(&self, floor: i64) -> Result<usize, LiftError> {
        usize::try_from(floor)
            .ok()
            .filter(|index| *index < self.floor_count())
            .ok_or(LiftError::InvalidFloorRequest {
                floor: floor.saturating_add(1),
                floor_count: self.floor_count(),
            })
    }
}
