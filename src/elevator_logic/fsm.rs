//! The car's state machine.
//!
//! [`recompute`] derives the next [`Action`] (and possibly a new scan direction) from the board
//! and the car. [`execute`] carries out the current action once its time has come.
//! Both are plain functions over borrowed state: the caller holds the lock and owns the timing.
//!
//! # Scheduling
//! LOOK: the car keeps its scan direction while there is anything left to serve ahead of it,
//! then turns around. On the way it only stops for moves and for calls wanting to travel
//! the way the car is going. A call wanting the other way is served when the car turns
//! around at it, or on the way back.

use crate::lift_state::{Action, DoorState, ElevatorContainer, LiftEvent};
use crate::print;

use super::request::RequestBoard;

/// Derives the next action and direction, and lowers the recompute signal.
///
/// 1. Doors open: close them, absorbing any request made here for this direction while they were open.
/// 2. Nothing pending: stop.
/// 3. Nothing ahead and no call at this floor for this direction: turn around.
/// 4. A move, or a call for the current direction, at this floor: open the doors.
/// 5. Anything ahead: move one floor towards it.
pub fn recompute(board: &mut RequestBoard, elevator: &mut ElevatorContainer) {
    board.take_update();
    let floor = elevator.floor;

    if elevator.door == DoorState::Opened {
        board.clear_at(floor, elevator.dirn);
        elevator.action = Action::CloseDoors;
        return;
    }

    if !board.has_pending() {
        elevator.action = Action::Stop;
        return;
    }

    if !board.has_any_ahead(floor, elevator.dirn) && !board.call_at(floor, elevator.dirn) {
        elevator.dirn = elevator.dirn.opposite();
    }

    if board.move_at(floor) || board.call_at(floor, elevator.dirn) {
        elevator.action = Action::OpenDoors;
    } else if board.has_any_ahead(floor, elevator.dirn) {
        elevator.action = Action::moving(elevator.dirn);
    } else {
        // Pending work with nothing here, ahead or behind cannot happen
        print::cosmic_err(format!(
            "fsm::recompute() found requests but no action at floor {}",
            floor + 1
        ));
        debug_assert!(false, "recompute found requests but no action");
        elevator.action = Action::Stop;
    }
}

/// Carries out the current action of the car.
///
/// Moves are called when the floor-pass time has elapsed, everything else right away.
/// Opening the doors clears the serviced request. The caller decides when to [`recompute`] next:
/// immediately, or after the doors delay when the doors were just opened.
///
/// ## Returns
/// The event to report, if the action produced one.
pub fn execute(board: &mut RequestBoard, elevator: &mut ElevatorContainer) -> Option<LiftEvent> {
    match elevator.action {
        Action::MoveUp | Action::MoveDown => on_floor_arrival(elevator),
        Action::OpenDoors => {
            elevator.door = DoorState::Opened;
            elevator.moving = false;
            board.clear_at(elevator.floor, elevator.dirn);
            Some(LiftEvent::DoorsOpened { floor: elevator.floor })
        }
        Action::CloseDoors => {
            elevator.door = DoorState::Closed;
            Some(LiftEvent::DoorsClosed { floor: elevator.floor })
        }
        Action::Stop => None,
    }
}

fn on_floor_arrival(elevator: &mut ElevatorContainer) -> Option<LiftEvent> {
    let next = match elevator.action {
        Action::MoveUp => elevator.floor.checked_add(1),
        _ => elevator.floor.checked_sub(1),
    }
    .filter(|floor| *floor < elevator.floor_count);

    match next {
        Some(floor) => {
            elevator.floor = floor;
            elevator.moving = true;
            Some(LiftEvent::FloorArrived { floor })
        }
        None => {
            print::cosmic_err(format!(
                "fsm::on_floor_arrival() asked to leave the shaft at floor {}",
                elevator.floor + 1
            ));
            debug_assert!(false, "move past the end of the shaft");
            elevator.action = Action::Stop;
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lift_state::Dirn;
    use proptest::prelude::*;

    /// Runs the car until it stops, without any timing.
    fn run_to_idle(board: &mut RequestBoard, elevator: &mut ElevatorContainer) -> Vec<LiftEvent> {
        let mut events = Vec::new();
        recompute(board, elevator);
        for _ in 0..10_000 {
            if elevator.action == Action::Stop {
                return events;
            }
            events.extend(execute(board, elevator));
            recompute(board, elevator);
        }
        panic!("lift never stopped, events so far: {:?}", events);
    }

    fn arrivals(events: &[LiftEvent]) -> Vec<usize> {
        events
            .iter()
            .filter_map(|event| match event {
                LiftEvent::FloorArrived { floor } => Some(*floor),
                _ => None,
            })
            .collect()
    }

    fn opened_at(events: &[LiftEvent]) -> Vec<usize> {
        events
            .iter()
            .filter_map(|event| match event {
                LiftEvent::DoorsOpened { floor } => Some(*floor),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_idle_board_stops() {
        let mut board = RequestBoard::new(10);
        let mut elevator = ElevatorContainer::new(10);
        recompute(&mut board, &mut elevator);
        assert_eq!(elevator.action, Action::Stop);
        assert_eq!(elevator.dirn, Dirn::Up);
    }

    #[test]
    fn test_move_request_walks_floor_by_floor() {
        let mut board = RequestBoard::new(10);
        let mut elevator = ElevatorContainer::new(10);
        board.submit_move(4).unwrap();

        let events = run_to_idle(&mut board, &mut elevator);
        assert_eq!(
            events,
            vec![
                LiftEvent::FloorArrived { floor: 1 },
                LiftEvent::FloorArrived { floor: 2 },
                LiftEvent::FloorArrived { floor: 3 },
                LiftEvent::FloorArrived { floor: 4 },
                LiftEvent::DoorsOpened { floor: 4 },
                LiftEvent::DoorsClosed { floor: 4 },
            ]
        );
        assert!(!board.has_pending());
        assert_eq!(elevator.door, DoorState::Closed);
    }

    #[test]
    fn test_request_at_current_floor_opens_once() {
        let mut board = RequestBoard::new(6);
        let mut elevator = ElevatorContainer::new(6);
        board.submit_call(0, Dirn::Up).unwrap();

        recompute(&mut board, &mut elevator);
        assert_eq!(elevator.action, Action::OpenDoors);
        // not cleared until the doors actually open
        assert!(board.call_at(0, Dirn::Up));

        assert_eq!(execute(&mut board, &mut elevator), Some(LiftEvent::DoorsOpened { floor: 0 }));
        assert!(!board.has_pending());

        recompute(&mut board, &mut elevator);
        assert_eq!(elevator.action, Action::CloseDoors);
        assert_eq!(execute(&mut board, &mut elevator), Some(LiftEvent::DoorsClosed { floor: 0 }));

        recompute(&mut board, &mut elevator);
        assert_eq!(elevator.action, Action::Stop);
    }

    #[test]
    fn test_no_premature_reversal() {
        let mut board = RequestBoard::new(10);
        let mut elevator = ElevatorContainer::new(10);
        board.submit_call(2, Dirn::Up).unwrap();
        board.submit_call(5, Dirn::Down).unwrap();

        let events = run_to_idle(&mut board, &mut elevator);
        assert_eq!(opened_at(&events), vec![2, 5]);
        assert_eq!(arrivals(&events), vec![1, 2, 3, 4, 5]);
        assert_eq!(elevator.dirn, Dirn::Down);
    }

    #[test]
    fn test_passes_call_for_other_direction_then_serves_it_on_the_way_back() {
        let mut board = RequestBoard::new(10);
        let mut elevator = ElevatorContainer::new(10);
        board.submit_call(3, Dirn::Down).unwrap();
        board.submit_move(6).unwrap();

        let events = run_to_idle(&mut board, &mut elevator);
        assert_eq!(opened_at(&events), vec![6, 3]);
        assert_eq!(arrivals(&events), vec![1, 2, 3, 4, 5, 6, 5, 4, 3]);
    }

    #[test]
    fn test_turns_around_at_top_call_wanting_down() {
        let mut board = RequestBoard::new(8);
        let mut elevator = ElevatorContainer::new(8);
        board.submit_call(7, Dirn::Down).unwrap();

        let events = run_to_idle(&mut board, &mut elevator);
        assert_eq!(opened_at(&events), vec![7]);
        assert_eq!(elevator.dirn, Dirn::Down);
    }

    #[test]
    fn test_both_calls_at_one_floor_are_two_stops() {
        let mut board = RequestBoard::new(8);
        let mut elevator = ElevatorContainer::new(8);
        elevator.floor = 3;
        board.submit_call(3, Dirn::Up).unwrap();
        board.submit_call(3, Dirn::Down).unwrap();

        let events = run_to_idle(&mut board, &mut elevator);
        // up first (current direction), then the car turns around in place
        assert_eq!(opened_at(&events), vec![3, 3]);
        assert!(arrivals(&events).is_empty());
        assert!(!board.has_pending());
    }

    #[test]
    fn test_request_while_doors_open_is_absorbed() {
        let mut board = RequestBoard::new(8);
        let mut elevator = ElevatorContainer::new(8);
        board.submit_move(0).unwrap();
        recompute(&mut board, &mut elevator);
        execute(&mut board, &mut elevator);
        assert_eq!(elevator.door, DoorState::Opened);

        board.submit_move(0).unwrap();
        recompute(&mut board, &mut elevator);
        assert_eq!(elevator.action, Action::CloseDoors);
        assert!(!board.has_pending());
    }

    #[test]
    fn test_recompute_lowers_signal() {
        let mut board = RequestBoard::new(8);
        let mut elevator = ElevatorContainer::new(8);
        board.submit_move(5).unwrap();
        assert!(board.needs_update());
        recompute(&mut board, &mut elevator);
        assert!(!board.needs_update());
        assert_eq!(elevator.action, Action::MoveUp);
    }

    #[test]
    fn test_reverses_when_only_requests_behind() {
        let mut board = RequestBoard::new(10);
        let mut elevator = ElevatorContainer::new(10);
        elevator.floor = 6;
        board.submit_move(2).unwrap();
        recompute(&mut board, &mut elevator);
        assert_eq!(elevator.dirn, Dirn::Down);
        assert_eq!(elevator.action, Action::MoveDown);
    }

    #[derive(Debug, Clone)]
    enum Req {
        Move(usize),
        Call(usize, Dirn),
    }

    fn submit(board: &mut RequestBoard, req: &Req) {
        match req {
            Req::Move(floor) => board.submit_move(*floor as i64).unwrap(),
            Req::Call(floor, dirn) => board.submit_call(*floor as i64, *dirn).unwrap(),
        }
    }

    fn scenario() -> impl Strategy<Value = (usize, Vec<(usize, Req)>)> {
        (5usize..=20).prop_flat_map(|floor_count| {
            let req = prop_oneof![
                (0..floor_count).prop_map(Req::Move),
                (0..floor_count).prop_map(|floor| Req::Call(floor, Dirn::Up)),
                (0..floor_count).prop_map(|floor| Req::Call(floor, Dirn::Down)),
            ];
            // (step at which the request arrives, request)
            (Just(floor_count), prop::collection::vec((0usize..60, req), 0..25))
        })
    }

    proptest! {
        #[test]
        fn prop_every_request_is_served(( floor_count, mut reqs) in scenario()) {
            reqs.sort_by_key(|(at, _)| *at);
            let mut board = RequestBoard::new(floor_count);
            let mut elevator = ElevatorContainer::new(floor_count);
            let mut events = Vec::new();
            let mut step = 0;
            let mut incoming = reqs.iter().peekable();

            loop {
                while let Some((_, req)) = incoming.next_if(|(at, _)| *at <= step) {
                    submit(&mut board, req);
                }
                recompute(&mut board, &mut elevator);
                if elevator.action == Action::Stop && incoming.peek().is_none() {
                    break;
                }
                events.extend(execute(&mut board, &mut elevator));
                step += 1;
                prop_assert!(step < 10_000, "lift never stopped");
            }

            prop_assert!(!board.has_pending());
            prop_assert_eq!(elevator.door, DoorState::Closed);

            // single-step arrivals, never the same floor twice in a row
            let mut floor = 0usize;
            for arrived in arrivals(&events) {
                prop_assert_eq!(arrived.abs_diff(floor), 1);
                floor = arrived;
            }

            // every opening is followed by exactly one closing before anything else happens
            for pair in events.windows(2) {
                if let LiftEvent::DoorsOpened { floor } = pair[0] {
                    prop_assert_eq!(pair[1], LiftEvent::DoorsClosed { floor });
                }
            }
        }

        #[test]
        fn prop_duplicates_change_nothing(floor_count in 5usize..=20, floor in 0usize..5, up in any::<bool>()) {
            let dirn = if up { Dirn::Up } else { Dirn::Down };
            let reqs = [Req::Move(floor_count - 1 - floor), Req::Call(floor, dirn)];

            let mut once = RequestBoard::new(floor_count);
            let mut twice = RequestBoard::new(floor_count);
            for req in &reqs {
                submit(&mut once, req);
                submit(&mut twice, req);
                submit(&mut twice, req);
            }
            let mut a = ElevatorContainer::new(floor_count);
            let mut b = ElevatorContainer::new(floor_count);
            prop_assert_eq!(run_to_idle(&mut once, &mut a), run_to_idle(&mut twice, &mut b));
        }
    }
}
