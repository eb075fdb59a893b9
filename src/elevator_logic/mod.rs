//! # Elevator Logic
//!
//! Runs the car. A [Lift] is a cheap, clonable handle; the car itself is driven by one
//! stepping task started with [Lift::start].
//!
//! ## Overview
//! - The request board and the car container share one mutex. Submitters only ever touch
//!   the board; only the stepping task writes the car fields, so no two physical steps overlap.
//! - A submission raises the board's recompute signal and wakes the stepping task through a
//!   [Notify]. The permit kept by `Notify` means a wake-up sent while the task is busy is not lost.
//! - The stepping task performs one action at a time: wait for it (floor-pass time for moves),
//!   execute it under the lock, then recompute. After the doors open it holds them for the
//!   doors delay before recomputing. A request made mid-step is only seen by the recompute
//!   that follows the step.
//! - Events are sent on an unbounded channel in the order they happen.

pub mod fsm;
pub mod request;
pub mod timer;

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex, Notify};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, timeout};

use crate::config::{self, LiftConfig};
use crate::error::LiftError;
use crate::lift_state::{Action, Dirn, DoorState, ElevatorContainer, LiftEvent};
use crate::print;

use request::RequestBoard;
use timer::Timer;

/// Everything behind the lift lock
struct LiftState {
    board: RequestBoard,
    elevator: ElevatorContainer,
}

struct Shared {
    state: Mutex<LiftState>,
    wake: Notify,
}

/// Consistent copy of the car, taken under the lock.
#[derive(Debug, Clone, PartialEq)]
pub struct LiftSnapshot {
    /// The car container
    pub elevator: ElevatorContainer,
    /// Whether any call or move is still outstanding
    pub pending: bool,
}

/// Handle to a running lift. Clone it freely, every clone talks to the same car.
#[derive(Clone)]
pub struct Lift {
    shared: Arc<Shared>,
    config: Arc<LiftConfig>,
}

impl Lift {
    /// Validates `config` and starts the stepping task on the current tokio runtime.
    ///
    /// ## Returns
    /// The handle, the receiving end of the event channel and the stepping task itself.
    /// The task never finishes on its own; if it does, the lift has stopped serving.
    /// [LiftError::InvalidConfiguration] if `config` does not validate.
    ///
    /// ## Example
    /// ```rust,no_run
    /// # async fn demo() -> Result<(), elevatorsim::error::LiftError> {
    /// use elevatorsim::config::LiftConfig;
    /// use elevatorsim::elevator_logic::Lift;
    ///
    /// let config = LiftConfig { floor_count: 10, floor_height: 3.0, speed: 1.0, doors_delay: 1.0 };
    /// let (lift, mut events, _stepping) = Lift::start(config)?;
    /// lift.submit_move(4).await?;
    /// while let Some(event) = events.recv().await {
    ///     println!("{}", event);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn start(
        config: LiftConfig,
    ) -> Result<(Lift, mpsc::UnboundedReceiver<LiftEvent>, JoinHandle<()>), LiftError> {
        let (lift, events_tx, events_rx) = Lift::new(config)?;
        let stepping_task = lift.spawn_stepping(events_tx);
        Ok((lift, events_rx, stepping_task))
    }

    fn new(
        config: LiftConfig,
    ) -> Result<(Lift, mpsc::UnboundedSender<LiftEvent>, mpsc::UnboundedReceiver<LiftEvent>), LiftError> {
        config.validate()?;
        let (events_tx, events_rx) = mpsc::unbounded_channel::<LiftEvent>();
        let lift = Lift {
            shared: Arc::new(Shared {
                state: Mutex::new(LiftState {
                    board: RequestBoard::new(config.floor_count),
                    elevator: ElevatorContainer::new(config.floor_count),
                }),
                wake: Notify::new(),
            }),
            config: Arc::new(config),
        };
        Ok((lift, events_tx, events_rx))
    }

    fn spawn_stepping(&self, events_tx: mpsc::UnboundedSender<LiftEvent>) -> JoinHandle<()> {
        let lift = self.clone();
        tokio::spawn(async move {
            lift.run_local_elevator(events_tx).await;
        })
    }

    /// The configuration the lift was started with
    pub fn config(&self) -> &LiftConfig {
        &self.config
    }

    /// Floor-panel call at `floor` (0-based), wanting to travel in `dirn`.
    pub async fn submit_call(&self, floor: i64, dirn: Dirn) -> Result<(), LiftError> {
        self.shared.state.lock().await.board.submit_call(floor, dirn)?;
        self.shared.wake.notify_one();
        Ok(())
    }

    /// In-car request to travel to `floor` (0-based).
    pub async fn submit_move(&self, floor: i64) -> Result<(), LiftError> {
        self.shared.state.lock().await.board.submit_move(floor)?;
        self.shared.wake.notify_one();
        Ok(())
    }

    /// Copy of the car state and whether anything is pending.
    pub async fn snapshot(&self) -> LiftSnapshot {
        let state = self.shared.state.lock().await;
        LiftSnapshot {
            elevator: state.elevator.clone(),
            pending: state.board.has_pending(),
        }
    }

    /// The stepping loop. Never returns; it stops when the runtime shuts down.
    async fn run_local_elevator(&self, events_tx: mpsc::UnboundedSender<LiftEvent>) {
        let mut floor_timer = Timer::new(self.config.floor_pass_time());
        let mut door_timer = Timer::new(self.config.doors_delay_time());
        print::info(format!(
            "Lift ready at floor 1 of {}, {:?} per floor",
            self.config.floor_count,
            self.config.floor_pass_time()
        ));

        loop {
            let action = self.shared.state.lock().await.elevator.action;

            match action {
                Action::Stop => {
                    if !self.wait_for_request().await {
                        continue;
                    }
                }
                Action::MoveUp | Action::MoveDown => {
                    floor_timer.timer_start();
                    self.wait_for(&floor_timer).await;
                    floor_timer.timer_stop();
                }
                Action::OpenDoors | Action::CloseDoors => {}
            }

            let doors_opened = {
                let mut state = self.shared.state.lock().await;
                let LiftState { board, elevator } = &mut *state;

                if let Some(event) = fsm::execute(board, elevator) {
                    let _ = events_tx.send(event);
                }
                if elevator.door == DoorState::Opened {
                    true
                } else {
                    recompute_and_report(board, elevator, action, &events_tx);
                    false
                }
            };

            if doors_opened {
                door_timer.timer_start();
                self.wait_for(&door_timer).await;
                door_timer.timer_stop();

                let mut state = self.shared.state.lock().await;
                let LiftState { board, elevator } = &mut *state;
                recompute_and_report(board, elevator, Action::OpenDoors, &events_tx);
            }
        }
    }

    /// Idle wait. Returns true if a request arrived, false on the fallback tick with nothing new.
    async fn wait_for_request(&self) -> bool {
        if !self.shared.state.lock().await.board.needs_update() {
            let _ = timeout(config::POLL_PERIOD, self.shared.wake.notified()).await;
        }
        self.shared.state.lock().await.board.needs_update()
    }

    /// Waits out a timed action. New requests wake us up, but they are only looked at after the
    /// step, so the wait is simply resumed until the deadline.
    async fn wait_for(&self, timer: &Timer) {
        let deadline = timer.deadline();
        loop {
            tokio::select! {
                _ = sleep_until(deadline) => return,
                _ = self.shared.wake.notified() => {
                    if timer.timer_timeouted() {
                        return;
                    }
                }
            }
        }
    }
}

/// Recomputes, and reports when the car has just settled into [Action::Stop].
fn recompute_and_report(
    board: &mut RequestBoard,
    elevator: &mut ElevatorContainer,
    previous: Action,
    events_tx: &mpsc::UnboundedSender<LiftEvent>,
) {
    fsm::recompute(board, elevator);
    if elevator.action == Action::Stop && previous != Action::Stop {
        let _ = events_tx.send(LiftEvent::Idle { floor: elevator.floor });
    }
}
