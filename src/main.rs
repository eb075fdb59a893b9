use tokio::io::{stdin, BufReader};

use elevatorsim::command;
use elevatorsim::elevator_logic::Lift;
use elevatorsim::init;
use elevatorsim::lift_state::LiftEvent;
use elevatorsim::print;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match init::parse_args() {
        Ok(config) => config,
        Err(e) => {
            print::err(format!("{:#}", e));
            println!("{}", init::usage());
            std::process::exit(2);
        }
    };

    let (lift, mut events, stepping_task) = Lift::start(config)?;

    /* START ----------- Task printing what the lift does ---------------------- */
    let _print_task = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                LiftEvent::Idle { .. } => print::info(event.to_string()),
                _ => print::event(event.to_string()),
            }
        }
    });
    /* SLUTT ----------- Task printing what the lift does ---------------------- */

    /* START ----------- Task reading commands from stdin ---------------------- */
    {
        let lift = lift.clone();
        let _input_task = tokio::spawn(async move {
            match command::read_commands(BufReader::new(stdin()), lift).await {
                Ok(()) => print::info("End of input, lift keeps running until ctrl-c".to_string()),
                Err(e) => print::warn(format!("Stopped reading commands: {}", e)),
            }
        });
    }
    /* SLUTT ----------- Task reading commands from stdin ---------------------- */

    print::ok(format!("Lift started with {} floors", lift.config().floor_count));

    tokio::select! {
        interrupted = tokio::signal::ctrl_c() => {
            interrupted?;
            print::info("Interrupted, shutting down".to_string());
        }
        stopped = stepping_task => {
            match stopped {
                Ok(()) => print::err("The lift stopped serving requests".to_string()),
                Err(e) => print::err(format!("The lift stopped serving requests: {}", e)),
            }
            std::process::exit(1);
        }
    }
    // The stdin reader sits in a blocking read the runtime would wait for on shutdown
    std::process::exit(0);
}
