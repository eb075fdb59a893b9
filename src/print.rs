//! ## Printing Module
//!
//! This module is only here to make logging in the terminal easier to read.
//! It allows to print in appropriate colors depending on the situation.
//! Every line starts with a local timestamp, so the timing of the simulation can be followed.
use std::sync::atomic::{AtomicBool, Ordering};

use ansi_term::Colour::{self, Green, Red, Yellow};

use crate::config;

/// Current local time, formatted the way every printed line starts.
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.6f").to_string()
}

fn enabled(flag: &AtomicBool) -> bool {
    flag.load(Ordering::Relaxed)
}

/// Prints a lift event (floor arrival, doors) to the terminal.
///
/// Events are the actual output of the simulation, so they are never muted.
///
/// ## Terminal output
/// - "{timestamp} {msg}"
///
/// ## Example
/// ```
/// use elevatorsim::print;
///
/// print::event("5 floor".to_string());
/// ```
pub fn event(msg: String) {
    println!("{} {}", timestamp(), msg);
}

/// Prints an error message in red to the terminal.
///
/// If `PRINT_ERR_ON` is `false`, the message will not be printed.
///
/// ## Parameters
/// - `msg`: The error message to print.
///
/// ## Terminal output
/// - "{timestamp} \[ERROR\]:   {}", msg
///
/// ## Example
/// ```
/// use elevatorsim::print;
///
/// print::err("Something went wrong!".to_string());
/// ```
pub fn err(msg: String) {
    if enabled(&config::PRINT_ERR_ON) {
        println!("{} {}{}", timestamp(), Red.paint("[ERROR]:   "), Red.paint(msg));
    }
}

/// Prints a warning message in yellow to the terminal.
///
/// If `PRINT_WARN_ON` is `false`, the message will not be printed.
///
/// ## Terminal output
/// - "{timestamp} \[WARNING\]: {}", msg
pub fn warn(msg: String) {
    if enabled(&config::PRINT_WARN_ON) {
        println!("{} {}{}", timestamp(), Yellow.paint("[WARNING]: "), Yellow.paint(msg));
    }
}

/// Prints a success message in green to the terminal.
///
/// If `PRINT_OK_ON` is `false`, the message will not be printed.
///
/// ## Terminal output
/// - "{timestamp} \[OK\]:      {}", msg
pub fn ok(msg: String) {
    if enabled(&config::PRINT_OK_ON) {
        println!("{} {}{}", timestamp(), Green.paint("[OK]:      "), Green.paint(msg));
    }
}

/// Prints an informational message in light blue to the terminal.
///
/// If `PRINT_INFO_ON` is `false`, the message will not be printed.
///
/// ## Terminal output
/// - "{timestamp} \[INFO\]:    {}", msg
pub fn info(msg: String) {
    let light_blue = Colour::RGB(102, 178, 255);
    if enabled(&config::PRINT_INFO_ON) {
        println!("{} {}{}", timestamp(), light_blue.paint("[INFO]:    "), light_blue.paint(msg));
    }
}

/// Prints an error message for something that should be impossible, in a rainbow of colors.
///
/// Used when an internal invariant of the lift is broken. It starts with a red "[ERROR]:" label and
/// follows with the rest of the message displayed in a rainbow pattern. Always printed.
///
/// # Parameters
/// - `fun`: The function name or description of the issue that led to this cosmic error.
///
/// ## Terminal output
/// - "[ERROR]: Cosmic rays flipped a bit! IN: {fun}"
pub fn cosmic_err(fun: String) {
    print!("{} {}", timestamp(), Red.paint("[ERROR]: "));

    let colors = [
        Colour::Red,
        Colour::Yellow,
        Colour::Green,
        Colour::Cyan,
        Colour::Blue,
        Colour::Purple,
    ];

    // Rest of the print in rainbow
    let message = format!("Cosmic rays flipped a bit! IN: {}", fun);
    for (i, c) in message.chars().enumerate() {
        let color = colors[i % colors.len()];
        print!("{}", color.paint(c.to_string()));
    }

    println!();
}

/// Mutes the chatty output levels.
///
/// ## Parameters
/// - `quiet`: mute info and ok messages
/// - `debug`: only error messages and events are shown
pub fn configure(quiet: bool, debug: bool) {
    let mute = quiet || debug;
    config::PRINT_INFO_ON.store(!mute, Ordering::Relaxed);
    config::PRINT_OK_ON.store(!mute, Ordering::Relaxed);
    config::PRINT_WARN_ON.store(!debug, Ordering::Relaxed);
    config::PRINT_ERR_ON.store(true, Ordering::Relaxed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_format() {
        let stamp = timestamp();
        // "YYYY-MM-DD HH:MM:SS.ffffff"
        assert_eq!(stamp.len(), 26);
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[10..11], " ");
        assert_eq!(&stamp[19..20], ".");
    }

    fn levels() -> [bool; 4] {
        [
            config::PRINT_ERR_ON.load(Ordering::Relaxed),
            config::PRINT_WARN_ON.load(Ordering::Relaxed),
            config::PRINT_OK_ON.load(Ordering::Relaxed),
            config::PRINT_INFO_ON.load(Ordering::Relaxed),
        ]
    }

    #[test]
    fn test_configure_levels() {
        // [err, warn, ok, info]
        configure(true, false);
        assert_eq!(levels(), [true, true, false, false]);

        configure(false, true);
        assert_eq!(levels(), [true, false, false, false]);

        configure(true, true);
        assert_eq!(levels(), [true, false, false, false]);

        configure(false, false);
        assert_eq!(levels(), [true, true, true, true]);
    }
}
