//! Output formatting and progress indicators
//!
//! Utilities for displaying progress, status lines, and errors to the
//! user. Control flow never depends on anything printed here.

use indicatif::{ProgressBar, ProgressStyle};

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}

/// Create a spinner for operations with unknown duration
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Print a phase heading ("Reading targets ...")
pub fn phase(message: &str) {
    println!("{message} ...");
}

/// Print a success line
pub fn success(message: &str) {
    println!("{} {message}", status::SUCCESS);
}

/// Print an informational line
pub fn info(message: &str) {
    println!("{} {message}", status::INFO);
}

/// Print a top-level error
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} {error:#}", status::ERROR);
}
