//! garden-triage CLI entry point.

#![allow(clippy::print_stderr)]

fn main() {
    if let Err(e) = garden_triage::run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
