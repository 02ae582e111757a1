//! Destination graph example
//!
//! Demonstrates fanning one facility out to several sinks, rate-limiting a
//! branch, and attaching per-branch property overrides.
//!
//! Run with: cargo run --example filtered_destinations

use mlog::prelude::*;
use std::time::Duration;

fn main() -> Result<()> {
    let log_path = std::env::temp_dir().join("filtered_destinations.log");

    // Everything goes to the file; the console only sees one message per
    // two seconds, with Windows-style line endings as a demonstration of
    // per-branch overrides.
    let console = Destination::time_limit(
        Destination::stderr().with_properties(
            MessageProperties::new()
                .with_buffered(true)
                .with_line_termination("\r\n"),
        ),
        Duration::from_secs(2),
    );
    let graph = Destination::multiplex(vec![Destination::file(&log_path)?, console]);

    let worker = Facility::with_destination("worker", graph);

    // The burst lands in the file in full; the console branch forwards
    // only the first message of each two-second window.
    for i in 0..100 {
        worker.info().write(&format!("processed batch {}\n", i));
    }

    // A capped branch: at most three messages ever reach it.
    let capped = Destination::sequence(Destination::stderr(), 0, 1, 3);
    let audit = Facility::with_destination("audit", capped);
    for i in 0..10 {
        audit.warn().write(&format!("audit event {}\n", i));
    }

    println!("full log written to {}", log_path.display());
    Ok(())
}
