//! Basic facility usage example
//!
//! Demonstrates registering a facility, writing at different importance
//! levels, and steering output with a control string.
//!
//! Run with: cargo run --example basic_usage

use mlog::prelude::*;
use mlog::{merror, minfo, mwarn};

fn main() -> Result<()> {
    println!("=== mlog - Basic Usage Example ===\n");

    // Create a facility writing to stderr and register it so control
    // strings can address it by name.
    let app = Facility::new("app");
    mlog::register(app.clone())?;

    println!("1. Writing at different importance levels:");
    app.debug().write("starting in debug mode\n");
    app.info().write("listening on 127.0.0.1:8080\n");
    app.warn().write("configuration file missing, using defaults\n");
    app.error().write("connection refused\n");

    println!("\n2. Macros format a complete line in one call:");
    minfo!(app, "processed {} records", 42);
    mwarn!(app, "queue depth at {}%", 85);

    println!("\n3. Disabling everything below WARN:");
    mlog::control("none, >=warn")?;
    app.info().write("this line is suppressed\n");
    app.warn().write("warnings still get through\n");
    merror!(app, "and so do errors");

    println!("\n4. Re-enabling everything:");
    mlog::control("all")?;
    app.info().write("info is back\n");

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
