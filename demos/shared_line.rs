//! Shared-line discipline example
//!
//! Demonstrates partial messages, interleaving across streams sharing one
//! sink, and long-lived message handles.
//!
//! Run with: cargo run --example shared_line

use mlog::prelude::*;

fn main() -> Result<()> {
    let app = Facility::new("app");

    // Build a progress line piece by piece. Each write without a trailing
    // newline leaves the line open; other streams may interrupt it, and
    // the sink closes the open line first so output stays readable.
    let progress = app.info();
    progress.write("scanning ");
    for step in 1..=3 {
        write!(progress, "{}.. ", step);
        if step == 2 {
            app.warn().write("slow response from shard 2\n");
        }
    }
    progress.write("done\n");

    // A handle detaches the open line from the stream, so later writes to
    // the stream are separate messages and the handle finishes its own
    // line independently.
    let info = app.info();
    info.write("loading config ");
    let mut handle = info.duplicate();
    info.write("unrelated status line\n");
    handle.write("ok\n");
    handle.finish();

    // Disabled streams accumulate quietly and release the held text when
    // re-enabled.
    let debug = app.debug();
    debug.disable();
    debug.write("hidden while disabled");
    debug.enable();
    debug.write(" then released\n");

    Ok(())
}
