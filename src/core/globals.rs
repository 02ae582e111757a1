//! Process-wide lazy defaults
//!
//! The epoch, program name, default stderr destination, and default
//! registry are initialized on first use and never torn down. An explicit
//! [`initialize`] call is idempotent and optional.

use super::error::Result;
use super::facility::Facility;
use super::importance::Importance;
use super::registry::FacilityRegistry;
use super::stream::Stream;
use crate::dest::Destination;
use parking_lot::Mutex;
use std::io::IsTerminal;
use std::sync::OnceLock;
use std::time::Instant;

static EPOCH: OnceLock<Instant> = OnceLock::new();
static PROGRAM_NAME: OnceLock<String> = OnceLock::new();
static USE_COLOR: OnceLock<bool> = OnceLock::new();
static DEFAULT_DESTINATION: OnceLock<Destination> = OnceLock::new();
static DEFAULT_REGISTRY: OnceLock<Mutex<FacilityRegistry>> = OnceLock::new();

/// The monotonic instant the library considers the start of the program,
/// captured at first use. Elapsed-seconds prefix fields count from here.
pub fn epoch() -> Instant {
    *EPOCH.get_or_init(Instant::now)
}

/// Best-effort detected program name: the executable's file stem, falling
/// back to `argv[0]`, then `"?"`.
pub fn program_name() -> &'static str {
    PROGRAM_NAME.get_or_init(detect_program_name)
}

fn detect_program_name() -> String {
    if let Ok(path) = std::env::current_exe() {
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            return stem.to_string();
        }
    }
    std::env::args()
        .next()
        .and_then(|arg0| {
            std::path::Path::new(&arg0)
                .file_name()
                .and_then(|s| s.to_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "?".to_string())
}

/// Whether default facilities emit color: on iff stderr is a terminal.
pub fn default_use_color() -> bool {
    *USE_COLOR.get_or_init(|| std::io::stderr().is_terminal())
}

/// The shared default destination: the process standard error stream.
pub fn default_destination() -> Destination {
    DEFAULT_DESTINATION
        .get_or_init(Destination::stderr)
        .clone()
}

/// The default registry, named `mlog`, initially empty of facilities.
pub fn registry() -> &'static Mutex<FacilityRegistry> {
    DEFAULT_REGISTRY.get_or_init(|| Mutex::new(FacilityRegistry::new("mlog")))
}

/// Force initialization of every process-wide default. Idempotent.
pub fn initialize() {
    let _ = epoch();
    let _ = program_name();
    let _ = default_use_color();
    let _ = default_destination();
    let _ = registry();
}

/// Apply a control string to the default registry.
pub fn control(input: &str) -> Result<()> {
    registry().lock().control(input)
}

/// Register a facility with the default registry, leaving its streams'
/// enable state untouched.
pub fn register(facility: Facility) -> Result<()> {
    registry().lock().insert(facility)
}

/// Register a facility with the default registry and adjust its streams
/// to the registry's current enabled-importance set.
pub fn register_adjusted(facility: Facility) -> Result<()> {
    registry().lock().insert_adjusted(facility)
}

/// Look up a facility in the default registry.
pub fn facility(control_name: &str) -> Option<Facility> {
    registry().lock().facility(control_name).cloned()
}

/// Look up one stream in the default registry.
pub fn stream(control_name: &str, importance: Importance) -> Option<Stream> {
    registry().lock().stream(control_name, importance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_is_stable() {
        assert_eq!(epoch(), epoch());
    }

    #[test]
    fn test_program_name_nonempty() {
        assert!(!program_name().is_empty());
    }

    #[test]
    fn test_initialize_idempotent() {
        initialize();
        initialize();
        assert_eq!(registry().lock().name(), "mlog");
    }

    #[test]
    fn test_register_and_lookup() {
        let name = "globals-test-facility";
        let fac = Facility::with_destination(name, Destination::null());
        register(fac).unwrap();
        assert!(facility(name).is_some());
        assert!(stream(name, Importance::Info).is_some());
    }
}
