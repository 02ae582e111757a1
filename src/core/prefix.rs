//! Prefix rendering for message lines

use super::globals;
use super::properties::MessageProperties;
use std::fmt::Write as _;

/// Renders the leading portion of each message line from its properties.
///
/// Implement this to fully replace the line prefix; most users configure
/// [`DefaultPrefix`] instead.
pub trait Prefix: Send + Sync {
    fn render(&self, properties: &MessageProperties) -> String;
}

/// The standard prefix: optional program name, pid, elapsed seconds,
/// wall-clock timestamp, facility name, and importance field, each
/// independently toggleable.
///
/// With every toggle on the shape is
/// `<progName>[<pid>] <elapsed>s <facility>[<IMP  >] `
/// and the rendered text always ends in a single space. When `use_color`
/// is set and the merged color spec is non-default, the ANSI escape wraps
/// the prefix text.
#[derive(Debug, Clone)]
pub struct DefaultPrefix {
    show_program: bool,
    show_pid: bool,
    show_elapsed: bool,
    show_wall_clock: bool,
    show_facility: bool,
    show_importance: bool,
}

impl DefaultPrefix {
    pub fn new() -> Self {
        Self {
            show_program: true,
            show_pid: true,
            show_elapsed: true,
            show_wall_clock: false,
            show_facility: true,
            show_importance: true,
        }
    }

    /// A prefix with every field off; renders the empty string.
    pub fn bare() -> Self {
        Self {
            show_program: false,
            show_pid: false,
            show_elapsed: false,
            show_wall_clock: false,
            show_facility: false,
            show_importance: false,
        }
    }

    #[must_use]
    pub fn with_program(mut self, on: bool) -> Self {
        self.show_program = on;
        self
    }

    #[must_use]
    pub fn with_pid(mut self, on: bool) -> Self {
        self.show_pid = on;
        self
    }

    #[must_use]
    pub fn with_elapsed(mut self, on: bool) -> Self {
        self.show_elapsed = on;
        self
    }

    /// Show a wall-clock timestamp (`%Y-%m-%d %H:%M:%S`) in addition to,
    /// or instead of, the elapsed-seconds field.
    #[must_use]
    pub fn with_wall_clock(mut self, on: bool) -> Self {
        self.show_wall_clock = on;
        self
    }

    #[must_use]
    pub fn with_facility(mut self, on: bool) -> Self {
        self.show_facility = on;
        self
    }

    #[must_use]
    pub fn with_importance(mut self, on: bool) -> Self {
        self.show_importance = on;
        self
    }
}

impl Default for DefaultPrefix {
    fn default() -> Self {
        Self::new()
    }
}

impl Prefix for DefaultPrefix {
    fn render(&self, properties: &MessageProperties) -> String {
        let mut text = String::new();

        if self.show_program {
            text.push_str(globals::program_name());
        }
        if self.show_pid {
            let _ = write!(text, "[{}]", std::process::id());
        }
        if (self.show_program || self.show_pid) && (self.show_elapsed || self.show_wall_clock || self.show_facility || self.show_importance) {
            text.push(' ');
        }
        if self.show_elapsed {
            let _ = write!(text, "{:.5}s ", globals::epoch().elapsed().as_secs_f64());
        }
        if self.show_wall_clock {
            let _ = write!(text, "{} ", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
        }
        if self.show_facility {
            if let Some(name) = properties.facility_name.as_deref() {
                text.push_str(name);
            }
        }
        if self.show_importance {
            let importance = properties.importance.unwrap_or_default();
            let _ = write!(text, "[{}]", importance.padded());
        }
        if !text.is_empty() && !text.ends_with(' ') {
            text.push(' ');
        }

        if properties.use_color.unwrap_or(false) {
            if let Some(color) = properties.color {
                if !color.is_default() && !text.is_empty() {
                    use crate::core::color::ColorSpec;
                    return format!("{}{}{}", color.escape(), text, ColorSpec::reset());
                }
            }
        }
        text
    }
}
