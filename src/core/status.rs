use std::fmt;

use serde::Serialize;

/// Execution status of a controller.
///
/// `Error` is transient: it is set just before the `error` event and replaced
/// by `Idle` before `end`, so only an `error` listener can observe it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Not running; ready to start.
    #[default]
    Idle,
    /// A run is in flight (possibly suspended at a breakpoint).
    Running,
    /// The current run failed; about to return to `Idle`.
    Error,
}

impl Status {
    /// Lowercase name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Running => "running",
            Status::Error => "error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
