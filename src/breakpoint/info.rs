use std::fmt;

use serde::{Deserialize, Serialize};

/// Where in the user's logical script a suspension occurred.
///
/// Opaque to the controller: the script supplies it, the observer interprets it
/// (e.g. to highlight a line of pseudo-code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BreakpointInfo {
    /// Logical line number.
    pub line: u32,
    /// Index of the step description shown next to the line.
    pub description: u32,
}

impl BreakpointInfo {
    /// Creates a new breakpoint descriptor.
    #[inline]
    pub const fn new(line: u32, description: u32) -> Self {
        Self { line, description }
    }
}

impl fmt::Display for BreakpointInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line={} description={}", self.line, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_plain_object() {
        let json = serde_json::to_value(BreakpointInfo::new(3, 1)).unwrap();
        assert_eq!(json, serde_json::json!({ "line": 3, "description": 1 }));
    }

    #[test]
    fn test_display() {
        assert_eq!(BreakpointInfo::new(1, 0).to_string(), "line=1 description=0");
    }
}
