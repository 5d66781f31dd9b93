#![deny(missing_docs)]

//! # Guard Block
//!
//! The snippet injected at the top of a handler's `try` block, together with
//! the marker used to detect that a file (or handler) has already been patched.

/// Marker line identifying an injected prisma availability check.
pub const PRISMA_GUARD_MARKER: &str = "// Check if prisma client is available";

/// Default guard body, written relative to the `try {` line it follows.
///
/// Body lines carry one level (two spaces) of indentation relative to `try`.
/// The trailing empty line separates the guard from the original body.
pub const PRISMA_GUARD_TEMPLATE: &str = "  // Check if prisma client is available
  if (!prisma) {
    return NextResponse.json(
      { success: false, error: 'Database connection not available' },
      { status: 503 }
    )
  }
";

/// A re-indentable block of guard code plus its idempotence marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardBlock {
    marker: String,
    template: String,
}

impl GuardBlock {
    /// Creates a guard block from a marker and a template.
    ///
    /// The marker should appear somewhere in the template, otherwise the
    /// rendered block will not be recognised on the next run.
    pub fn new(marker: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            template: template.into(),
        }
    }

    /// The marker substring.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Returns true if `source` already contains the marker anywhere.
    pub fn is_applied(&self, source: &str) -> bool {
        source.contains(&self.marker)
    }

    /// Renders the template with every non-blank line prefixed by `indent`.
    ///
    /// Blank template lines are emitted empty (no trailing whitespace). The
    /// result has no trailing newline; the final template newline shows up
    /// as one empty last line.
    pub fn render(&self, indent: &str) -> String {
        self.template
            .split('\n')
            .map(|line| {
                if line.trim().is_empty() {
                    String::new()
                } else {
                    format!("{}{}", indent, line)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for GuardBlock {
    fn default() -> Self {
        Self::new(PRISMA_GUARD_MARKER, PRISMA_GUARD_TEMPLATE)
    }
}
