use crate::guard::GuardBlock;
use crate::patcher::common::{find_try_opening, leading_whitespace, render_guard_for, split_lines};

/// Inserts `guard` directly after the first `try {` line at or after `func_line`.
///
/// The guard is indented with the try line's own leading whitespace.
/// Returns `None` when no `try {` line follows, leaving the caller's text as is.
pub fn add_guard_to_function(source: &str, func_line: usize, guard: &GuardBlock) -> Option<String> {
    let mut lines = split_lines(source);
    let try_line = find_try_opening(&lines, func_line, lines.len())?;

    let anchor = lines[try_line];
    tracing::trace!(try_line, indent_len = leading_whitespace(anchor).len(), "rendering guard block");
    let rendered = render_guard_for(guard, anchor);

    lines.insert(try_line + 1, &rendered);
    Some(lines.join("\n"))
}
