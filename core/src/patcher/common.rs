use crate::guard::GuardBlock;

/// Literal that opens a `try` block once the line is trimmed.
pub(crate) const TRY_OPENING: &str = "try {";

/// Splits a buffer into lines on `\n` only.
///
/// Joining the result with `\n` gives back the exact input, including a
/// trailing newline (as an empty last element) and any `\r`.
pub(crate) fn split_lines(source: &str) -> Vec<&str> {
    source.split('\n').collect()
}

/// Leading whitespace of a line, exactly as written (spaces or tabs).
pub(crate) fn leading_whitespace(line: &str) -> &str {
    let trimmed = line.trim_start();
    &line[..line.len() - trimmed.len()]
}

/// Finds the first `try {` line at or after `from` and before `until`.
pub(crate) fn find_try_opening(lines: &[&str], from: usize, until: usize) -> Option<usize> {
    let until = until.min(lines.len());
    (from..until).find(|&i| lines[i].trim().starts_with(TRY_OPENING))
}

/// Renders `guard` for insertion after `anchor`, matching its indentation
/// and its line ending (`\r\n` files get `\r` on every inserted line).
pub(crate) fn render_guard_for(guard: &GuardBlock, anchor: &str) -> String {
    let rendered = guard.render(leading_whitespace(anchor));
    if anchor.ends_with('\r') {
        rendered
            .split('\n')
            .map(|line| format!("{}\r", line))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        rendered
    }
}

/// True if the first non-blank line after `try_line` contains `marker`.
pub(crate) fn guarded_after(lines: &[&str], try_line: usize, marker: &str) -> bool {
    lines
        .iter()
        .skip(try_line + 1)
        .find(|l| !l.trim().is_empty())
        .is_some_and(|l| l.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_preserves_trailing_newline() {
        let src = "a\r\nb\n";
        let lines = split_lines(src);
        assert_eq!(lines, vec!["a\r", "b", ""]);
        assert_eq!(lines.join("\n"), src);
    }

    #[test]
    fn test_leading_whitespace() {
        assert_eq!(leading_whitespace("    try {"), "    ");
        assert_eq!(leading_whitespace("\t try {"), "\t ");
        assert_eq!(leading_whitespace("try {"), "");
        assert_eq!(leading_whitespace("   "), "   ");
    }

    #[test]
    fn test_find_try_opening() {
        let lines = vec!["fn", "  const a = 1", "  try {", "    try {"];
        assert_eq!(find_try_opening(&lines, 0, lines.len()), Some(2));
        assert_eq!(find_try_opening(&lines, 3, lines.len()), Some(3));
        assert_eq!(find_try_opening(&lines, 0, 2), None);
    }

    #[test]
    fn test_try_needs_brace_on_same_line() {
        let lines = vec!["  try", "  {", "  tryAgain {"];
        assert_eq!(find_try_opening(&lines, 0, lines.len()), None);
    }

    #[test]
    fn test_render_guard_for_crlf() {
        let guard = GuardBlock::new("// m", "  // m\n\n  go()");
        assert_eq!(render_guard_for(&guard, "  try {\r"), "    // m\r\n\r\n    go()\r");
        assert_eq!(render_guard_for(&guard, "  try {"), "    // m\n\n    go()");
    }

    #[test]
    fn test_guarded_after() {
        let lines = vec!["  try {", "", "    // mark", "  } catch {"];
        assert!(guarded_after(&lines, 0, "// mark"));
        assert!(!guarded_after(&lines, 2, "// mark"));
    }
}
