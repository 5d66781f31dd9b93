use crate::guard::GuardBlock;
use crate::handlers::{HandlerDetector, HandlerMatch};
use crate::patcher::common::{find_try_opening, guarded_after, render_guard_for, split_lines};
use crate::patcher::functions::add_guard_to_function;

/// Result of one single-handler pass over a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// The marker is already present somewhere in the file.
    AlreadyGuarded,
    /// No exported handler declaration was found.
    NoHandler,
    /// A handler was found but no `try {` line follows it.
    NoTry(HandlerMatch),
    /// The guard was inserted after the handler's `try {` line.
    Patched {
        /// The handler that received the guard.
        handler: HandlerMatch,
        /// The rewritten buffer.
        source: String,
    },
}

/// Guards the first exported handler in `source`, unless the file is already guarded.
pub fn patch_first_handler(
    source: &str,
    detector: &HandlerDetector,
    guard: &GuardBlock,
) -> PassOutcome {
    if guard.is_applied(source) {
        return PassOutcome::AlreadyGuarded;
    }

    let lines = split_lines(source);
    let Some(handler) = detector.find_first(&lines) else {
        return PassOutcome::NoHandler;
    };
    tracing::debug!(line = handler.line_number(), method = %handler.method, "found handler");

    match add_guard_to_function(source, handler.line, guard) {
        Some(patched) => PassOutcome::Patched {
            handler,
            source: patched,
        },
        None => PassOutcome::NoTry(handler),
    }
}

/// Result of guarding every handler in a buffer in one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllHandlersPatch {
    /// The rewritten buffer (equal to the input when nothing was patched).
    pub source: String,
    /// Handlers that received a guard.
    pub patched: Vec<HandlerMatch>,
    /// Handlers whose `try {` block already starts with the marker.
    pub already_guarded: Vec<HandlerMatch>,
    /// Handlers with no `try {` line before the next handler.
    pub missing_try: Vec<HandlerMatch>,
}

impl AllHandlersPatch {
    /// True if at least one guard was inserted.
    pub fn is_modified(&self) -> bool {
        !self.patched.is_empty()
    }
}

/// Guards every exported handler in `source` in a single scan.
///
/// Each handler's `try {` search stops at the next handler declaration, and
/// handlers whose try block already opens with the marker are left alone.
/// Line numbers in the result refer to the input buffer.
pub fn patch_all_handlers(
    source: &str,
    detector: &HandlerDetector,
    guard: &GuardBlock,
) -> AllHandlersPatch {
    let lines = split_lines(source);
    let handlers = detector.find_all(&lines);

    let mut result = AllHandlersPatch::default();
    let mut insertions: Vec<(usize, String)> = Vec::new();

    for (idx, handler) in handlers.iter().enumerate() {
        let until = handlers
            .get(idx + 1)
            .map(|next| next.line)
            .unwrap_or(lines.len());

        match find_try_opening(&lines, handler.line, until) {
            Some(try_line) if guarded_after(&lines, try_line, guard.marker()) => {
                result.already_guarded.push(*handler);
            }
            Some(try_line) => {
                tracing::debug!(line = handler.line_number(), method = %handler.method, try_line, "guarding handler");
                insertions.push((try_line, render_guard_for(guard, lines[try_line])));
                result.patched.push(*handler);
            }
            None => result.missing_try.push(*handler),
        }
    }

    if insertions.is_empty() {
        result.source = source.to_string();
        return result;
    }

    let mut out: Vec<&str> = Vec::with_capacity(lines.len() + insertions.len());
    let mut pending = insertions.iter().peekable();
    for (i, line) in lines.iter().copied().enumerate() {
        out.push(line);
        if let Some((_, block)) = pending.next_if(|(at, _)| *at == i) {
            out.push(block.as_str());
        }
    }
    result.source = out.join("\n");
    result
}
