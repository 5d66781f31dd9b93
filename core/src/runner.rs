#![deny(missing_docs)]

//! # Runner
//!
//! Drives the patcher over a list of files. Each file is read, patched in
//! memory and written back before the next one is touched. Per-file problems
//! (missing files, IO failures) are reported and do not stop the run.
//!
//! Progress is pushed to a [`Reporter`] so callers decide how to present it.

use crate::error::{AppError, AppResult};
use crate::guard::GuardBlock;
use crate::handlers::{HandlerDetector, HandlerMatch};
use crate::patcher::{patch_all_handlers, patch_first_handler, PassOutcome};
use crate::targets::default_route_files;
use std::fs;
use std::path::{Path, PathBuf};

/// Upper bound on single-handler passes per file.
pub const DEFAULT_MAX_PASSES: usize = 5;

/// How handlers inside one file are guarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassStrategy {
    /// Guard the first handler per pass, rescanning up to `max_passes` times.
    /// The file-global marker stops the loop after the first insertion.
    Repeated {
        /// Maximum number of passes.
        max_passes: usize,
    },
    /// Guard every unguarded handler in a single scan.
    AllHandlers,
}

impl Default for PassStrategy {
    fn default() -> Self {
        PassStrategy::Repeated {
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

/// Everything a run needs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory relative file paths are resolved against.
    pub root: PathBuf,
    /// Files to patch, in processing order.
    pub files: Vec<PathBuf>,
    /// Handler strategy.
    pub strategy: PassStrategy,
    /// Compute and report, but never write.
    pub dry_run: bool,
    /// The block to inject.
    pub guard: GuardBlock,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            files: default_route_files(),
            strategy: PassStrategy::default(),
            dry_run: false,
            guard: GuardBlock::default(),
        }
    }
}

/// Progress notifications emitted while processing a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEvent {
    /// Processing of the file begins.
    Started,
    /// The file does not exist; it is skipped.
    Missing,
    /// The file already carries the marker; it is skipped.
    AlreadyGuarded,
    /// An exported handler was found and will be guarded (if it has a try block).
    HandlerFound(HandlerMatch),
    /// A handler whose try block already opens with the guard.
    HandlerAlreadyGuarded(HandlerMatch),
    /// Nothing was inserted.
    Unchanged,
    /// Guards were inserted.
    Patched {
        /// Number of guard blocks inserted.
        guards: usize,
        /// False in dry-run mode.
        written: bool,
    },
    /// Reading or writing the file failed.
    Failed(String),
}

/// Receives [`FileEvent`]s in the order they happen.
pub trait Reporter {
    /// Called for every event; `path` is the file as configured (not resolved).
    fn report(&mut self, path: &Path, event: &FileEvent);
}

/// Terminal state of a file after all passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file does not exist.
    Skipped,
    /// The marker was present before the run.
    AlreadyGuarded,
    /// No exported handler was found.
    NoHandler,
    /// Handlers were found but none had a `try {` line.
    NoTry,
    /// At least one guard was inserted.
    Patched,
}

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// The file as configured.
    pub path: PathBuf,
    /// Terminal state.
    pub outcome: FileOutcome,
    /// Number of guard blocks inserted.
    pub guards_added: usize,
    /// Number of patcher passes run.
    pub passes: usize,
}

/// Result of a whole run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// One report per successfully processed file.
    pub reports: Vec<FileReport>,
    /// Files that failed with an IO error.
    pub failures: Vec<(PathBuf, AppError)>,
}

impl RunSummary {
    /// Number of files that received at least one guard.
    pub fn patched_files(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| r.outcome == FileOutcome::Patched)
            .count()
    }

    /// True when no file failed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Processes every configured file in order.
///
/// Only setup problems are returned as errors; per-file failures are
/// collected in [`RunSummary::failures`].
pub fn run(config: &RunConfig, reporter: &mut impl Reporter) -> AppResult<RunSummary> {
    if let PassStrategy::Repeated { max_passes: 0 } = config.strategy {
        return Err(AppError::General("max passes must be at least 1".into()));
    }

    let detector = HandlerDetector::new()?;
    let mut summary = RunSummary::default();

    for file in &config.files {
        reporter.report(file, &FileEvent::Started);
        match process_file(config, &detector, file, reporter) {
            Ok(report) => summary.reports.push(report),
            Err(e) => {
                tracing::warn!(path = %file.display(), error = %e, "failed to patch file");
                reporter.report(file, &FileEvent::Failed(e.to_string()));
                summary.failures.push((file.clone(), e));
            }
        }
    }

    Ok(summary)
}

/// Patches one file according to `config`.
pub fn process_file(
    config: &RunConfig,
    detector: &HandlerDetector,
    file: &Path,
    reporter: &mut impl Reporter,
) -> AppResult<FileReport> {
    let resolved = config.root.join(file);

    if !resolved.exists() {
        reporter.report(file, &FileEvent::Missing);
        return Ok(FileReport {
            path: file.to_path_buf(),
            outcome: FileOutcome::Skipped,
            guards_added: 0,
            passes: 0,
        });
    }

    let original = fs::read_to_string(&resolved)
        .map_err(|e| with_path(e, "read", &resolved))?;

    let (patched, mut report) = match config.strategy {
        PassStrategy::Repeated { max_passes } => {
            repeated_passes(&original, max_passes, detector, &config.guard, file, reporter)
        }
        PassStrategy::AllHandlers => single_scan(&original, detector, &config.guard, file, reporter),
    };
    report.path = file.to_path_buf();

    match patched {
        Some(source) => {
            if !config.dry_run {
                fs::write(&resolved, &source).map_err(|e| with_path(e, "write", &resolved))?;
                tracing::debug!(path = %resolved.display(), bytes = source.len(), "wrote patched file");
            }
            reporter.report(
                file,
                &FileEvent::Patched {
                    guards: report.guards_added,
                    written: !config.dry_run,
                },
            );
        }
        None if report.outcome == FileOutcome::AlreadyGuarded => {
            reporter.report(file, &FileEvent::AlreadyGuarded);
        }
        None => reporter.report(file, &FileEvent::Unchanged),
    }

    Ok(report)
}

/// Keeps the IO error kind and adds the file path to the message.
fn with_path(err: std::io::Error, action: &str, path: &Path) -> AppError {
    AppError::Io(std::io::Error::new(
        err.kind(),
        format!("Failed to {} file {:?}: {}", action, path, err),
    ))
}

/// Runs single-handler passes until one of them changes nothing.
fn repeated_passes(
    original: &str,
    max_passes: usize,
    detector: &HandlerDetector,
    guard: &GuardBlock,
    file: &Path,
    reporter: &mut impl Reporter,
) -> (Option<String>, FileReport) {
    let mut current: Option<String> = None;
    let mut guards_added = 0;
    let mut passes = 0;
    let mut terminal = FileOutcome::NoHandler;

    while passes < max_passes {
        passes += 1;
        let source = current.as_deref().unwrap_or(original);

        match patch_first_handler(source, detector, guard) {
            PassOutcome::Patched { handler, source } => {
                reporter.report(file, &FileEvent::HandlerFound(handler));
                guards_added += 1;
                current = Some(source);
            }
            PassOutcome::AlreadyGuarded => {
                terminal = FileOutcome::AlreadyGuarded;
                break;
            }
            PassOutcome::NoHandler => {
                terminal = FileOutcome::NoHandler;
                break;
            }
            PassOutcome::NoTry(handler) => {
                tracing::debug!(line = handler.line_number(), method = %handler.method, "handler has no try block");
                reporter.report(file, &FileEvent::HandlerFound(handler));
                terminal = FileOutcome::NoTry;
                break;
            }
        }
    }

    let outcome = if guards_added > 0 {
        FileOutcome::Patched
    } else {
        terminal
    };

    (
        current,
        FileReport {
            path: PathBuf::new(),
            outcome,
            guards_added,
            passes,
        },
    )
}

/// Guards every handler in one pass.
fn single_scan(
    original: &str,
    detector: &HandlerDetector,
    guard: &GuardBlock,
    file: &Path,
    reporter: &mut impl Reporter,
) -> (Option<String>, FileReport) {
    let patch = patch_all_handlers(original, detector, guard);

    for handler in &patch.already_guarded {
        reporter.report(file, &FileEvent::HandlerAlreadyGuarded(*handler));
    }
    for handler in &patch.patched {
        reporter.report(file, &FileEvent::HandlerFound(*handler));
    }

    let outcome = if patch.is_modified() {
        FileOutcome::Patched
    } else if !patch.already_guarded.is_empty() {
        FileOutcome::AlreadyGuarded
    } else if !patch.missing_try.is_empty() {
        FileOutcome::NoTry
    } else {
        FileOutcome::NoHandler
    };

    let report = FileReport {
        path: PathBuf::new(),
        outcome,
        guards_added: patch.patched.len(),
        passes: 1,
    };

    let modified = patch.is_modified();
    (modified.then_some(patch.source), report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<FileEvent>);

    impl Reporter for Recorder {
        fn report(&mut self, _path: &Path, event: &FileEvent) {
            self.0.push(event.clone());
        }
    }

    #[test]
    fn test_default_config_uses_builtin_list() {
        let config = RunConfig::default();
        assert_eq!(config.files.len(), 11);
        assert_eq!(
            config.strategy,
            PassStrategy::Repeated {
                max_passes: DEFAULT_MAX_PASSES
            }
        );
        assert!(!config.dry_run);
    }

    #[test]
    fn test_zero_passes_rejected() {
        let config = RunConfig {
            files: vec![],
            strategy: PassStrategy::Repeated { max_passes: 0 },
            ..RunConfig::default()
        };
        assert!(run(&config, &mut Recorder::default()).is_err());
    }

    #[test]
    fn test_repeated_stops_at_marker() {
        let detector = HandlerDetector::new().unwrap();
        let code = "export async function GET() {\n  try {\n  } catch {}\n}\nexport async function POST() {\n  try {\n  } catch {}\n}\n";
        let mut rec = Recorder::default();
        let (patched, report) = repeated_passes(
            code,
            DEFAULT_MAX_PASSES,
            &detector,
            &GuardBlock::default(),
            Path::new("route.ts"),
            &mut rec,
        );
        assert!(patched.is_some());
        assert_eq!(report.outcome, FileOutcome::Patched);
        assert_eq!(report.guards_added, 1);
        assert_eq!(report.passes, 2);
        assert_eq!(rec.0.len(), 1);
    }

    #[test]
    fn test_repeated_respects_bound() {
        // A guard without the marker never terminates the loop by itself.
        let detector = HandlerDetector::new().unwrap();
        let guard = GuardBlock::new("// absent", "  check()");
        let code = "export async function GET() {\n  try {\n  } catch {}\n}\n";
        let mut rec = Recorder::default();
        let (_, report) = repeated_passes(code, 3, &detector, &guard, Path::new("r.ts"), &mut rec);
        assert_eq!(report.passes, 3);
        assert_eq!(report.guards_added, 3);
    }

    #[test]
    fn test_single_scan_no_try() {
        let detector = HandlerDetector::new().unwrap();
        let code = "export async function GET() {\n  return null\n}\n";
        let mut rec = Recorder::default();
        let (patched, report) =
            single_scan(code, &detector, &GuardBlock::default(), Path::new("r.ts"), &mut rec);
        assert!(patched.is_none());
        assert_eq!(report.outcome, FileOutcome::NoTry);
    }
}
