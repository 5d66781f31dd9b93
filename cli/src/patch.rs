#![deny(missing_docs)]

//! # Patch Command
//!
//! Adds the prisma availability guard to exported route handlers.
//!
//! 1. **Targets**: explicit files, a discovered directory, or the built-in list.
//! 2. **Patch**: one handler per pass (default) or all handlers in one scan.
//! 3. **Report**: one console line per event, a closing summary line.

use crate::discover::discover_route_files;
use crate::error::{CliError, CliResult};
use clap::builder::TypedValueParser as _;
use route_guard_core::{
    default_route_files, run, FileEvent, PassStrategy, Reporter, RunConfig, RunSummary,
    DEFAULT_MAX_PASSES,
};
use std::path::{Path, PathBuf};

/// Arguments for the patch run.
#[derive(clap::Args, Debug, Clone)]
pub struct PatchArgs {
    /// Route files to patch, relative to `--root`. Defaults to the built-in list.
    pub files: Vec<PathBuf>,

    /// Project root that relative paths resolve against.
    #[clap(long, env = "ROUTE_GUARD_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Patch every `route.ts` / `route.js` found under this directory instead.
    #[clap(long, conflicts_with = "files")]
    pub discover: Option<PathBuf>,

    /// Maximum single-handler passes per file.
    #[clap(long, default_value_t = DEFAULT_MAX_PASSES, value_parser = clap::value_parser!(u64).range(1..).map(|v| v as usize))]
    pub max_passes: usize,

    /// Guard every exported handler in a single scan.
    #[clap(long, conflicts_with = "max_passes")]
    pub all_handlers: bool,

    /// Report what would change without writing any file.
    #[clap(long)]
    pub dry_run: bool,
}

impl PatchArgs {
    /// Builds the run configuration, resolving the target list.
    pub fn to_config(&self) -> CliResult<RunConfig> {
        let files = if let Some(dir) = &self.discover {
            discover_route_files(&self.root, dir)?
        } else if self.files.is_empty() {
            default_route_files()
        } else {
            self.files.clone()
        };

        let strategy = if self.all_handlers {
            PassStrategy::AllHandlers
        } else {
            PassStrategy::Repeated {
                max_passes: self.max_passes,
            }
        };

        Ok(RunConfig {
            root: self.root.clone(),
            files,
            strategy,
            dry_run: self.dry_run,
            ..RunConfig::default()
        })
    }
}

/// Prints events the way a person watching the run expects to read them.
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// The console line for an event, or `None` if the event is silent.
    pub fn render(path: &Path, event: &FileEvent) -> Option<String> {
        let p = path.display();
        let line = match event {
            FileEvent::Started => format!("Processing {}...", p),
            FileEvent::Missing => format!("File not found: {}", p),
            FileEvent::AlreadyGuarded => format!("Skipping {} - already has null checks", p),
            FileEvent::HandlerFound(h) => format!("  Found {} at line {}", h.method, h.line_number()),
            FileEvent::HandlerAlreadyGuarded(h) => format!(
                "  {} at line {} already has a null check",
                h.method,
                h.line_number()
            ),
            FileEvent::Unchanged => format!("○ No changes needed for {}", p),
            FileEvent::Patched { written: true, .. } => format!("✓ Added null check to {}", p),
            FileEvent::Patched {
                written: false,
                guards,
            } => format!("◌ Would add {} null check(s) to {} (dry run)", guards, p),
            FileEvent::Failed(_) => return None,
        };
        Some(line)
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, path: &Path, event: &FileEvent) {
        if let FileEvent::Failed(msg) = event {
            eprintln!("Error: {} ({})", msg, path.display());
        } else if let Some(line) = Self::render(path, event) {
            println!("{}", line);
        }
    }
}

/// Executes the patch run.
///
/// # Arguments
///
/// * `args` - Command arguments.
/// * `reporter` - Receives per-file progress (use `ConsoleReporter` for real runs).
pub fn execute(args: &PatchArgs, reporter: &mut impl Reporter) -> CliResult<RunSummary> {
    let config = args.to_config()?;

    println!("Adding null checks to all API routes...\n");
    let summary = run(&config, reporter)?;

    if summary.is_success() {
        println!("\n✓ All files processed!");
        Ok(summary)
    } else {
        Err(CliError::General(format!(
            "{} of {} file(s) failed",
            summary.failures.len(),
            config.files.len()
        )))
    }
}
