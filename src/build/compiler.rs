//! Builder for running the LaTeX compiler over a generated deck

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

/// Compiler used when none is configured
pub const DEFAULT_COMPILER: &str = "lualatex";

/// Two passes settle section numbering, the outline and page counts
pub const DEFAULT_PASSES: usize = 2;

/// Auxiliary files beamer leaves next to the PDF
pub const INTERMEDIATE_EXTENSIONS: [&str; 6] = ["toc", "snm", "out", "nav", "log", "aux"];

/// A compiler pass that exited unsuccessfully
///
/// Never raised: the PDF produced so far is usually still worth a look, so
/// failures are logged and collected in the [`BuildReport`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{program} failed on pass {pass} ({})", describe_exit(*code))]
pub struct ExternalToolError {
    pub program: String,
    pub pass: usize,
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Errors that stop a build outright
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of a [`Compiler::compile`] run
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Where the compiler writes the PDF
    pub pdf: PathBuf,
    /// Number of compiler invocations
    pub passes: usize,
    /// Passes that exited unsuccessfully
    pub failures: Vec<ExternalToolError>,
    /// Intermediate files removed afterwards
    pub removed: Vec<PathBuf>,
}

impl BuildReport {
    /// Whether every pass exited successfully
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fluent builder for compiler invocations
///
/// # Examples
///
/// ```rust,no_run
/// use beamer_slides::build::Compiler;
/// use std::path::Path;
///
/// let report = Compiler::new()
///     .with_nonstop(true)
///     .with_cleanup(false)
///     .compile(Path::new("talk_slides.tex"))
///     .unwrap();
/// assert_eq!(report.passes, 2);
/// ```
#[derive(Debug, Clone)]
pub struct Compiler {
    program: String,
    passes: usize,
    nonstop: bool,
    cleanup: bool,
    low_priority: bool,
    output_dir: Option<PathBuf>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self {
            program: DEFAULT_COMPILER.to_string(),
            passes: DEFAULT_PASSES,
            nonstop: false,
            cleanup: true,
            low_priority: false,
            output_dir: None,
        }
    }
}

impl Compiler {
    /// Create a compiler with defaults: `lualatex`, two passes, cleanup on
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compiler executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Set how many times the compiler runs
    pub fn with_passes(mut self, passes: usize) -> Self {
        self.passes = passes;
        self
    }

    /// Run without interactive error prompts, so a batch run cannot stall
    pub fn with_nonstop(mut self, nonstop: bool) -> Self {
        self.nonstop = nonstop;
        self
    }

    /// Remove intermediate files after compiling
    pub fn with_cleanup(mut self, cleanup: bool) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Run through `nice -n 19` (Unix only)
    pub fn with_low_priority(mut self, low_priority: bool) -> Self {
        self.low_priority = low_priority;
        self
    }

    /// Directory for the PDF and auxiliary files
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Build the process invocation for one pass
    pub fn command(&self, tex_file: &Path) -> Command {
        let mut cmd = if self.low_priority && cfg!(unix) {
            let mut nice = Command::new("nice");
            nice.args(["-n", "19", self.program.as_str()]);
            nice
        } else {
            Command::new(&self.program)
        };

        if self.nonstop {
            cmd.args(["-interaction", "nonstopmode"]);
        }
        if let Some(dir) = &self.output_dir {
            cmd.arg(format!("-output-directory={}", dir.display()));
        }
        cmd.arg(tex_file);
        cmd
    }

    /// Directory the compiler writes into for `tex_file`
    fn artifact_dir(&self, tex_file: &Path) -> PathBuf {
        self.output_dir
            .clone()
            .or_else(|| tex_file.parent().map(Path::to_path_buf))
            .unwrap_or_default()
    }

    /// Compile `tex_file`, then optionally remove intermediate files
    ///
    /// Unsuccessful passes are recorded, not raised, and cleanup runs
    /// whatever the compiler's exit status.
    pub fn compile(&self, tex_file: &Path) -> Result<BuildReport, BuildError> {
        let cmd = self.command(tex_file);
        let command_line = describe_command(&cmd);
        tracing::info!(target: "latex", "Compiling PDF with: {}", command_line);

        let mut failures = Vec::new();
        for pass in 1..=self.passes {
            tracing::debug!(target: "latex", "Pass {} of {}", pass, self.passes);
            let status = self
                .command(tex_file)
                .status()
                .map_err(|source| BuildError::Spawn {
                    program: self.program.clone(),
                    source,
                })?;

            if !status.success() {
                let failure = ExternalToolError {
                    program: self.program.clone(),
                    pass,
                    code: status.code(),
                };
                tracing::warn!(target: "latex", "{}", failure);
                failures.push(failure);
            }
        }

        let stem = tex_file.file_stem().unwrap_or_default();
        let base = self.artifact_dir(tex_file).join(stem);
        let removed = if self.cleanup {
            remove_intermediates(&base)
        } else {
            Vec::new()
        };

        Ok(BuildReport {
            pdf: append_extension(&base, "pdf"),
            passes: self.passes,
            failures,
            removed,
        })
    }
}

/// Delete `base.<ext>` for every intermediate extension that exists
///
/// Removal errors are logged and skipped.
pub fn remove_intermediates(base: &Path) -> Vec<PathBuf> {
    let mut removed = Vec::new();
    for ext in INTERMEDIATE_EXTENSIONS {
        let path = append_extension(base, ext);
        if !path.is_file() {
            continue;
        }
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(target: "latex", "rm {}", path.display());
                removed.push(path);
            }
            Err(e) => {
                tracing::debug!(target: "latex", "Could not remove {}: {}", path.display(), e);
            }
        }
    }
    removed
}

/// `base` plus `.ext`, keeping any dots already in the file name
fn append_extension(base: &Path, ext: &str) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

fn describe_command(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
