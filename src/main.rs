//! beamer-slides CLI
//!
//! Usage:
//!   beamer-slides make <CONFIG> [BUILD OPTIONS]
//!   beamer-slides compare <OUTPUT> --dir <DIR>... [--label <LABEL>...]
//!                 [--plot <NAME>... | --ext <EXT>] [--title <TITLE>] [BUILD OPTIONS]
//!
//! Build options:
//!   --template <FILE>  Front-matter template (built-in beamer preamble if omitted)
//!   --no-compile       Only write the .tex files
//!   --no-cleanup       Keep .aux/.log/.nav/.out/.snm/.toc files
//!   --no-toc           Leave out the outline frame
//!   --nonstop          Run the compiler in nonstop mode
//!   --nice             Run the compiler at low priority
//!   --latex <CMD>      Compiler to run (default: lualatex)
//!   --open             Open the PDF afterwards
//!   -v, --verbose      Debug logging

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use beamer_slides::build::{self, Compiler, DEFAULT_COMPILER, DEFAULT_PASSES};
use beamer_slides::compare::{self, CompareOptions};
use beamer_slides::config::DeckSpec;
use beamer_slides::output;
use beamer_slides::{make_deck, DeckOptions, FilesystemError, OutputPaths, SlidesError};

#[derive(Parser)]
#[command(name = "beamer-slides")]
#[command(about = "Generate LaTeX beamer slide decks of plots")]
struct Cli {
    /// Debug logging (otherwise RUST_LOG, or info)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a deck from a JSON, TOML or YAML description
    Make {
        /// Deck description; outputs are written next to it
        config: PathBuf,

        #[command(flatten)]
        build: BuildArgs,
    },

    /// Compare identically named plots across directories
    Compare {
        /// Output name; `plots.pdf` produces `plots_slides.pdf`
        output: PathBuf,

        /// Directory to take plots from (repeatable)
        #[arg(long = "dir", required = true)]
        dirs: Vec<PathBuf>,

        /// Caption for the matching --dir (repeatable)
        #[arg(long = "label")]
        labels: Vec<String>,

        /// Plot file name to compare (repeatable)
        #[arg(long = "plot", conflicts_with = "ext")]
        plots: Vec<String>,

        /// Compare every file with this extension common to all directories
        #[arg(long, default_value = "pdf")]
        ext: String,

        /// Title page heading
        #[arg(long, default_value = compare::DEFAULT_TITLE)]
        title: String,

        /// Also write the generated deck description as JSON
        #[arg(long)]
        save_config: bool,

        #[command(flatten)]
        build: BuildArgs,
    },
}

#[derive(Args)]
struct BuildArgs {
    /// Front-matter template
    #[arg(long)]
    template: Option<PathBuf>,

    /// Only write the .tex files
    #[arg(long)]
    no_compile: bool,

    /// Keep intermediate compiler files
    #[arg(long)]
    no_cleanup: bool,

    /// Leave out the outline frame
    #[arg(long)]
    no_toc: bool,

    /// Run the compiler without interactive prompts
    #[arg(long)]
    nonstop: bool,

    /// Run the compiler through `nice -n 19`
    #[arg(long)]
    nice: bool,

    /// Compiler executable
    #[arg(long, default_value = DEFAULT_COMPILER)]
    latex: String,

    /// Open the PDF when done
    #[arg(long)]
    open: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Make { config, build } => run_make(&config, &build),
        Command::Compare {
            output,
            dirs,
            labels,
            plots,
            ext,
            title,
            save_config,
            build,
        } => {
            let mut options = CompareOptions::new(dirs)
                .with_labels(labels)
                .with_title(title);
            options = if plots.is_empty() {
                options.with_extension(ext)
            } else {
                options.with_plots(plots)
            };
            run_compare(&output, &options, save_config, &build)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_make(config: &Path, args: &BuildArgs) -> Result<(), SlidesError> {
    let deck = load_deck(config)?;
    let paths = OutputPaths::for_config(config);
    build_deck(&deck, &paths, args, args.nonstop)
}

fn run_compare(
    output_pdf: &Path,
    options: &CompareOptions,
    save_config: bool,
    args: &BuildArgs,
) -> Result<(), SlidesError> {
    let deck = compare::synthesize(options)?;
    let paths = OutputPaths::for_config(output_pdf);

    if save_config {
        let json_path = output_pdf.with_extension("json");
        let json = deck.to_json().map_err(|e| {
            FilesystemError::write(&json_path, std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;
        output::write_text(&json_path, &json)?;
    }

    // a batch comparison should never stop at a compiler prompt
    build_deck(&deck, &paths, args, true)
}

/// Load the deck description, printing parse errors with source context
fn load_deck(config: &Path) -> Result<DeckSpec, SlidesError> {
    DeckSpec::from_file(config).map_err(|e| {
        if let Some(source) = e.span().and_then(|_| fs::read_to_string(config).ok()) {
            eprint!("{}", e.format(&source, &config.display().to_string()));
        }
        SlidesError::from(e)
    })
}

fn build_deck(
    deck: &DeckSpec,
    paths: &OutputPaths,
    args: &BuildArgs,
    nonstop: bool,
) -> Result<(), SlidesError> {
    let mut options = DeckOptions::new();
    if let Some(template) = &args.template {
        options = options.with_front_template(output::read_text(template)?);
    }
    if args.no_toc {
        options = options.with_toc(false);
    }

    make_deck(deck, paths, &options)?;

    if !args.no_compile {
        let mut compiler = Compiler::new()
            .with_program(&args.latex)
            .with_passes(DEFAULT_PASSES)
            .with_nonstop(nonstop)
            .with_cleanup(!args.no_cleanup)
            .with_low_priority(args.nice);
        if !paths.dir().as_os_str().is_empty() {
            compiler = compiler.with_output_dir(paths.dir());
        }

        let report = compiler.compile(&paths.main)?;
        if report.is_success() {
            tracing::info!("Created {}", report.pdf.display());
        } else {
            tracing::warn!(
                "{} of {} compiler passes failed; {} may be incomplete",
                report.failures.len(),
                report.passes,
                report.pdf.display()
            );
        }
    }

    if args.open {
        build::open_viewer(&paths.pdf);
    }
    Ok(())
}
