//! Command-line interface for the corpus tools.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use katameros_core::run_batch;

use crate::commands::{
    add_language_file, add_type_file, columnize_file, ensure_new_language, merge_file,
    preprocess_file, split_file,
};
use crate::config::{
    parse_registry, validate_language_code, DEFAULT_LANGUAGES, JSON_EXTENSION, YAML_EXTENSION,
};
use crate::error::{CliError, Result};
use crate::paths::{collect_files, is_joint_yaml, is_yaml, language_of};

/// Katameros - Split, merge and migrate multilingual liturgical documents.
#[derive(Parser)]
#[command(name = "katameros")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Comma-separated language codes; the first one is the ground truth
    #[arg(short, long, global = true, default_value = DEFAULT_LANGUAGES)]
    pub languages: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split joint files into one file per language.
    Split {
        /// Joint file or directory
        path: PathBuf,
    },

    /// Merge per-language files into joint files.
    Merge {
        /// Ground-truth language file (e.g. our-father.en.yml) or directory
        path: PathBuf,

        /// Output format of the joint file
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Upgrade legacy joint files and write canonical YAML and JSON.
    Preprocess {
        /// Joint file or directory
        path: PathBuf,

        /// Output directory (default: rewrite in place)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rewrite joint files with verses in columnar layout.
    Columnize {
        /// Joint file or directory
        path: PathBuf,
    },

    /// Add the root `type` field to files that lack it.
    AddType {
        /// YAML file or directory
        path: PathBuf,
    },

    /// Create empty translation files for a new language.
    AddLanguage {
        /// Ground-truth language file or directory
        path: PathBuf,

        /// Code of the new language (e.g. co-ar)
        #[arg(long)]
        language_code: String,
    },
}

/// Format of merged joint files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

impl OutputFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Yaml => YAML_EXTENSION,
            Self::Json => JSON_EXTENSION,
        }
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    execute(Cli::parse())
}

/// Execute a parsed command line.
pub fn execute(cli: Cli) -> Result<()> {
    let registry = parse_registry(&cli.languages)?;
    let ground_truth = registry.ground_truth();
    let is_ground_truth =
        move |path: &Path| is_yaml(path) && language_of(path) == Some(ground_truth);

    match cli.command {
        Commands::Split { path } => process(
            "Splitting",
            collect_files(&path, is_joint_yaml)?,
            |file| split_file(&registry, file),
        ),
        Commands::Merge { path, format } => process(
            "Merging",
            collect_files(&path, is_ground_truth)?,
            |file| merge_file(&registry, file, format),
        ),
        Commands::Preprocess { path, output } => process(
            "Preprocessing",
            collect_files(&path, is_joint_yaml)?,
            |file| {
                let target = output.as_ref().map(|dir| dir.join(relative_path(&path, file)));
                preprocess_file(file, target.as_deref())
            },
        ),
        Commands::Columnize { path } => process(
            "Columnizing",
            collect_files(&path, is_joint_yaml)?,
            |file| columnize_file(&registry, file),
        ),
        Commands::AddType { path } => {
            process("Typing", collect_files(&path, is_yaml)?, add_type_file)
        }
        Commands::AddLanguage {
            path,
            language_code,
        } => {
            // Validate before touching any file
            let language = validate_language_code(&language_code)?;
            ensure_new_language(&registry, language)?;
            process(
                "Scaffolding",
                collect_files(&path, is_ground_truth)?,
                |file| add_language_file(&registry, file, language),
            )
        }
    }
}

/// Run `f` over every file with a progress bar, then report failures.
fn process(
    action: &str,
    files: Vec<PathBuf>,
    mut f: impl FnMut(&Path) -> Result<Vec<PathBuf>>,
) -> Result<()> {
    println!(
        "{} {} files",
        style(action).bold(),
        style(files.len()).cyan()
    );

    let pb = ProgressBar::new(files.len() as u64);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .expect("valid template"),
    );

    let mut written = 0;
    let report = run_batch(files, |file| {
        pb.set_message(short_name(file));
        let result = f(file).map(|outputs| written += outputs.len());
        pb.inc(1);
        result
    });

    pb.finish_and_clear();

    for failure in &report.failures {
        eprintln!(
            "{} {}: {}",
            style("✗").red().bold(),
            failure.item.display(),
            failure.error
        );
    }

    println!(
        "{} {} ({} files written)",
        style("Done:").green().bold(),
        report.summary(),
        written
    );

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::BatchFailed {
            failed: report.failures.len(),
            total: report.total(),
        })
    }
}

/// Path of `file` below the `input` argument, or its file name when `input`
/// is the file itself.
fn relative_path(input: &Path, file: &Path) -> PathBuf {
    file.strip_prefix(input)
        .ok()
        .filter(|relative| !relative.as_os_str().is_empty())
        .or_else(|| file.file_name().map(Path::new))
        .unwrap_or(file)
        .to_path_buf()
}

/// Last two path components, e.g. `vespers/doxology.yml`.
fn short_name(path: &Path) -> String {
    let components: Vec<_> = path.components().collect();
    let start = components.len().saturating_sub(2);
    components[start..]
        .iter()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
