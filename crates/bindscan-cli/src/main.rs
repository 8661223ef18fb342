//! bindscan CLI
//!
//! Scans a shader tree and prints every resource register binding, one row
//! per declaration, with the permutations it was seen under.

mod report;

use anyhow::{Context, Result};
use bindscan_core::config::{PreprocessorConfig, ScanConfig, DEFAULT_LINK_BASE};
use bindscan_index::scan;
use bindscan_parser::{PcppPreprocessor, Preprocessor};
use clap::{ArgAction, Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bindscan")]
#[command(author, version, about = "Shader register binding inventory", long_about = None)]
struct Cli {
    /// Shader tree to scan
    #[arg(value_name = "ROOT", default_value = ".")]
    root: PathBuf,

    /// Base URL for source links
    #[arg(long, value_name = "URL", default_value = DEFAULT_LINK_BASE)]
    link_base: String,

    /// Preprocessor executable
    #[arg(long, value_name = "PROGRAM", default_value = "pcpp")]
    preprocessor: PathBuf,

    /// Extra include directory for the preprocessor
    #[arg(short = 'I', long = "include", value_name = "DIR")]
    includes: Vec<PathBuf>,

    /// Extra argument appended to every preprocessor invocation
    #[arg(long = "preprocessor-arg", value_name = "ARG", allow_hyphen_values = true)]
    preprocessor_args: Vec<String>,

    /// Skip files whose root-relative path matches
    #[arg(long, value_name = "GLOB")]
    exclude: Vec<String>,

    /// Worker threads (default: all cores, 1 = sequential)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Markdown)]
    format: Format,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase log verbosity
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Markdown,
    Json,
}

impl Cli {
    fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            root: self.root.clone(),
            link_base: self.link_base.clone(),
            exclude: self.exclude.clone(),
            jobs: self.jobs,
            preprocessor: PreprocessorConfig {
                program: self.preprocessor.clone(),
                include_dirs: self.includes.clone(),
                extra_args: self.preprocessor_args.clone(),
            },
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.scan_config();
    let preprocessor = PcppPreprocessor::from_config(&config.preprocessor);
    if !preprocessor.is_available() {
        warn!(
            "{} is not runnable; every file will report zero bindings",
            preprocessor.program().display()
        );
    }

    let report = scan(&config, &preprocessor)
        .with_context(|| format!("failed to scan {}", config.root.display()))?;
    info!("{} bindings in {} files", report.entries.len(), report.files);

    let rendered = match cli.format {
        Format::Markdown => report::render_markdown(&report.entries),
        Format::Json => report::render_json(&report.entries)?,
    };
    write_output(cli.output.as_deref(), &rendered)
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn write_output(output: Option<&Path>, rendered: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, format!("{rendered}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["bindscan"]);
        let config = cli.scan_config();
        assert_eq!(config.root, PathBuf::from("."));
        assert_eq!(config.link_base, DEFAULT_LINK_BASE);
        assert_eq!(config.preprocessor.program, PathBuf::from("pcpp"));
        assert_eq!(config.jobs, None);
        assert!(config.preprocessor.extra_args.is_empty());
        assert!(matches!(cli.format, Format::Markdown));
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "bindscan",
            "skyrim-community-shaders",
            "-I",
            "package/Shaders",
            "--exclude",
            "**/Tests/**",
            "--preprocessor-arg",
            "--line-directive",
            "--preprocessor-arg=-DSKYRIM",
            "-j",
            "1",
            "-f",
            "json",
            "-vv",
        ]);
        let config = cli.scan_config();
        assert_eq!(config.root, PathBuf::from("skyrim-community-shaders"));
        assert_eq!(config.preprocessor.include_dirs, vec![PathBuf::from("package/Shaders")]);
        assert_eq!(config.exclude, vec!["**/Tests/**".to_string()]);
        assert_eq!(
            config.preprocessor.extra_args,
            vec!["--line-directive".to_string(), "-DSKYRIM".to_string()]
        );
        assert_eq!(config.jobs, Some(1));
        assert!(matches!(cli.format, Format::Json));
        assert_eq!(cli.verbose, 2);
    }
}
