use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use flag_alias_core::AliasConfig;
use flag_alias_resolver::{AliasMap, AliasResolver};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Output encodings for the resolved alias map.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "flag-aliases", version)]
#[command(about = "Resolve the alternate spellings feature flags appear as in code")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve aliases for flag keys and print the mapping.
    Resolve(ResolveArgs),
    /// Load and validate an alias configuration file.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
struct ResolveArgs {
    /// Alias configuration file (YAML or JSON with an `aliases` list).
    #[arg(long)]
    config: PathBuf,
    /// Directory globs and alias commands are resolved against.
    #[arg(long, default_value = ".")]
    dir: PathBuf,
    /// Comma-separated flag keys.
    #[arg(long, conflicts_with = "flags_file")]
    flags: Option<String>,
    /// File with one flag key per line (`#` starts a comment).
    #[arg(long)]
    flags_file: Option<PathBuf>,
    /// Number of flags resolved in parallel (default: sequential).
    #[arg(long)]
    jobs: Option<usize>,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Alias configuration file to check.
    #[arg(long)]
    config: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Resolve(args) => run_resolve(args),
        Command::Validate(args) => run_validate(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn run_resolve(args: ResolveArgs) -> Result<(), String> {
    let flags = match (&args.flags, &args.flags_file) {
        (Some(list), _) => parse_csv_list(list),
        (None, Some(path)) => read_flags_file(path)?,
        (None, None) => return Err("Specify flag keys with --flags or --flags-file".to_string()),
    };
    if flags.is_empty() {
        return Err("No flag keys given".to_string());
    }
    if !args.dir.is_dir() {
        return Err(format!("'{}' is not a directory", args.dir.display()));
    }

    let config = AliasConfig::load_validated(&args.config)
        .map_err(|err| format!("Failed to load '{}': {err}", args.config.display()))?;
    debug!(rules = config.aliases.len(), flags = flags.len(), "Loaded alias configuration");

    let aliases = AliasResolver::new(&config.aliases, &args.dir)
        .with_jobs(args.jobs.unwrap_or(1))
        .resolve(&flags)
        .map_err(|err| err.to_string())?;

    println!("{}", format_aliases(&aliases, args.format)?);
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let config = AliasConfig::load_validated(&args.config)
        .map_err(|err| format!("Failed to load '{}': {err}", args.config.display()))?;
    println!("Validated {} alias rule(s).", config.aliases.len());
    Ok(())
}

fn format_aliases(aliases: &AliasMap, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(aliases)
            .map_err(|err| format!("Failed to serialize aliases: {err}")),
        OutputFormat::Yaml => serde_yaml::to_string(aliases)
            .map(|raw| raw.trim_end().to_string())
            .map_err(|err| format!("Failed to serialize aliases: {err}")),
    }
}

fn read_flags_file(path: &Path) -> Result<Vec<String>, String> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToString::to_string)
        .collect())
}

fn parse_csv_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_parse_csv_list_trims_and_skips_empty() {
        assert_eq!(parse_csv_list(" a, b ,,c "), vec!["a", "b", "c"]);
        assert!(parse_csv_list(" , ").is_empty());
    }

    #[test]
    fn test_read_flags_file_skips_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flags.txt");
        fs::write(&path, "# flags\nalpha\n\n  beta  \n#gamma\n").unwrap();
        assert_eq!(read_flags_file(&path).unwrap(), vec!["alpha", "beta"]);
    }

    #[test]
    fn test_format_aliases_yaml() {
        let mut aliases = BTreeMap::new();
        aliases.insert("my-flag".to_string(), vec!["myFlag".to_string()]);
        assert_eq!(
            format_aliases(&aliases, OutputFormat::Yaml).unwrap(),
            "my-flag:\n- myFlag"
        );
    }
}
