use clap::{Parser, ValueEnum};
use pixelfind::io::load_rgba_image;
use pixelfind::{Match, MatchConfig, Matcher, SearchMode, Threshold};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

const MISSING_PATHS: &str =
    "a haystack and a needle path must be given on the command line or in the config";

/// Exit status when the needle is absent.
const EXIT_NOT_FOUND: u8 = 1;
/// Exit status for invalid input or unreadable images.
const EXIT_ERROR: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Assert that a reference image appears inside a screenshot",
    long_about = "Searches HAYSTACK for NEEDLE and prints a JSON report. \
                  Exits 0 when found, 1 when not found, 2 on error."
)]
struct Cli {
    /// Screenshot to search in (overrides the config file).
    haystack: Option<PathBuf>,
    /// Reference image to look for (overrides the config file).
    needle: Option<PathBuf>,
    /// Path to a JSON configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Tolerance in [0, 1] (overrides the config file).
    #[arg(short, long)]
    threshold: Option<f64>,
    /// Which qualifying window to report (overrides the config file).
    #[arg(short, long, value_enum)]
    mode: Option<ModeConfig>,
    /// Scan window rows in parallel.
    #[arg(long)]
    parallel: bool,
    /// Also list up to N qualifying windows.
    #[arg(long, value_name = "N")]
    all: Option<usize>,
    /// Write the report to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
enum ModeConfig {
    #[default]
    First,
    Best,
}

impl From<ModeConfig> for SearchMode {
    fn from(value: ModeConfig) -> Self {
        match value {
            ModeConfig::First => SearchMode::First,
            ModeConfig::Best => SearchMode::Best,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct MatchConfigJson {
    threshold: f64,
    mode: ModeConfig,
    parallel: bool,
}

impl Default for MatchConfigJson {
    fn default() -> Self {
        let cfg = MatchConfig::default();
        Self {
            threshold: cfg.threshold.value(),
            mode: ModeConfig::First,
            parallel: cfg.parallel,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Config {
    haystack_path: Option<PathBuf>,
    needle_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    all: usize,
    #[serde(rename = "match")]
    match_cfg: MatchConfigJson,
}

impl Config {
    /// Command-line flags win over values read from the file.
    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(path) = &cli.haystack {
            self.haystack_path = Some(path.clone());
        }
        if let Some(path) = &cli.needle {
            self.needle_path = Some(path.clone());
        }
        if let Some(path) = &cli.output {
            self.output_path = Some(path.clone());
        }
        if let Some(threshold) = cli.threshold {
            self.match_cfg.threshold = threshold;
        }
        if let Some(mode) = cli.mode {
            self.match_cfg.mode = mode;
        }
        if cli.parallel {
            self.match_cfg.parallel = true;
        }
        if let Some(all) = cli.all {
            self.all = all;
        }
    }
}

#[derive(Debug, Serialize)]
struct MatchRecord {
    x: usize,
    y: usize,
    mismatched: usize,
    mismatch_percent: f64,
}

impl From<Match> for MatchRecord {
    fn from(value: Match) -> Self {
        Self {
            x: value.x,
            y: value.y,
            mismatched: value.mismatched,
            mismatch_percent: value.mismatch_percent,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    found: bool,
    haystack: [usize; 2],
    needle: [usize; 2],
    threshold: f64,
    best: Option<MatchRecord>,
    matches: Vec<MatchRecord>,
}

fn run(cli: &Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => Config::default(),
    };
    config.apply_cli(cli);

    let (Some(haystack_path), Some(needle_path)) = (&config.haystack_path, &config.needle_path)
    else {
        return Err(MISSING_PATHS.into());
    };

    let threshold = Threshold::new(config.match_cfg.threshold)?;
    let haystack = load_rgba_image(haystack_path)?;
    let needle = load_rgba_image(needle_path)?;
    tracing::info!(
        haystack = %haystack_path.display(),
        needle = %needle_path.display(),
        "images loaded"
    );

    let matcher = Matcher::new().with_config(MatchConfig {
        threshold,
        mode: config.match_cfg.mode.into(),
        parallel: config.match_cfg.parallel,
    });

    let best = matcher.find(haystack.view(), needle.view());
    match &best {
        Some(m) => eprintln!(
            "Partial image found at ({}, {}) with {:.2}% mismatch.",
            m.x, m.y, m.mismatch_percent
        ),
        None => eprintln!("Partial image not found."),
    }

    let matches = matcher
        .find_all(haystack.view(), needle.view(), config.all)
        .into_iter()
        .map(MatchRecord::from)
        .collect();

    let output = Output {
        found: best.is_some(),
        haystack: [haystack.width(), haystack.height()],
        needle: [needle.width(), needle.height()],
        threshold: threshold.value(),
        best: best.map(MatchRecord::from),
        matches,
    };
    let json = serde_json::to_string_pretty(&output)?;

    match &config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(output.found)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.trace {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("pixelfind=info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return ExitCode::SUCCESS;
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_NOT_FOUND),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
