// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use docxlate::app_config::{self, Config, TranslationProvider};
use docxlate::app_controller::{Controller, RunOutcome};

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    Mock,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::Mock => TranslationProvider::Mock,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a document while keeping run formatting
    Translate(TranslateArgs),

    /// Generate shell completions for docxlate
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input document (JSON container)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output path, defaults to <stem>.<target>.json next to the input
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Source language code (e.g., 'ru', 'en'), empty to auto-detect
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'kk', 'de')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Glossary CSV file (source,target per row)
    #[arg(short, long)]
    glossary: Option<String>,

    /// Disable run text normalization
    #[arg(long)]
    no_cleanup: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Abort the whole run after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

/// docxlate - formatting-preserving document translation
#[derive(Parser, Debug)]
#[command(name = "docxlate")]
#[command(version)]
#[command(about = "Translate documents while keeping bold, italic and underline runs in place")]
#[command(long_about = "docxlate translates every paragraph and table cell of a document through \
Google Cloud Translation, carrying run formatting across the translation.

EXAMPLES:
    docxlate translate report.json                      # Translate using default config
    docxlate translate -s ru -t kk report.json          # Russian to Kazakh
    docxlate translate -g terms.csv report.json         # Keep glossary terms fixed
    docxlate translate -p mock -f report.json           # Offline run, overwrite output
    docxlate completions bash > docxlate.bash           # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't exist,
    a default one is created. An empty project id or access token is taken from
    GOOGLE_CLOUD_PROJECT / GCP_PROJECT and GOOGLE_ACCESS_TOKEN.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // The logger itself lets everything through; set_max_level filters
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                color,
                now,
                tag,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "docxlate", &mut std::io::stdout());
            Ok(())
        }
        Commands::Translate(args) => {
            if let Err(e) = run_translate(args).await {
                error!("{:#}", e);
                return Err(e);
            }
            Ok(())
        }
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(source_language) = &options.source_language {
        config.source_language = source_language.clone();
    }
    if let Some(target_language) = &options.target_language {
        config.target_language = target_language.clone();
    }
    if let Some(provider) = &options.provider {
        config.provider.provider_type = provider.clone().into();
    }
    if let Some(glossary) = &options.glossary {
        config.glossary_path = Some(glossary.clone());
    }
    if options.no_cleanup {
        config.cleanup = false;
    }
    match &options.log_level {
        Some(log_level) => config.log_level = log_level.clone().into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    let controller = Controller::with_config(config)?;
    let run = controller.run(&options.input, options.output.clone(), options.force_overwrite);

    let outcome = match options.timeout_secs {
        Some(secs) => tokio::time::timeout(std::time::Duration::from_secs(secs), run)
            .await
            .map_err(|_| anyhow!("Translation timed out after {}s, nothing was written", secs))??,
        None => run.await?,
    };

    if let RunOutcome::Written { report, .. } = outcome {
        if report.fallback_items > 0 {
            info!(
                "{} items lost their formatting to unparseable markup",
                report.fallback_items
            );
        }
    }
    Ok(())
}
