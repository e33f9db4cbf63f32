// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{info, warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use dualsub::app_config::{self, Config};
use dualsub::app_controller::Controller;
use dualsub::file_utils::FileManager;

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

/// Options shared by every command
#[derive(Args, Debug, Clone)]
struct CommonArgs {
    /// Force overwrite of existing output files
    #[arg(short, long, global = true)]
    force_overwrite: bool,

    /// Language of the upper track (e.g., 'en', 'eng')
    #[arg(long, global = true)]
    first_language: Option<String>,

    /// Language of the lower track (e.g., 'ko', 'kor')
    #[arg(long, global = true)]
    second_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct MergeArgs {
    /// Subtitle file shown on top
    #[arg(value_name = "FIRST")]
    first: PathBuf,

    /// Subtitle file shown below
    #[arg(value_name = "SECOND")]
    second: PathBuf,

    /// Output file (defaults to <name>.<first>-<second>.srt next to FIRST)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge two subtitle files into one bilingual SRT file (default command)
    Merge(MergeArgs),

    /// Rewrite a subtitle file as clean, sorted and renumbered SRT
    Normalize {
        /// SRT or SAMI file to clean up
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (defaults to INPUT with an .srt extension)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Merge every language pair found in a directory
    Folder {
        /// Directory to scan
        #[arg(value_name = "DIR")]
        input_dir: PathBuf,
    },

    /// Generate shell completions for dualsub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// dualsub - bilingual subtitle merger
///
/// Combines two subtitle tracks of the same video into one SubRip file that
/// shows both languages at the same time.
#[derive(Parser, Debug)]
#[command(name = "dualsub")]
#[command(version)]
#[command(about = "Merge two subtitle tracks into one bilingual SRT file")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "dualsub aligns two subtitle tracks by time and writes a single SRT file
where every entry carries both languages, one above the other.

EXAMPLES:
    dualsub movie.en.srt movie.ko.srt               # Writes movie.en-ko.srt
    dualsub movie.en.srt movie.ko.smi out.srt       # SAMI input, explicit output
    dualsub -f movie.en.srt movie.ko.srt            # Force overwrite existing files
    dualsub normalize broken.srt clean.srt          # Sort, renumber and clean one file
    dualsub folder /movies/ --log-level debug       # Merge every pair in a directory
    dualsub completions bash > dualsub.bash         # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED FORMATS:
    .srt        - SubRip
    .smi/.sami  - SAMI, converted on load")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    common: CommonArgs,

    /// Subtitle file shown on top
    #[arg(value_name = "FIRST")]
    first: Option<PathBuf>,

    /// Subtitle file shown below
    #[arg(value_name = "SECOND")]
    second: Option<PathBuf>,

    /// Output file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,
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
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
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
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger with the most verbose level the config may ask
    // for; the effective level is set through log::set_max_level below
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "dualsub", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Merge(args)) => {
            let controller = build_controller(&cli.common)?;
            run_merge(&controller, args, cli.common.force_overwrite)
        }
        Some(Commands::Normalize { input, output }) => {
            let controller = build_controller(&cli.common)?;
            let output = output.unwrap_or_else(|| input.with_extension("srt"));
            controller.normalize_file(&input, &output, cli.common.force_overwrite)?;
            info!("Success: {:?}", output);
            Ok(())
        }
        Some(Commands::Folder { input_dir }) => {
            let controller = build_controller(&cli.common)?;
            let summary = controller.run_folder(&input_dir, cli.common.force_overwrite)?;
            if summary.failed > 0 {
                return Err(anyhow!("{} subtitle pair(s) failed to merge", summary.failed));
            }
            Ok(())
        }
        None => {
            // Default behavior - merge the two positional files
            let (Some(first), Some(second)) = (cli.first, cli.second) else {
                return Err(anyhow!("FIRST and SECOND are required when no subcommand is specified"));
            };
            let controller = build_controller(&cli.common)?;
            let args = MergeArgs { first, second, output: cli.output };
            run_merge(&controller, args, cli.common.force_overwrite)
        }
    }
}

fn run_merge(controller: &Controller, args: MergeArgs, force_overwrite: bool) -> Result<()> {
    for input in [&args.first, &args.second] {
        if !input.is_file() {
            return Err(anyhow!("Input file does not exist: {:?}", input));
        }
    }

    let output = match args.output {
        Some(output) => output,
        None => FileManager::generate_output_path(
            &args.first,
            args.first.parent().unwrap_or(Path::new(".")),
            &controller.config().merged_language_tag(),
            "srt",
        ),
    };

    let summary = controller.merge_files(&args.first, &args.second, &output, force_overwrite)?;
    info!("Success: {:?} ({} entries)", summary.output_path, summary.merged_entries);
    Ok(())
}

/// Load or create the configuration, apply CLI overrides and build the controller
fn build_controller(options: &CommonArgs) -> Result<Controller> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    let config_path = Path::new(&options.config_path);
    let mut config = if config_path.exists() {
        Config::load(config_path)
            .with_context(|| format!("Failed to load config file: {}", options.config_path))?
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", options.config_path);

        let config = Config::default();
        config
            .save(config_path)
            .with_context(|| format!("Failed to write default config to file: {}", options.config_path))?;
        config
    };

    // Override config with CLI options if provided
    if let Some(first_language) = &options.first_language {
        config.first_language = first_language.clone();
    }

    if let Some(second_language) = &options.second_language {
        config.second_language = second_language.clone();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    Controller::with_config(config)
}
