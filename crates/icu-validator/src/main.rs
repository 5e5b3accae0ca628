use clap::{Args, Parser, Subcommand};
use icu_validator::{Locale, Source, Validation, ValidationOptions};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "icu-validator",
    about = "ICU MessageFormat validator",
    version,
    long_about = "Validate ICU MessageFormat strings, JSON translation files and directories of them.\n\nExamples:\n  icu-validator check 'Hello {name}'                 # Validate a single message\n  icu-validator check locales/en.json                # A path is read from disk\n  icu-validator dir locales --verbose                # Validate every JSON file in a directory\n  icu-validator file en.json --ignore-component-tags # Accept <0>...</0> component tags\n  icu-validator check locales --json                 # Print the results as JSON"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Run in verbose mode, also showing valid files
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Run in debug mode with extensive details
    #[arg(short, long, global = true)]
    debug: bool,

    /// Print results as JSON instead of the console report
    #[arg(long, global = true)]
    json: bool,

    #[command(flatten)]
    options: OptionArgs,
}

#[derive(Debug, Args)]
struct OptionArgs {
    /// Validation options as a JSON object; flags below are applied on top
    #[arg(long, global = true, value_name = "JSON")]
    config: Option<String>,

    /// Treat tags as plain text
    #[arg(long, global = true)]
    ignore_tag: bool,

    /// Require an `other` clause in plural and select arguments
    #[arg(long, global = true)]
    requires_other_clause: bool,

    /// Check number and date skeletons
    #[arg(long, global = true)]
    parse_skeletons: bool,

    /// Keep source locations on the parsed message
    #[arg(long, global = true)]
    capture_location: bool,

    /// Locale used to resolve skeleton hour symbols (e.g. en-US)
    #[arg(long, global = true)]
    locale: Option<Locale>,

    /// Accept numeric component tags such as <0>text</0>
    #[arg(long, global = true, alias = "ignore-trans-tag")]
    ignore_component_tags: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate a message, or the JSON file or directory it names
    Check {
        /// Message text, JSON file or directory
        source: String,
    },

    /// Validate a JSON translation file
    File {
        /// Path to the JSON file
        path: PathBuf,
    },

    /// Validate every JSON translation file in a directory
    Dir {
        /// Path to the directory
        path: PathBuf,
    },
}

const EXIT_INVALID: i32 = 1;
const EXIT_ERROR: i32 = 2;

fn build_options(args: &OptionArgs, verbose: bool, json: bool) -> Result<ValidationOptions, String> {
    let mut options = match &args.config {
        Some(config) => serde_json::from_str::<ValidationOptions>(config)
            .map_err(|e| format!("Invalid --config: {}", e))?,
        None => ValidationOptions::default(),
    };

    options.pretty_print = !json;
    options.verbose |= verbose;
    options.ignore_component_tags |= args.ignore_component_tags;

    let parse_options = &mut options.parse_options;
    parse_options.ignore_tag |= args.ignore_tag;
    parse_options.requires_other_clause |= args.requires_other_clause;
    parse_options.should_parse_skeletons |= args.parse_skeletons;
    parse_options.capture_location |= args.capture_location;
    if let Some(locale) = &args.locale {
        parse_options.locale = Some(locale.clone());
    }

    Ok(options)
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            logging::error(&format!("Failed to serialize results: {}", e));
            std::process::exit(EXIT_ERROR);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::set_log_level(logging::LogLevel::from_flags(cli.debug, cli.verbose));
    if cli.debug {
        logging::debug("Debug mode enabled - showing detailed logs");
    } else if cli.verbose {
        logging::info("Verbose mode enabled");
    }

    let options = build_options(&cli.options, cli.verbose, cli.json).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(EXIT_ERROR);
    });
    logging::debug(&format!("Validation options: {:?}", options));

    let outcome = match &cli.command {
        Commands::Check { source } => {
            icu_validator::validate(&Source::from(source.as_str()), &options)
        }
        Commands::File { path } => icu_validator::validate_file(path, &options)
            .await
            .map(Validation::File),
        Commands::Dir { path } => icu_validator::validate_directory(path, &options)
            .await
            .map(Validation::Directory),
    };

    let validation = outcome.unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(EXIT_ERROR);
    });

    if cli.json {
        print_json(&validation);
    }

    if !validation.is_valid() {
        std::process::exit(EXIT_INVALID);
    }
}
