use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use notify_url::bulk::{parse_emails, parse_list, parse_phone_no, parse_urls, Entry};
use notify_url::config::Settings;
use notify_url::tags::is_exclusive_match_with;
use notify_url::url_parser::parse_url_with;
use notify_url::utils::anonymizer::cwe312_url_with;
use notify_url::utils::logger::init_logger;
use notify_url::validators::{is_email, is_hostname, is_phone_no_min};

#[derive(Parser)]
#[command(name = "notify-url", version, about = "Inspect, split and redact notification URLs")]
struct Cli {
    /// Configuration file (TOML); defaults to ./notify-url.toml when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to a timestamped file in this directory
    #[arg(long, global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Break a URL into its components (JSON)
    Parse {
        url: String,
        /// Accept any host and keep unusable ports as part of it
        #[arg(long)]
        no_verify: bool,
        /// Schema for input that has none
        #[arg(long)]
        default_schema: Option<String>,
        /// Reject an unusable port even with --no-verify
        #[arg(long)]
        strict_port: bool,
    },
    /// Print a URL with its secrets masked
    Redact { url: String },
    /// Extract URLs from free text
    Urls {
        text: Vec<String>,
        /// Drop words that do not look like a URL
        #[arg(long)]
        strict: bool,
    },
    /// Extract email addresses from free text
    Emails {
        text: Vec<String>,
        #[arg(long)]
        strict: bool,
    },
    /// Extract phone numbers from free text
    Phones {
        text: Vec<String>,
        #[arg(long)]
        strict: bool,
    },
    /// Split delimited values into a sorted, de-duplicated list
    List { text: Vec<String> },
    /// Validate an email address (JSON)
    Email { value: String },
    /// Validate a phone number (JSON)
    Phone {
        value: String,
        #[arg(long)]
        min_len: Option<usize>,
    },
    /// Validate a hostname or IP address
    Host { value: String },
    /// Check a tag set against tag logic
    Match {
        /// Tags to test, comma separated
        #[arg(long, default_value = "")]
        tags: String,
        /// One OR'd group per flag; commas inside a group AND its tags
        #[arg(long)]
        logic: Vec<String>,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

fn print_or_fail<T: Serialize>(value: Option<T>) -> Result<ExitCode> {
    match value {
        Some(value) => {
            print_json(&value)?;
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(ExitCode::FAILURE),
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if cli.log_dir.is_some() {
        settings.log_dir = cli.log_dir;
    }
    init_logger(settings.log_dir.as_deref(), &settings.log_level)?;
    debug!("Loaded settings: {:?}", settings);

    match cli.command {
        Command::Parse {
            url,
            no_verify,
            default_schema,
            strict_port,
        } => {
            let mut options = settings.parse_options();
            options.verify_host &= !no_verify;
            options.strict_port = strict_port;
            if let Some(schema) = default_schema {
                options.default_schema = schema;
            }
            print_or_fail(parse_url_with(&url, &options))
        }
        Command::Redact { url } => {
            println!("{}", cwe312_url_with(&url, settings.redact_options()));
            Ok(ExitCode::SUCCESS)
        }
        Command::Urls { text, strict } => {
            print_lines(&parse_urls(text, !strict));
            Ok(ExitCode::SUCCESS)
        }
        Command::Emails { text, strict } => {
            print_lines(&parse_emails(text, !strict));
            Ok(ExitCode::SUCCESS)
        }
        Command::Phones { text, strict } => {
            print_lines(&parse_phone_no(text, !strict));
            Ok(ExitCode::SUCCESS)
        }
        Command::List { text } => {
            print_lines(&parse_list(text));
            Ok(ExitCode::SUCCESS)
        }
        Command::Email { value } => print_or_fail(is_email(&value)),
        Command::Phone { value, min_len } => {
            print_or_fail(is_phone_no_min(&value, min_len.unwrap_or(settings.phone_min_len)))
        }
        Command::Host { value } => match is_hostname(&value) {
            Some(host) => {
                println!("{}", host);
                Ok(ExitCode::SUCCESS)
            }
            None => Ok(ExitCode::FAILURE),
        },
        Command::Match { tags, logic } => {
            let logic = Entry::Seq(logic.into_iter().map(Entry::Text).collect());
            let matched = is_exclusive_match_with(logic, tags, &settings.match_all);
            println!("{}", matched);
            Ok(if matched {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
