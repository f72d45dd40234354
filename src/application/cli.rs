#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use dialoguer::Password;
use strum::IntoEnumIterator;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use yansi::Paint;

use super::chat::credential_store;
use super::chat::help_text;
use super::chat::print_notification;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendName;
use crate::domain::models::CitationSource;
use crate::domain::models::CitationStyle;
use crate::domain::models::ClipboardWriter;
use crate::domain::models::Notification;
use crate::domain::models::SubjectCatalog;
use crate::domain::services::CitationFormatter;
use crate::infrastructure::clipboard::SystemClipboard;
use crate::infrastructure::clipboard::UnavailableClipboard;

const CITATION_FIELDS: [(&str, &str); 9] = [
    ("authors", "Author(s), e.g. \"Smith, J. A.\""),
    ("title", "Title of the article or book."),
    ("publication", "Journal or publication, e.g. \"Journal of Science\"."),
    ("year", "Year of publication, e.g. 2023."),
    ("publisher", "Publisher, e.g. \"Oxford University Press\"."),
    ("location", "Place of publication, e.g. \"New York, NY\"."),
    ("pages", "Pages, e.g. 45-67."),
    ("url", "URL of the source."),
    ("doi", "DOI of the source, e.g. 10.1000/xyz123."),
];

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(&build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn format_subjects() -> String {
    return SubjectCatalog::list()
        .iter()
        .map(|subject| {
            return format!(
                "- {} ({}): {}",
                subject.name, subject.id, subject.description
            );
        })
        .collect::<Vec<String>>()
        .join("\n");
}

pub fn citation_source(matches: &ArgMatches) -> CitationSource {
    let get = |name: &str| {
        return matches.get_one::<String>(name).cloned();
    };

    return CitationSource {
        authors: get("authors"),
        title: get("title"),
        publication: get("publication"),
        year: get("year"),
        publisher: get("publisher"),
        location: get("location"),
        pages: get("pages"),
        url: get("url"),
        doi: get("doi"),
    };
}

fn cite(matches: &ArgMatches) -> Result<()> {
    let style_name = matches
        .get_one::<String>("style")
        .map(|e| return e.as_str())
        .unwrap_or_default();
    let style = match CitationStyle::parse(style_name) {
        Some(style) => style,
        None => bail!(format!("Unknown citation style {style_name}")),
    };
    let source = citation_source(matches);

    if matches.get_flag("no-copy") {
        println!("{}", CitationFormatter::format(style, &source));
        return Ok(());
    }

    let clipboard: Box<dyn ClipboardWriter> = match SystemClipboard::new() {
        Ok(clipboard) => Box::new(clipboard),
        Err(err) => {
            tracing::warn!(err = ?err, "Clipboard is unavailable");
            Box::new(UnavailableClipboard {
                reason: err.to_string(),
            })
        }
    };

    let (tx, mut rx) = mpsc::unbounded_channel::<Notification>();
    let citation = CitationFormatter::format_and_copy(style, &source, clipboard.as_ref(), &tx)?;
    println!("{citation}");
    while let Ok(notification) = rx.try_recv() {
        print_notification(&notification);
    }

    return Ok(());
}

async fn credential(matches: &ArgMatches) -> Result<()> {
    let credentials = credential_store();

    match matches.subcommand() {
        Some(("set", set_matches)) => {
            let value = match set_matches.get_one::<String>("value") {
                Some(value) => value.to_string(),
                None => Password::new()
                    .with_prompt("Enter your OpenAI API key")
                    .interact()?,
            };

            if let Err(err) = credentials.write(&value).await {
                print_notification(&Notification::error("Error", &err.to_string()));
                return Ok(());
            }
            print_notification(&Notification::success(
                "Success",
                "API key saved successfully",
            ));
        }
        Some(("reset", _)) => {
            credentials.reset().await?;
            print_notification(&Notification::info(
                "Reset",
                "API key removed. Set a new one with `scholar-scribe credential set`.",
            ));
        }
        Some(("show", _)) => match credentials.masked().await? {
            Some(masked) => println!("API key set: {masked}"),
            None => println!("No API key set."),
        },
        _ => {
            subcommand_credential().print_long_help()?;
        }
    }

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_credential() -> Command {
    return Command::new("credential")
        .about("Manage the OpenAI API key used by the openai backend.")
        .subcommand(
            Command::new("set")
                .about("Saves an API key. Prompts for it when no value is passed.")
                .arg(
                    clap::Arg::new("value")
                        .help("The API key.")
                        .num_args(1)
                        .required(false),
                ),
        )
        .subcommand(Command::new("reset").about("Removes the saved API key."))
        .subcommand(
            Command::new("show").about("Shows the last 4 characters of the saved API key."),
        );
}

fn citation_styles_text() -> String {
    let styles = CitationStyle::iter()
        .map(|style| {
            return format!("- {}: {}\n  {}", style, style.name(), style.example());
        })
        .collect::<Vec<String>>()
        .join("\n");

    return format!("STYLES:\n{styles}");
}

fn subcommand_cite() -> Command {
    let mut cmd = Command::new("cite")
        .about("Formats a citation and copies it to the clipboard.")
        .after_help(citation_styles_text())
        .arg(
            Arg::new("style")
                .short('s')
                .long("style")
                .num_args(1)
                .default_value("APA")
                .ignore_case(true)
                .help("Citation style.")
                .value_parser(PossibleValuesParser::new(CitationStyle::VARIANTS)),
        )
        .arg(
            Arg::new("no-copy")
                .long("no-copy")
                .action(ArgAction::SetTrue)
                .help("Only print the citation, do not copy it to the clipboard."),
        );

    for (name, help) in CITATION_FIELDS {
        cmd = cmd.arg(Arg::new(name).long(name).num_args(1).help(help));
    }

    return cmd;
}

fn arg_backend() -> Arg {
    return Arg::new(ConfigKey::Backend.to_string())
        .short('b')
        .long(ConfigKey::Backend.to_string())
        .env("SCHOLAR_SCRIBE_BACKEND")
        .num_args(1)
        .help(format!(
            "Where responses come from. `local` answers with canned responses and needs no network access. [default: {}]",
            Config::default(ConfigKey::Backend)
        ))
        .value_parser(PossibleValuesParser::new(BackendName::VARIANTS));
}

fn arg_backend_health_check_timeout() -> Arg {
    return Arg::new(ConfigKey::BackendHealthCheckTimeout.to_string())
        .long(ConfigKey::BackendHealthCheckTimeout.to_string())
        .env("SCHOLAR_SCRIBE_BACKEND_HEALTH_CHECK_TIMEOUT")
        .num_args(1)
        .help(
            format!("Time to wait in milliseconds before timing out when doing a healthcheck for a backend. [default: {}]", Config::default(ConfigKey::BackendHealthCheckTimeout)),
        );
}

fn arg_subject() -> Arg {
    return Arg::new(ConfigKey::Subject.to_string())
        .short('s')
        .long(ConfigKey::Subject.to_string())
        .env("SCHOLAR_SCRIBE_SUBJECT")
        .num_args(1)
        .help(format!(
            "The subject area the chat starts with. [default: {}]",
            Config::default(ConfigKey::Subject)
        ))
        .value_parser(PossibleValuesParser::new(SubjectCatalog::ids()));
}

fn subcommand_chat() -> Command {
    return Command::new("chat")
        .about("Start a new chat.")
        .arg(arg_backend())
        .arg(arg_backend_health_check_timeout())
        .arg(arg_subject());
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("scholar-scribe")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_cite())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_credential())
        .subcommand(Command::new("subjects").about("Lists all subject areas."))
        .arg(arg_backend())
        .arg(arg_backend_health_check_timeout())
        .arg(arg_subject())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("SCHOLAR_SCRIBE_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::OpenAiURL.to_string())
                .long(ConfigKey::OpenAiURL.to_string())
                .env("SCHOLAR_SCRIBE_OPENAI_URL")
                .num_args(1)
                .help(format!("OpenAI API URL when using the openai backend. Can be swapped to a compatible proxy. [default: {}]", Config::default(ConfigKey::OpenAiURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::StoreFile.to_string())
                .long(ConfigKey::StoreFile.to_string())
                .env("SCHOLAR_SCRIBE_STORE_FILE")
                .num_args(1)
                .help(format!("File where the API key is kept. [default: {}]", Config::default(ConfigKey::StoreFile)))
                .global(true),
        );
}

/// Parses arguments and runs one-shot subcommands. Returns true when a chat
/// should be started.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("chat", subcmd_matches)) => {
            Config::load(&build(), &[&matches, subcmd_matches]).await?;
        }
        Some(("cite", subcmd_matches)) => {
            cite(subcmd_matches)?;
            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(&build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("credential", subcmd_matches)) => {
            Config::load(&build(), &[&matches, subcmd_matches]).await?;
            credential(subcmd_matches).await?;
            return Ok(false);
        }
        Some(("subjects", _)) => {
            println!("{}", format_subjects());
            return Ok(false);
        }
        _ => {
            Config::load(&build(), &[&matches]).await?;
        }
    }

    return Ok(true);
}
