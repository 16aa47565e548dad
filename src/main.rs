use std::path::Path;

use clap::{Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;
use tracing::{debug, Level};

use wikiorg::exporting::{collect_titles, Exporter, OrgExporter, ORG_MODE};
use wikiorg::language::Wiki;
use wikiorg::parsing;

mod problem;

#[derive(Serialize)]
struct Listing<'a> {
    word: &'a str,
    title: &'a str,
}

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("wikiorg")
        .version(VERSION)
        .propagate_version(true)
        .about("Export wiki pages into a single org-mode file.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log details of what is being done to standard error."),
        )
        .subcommand(
            Command::new("export")
                .about("Export pages from a wiki dump to an org-mode file")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .required(true)
                        .help("The org-mode file to write. It will be replaced if it exists."),
                )
                .arg(
                    Arg::new("page")
                        .short('p')
                        .long("page")
                        .action(ArgAction::Append)
                        .help("A page to export, by word or alias. Can be given more than once; if not given, every page in the dump is exported in the order it appears."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The wiki dump containing the parsed pages."),
                ),
        )
        .subcommand(
            Command::new("titles")
                .about("Show the title each page will be exported under")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Emit the listing as JSON."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The wiki dump containing the parsed pages."),
                ),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match matches.subcommand() {
        Some(("export", submatches)) => {
            let wiki = open(submatches);

            let words: Vec<&str> = match submatches.get_many::<String>("page") {
                Some(pages) => pages
                    .map(String::as_str)
                    .collect(),
                None => wiki
                    .words()
                    .collect(),
            };

            let output = argument(submatches, "output");
            debug!(?output);

            let exporter = OrgExporter::new();
            if !exporter.export(&wiki, &words, ORG_MODE, Path::new(output)) {
                std::process::exit(1);
            }
        }
        Some(("titles", submatches)) => {
            let wiki = open(submatches);
            let words: Vec<&str> = wiki
                .words()
                .collect();

            let titles = match collect_titles(&wiki, &words) {
                Ok(titles) => titles,
                Err(error) => {
                    eprintln!("error: {}", error);
                    std::process::exit(1);
                }
            };

            let listing: Vec<Listing> = words
                .iter()
                .map(|&word| Listing {
                    word,
                    title: titles
                        .get(word)
                        .unwrap_or(word),
                })
                .collect();

            if submatches.get_flag("json") {
                match serde_json::to_string_pretty(&listing) {
                    Ok(json) => println!("{}", json),
                    Err(error) => {
                        eprintln!("error: {}", error);
                        std::process::exit(1);
                    }
                }
            } else {
                for entry in &listing {
                    println!("{}: {}", entry.word, entry.title);
                }
            }
        }
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: wikiorg [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

// clap has already enforced the presence of required arguments.
fn argument<'m>(matches: &'m ArgMatches, name: &str) -> &'m str {
    match matches.get_one::<String>(name) {
        Some(value) => value.as_str(),
        None => unreachable!("required argument {} missing", name),
    }
}

/// Load and parse the wiki dump named on the command line, or explain why
/// that failed and exit.
fn open(matches: &ArgMatches) -> Wiki {
    let filename = Path::new(argument(matches, "filename"));

    let content = match parsing::load(filename) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}", problem::concise_loading_error(&error));
            std::process::exit(1);
        }
    };

    match parsing::parse(&content) {
        Ok(wiki) => wiki,
        Err(error) => {
            eprintln!(
                "{}",
                problem::full_parsing_error(&error, filename, &content)
            );
            std::process::exit(1);
        }
    }
}
