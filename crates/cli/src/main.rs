mod echo;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use khulasa_core::{
    Dictionary, FetchConfig, ScrapeConfig, Summarizer, SummarizerConfig, SummaryRequest, TranslationMode, build_client,
    fetch_file, fetch_stdin, fetch_url, page_title, scrape_text, translate, validate_url,
};
use owo_colors::OwoColorize;

use crate::echo::{
    format_size, print_banner, print_detail, print_error, print_info, print_step, print_success, print_timing,
    print_warning,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Summarize web articles into Urdu
#[derive(Parser, Debug)]
#[command(name = "khulasa")]
#[command(version)]
#[command(about = "Summarize web articles into Urdu", long_about = None)]
struct Args {
    /// Print progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize an article through the RapidAPI summarizer
    Summarize(SummarizeArgs),

    /// Translate English text with the dictionary
    Translate {
        /// Text to translate, or "-" / nothing for stdin
        #[arg(value_name = "TEXT")]
        text: Option<String>,

        /// Extension dictionary (JSON object)
        #[arg(long, value_name = "FILE")]
        dictionary: Option<PathBuf>,
    },

    /// Print the visible text of a page
    Scrape {
        /// URL to fetch, local HTML file, or "-" for stdin
        #[arg(value_name = "INPUT")]
        input: String,

        /// Maximum characters to print (0 = unlimited)
        #[arg(long, default_value = "0", value_name = "NUM")]
        max_chars: usize,

        /// HTTP timeout in seconds
        #[arg(long, default_value = "30", value_name = "SECS")]
        timeout: u64,
    },

    /// Generate a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args, Debug)]
struct SummarizeArgs {
    /// Article URL
    #[arg(value_name = "URL")]
    url: String,

    /// RapidAPI key
    #[arg(long, env = "RAPIDAPI_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Base URL of the summarization service
    #[arg(long, value_name = "URL")]
    api_base: Option<String>,

    /// Translate locally with the dictionary instead of asking for Urdu
    #[arg(long)]
    local: bool,

    /// Also fetch the page and print its visible text
    #[arg(long)]
    scrape: bool,

    /// Extension dictionary (JSON object) for local translation
    #[arg(long, value_name = "FILE")]
    dictionary: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

/// Default extension dictionary location.
fn default_dictionary_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("khulasa").join("dictionary.json"))
}

/// Resolves the dictionary: explicit file, then the default file, then built-in.
fn load_dictionary(explicit: Option<&Path>, verbose: bool) -> anyhow::Result<Dictionary> {
    if let Some(path) = explicit {
        return Dictionary::extended_from_file(path)
            .with_context(|| format!("Failed to load dictionary: {}", path.display()));
    }

    if let Some(path) = default_dictionary_path()
        && path.exists()
    {
        match Dictionary::extended_from_file(&path) {
            Ok(dict) => {
                if verbose {
                    print_info(&format!("Using dictionary {}", path.display().bright_white()));
                }
                return Ok(dict);
            }
            Err(e) => print_warning(&format!("Ignoring {}: {}", path.display(), e)),
        }
    }

    Ok(Dictionary::builtin().clone())
}

fn write_output(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => println!("{}", content),
    }
    Ok(())
}

async fn run_summarize(args: SummarizeArgs, verbose: bool) -> anyhow::Result<()> {
    let mode = if args.local { TranslationMode::Local } else { TranslationMode::Upstream };
    let dictionary = load_dictionary(args.dictionary.as_deref(), verbose)?;

    let mut builder = SummarizerConfig::builder()
        .maybe_api_key(args.api_key)
        .translation(mode)
        .scrape(args.scrape)
        .timeout(args.timeout);
    if let Some(base) = args.api_base {
        builder = builder.base_url(base);
    }

    let summarizer =
        Summarizer::with_dictionary(builder.build(), dictionary).context("Failed to create HTTP client")?;

    if verbose {
        print_step(1, 2, &format!("Summarizing {}", args.url.bright_white().underline()));
        print_detail("Translation", &mode.to_string());
    }

    let started = Instant::now();
    let result = summarizer
        .summarize(&SummaryRequest::new(args.url))
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    if verbose {
        print_timing("Summary", started.elapsed());
        if let Some(text) = &result.scraped_text {
            print_detail("Page text", &format_size(text.len()));
        }
        print_step(2, 2, "Writing output");
    }

    let content = if args.json {
        serde_json::to_string_pretty(&result).context("Failed to serialize result")?
    } else {
        let mut text = result.translated_summary.clone();
        if let Some(scraped) = &result.scraped_text {
            text.push_str("\n\n---\n\n");
            if let Some(title) = &result.title {
                text.push_str(title);
                text.push_str("\n\n");
            }
            text.push_str(scraped);
        }
        text
    };

    write_output(args.output.as_deref(), &content)
}

fn run_translate(text: Option<String>, dictionary: Option<PathBuf>, verbose: bool) -> anyhow::Result<()> {
    let dictionary = load_dictionary(dictionary.as_deref(), verbose)?;

    let input = match text.as_deref() {
        None | Some("-") => fetch_stdin().context("Failed to read from stdin")?,
        Some(text) => text.to_string(),
    };

    if verbose {
        print_detail("Entries", &dictionary.len().to_string());
        print_detail("Input", &format_size(input.len()));
    }

    print!("{}", translate(&input, &dictionary));
    if !input.ends_with('\n') {
        println!();
    }
    Ok(())
}

async fn run_scrape(input: String, max_chars: usize, timeout: u64, verbose: bool) -> anyhow::Result<()> {
    let html = if input == "-" {
        if verbose {
            print_step(1, 2, "Reading from stdin");
        }
        fetch_stdin().context("Failed to read from stdin")?
    } else if input.starts_with("http://") || input.starts_with("https://") {
        if verbose {
            print_step(1, 2, &format!("Fetching from {}", input.bright_white().underline()));
        }
        let url = validate_url(&input).context("Invalid URL")?;
        let config = FetchConfig { timeout, ..Default::default() };
        let client = build_client(&config).context("Failed to create HTTP client")?;
        fetch_url(&client, &url, &config).await.context("Failed to fetch URL")?
    } else {
        if verbose {
            print_step(1, 2, &format!("Reading from file {}", input.bright_white()));
        }
        fetch_file(&input).with_context(|| format!("Failed to read file: {}", input))?
    };

    if verbose {
        print_detail("Size", &format_size(html.len()));
        if let Some(title) = page_title(&html) {
            print_detail("Title", &title);
        }
        print_step(2, 2, "Extracting visible text");
    }

    println!("{}", scrape_text(&html, &ScrapeConfig { max_chars }));
    Ok(())
}

async fn run(args: Args) -> anyhow::Result<()> {
    if args.verbose {
        print_banner();
    }

    match args.command {
        Command::Summarize(summarize) => run_summarize(summarize, args.verbose).await,
        Command::Translate { text, dictionary } => run_translate(text, dictionary, args.verbose),
        Command::Scrape { input, max_chars, timeout } => run_scrape(input, max_chars, timeout, args.verbose).await,
        Command::Completions { shell } => {
            clap_complete::generate(shell, &mut Args::command(), "khulasa", &mut io::stdout());
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
