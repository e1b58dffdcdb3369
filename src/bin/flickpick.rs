/*!
 * flickpick CLI - interactive movie recommendations
 *
 * Reads free-text queries in a loop, resolves each against a local catalog
 * and prints the matching movies newest first. A single positional query
 * runs one resolution and exits, for scripting.
 */

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use flickpick::{recommend, Catalog, GenreChooser, Movie, NoMatch};

#[derive(Parser)]
#[command(name = "flickpick")]
#[command(about = "Movie recommendations from a local genre catalog", long_about = None)]
#[command(version)]
struct Cli {
    /// One-shot query; omit to start the interactive prompt
    query: Option<String>,

    /// Catalog file; .yaml/.yml parses as YAML, anything else as JSON
    #[arg(short, long, default_value = "movies.json")]
    catalog: PathBuf,

    /// Use the built-in sample catalog instead of a file
    #[arg(long)]
    sample: bool,

    /// Log verbosity (logs go to stderr, recommendations to stdout)
    #[arg(long, default_value = "warn")]
    log_level: LogLevel,
}

#[derive(Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(cli.log_level.to_filter_directive()))
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let catalog = if cli.sample {
        Catalog::sample()
    } else {
        Catalog::load_or_empty(&cli.catalog)
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    match cli.query {
        Some(query) => run_once(&catalog, &query, &mut input, &mut output)?,
        None => run_interactive(&catalog, &mut input, &mut output)?,
    }

    Ok(())
}

/// Resolve a single query and print the outcome.
fn run_once<R: BufRead, W: Write>(
    catalog: &Catalog,
    query: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    let outcome = {
        let mut chooser = StdinChooser {
            input: &mut *input,
            output: &mut *output,
        };
        recommend(catalog, query, &mut chooser)
    };
    render(output, &outcome)
}

/// The interactive loop: prompt, resolve, render, until "quit" or EOF.
fn run_interactive<R: BufRead, W: Write>(
    catalog: &Catalog,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    writeln!(output, "Welcome to the Movie Recommender!")?;
    writeln!(
        output,
        "Enter a genre (e.g., Sci-Fi, Action, War, Comedy), a keyword (e.g., action, funny),"
    )?;
    writeln!(output, "or 'Recent <genre>' for newer movies. Type 'quit' to exit.")?;

    loop {
        write!(output, "\nWhat would you like to watch? ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // EOF ends the session like "quit"
            break;
        }
        let query = line.trim();

        if query.eq_ignore_ascii_case("quit") {
            writeln!(output, "Goodbye!")?;
            break;
        }
        if query.is_empty() {
            writeln!(output, "Please enter a genre, keyword, or 'quit'.")?;
            continue;
        }

        let outcome = {
            let mut chooser = StdinChooser {
                input: &mut *input,
                output: &mut *output,
            };
            recommend(catalog, query, &mut chooser)
        };
        render(output, &outcome)?;
    }

    Ok(())
}

/// Print a resolved outcome: a movie list, the empty-list notice, or the
/// resolver's message verbatim.
fn render<W: Write>(output: &mut W, outcome: &Result<Vec<Movie>, NoMatch>) -> io::Result<()> {
    match outcome {
        Ok(movies) if movies.is_empty() => writeln!(output, "No recommendations found."),
        Ok(movies) => {
            writeln!(output, "\nRecommended movies:")?;
            for movie in movies {
                writeln!(output, "- {}", movie)?;
            }
            Ok(())
        }
        Err(miss) => writeln!(output, "{}", miss),
    }
}

/// Chooser backed by the same stdin/stdout as the surrounding loop: lists
/// the candidate genres 1-indexed and reads one reply line.
struct StdinChooser<'a, R: BufRead, W: Write> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> GenreChooser for StdinChooser<'_, R, W> {
    fn choose(&mut self, genres: &[String]) -> Option<String> {
        writeln!(self.output, "\nMultiple genres match your search:").ok()?;
        for (i, name) in genres.iter().enumerate() {
            writeln!(self.output, "  {}. {}", i + 1, name).ok()?;
        }
        write!(self.output, "Pick a number (0 searches all of them): ").ok()?;
        self.output.flush().ok()?;

        let mut reply = String::new();
        match self.input.read_line(&mut reply) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(reply),
        }
    }
}
