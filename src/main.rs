use clap::{Parser as ClapParser, Subcommand};
use sift_lang::cli::{self, CheckOptions, CheckResult, CliError, Grammar};
use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "sift")]
#[command(about = "Sift - compile filter queries against a field schema")]
#[command(version)]
struct Cli {
    /// Log at debug level (overrides SIFT_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate or compile a query
    Check {
        /// The query (reads from stdin if not provided)
        query: Option<String>,

        /// Schema file (JSON)
        #[arg(short, long)]
        schema: PathBuf,

        /// The query uses the JSON grammar
        #[arg(long)]
        json: bool,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate, don't compile
        #[arg(long)]
        syntax_only: bool,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'sift docs' to list categories)
        category: String,
    },

    /// Onboarding tutorial
    Onboard,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("SIFT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            query,
            schema,
            json,
            pretty,
            syntax_only,
        } => run_check(query, schema, json, pretty, syntax_only),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
        Commands::Onboard => {
            print!("{}", cli::get_onboarding_content());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(
    query: Option<String>,
    schema: PathBuf,
    json: bool,
    pretty: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let query = match query {
        Some(q) => q,
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer.trim_end().to_string()
        }
        None => return Err(CliError::NoQuery),
    };

    let options = CheckOptions {
        query,
        schema: fs::read_to_string(&schema)?,
        grammar: if json { Grammar::Json } else { Grammar::Text },
        syntax_only,
    };

    match cli::execute_check(&options)? {
        CheckResult::Valid => println!("Query is valid"),
        CheckResult::Empty => println!("Query is empty"),
        CheckResult::Expression(output) => {
            let json = if pretty {
                serde_json::to_string_pretty(&output)
            } else {
                serde_json::to_string(&output)
            }
            .map_err(CliError::Output)?;
            println!("{}", json);
        }
    }
    Ok(())
}
