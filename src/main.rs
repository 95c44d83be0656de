use cellpipe::Evaluator;
use cellpipe::cli::{self, CliError, EvalOptions, TableOptions};
use clap::{Parser as ClapParser, Subcommand};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "cellpipe")]
#[command(about = "Cellpipe - resolve path and pipe cell expressions against JSON documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one cell expression against a JSON document
    Eval {
        /// The cell expression, e.g. 'doc.votes[*].value | sum'
        expression: String,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Render rows through a list of column cell expressions
    Table {
        /// A column cell expression (repeatable)
        #[arg(short = 'c', long = "cell", required = true)]
        cells: Vec<String>,

        /// JSON rows (reads from stdin if not provided); accepts a plain
        /// array or a {"rows": [...]} envelope
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// List the registered pipe names
    Pipes,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Eval {
            expression,
            input,
            pretty,
        } => run_eval(expression, input, pretty),
        Commands::Table {
            cells,
            input,
            pretty,
        } => run_table(cells, input, pretty),
        Commands::Pipes => {
            for name in Evaluator::new().pipe_names() {
                println!("{name}");
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_eval(expression: String, input: Option<String>, pretty: bool) -> Result<(), CliError> {
    let input = read_input(input)?;
    let options = EvalOptions { expression, input };
    let output = cli::execute_eval(&options)?;
    print_json(&output, pretty);
    Ok(())
}

fn run_table(cells: Vec<String>, input: Option<String>, pretty: bool) -> Result<(), CliError> {
    let input = read_input(input)?;
    let options = TableOptions { cells, input };
    let output = cli::execute_table(&options)?;
    print_json(&output, pretty);
    Ok(())
}

fn read_input(input: Option<String>) -> Result<Option<String>, CliError> {
    match input {
        Some(s) => Ok(Some(s)),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::Io)?;
            Ok(Some(buffer))
        }
        None => Ok(None),
    }
}

fn print_json(output: &serde_json::Value, pretty: bool) {
    let json = if pretty {
        serde_json::to_string_pretty(output)
    } else {
        serde_json::to_string(output)
    }
    .unwrap();
    println!("{}", json);
}
