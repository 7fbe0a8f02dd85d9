mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::{debug, error, Level};
use tracing_subscriber::fmt;

#[derive(Parser, Debug)]
#[command(version, about, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity of the program:
    /// -v for info, -vv for debug, and -vvv for trace
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only report errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Number of threads to use for parallel processing
    #[arg(short = 'j', long = "num-threads", global = true, default_value_t = 0)]
    num_threads: usize,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Body restraints of an antibody (unambiguous TBL)
    Restrain(cli::restrain::Args),
    /// Solvent accessible residues above a relative cutoff
    Access(cli::access::Args),
    /// Write a run.param file
    #[command(name = "run-param", alias = "run_param")]
    RunParam(cli::run_param::Args),
    /// Ambiguous restraints from two active/passive files
    Ambig(cli::ambig::Args),
    /// Clean a structure for HADDOCK
    Tidy(cli::tidy::Args),
    /// Extract FASTA sequences from structures
    #[command(name = "extract-fasta", alias = "extract_fasta")]
    ExtractFasta(cli::extract_fasta::Args),
    /// Extract Fv regions from a folder of antibodies
    #[command(name = "extract-fv", alias = "extract_fv")]
    ExtractFv(cli::extract_fv::Args),
    /// Number antibodies for HADDOCK
    Process(cli::process::Args),
    /// Prepare a complete antibody-antigen docking run
    Start(cli::start::Args),
}

fn main() -> ExitCode {
    let args = Cli::parse();

    let level = match (args.quiet, args.verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::INFO,
        (false, 2) => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set up logging: {e}");
    }

    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(args.num_threads)
        .build_global()
    {
        error!("Failed to build the thread pool: {e}");
        return ExitCode::FAILURE;
    }
    debug!("Using {} thread(s)", rayon::current_num_threads());

    let result = match &args.command {
        Commands::Restrain(args) => cli::restrain::run(args),
        Commands::Access(args) => cli::access::run(args),
        Commands::RunParam(args) => cli::run_param::run(args),
        Commands::Ambig(args) => cli::ambig::run(args),
        Commands::Tidy(args) => cli::tidy::run(args),
        Commands::ExtractFasta(args) => cli::extract_fasta::run(args),
        Commands::ExtractFv(args) => cli::extract_fv::run(args),
        Commands::Process(args) => cli::process::run(args),
        Commands::Start(args) => cli::start::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
