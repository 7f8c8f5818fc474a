use crate::demo::{run_demo, run_match, run_similar, DemoArgs, MatchArgs, SimilarArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use scholar_match::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Scholarship Matcher",
    about = "Match students to scholarships they qualify for, from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank the scholarships a single profile qualifies for
    Match(MatchArgs),
    /// List scholarships that share an audience with one listing
    Similar(SimilarArgs),
    /// Run the matching workflow against the bundled sample data
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Scholarship catalog CSV (defaults to the bundled sample)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// JSON object of profiles keyed by user id (defaults to the bundled sample)
    #[arg(long)]
    pub(crate) profiles: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Match(args) => run_match(args),
        Command::Similar(args) => run_similar(args),
        Command::Demo(args) => run_demo(args),
    }
}
