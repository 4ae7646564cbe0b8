use crate::decisions::{run_batch, run_evaluate, run_metiers, BatchArgs, EvaluateArgs};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use recrutement::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "recrutement",
    about = "Score recruitment candidates and compute per-métier hiring decisions",
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
    /// Decide one candidate from aggregated scores passed as flags
    Evaluate(EvaluateArgs),
    /// Decide every row of a CSV score sheet
    Batch(BatchArgs),
    /// Print the métier catalog with required tests and thresholds
    Metiers,
    /// Walk a sample candidate through registration, jury grids and evaluation
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
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evaluate(args) => run_evaluate(args),
        Command::Batch(args) => run_batch(args),
        Command::Metiers => run_metiers(),
        Command::Demo(args) => run_demo(args),
    }
}
