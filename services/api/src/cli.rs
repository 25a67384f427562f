use crate::demo::{run_catalog, run_demo, run_rate, DemoArgs, RateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hotel_rating::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Hotel Star Rating",
    about = "Rate hotels from guest survey scores and run the rating service",
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
    /// Rate one set of category scores or a criteria CSV export
    Rate(RateArgs),
    /// Print the survey catalog, category weights, and star boundaries
    Catalog,
    /// Feed sample surveys for several hotels through an in-memory registry
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
        Command::Rate(args) => run_rate(args),
        Command::Catalog => run_catalog(),
        Command::Demo(args) => run_demo(args),
    }
}
