use crate::demo::{run_demo, DemoArgs};
use crate::quote::{run_curve, run_suggest, CurveArgs, SuggestArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use lease_pricing::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "lease-pricing",
    about = "Suggest rents per lease term and check lease-expiration allocation",
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
    /// Price a unit or inspect the expiration curve from a JSON snapshot
    Pricing {
        #[command(subcommand)]
        command: PricingCommand,
    },
    /// Walk through a quote built from fixed demo fixtures
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum PricingCommand {
    /// Rank rent suggestions for every configured lease term
    Suggest(SuggestArgs),
    /// Summarize the expiration allocation table month by month
    Curve(CurveArgs),
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
        Command::Pricing {
            command: PricingCommand::Suggest(args),
        } => run_suggest(args),
        Command::Pricing {
            command: PricingCommand::Curve(args),
        } => run_curve(args),
        Command::Demo(args) => run_demo(args),
    }
}
