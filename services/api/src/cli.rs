use crate::demo::{run_demo, run_slot_report, DemoArgs, SlotReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use vc_brain::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "VC Brain",
    about = "Run the VC Brain core service or exercise its engines from the command line",
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
    /// Compute booking availability against demo-seeded data
    Schedule {
        #[command(subcommand)]
        command: ScheduleCommand,
    },
    /// Run an end-to-end CLI demo covering all three engines
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ScheduleCommand {
    /// Print the bookable slots for a date range
    Slots(SlotReportArgs),
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
        Command::Schedule {
            command: ScheduleCommand::Slots(args),
        } => run_slot_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
