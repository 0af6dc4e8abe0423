use crate::demo::{run_assemble, run_demo, run_preview, AssembleArgs, DemoArgs, PreviewArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use enrollment_contracts::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Enrollment Contracts",
    about = "Assemble, preview and serve printable enrollment contracts",
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
    /// Work with a single enrollment record on disk
    Contract {
        #[command(subcommand)]
        command: ContractCommand,
    },
    /// Assemble the bundled demo enrollment and print a walkthrough
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ContractCommand {
    /// Print the assembled document as JSON
    Assemble(AssembleArgs),
    /// Print a plain-text preview of every page
    Preview(PreviewArgs),
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
        Command::Contract {
            command: ContractCommand::Assemble(args),
        } => run_assemble(args),
        Command::Contract {
            command: ContractCommand::Preview(args),
        } => run_preview(args),
        Command::Demo(args) => run_demo(args),
    }
}
