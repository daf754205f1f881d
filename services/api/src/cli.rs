use crate::listing::{run_list, run_options, ListArgs, OptionsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use job_board::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Job Board",
    about = "Browse and filter a batch of job postings from the command line or over HTTP",
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
    /// Fetch postings and print the filtered board
    Jobs {
        #[command(subcommand)]
        command: JobsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum JobsCommand {
    /// Fetch the listing, apply filters, and print one card per posting
    List(ListArgs),
    /// Show the choices offered by each filter control
    Options(OptionsArgs),
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
        Command::Jobs {
            command: JobsCommand::List(args),
        } => run_list(args).await,
        Command::Jobs {
            command: JobsCommand::Options(args),
        } => run_options(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::OutputFormat;

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["job-board"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_list_filters() {
        let cli = Cli::try_parse_from([
            "job-board",
            "jobs",
            "list",
            "--min-experience",
            "3",
            "--remote",
            "onsite",
            "--format",
            "csv",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Jobs {
                command: JobsCommand::List(args),
            }) => {
                assert_eq!(args.min_experience.as_deref(), Some("3"));
                assert_eq!(args.remote.as_deref(), Some("onsite"));
                assert_eq!(args.format, OutputFormat::Csv);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
