use crate::commands::{run_correct, run_correct_csv, CorrectArgs, CorrectCsvArgs};
use crate::server;
use bl_tracker::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "BL Tracker",
    about = "Correct delivery-note product labels from the command line or over HTTP",
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
    /// Correct one or more labels and print the results
    Correct(CorrectArgs),
    /// Correct the label column of a delivery-note CSV export
    CorrectCsv(CorrectCsvArgs),
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
        Command::Correct(args) => run_correct(args),
        Command::CorrectCsv(args) => run_correct_csv(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["bl-tracker-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn correct_accepts_several_labels() {
        let cli = Cli::try_parse_from([
            "bl-tracker-api",
            "correct",
            "--explain",
            "2.2L CRF",
            "38/41",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Correct(args)) => {
                assert!(args.explain);
                assert_eq!(args.labels, vec!["2.2L CRF", "38/41"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn json_and_explain_are_exclusive() {
        let cli = Cli::try_parse_from(["bl-tracker-api", "correct", "--json", "2.2L CRF"])
            .expect("parses");
        match cli.command {
            Some(Command::Correct(args)) => assert!(args.json),
            other => panic!("unexpected command: {other:?}"),
        }

        let err = Cli::try_parse_from([
            "bl-tracker-api",
            "correct",
            "--json",
            "--explain",
            "2.2L CRF",
        ])
        .expect_err("conflicting flags");
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
