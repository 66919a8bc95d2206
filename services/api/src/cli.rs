use crate::evaluate::{run_evaluate, EvaluateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use listing_value::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Listing Value",
    about = "Score used vehicle listings against their same-model, same-year market cohort",
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
    /// Evaluate a single listing from a ranked CSV export and print the report
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Ranked listing export to serve (overrides APP_LISTINGS_CSV)
    #[arg(long)]
    pub(crate) listings: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evaluate(args) => run_evaluate(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::OutputFormat;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["listing-value-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn evaluate_accepts_a_listing_id() {
        let cli = Cli::try_parse_from([
            "listing-value-api",
            "evaluate",
            "--listings",
            "ranked.csv",
            "--listing-id",
            "1001",
            "--format",
            "json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Evaluate(args)) => {
                assert_eq!(args.listings, PathBuf::from("ranked.csv"));
                assert_eq!(args.target.listing_id.as_deref(), Some("1001"));
                assert_eq!(args.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn evaluate_requires_exactly_one_target() {
        assert!(
            Cli::try_parse_from(["listing-value-api", "evaluate", "--listings", "a.csv"]).is_err()
        );
        assert!(Cli::try_parse_from([
            "listing-value-api",
            "evaluate",
            "--listings",
            "a.csv",
            "--listing-id",
            "1",
            "--url",
            "https://example.test/#listing=1",
        ])
        .is_err());
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::try_parse_from([
            "listing-value-api",
            "serve",
            "--port",
            "8080",
            "--listings",
            "ranked.csv",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.port, Some(8080));
                assert_eq!(args.listings, Some(PathBuf::from("ranked.csv")));
                assert!(args.host.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
