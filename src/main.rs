use clap::Parser;
use team_sso_migrator::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Migrate(args) => cli::migrate::run(args).await,
        Command::Restore(args) => cli::restore::run(args).await,
    }
}
