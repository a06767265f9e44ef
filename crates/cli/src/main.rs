// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! pipedash - submit files to the pipeline backend and watch the jobs run

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use commands::{account, catalog, jobs, submit, Session};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::error::DashError;

#[derive(Parser)]
#[command(
    name = "pipedash",
    version,
    about = "Pipeline dashboard - submit files and track job status"
)]
struct Cli {
    /// Config file (default: ./pipedash.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend URL, overriding config and PIPEDASH_URL
    #[arg(long, global = true)]
    url: Option<String>,

    /// Sign in as this user before running the command
    #[arg(long, global = true, env = "PIPEDASH_USERNAME")]
    username: Option<String>,

    /// Password for --username
    #[arg(long, global = true, env = "PIPEDASH_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available pipelines
    Pipelines(catalog::ListArgs),
    /// List data submissions
    Submissions(catalog::ListArgs),
    /// List previously created jobs
    Jobs(catalog::ListArgs),
    /// Upload files as one job and follow its status
    Submit(submit::SubmitArgs),
    /// Follow the status of an existing job
    Status(submit::StatusArgs),
    /// Check credentials against the backend
    Login,
    /// Create an account
    Register(account::RegisterArgs),
    /// End the server-side session
    Logout,
    /// Show the signed-in user
    Whoami,
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Card output goes to stdout; keep logs quiet on stderr unless asked
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging();

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            match err.downcast_ref::<DashError>() {
                Some(dash) => eprint!("{}", dash),
                None => eprintln!("error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = commands::resolve_config(cli.config.as_deref(), cli.url.as_deref())?;

    // Submit checks its arguments before any connection is made
    if let Commands::Submit(args) = &cli.command {
        submit::check_arguments(args, &config)?;
    }

    let session = Session::new(config)?;
    let signs_in_itself = matches!(cli.command, Commands::Login | Commands::Register(_));
    if let (Some(username), Some(password), false) = (&cli.username, &cli.password, signs_in_itself)
    {
        session.sign_in(username, password).await?;
    }

    match cli.command {
        Commands::Pipelines(args) => catalog::pipelines(&session, args).await?,
        Commands::Submissions(args) => catalog::submissions(&session, args).await?,
        Commands::Jobs(args) => jobs::history(&session, args).await?,
        Commands::Submit(args) => return submit::submit(&session, args).await,
        Commands::Status(args) => return submit::status(&session, args).await,
        Commands::Login => account::login(&session, cli.username, cli.password).await?,
        Commands::Register(args) => {
            account::register(&session, cli.username, cli.password, args).await?
        }
        Commands::Logout => account::logout(&session).await?,
        Commands::Whoami => account::whoami(&session).await?,
    }

    Ok(ExitCode::SUCCESS)
}
