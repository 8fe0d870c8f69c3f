mod actions;
mod cli;
mod commands;
mod config;
mod error;
mod filter;
mod i18n;
mod location;
mod logging;
mod output;
mod routes;
mod session;
mod stats;
mod storage;
mod store;
mod types;
mod validation;

use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use cli::{Cli, Commands, DraftCommands, IssueCommands};
use commands::issues::Decision;
use commands::Context;
use config::Config;
use error::Result;
use i18n::Language;
use std::error::Error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    logging::init(verbose);

    // Errors before the context is open are shown in the flag or env language.
    let mut language = cli.lang.unwrap_or_default();

    if let Err(e) = run(cli, &mut language).await {
        eprintln!("Error: {}", e.localized(language));

        // Show error chain if verbose flag was passed
        if verbose {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

async fn run(cli: Cli, language: &mut Language) -> Result<()> {
    output::set_format(cli.output_format());
    output::set_quiet(cli.quiet);

    match cli.command {
        // Commands that don't need storage
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "reporter", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        command => {
            let config = Config::load()?;
            *language = cli.lang.unwrap_or_else(|| config.default_language());

            let mut ctx = Context::open(config, cli.lang)?;
            let result = dispatch(&mut ctx, command).await;
            *language = ctx.language;
            result?;
        }
    }

    Ok(())
}

async fn dispatch(ctx: &mut Context, command: Commands) -> Result<()> {
    match command {
        Commands::Signin(args) => commands::auth::sign_in(ctx, args).await?,
        Commands::Signup(args) => commands::auth::sign_up(ctx, args).await?,
        Commands::Signout => commands::auth::sign_out(ctx)?,
        Commands::ForgotPassword { identifier, role } => {
            commands::auth::forgot_password(ctx, &identifier, role).await?;
        }
        Commands::Profile => commands::auth::profile(ctx)?,
        Commands::Issues(args) => commands::issues::list(ctx, args)?,
        Commands::Issue { action } => match action {
            IssueCommands::List(args) => commands::issues::list(ctx, args)?,
            IssueCommands::View { id } => commands::issues::view(ctx, &id)?,
            IssueCommands::Edit(args) => commands::issues::edit(ctx, args)?,
            IssueCommands::Draft(args) => commands::issues::save_draft(ctx, args)?,
            IssueCommands::Delete { id, yes } => commands::issues::delete(ctx, &id, yes)?,
            IssueCommands::Approve { id } => {
                commands::issues::decide(ctx, &id, Decision::Approve)?;
            }
            IssueCommands::Reject { id, reason } => {
                commands::issues::decide(ctx, &id, Decision::Reject(reason))?;
            }
            IssueCommands::Revert { id } => {
                commands::issues::decide(ctx, &id, Decision::Revert)?;
            }
            IssueCommands::Resolve { id } => {
                commands::issues::decide(ctx, &id, Decision::Resolve)?;
            }
            IssueCommands::Comments { id } => commands::comments::list(ctx, &id)?,
            IssueCommands::Comment(args) => commands::comments::add(ctx, args)?,
            IssueCommands::Vote { id, direction } => {
                commands::issues::vote(ctx, &id, direction)?;
            }
            IssueCommands::ReportProblem { id, description } => {
                commands::issues::report_problem(ctx, &id, &description)?;
            }
        },
        Commands::Report(args) => commands::issues::report(ctx, args)?,
        Commands::MyReports => commands::issues::my_reports(ctx)?,
        Commands::Drafts { action } => match action {
            DraftCommands::List => commands::drafts::list(ctx)?,
            DraftCommands::View { id } => commands::drafts::view(ctx, &id)?,
            DraftCommands::Discard { id } => commands::drafts::discard(ctx, &id)?,
        },
        Commands::Stats => commands::stats::show(ctx)?,
        Commands::Language { language } => commands::language::run(ctx, language)?,
        Commands::Open { path } => commands::navigate::open(ctx, &path)?,
        Commands::Completions { .. } | Commands::Init => {
            // Already handled above
        }
    }

    Ok(())
}
