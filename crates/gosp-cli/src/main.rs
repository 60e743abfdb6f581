//! gosp CLI - terminal front-end for a remote REPL server.

mod cli;
mod commands;
mod helper;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use gosp::prelude::*;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use commands::Command;
use helper::CliHelper;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();

    // Logs go to stderr so they never interleave with REPL output on stdout.
    let default_filter = if args.verbose { "gosp=debug" } else { "gosp=warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    let mut config = match &args.config {
        Some(path) => ClientConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ClientConfig::default(),
    };
    if let Some(url) = &args.url {
        config = config.with_base_url(url.as_str());
    }
    tracing::debug!(
        base_url = %config.base_url,
        config = ?args.config,
        "starting REPL client"
    );

    let client = ClientBuilder::new()
        .config(config)
        .build()
        .context("failed to create client")?;
    run(client).await
}

async fn run<T: Transport>(mut client: SessionClient<T>) -> Result<()> {
    let mut rl: Editor<CliHelper, DefaultHistory> =
        Editor::new().context("failed to initialize readline")?;
    rl.set_helper(Some(CliHelper));

    println!("{}", "gosp - type :help for commands, :quit to exit".bright_black());

    loop {
        let prompt = if client.session().is_authenticated() {
            "gosp* > "
        } else {
            "gosp > "
        };

        let line = match rl.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("readline failed"),
        };
        let command = Command::parse(&line);
        if !command.carries_password() {
            let _ = rl.add_history_entry(line.as_str());
        }

        match command {
            Command::Empty => {}
            Command::Eval(expr) => {
                if client.start_evaluation(&expr) {
                    println!("{}", client.screen().output().bright_black());
                }
                if let Some(entry) = client.evaluate(&expr).await {
                    print_outcome(entry.outcome());
                }
            }
            Command::Register { username, password } => {
                let ok = client.register(&username, &password).await.is_ok();
                print_status(client.screen(), ok);
            }
            Command::Login { username, password } => {
                let ok = client.login(&username, &password).await.is_ok();
                print_status(client.screen(), ok);
            }
            Command::Logout => {
                let outcome = client.logout().await;
                print_status(client.screen(), !matches!(outcome, LogoutOutcome::LocalOnly { .. }));
            }
            Command::History => {
                let _ = client.load_history().await;
                print_history(client.screen());
            }
            Command::Help => println!("{}", Command::help_text()),
            Command::Quit => break,
            Command::Unknown(name) => {
                eprintln!("{} :{name} (try :help)", "Unknown command".yellow());
            }
        }
    }

    Ok(())
}

fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Success(text) => println!("{}", text.green()),
        Outcome::EvaluationError(text) => println!("{}", text.red()),
        Outcome::TransportError(text) => println!("{}", text.yellow()),
    }
}

fn print_status(screen: &Screen, ok: bool) {
    if ok {
        println!("{}", screen.status().bright_black());
    } else {
        println!("{}", screen.status().red());
    }
}

fn print_history(screen: &Screen) {
    if let Some(notice) = screen.history_notice() {
        println!("{}", notice.bright_black());
    }
    for entry in screen.history().iter() {
        let line = entry.render();
        if entry.outcome().is_success() {
            println!("{line}");
        } else {
            println!("{}", line.red());
        }
    }
}
