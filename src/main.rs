use std::io::Write;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod models;
mod services;
mod utils;

#[cfg(test)]
mod test_support;

use api::sinpe::SinpeClient;
use commands::{Outcome, Session};
use config::Config;
use services::{balance_service, contact_service::ContactBook};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Logs go to stderr so command output stays clean on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("sinpe_movil=info".parse()?)
                .add_directive("reqwest=warn".parse()?)
                .add_directive("hyper=warn".parse()?),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();

    let client = SinpeClient::new(&config.base_url)?;
    info!("Using SINPE móvil backend at {}", client.base_url());

    let contacts = match ContactBook::load(&config.contacts) {
        Ok(book) => book,
        Err(e) => {
            warn!("{}", e);
            ContactBook::default()
        }
    };

    let session = Session::new(client, config.user_id.clone(), contacts);

    if !config.command.is_empty() {
        if let Outcome::Continue(output) = commands::handle_line(&session, &config.command.join(" ")).await {
            println!("{}", output);
        }
        return Ok(());
    }

    run_prompt(&session).await
}

async fn run_prompt(session: &Session<SinpeClient>) -> anyhow::Result<()> {
    // The home screen loads the account on open; a failure here is not fatal
    match balance_service::get_balance(&session.gateway, &session.user_id).await {
        Ok(user) => println!(
            "👋 Hola {}. Saldo disponible: {}",
            user.name,
            utils::format_colones(user.amount)
        ),
        Err(e) => println!("{}", e.user_message()),
    }
    println!("Type `help` to see what you can do.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("sinpe> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match commands::handle_line(session, &line).await {
            Outcome::Continue(output) if output.is_empty() => {}
            Outcome::Continue(output) => println!("{}", output),
            Outcome::Quit => break,
        }
    }

    info!("Bye");
    Ok(())
}
