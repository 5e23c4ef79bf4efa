//! EventHub wishlist CLI - composition root binary.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eventhub_client::infrastructure::{
    EnvSession, FileStorageProvider, StoredSession, TracingNotifier, WishlistHttpClient,
};
use eventhub_client::ports::outbound::SessionPort;
use eventhub_client::{ClientConfig, InitOutcome, WishlistStore};
use eventhub_domain::{Credential, EventId};

const USAGE: &str = "Usage: eventhub-wishlist <command>

Commands:
  list              Show favorited event ids
  contains <id>     Check whether an event is favorited
  add <id>          Favorite an event
  remove <id>       Unfavorite an event
  toggle <id>       Flip the favorite state of an event
  login <token>     Store an access token for later commands
  logout            Forget the stored access token";

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventhub_client=info,eventhub=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(std::env::args().skip(1).collect()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Vec<String>) -> anyhow::Result<ExitCode> {
    let mut args = args.into_iter();
    let command = args.next();
    let argument = args.next();

    let stored_session = || -> anyhow::Result<StoredSession<FileStorageProvider>> {
        let storage = FileStorageProvider::new().context("cannot open local storage")?;
        Ok(StoredSession::new(storage))
    };

    match command.as_deref() {
        Some("login") => {
            let token = argument.context("login requires a token")?;
            let credential = Credential::new(token)?;
            stored_session()?
                .sign_in(&credential)
                .context("failed to save the access token")?;
            println!("Signed in");
            return Ok(ExitCode::SUCCESS);
        }
        Some("logout") => {
            stored_session()?
                .sign_out()
                .context("failed to remove the stored access token")?;
            println!("Signed out");
            return Ok(ExitCode::SUCCESS);
        }
        Some("list" | "contains" | "add" | "remove" | "toggle") => {}
        Some(cmd) => bail!("Unknown command: {cmd}\n\n{USAGE}"),
        None => bail!("{USAGE}"),
    }

    let config = ClientConfig::from_env().context("invalid API configuration")?;
    tracing::debug!(api = %config.api_base_url, "Using wishlist API");

    // The environment token wins over a stored login
    let session: Arc<dyn SessionPort> = if EnvSession::is_configured() {
        Arc::new(EnvSession)
    } else {
        Arc::new(stored_session()?)
    };

    let store = WishlistStore::new(
        Arc::new(WishlistHttpClient::new(&config)),
        session,
        Arc::new(TracingNotifier),
    );

    let outcome = store.initialize().await;
    if outcome == InitOutcome::Degraded {
        tracing::warn!("Wishlist could not be loaded; showing an empty list");
    }

    let event_id = || -> anyhow::Result<EventId> {
        let raw = argument.clone().context("missing event id")?;
        Ok(EventId::new(raw)?)
    };

    // Mutation failures are reported to the user by the notifier; only the exit
    // status is set here.
    match command.as_deref() {
        Some("list") => {
            if outcome == InitOutcome::Anonymous {
                println!("Not signed in");
            }
            for id in store.snapshot().event_ids {
                println!("{}", id);
            }
        }
        Some("contains") => {
            let id = event_id()?;
            println!("{}", store.contains(&id));
        }
        Some("add") => {
            let id = event_id()?;
            if store.add(id.clone()).await.is_err() {
                return Ok(ExitCode::FAILURE);
            }
            println!("Added {}", id);
        }
        Some("remove") => {
            let id = event_id()?;
            if store.remove(id.clone()).await.is_err() {
                return Ok(ExitCode::FAILURE);
            }
            println!("Removed {}", id);
        }
        Some("toggle") => {
            let id = event_id()?;
            match store.toggle(id.clone()).await {
                Ok(true) => println!("Added {}", id),
                Ok(false) => println!("Removed {}", id),
                Err(_) => return Ok(ExitCode::FAILURE),
            }
        }
        _ => bail!("{USAGE}"),
    }

    Ok(ExitCode::SUCCESS)
}
