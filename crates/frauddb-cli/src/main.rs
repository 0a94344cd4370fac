//! Administrative CLI for the fraud-detection stores.
//!
//! - `frauddb provision` — one-shot, idempotent schema provisioning for all
//!   three stores: document collections and indexes, wide-column tables,
//!   graph predicates and types. Fails fast: the first error aborts the run
//!   with a non-zero exit.
//! - `frauddb check` — probe all three stores and report reachability.
//!
//! Connection targets come from the environment (`MONGO_URI` and friends);
//! see `frauddb::settings`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use frauddb::Settings;
use frauddb::document::{self, DocumentStore};
use frauddb::graph::{self, GraphStore};
use frauddb::widecolumn::{self, WideColumnStore};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "frauddb", version, about = "Fraud-detection store administration")]
struct Cli {
	/// Log at debug level (overridden by RUST_LOG).
	#[arg(short, long, global = true)]
	verbose: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Ensure every store carries its schema: collections and indexes,
	/// tables, graph predicates and types.
	Provision,
	/// Probe every store and report reachability.
	Check {
		/// Print the effective settings before probing.
		#[arg(long)]
		show_settings: bool,
	},
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	let default_level = if cli.verbose { "debug" } else { "info" };
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
		)
		.init();

	let settings = Settings::from_env().context("loading settings from environment")?;

	match cli.command {
		Command::Provision => provision(settings).await,
		Command::Check { show_settings } => check(settings, show_settings).await,
	}
}

async fn provision(settings: Settings) -> anyhow::Result<()> {
	let store = DocumentStore::from_config(settings.document)
		.await
		.context("connecting to document store")?;
	let result = document::schema::provision(&store).await;
	store.close().await;
	result.context("provisioning document-store indexes")?;

	// Table provisioning owns its keyspace the way the index pass owns its
	// collections, so the keyspace is created here when missing.
	let config = settings.widecolumn.create_keyspace(true);
	let store = WideColumnStore::connect(config)
		.await
		.context("connecting to wide-column store")?;
	let result = widecolumn::schema::provision(&store).await;
	store.close().await;
	result.context("provisioning wide-column tables")?;

	let mut store = GraphStore::connect(settings.graph)
		.await
		.context("connecting to graph store")?;
	let result = graph::schema::provision(&mut store).await;
	store.close().await;
	result.context("provisioning graph schema")?;

	info!("provisioning complete");
	Ok(())
}

async fn check(settings: Settings, show_settings: bool) -> anyhow::Result<()> {
	if show_settings {
		println!("{}", serde_json::to_string_pretty(&settings)?);
	}

	let mut failures = 0usize;

	match DocumentStore::from_config(settings.document).await {
		Ok(store) => {
			info!("document store: ok");
			store.close().await;
		}
		Err(e) => {
			error!("document store: {e}");
			failures += 1;
		}
	}

	match WideColumnStore::connect(settings.widecolumn).await {
		Ok(store) => {
			info!("wide-column store: ok");
			store.close().await;
		}
		Err(e) => {
			error!("wide-column store: {e}");
			failures += 1;
		}
	}

	match GraphStore::connect(settings.graph).await {
		Ok(store) => {
			info!("graph store: ok");
			store.close().await;
		}
		Err(e) => {
			error!("graph store: {e}");
			failures += 1;
		}
	}

	if failures > 0 {
		anyhow::bail!("{failures} store(s) unreachable");
	}
	Ok(())
}
