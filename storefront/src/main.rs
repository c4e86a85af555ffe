//! Storefront entry-point: loads settings, wires the adapters and runs one
//! command as a page visit.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use storefront::StorefrontSettings;
use storefront::domain::{Storefront, StorefrontPorts};
use storefront::inbound::cli::{self, CliArgs};
use storefront::outbound::http::StorefrontHttpApi;
use storefront::outbound::scheduler::TokioScheduler;
use storefront::outbound::storage::DirKeyValueStore;
use storefront::outbound::terminal::TerminalView;

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build storefront runtime")?;
    runtime.block_on(run(args))
}

async fn run(args: CliArgs) -> Result<()> {
    let mut settings = StorefrontSettings::load_from_iter([OsString::from("storefront")])
        .map_err(|error| eyre!("failed to load settings: {error}"))?;
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    let base_url = settings.base_url()?;
    let storage_dir = settings.storage_dir().to_path_buf();

    let api = Arc::new(
        StorefrontHttpApi::new(base_url.clone(), settings.request_timeout())
            .wrap_err("failed to build HTTP client")?,
    );
    let store = DirKeyValueStore::open(&storage_dir).wrap_err_with(|| {
        format!("failed to open cart cache at {}", storage_dir.display())
    })?;
    let view = Arc::new(TerminalView::stdio(cli::page_for(&args.command)));
    let scheduler = Arc::new(TokioScheduler::new());

    let storefront = Storefront::new(StorefrontPorts {
        cart_api: api.clone(),
        scheduling_api: api,
        store: Arc::new(store),
        view,
        scheduler: scheduler.clone(),
        clock: Arc::new(DefaultClock),
    });

    let outcome = cli::dispatch(&storefront, args.command, &base_url)
        .await
        .wrap_err("invalid page location")?;
    scheduler.settle().await;
    println!("outcome={outcome:?}");
    Ok(())
}
