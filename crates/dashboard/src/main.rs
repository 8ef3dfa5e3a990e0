use anyhow::Context;
use clap::{Parser, ValueEnum};
use quantintel_core::ingest::provider::HttpSnapshotSource;
use quantintel_core::ingest::SnapshotSource;
use quantintel_core::runtime::Dashboard;
use quantintel_core::view::config::{Variant, ViewConfig};
use quantintel_core::view::render::render_to_string;
use quantintel_core::view::state::DashboardState;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod input;

use input::InputCommand;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum VariantArg {
    /// 60s auto-refresh over `top_5`.
    Standard,
    /// 2s scanner over `top_picks` with search and charts.
    Live,
}

#[derive(Debug, Parser)]
#[command(name = "quantintel_dashboard")]
struct Args {
    #[arg(long, value_enum, default_value_t = VariantArg::Standard)]
    variant: VariantArg,

    /// Backend base URL. Overrides QUANTINTEL_BASE_URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Override the variant's poll interval.
    #[arg(long)]
    poll_interval_secs: Option<u64>,

    /// Ignore responses older than the newest one already shown.
    #[arg(long)]
    keep_latest_issued: bool,

    /// Fetch once, print, and exit.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = quantintel_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    let config = view_config(&args)?;

    let base_url = args.base_url.as_deref().unwrap_or(settings.base_url());
    let source = match HttpSnapshotSource::new(base_url, settings.timeout()) {
        Ok(source) => source,
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            return Err(e);
        }
    };

    tracing::info!(%base_url, variant = ?config.variant, once = args.once, "dashboard starting");

    if args.once {
        return run_once(&source, &config).await;
    }

    run_interactive(Arc::new(source), config).await
}

fn view_config(args: &Args) -> anyhow::Result<ViewConfig> {
    let variant = match args.variant {
        VariantArg::Standard => Variant::Standard,
        VariantArg::Live => Variant::LiveScanner,
    };
    let mut config = ViewConfig::for_variant(variant);

    if let Some(secs) = args.poll_interval_secs {
        anyhow::ensure!(secs > 0, "--poll-interval-secs must be at least 1");
        config.poll_interval = Duration::from_secs(secs);
    }
    config.keep_latest_issued = args.keep_latest_issued;
    Ok(config)
}

async fn run_once(source: &dyn SnapshotSource, config: &ViewConfig) -> anyhow::Result<()> {
    let mut state = DashboardState::default();
    let ticket = state.begin_refresh(false, true);
    let result = source.fetch_snapshot(ticket.force).await;
    if let Err(err) = &result {
        tracing::warn!(stage = err.stage, error = %err, "dashboard refresh failed");
    }
    state.complete_refresh(ticket, result, config.keep_latest_issued);

    print_frame(&render_to_string(&state, config), false)
}

async fn run_interactive(source: Arc<dyn SnapshotSource>, config: ViewConfig) -> anyhow::Result<()> {
    let dashboard = Dashboard::spawn(source, config.clone());
    let mut state = dashboard.subscribe();
    let mut lines = input::forward_lines(std::io::BufReader::new(std::io::stdin()))?;
    let mut stdin_open = true;

    loop {
        tokio::select! {
            changed = state.changed() => {
                if changed.is_err() {
                    tracing::warn!("dashboard stopped unexpectedly");
                    break;
                }
                let frame = render_to_string(&state.borrow_and_update(), &config);
                print_frame(&frame, true)?;
            }
            line = lines.recv(), if stdin_open => {
                match line {
                    Some(line) => match input::parse_line(&line) {
                        Some(InputCommand::Refresh) => dashboard.refresh(),
                        Some(InputCommand::ClearSearch) => dashboard.clear_search(),
                        Some(InputCommand::Quit) => break,
                        Some(InputCommand::Search(term)) if config.show_search => {
                            dashboard.set_search(term)
                        }
                        Some(InputCommand::Search(_)) => {
                            tracing::info!("search is only available in the live variant")
                        }
                        None => {}
                    },
                    None => stdin_open = false,
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    tracing::info!("shutting down");
    dashboard.shutdown().await;
    Ok(())
}

fn print_frame(frame: &str, clear: bool) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    if clear {
        out.write_all(CLEAR_SCREEN.as_bytes())?;
    }
    out.write_all(frame.as_bytes())?;
    out.flush().context("failed to flush stdout")?;
    Ok(())
}

fn init_sentry(settings: &quantintel_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
