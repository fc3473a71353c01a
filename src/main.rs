use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tokio::sync::mpsc;

use automation_dash::api::models::{
    GenerateReportRequest, NewProduct, ProductsPayload, ReportFormat, ReportType, SyncRequest,
};
use automation_dash::api::{endpoints, ApiClient, FetchError, JobAction};
use automation_dash::config::{Config, ConfigStore};
use automation_dash::poll::{FetchState, PollingClient, SubscribeOptions};
use automation_dash::view::config::{ConfigIntent, ConfigPage};
use automation_dash::view::dashboard::{DashboardIntent, DashboardPage};
use automation_dash::view::data::{DataIntent, DataPage};
use automation_dash::view::jobs::{JobsIntent, JobsPage};
use automation_dash::view::mvi::{Reducer, View};
use automation_dash::view::products::{ProductsIntent, ProductsPage};
use automation_dash::view::reports::{ReportsIntent, ReportsPage};
use automation_dash::view::watch;

#[derive(Debug, Parser)]
#[command(name = "automation-dash", version, about = "Dashboard client for the Data Automation Bot backend")]
struct Cli {
    /// Config file (default: ~/.config/automation-dash/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override api.base_url
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// System status KPIs
    Status,
    /// Scheduled jobs
    Jobs,
    /// Pause a scheduled job
    Pause { job_id: String },
    /// Resume a paused job
    Resume { job_id: String },
    /// Generated reports
    Reports,
    /// Generate a report
    Generate {
        #[arg(long = "type", default_value = "daily")]
        report_type: ReportType,
        #[arg(long, default_value = "csv")]
        format: ReportFormat,
        #[arg(long)]
        data_type: Option<String>,
        #[arg(long)]
        days: Option<u32>,
    },
    /// Download a generated report
    Download {
        filename: String,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Backend configuration
    Config,
    /// Product catalog
    Products,
    /// Create a product
    AddProduct {
        #[arg(long)]
        name: String,
        #[arg(long)]
        sku: String,
    },
    /// Revenue analytics
    Revenue {
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
    /// Inventory and pricing discrepancies
    Discrepancies,
    /// Sync inventory across platforms
    Sync {
        /// Platform type to sync (repeatable; default: shopify, amazon, ebay)
        #[arg(long = "platform")]
        platforms: Vec<String>,
    },
    /// Stored data records
    Data {
        #[command(flatten)]
        filter: DataFilter,
    },
    /// Keep a page on screen, refreshing it on the configured interval
    Watch {
        page: WatchPage,
        #[command(flatten)]
        filter: DataFilter,
    },
}

/// Filters for `GET /api/data`; `watch` applies them to the data page.
#[derive(Debug, Clone, clap::Args)]
struct DataFilter {
    /// Record type (default: all types)
    #[arg(long = "type")]
    data_type: Option<String>,
    #[arg(long, default_value_t = 100)]
    limit: u32,
    #[arg(long, default_value_t = 7)]
    days: u32,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum WatchPage {
    Dashboard,
    Jobs,
    Reports,
    Config,
    Products,
    Data,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    automation_dash::logging::init_tracing();

    let path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = Config::load_from_with_overrides(&path, cli.base_url.clone(), None)
        .with_context(|| format!("loading config from {}", path.display()))?;

    let store = ConfigStore::new(config, path);
    let api = ApiClient::from_config(&store.get().api)?;
    tracing::debug!(base_url = %store.get().api.base_url, "Client ready");

    run(cli.command, &api, &store).await
}

async fn run(command: Command, api: &ApiClient, store: &ConfigStore) -> Result<()> {
    match command {
        Command::Status => show::<DashboardPage, _>(api.status().await, DashboardIntent::StatusFetched),
        Command::Jobs => show::<JobsPage, _>(api.jobs().await, JobsIntent::Fetched),
        Command::Pause { job_id } => job_action(api, job_id, JobAction::Pause).await,
        Command::Resume { job_id } => job_action(api, job_id, JobAction::Resume).await,
        Command::Reports => show::<ReportsPage, _>(api.reports().await, ReportsIntent::Fetched),
        Command::Generate {
            report_type,
            format,
            data_type,
            days,
        } => {
            let request = GenerateReportRequest {
                report_type,
                format,
                data_type,
                days,
            };
            let result = api.generate_report(&request).await;
            let error = result.as_ref().err().cloned();
            let state = ReportsPage::reduce(Default::default(), ReportsIntent::Generated(result));
            print_lines(&ReportsPage::render(&state));
            fail_on(error)
        }
        Command::Download { filename, output } => {
            let bytes = api.download_report(&filename).await?;
            let target = output.unwrap_or_else(|| PathBuf::from(&filename));
            tokio::fs::write(&target, &bytes)
                .await
                .with_context(|| format!("writing {}", target.display()))?;
            println!("Saved {} bytes to {}", bytes.len(), target.display());
            Ok(())
        }
        Command::Config => show::<ConfigPage, _>(api.config().await, ConfigIntent::Fetched),
        Command::Products => show::<ProductsPage, _>(api.products().await, ProductsIntent::Fetched),
        Command::AddProduct { name, sku } => {
            let result = api
                .create_product(&NewProduct {
                    name,
                    sku: sku.clone(),
                })
                .await;
            let error = result.as_ref().err().cloned();
            let intent = match result {
                Ok(_) => ProductsIntent::Created { sku },
                Err(error) => ProductsIntent::CreateFailed { sku, error },
            };
            let state = ProductsPage::reduce(Default::default(), intent);
            print_lines(&ProductsPage::render(&state));
            fail_on(error)
        }
        Command::Revenue { days } => {
            let revenue = api.revenue(days).await?;
            println!(
                "Total revenue: {:.2} {} (avg {:.2}/day)",
                revenue.total_revenue, revenue.currency, revenue.avg_daily_revenue
            );
            for day in &revenue.daily_revenue {
                println!("{}  {:>10.2}  {:>4} orders", day.date, day.revenue, day.orders);
            }
            Ok(())
        }
        Command::Discrepancies => {
            let list = api.discrepancies().await?;
            println!(
                "{} discrepancies ({} critical)",
                list.total_count, list.critical_count
            );
            for d in &list.discrepancies {
                println!(
                    "{:<12} {:<24} {:<8} {}",
                    d.sku,
                    d.kind,
                    d.severity,
                    d.platforms.join(", ")
                );
            }
            Ok(())
        }
        Command::Sync { platforms } => {
            let request = if platforms.is_empty() {
                SyncRequest::default()
            } else {
                SyncRequest::for_kinds(platforms.iter().map(String::as_str))
            };
            let result = api.sync_inventory(&request).await?;
            println!("{}", result.message);
            Ok(())
        }
        Command::Data { filter } => show::<DataPage, _>(
            api.data(filter.data_type.as_deref(), filter.limit, filter.days)
                .await,
            DataIntent::Fetched,
        ),
        Command::Watch { page, filter } => watch_page(page, filter, api, store).await,
    }
}

/// Render a one-shot fetch through the page's reducer and view.
fn show<P, T>(
    result: Result<T, FetchError>,
    to_intent: impl FnOnce(FetchState<T>) -> <P as Reducer>::Intent,
) -> Result<()>
where
    P: Reducer + View<State = <P as Reducer>::State>,
{
    let error = result.as_ref().err().cloned();
    let state = P::reduce(Default::default(), to_intent(FetchState::from_result(result)));
    print_lines(&P::render(&state));
    fail_on(error)
}

async fn job_action(api: &ApiClient, job_id: String, action: JobAction) -> Result<()> {
    let result = api.job_action(&job_id, action).await;
    let error = result.as_ref().err().cloned();
    let intent = match result {
        Ok(response) => JobsIntent::ActionSucceeded {
            job_id,
            action,
            message: response.message,
        },
        Err(error) => JobsIntent::ActionFailed {
            job_id,
            action,
            error,
        },
    };
    let state = JobsPage::reduce(Default::default(), intent);
    if let Some(message) = &state.last_message {
        println!("{}", message);
    }
    fail_on(error)
}

async fn watch_page(
    page: WatchPage,
    filter: DataFilter,
    api: &ApiClient,
    store: &ConfigStore,
) -> Result<()> {
    let polling = PollingClient::from_api(api);
    let settings = store.get().polling;
    let options = |interval: Option<Duration>| {
        SubscribeOptions {
            interval,
            ..SubscribeOptions::default()
        }
        .pause_when_hidden(settings.pause_when_hidden)
    };
    let (visibility_tx, visibility) = mpsc::unbounded_channel();
    spawn_visibility_hook(visibility_tx);

    tracing::info!(?page, "Watching page, press Ctrl-C to stop");
    match page {
        WatchPage::Dashboard => {
            watch::<DashboardPage, _, _, _>(
                &polling,
                endpoints::status(),
                options(settings.dashboard_interval()),
                DashboardIntent::StatusFetched,
                redraw,
                visibility,
                shutdown_signal(),
            )
            .await;
        }
        WatchPage::Jobs => {
            watch::<JobsPage, _, _, _>(
                &polling,
                endpoints::jobs(),
                options(settings.jobs_interval()),
                JobsIntent::Fetched,
                redraw,
                visibility,
                shutdown_signal(),
            )
            .await;
        }
        WatchPage::Reports => {
            watch::<ReportsPage, _, _, _>(
                &polling,
                endpoints::reports(),
                options(None),
                ReportsIntent::Fetched,
                redraw,
                visibility,
                shutdown_signal(),
            )
            .await;
        }
        WatchPage::Config => {
            watch::<ConfigPage, _, _, _>(
                &polling,
                endpoints::config(),
                options(settings.config_interval()),
                ConfigIntent::Fetched,
                redraw,
                visibility,
                shutdown_signal(),
            )
            .await;
        }
        WatchPage::Products => {
            watch::<ProductsPage, _, _, _>(
                &polling,
                endpoints::products(),
                options(None),
                |fetch: FetchState<ProductsPayload>| {
                    ProductsIntent::Fetched(fetch.map(ProductsPayload::into_products))
                },
                redraw,
                visibility,
                shutdown_signal(),
            )
            .await;
        }
        WatchPage::Data => {
            watch::<DataPage, _, _, _>(
                &polling,
                endpoints::data(filter.data_type.as_deref(), filter.limit, filter.days),
                options(settings.data_interval()),
                DataIntent::Fetched,
                redraw,
                visibility,
                shutdown_signal(),
            )
            .await;
        }
    }
    tracing::info!("Stopped watching");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// A stopped process (Ctrl-Z) is off screen. On SIGCONT the page is
/// reported hidden then visible, which refetches at once when
/// `pause_when_hidden` is set.
fn spawn_visibility_hook(tx: mpsc::UnboundedSender<bool>) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::from_raw(libc::SIGCONT)) {
            Ok(mut resumed) => {
                tokio::spawn(async move {
                    while resumed.recv().await.is_some() {
                        tracing::debug!("Resumed after stop");
                        if tx.send(false).is_err() || tx.send(true).is_err() {
                            break;
                        }
                    }
                });
            }
            Err(e) => tracing::warn!(error = %e, "Failed to listen for SIGCONT"),
        }
    }
    #[cfg(not(unix))]
    drop(tx);
}

fn redraw(lines: &[String]) {
    if let Err(e) = write_frame(&mut io::stdout().lock(), lines) {
        tracing::warn!(error = %e, "Failed to redraw page");
    }
}

fn write_frame(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    // Clear screen, cursor home
    write!(out, "\x1b[2J\x1b[H")?;
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

fn fail_on(error: Option<FetchError>) -> Result<()> {
    match error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
