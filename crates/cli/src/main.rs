//! qdprobe CLI - Query qdrouterd management entities running in Kubernetes pods
//!
//! Runs `qdmanage query --type <TYPE>` through `kubectl exec` and prints the
//! records, or waits until enough matching records show up.

mod output;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use output::OutputFormat;
use qdprobe_core::application::qdmanage::EntityFilter;
use qdprobe_core::domain::entity::AttributeFilter;
use qdprobe_core::port::SystemTimeProvider;
use qdprobe_core::{EntityType, PollOptions, QdmanageService, RawEntity};
use qdprobe_infra_system::{KubectlConfig, KubectlExecutor};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_LOG_FILTER: &str = "qdprobe=info";

#[derive(Parser)]
#[command(name = "qdprobe")]
#[command(about = "Query qdrouterd management entities through kubectl exec", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// kubectl binary
    #[arg(long, global = true, env = "QDPROBE_KUBECTL", default_value = "kubectl")]
    kubectl: String,

    /// Namespace of the router pod
    #[arg(short, long, global = true, env = "QDPROBE_NAMESPACE")]
    namespace: Option<String>,

    /// Container running qdrouterd
    #[arg(short, long, global = true, env = "QDPROBE_CONTAINER")]
    container: Option<String>,

    /// kubeconfig file (~ is expanded)
    #[arg(long, global = true, env = "KUBECONFIG")]
    kubeconfig: Option<String>,

    /// kubectl context
    #[arg(long, global = true, env = "QDPROBE_CONTEXT")]
    context: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one qdmanage query and print the records
    Query {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Poll until at least --min-count matching records are returned
    Wait {
        #[command(flatten)]
        target: TargetArgs,

        /// Number of matching records to wait for
        #[arg(long, default_value = "1")]
        min_count: usize,

        /// Seconds between attempts
        #[arg(long, default_value = "1")]
        delay: u64,

        /// Overall timeout in seconds
        #[arg(long, default_value = "60")]
        timeout: u64,
    },
}

#[derive(Args)]
struct TargetArgs {
    /// Router pod name
    #[arg(short, long)]
    pod: String,

    /// Entity type (e.g. connection, router.address, org.apache.qpid.dispatch.listener)
    #[arg(short = 't', long = "type")]
    entity_type: String,

    /// Keep records whose attribute equals a value (key=value, repeatable)
    #[arg(short, long = "filter")]
    filters: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    output: OutputFormat,
}

impl TargetArgs {
    fn parse_filters(&self) -> Result<Vec<AttributeFilter>> {
        self.filters
            .iter()
            .map(|expr| AttributeFilter::parse(expr).map_err(anyhow::Error::from))
            .collect()
    }

    fn parse_entity_type(&self) -> Result<EntityType> {
        EntityType::parse(&self.entity_type).context("Invalid --type")
    }
}

fn init_logging() {
    let log_format = std::env::var("QDPROBE_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // stderr only: stdout carries the records
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn kubectl_config(cli: &Cli) -> KubectlConfig {
    let mut config = KubectlConfig {
        kubectl: cli.kubectl.clone(),
        namespace: cli.namespace.clone(),
        container: cli.container.clone(),
        kubeconfig: None,
        context: cli.context.clone(),
    };
    if let Some(path) = &cli.kubeconfig {
        config = config.with_kubeconfig(path);
    }
    config
}

fn print_records(
    entities: &[RawEntity],
    entity_type: &EntityType,
    format: OutputFormat,
) -> Result<()> {
    println!("{}", output::render(entities, format)?);
    eprintln!(
        "{} {} record(s) of type {}",
        "✓".green(),
        entities.len(),
        entity_type.short_name().bold()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    info!("qdprobe v{} starting", VERSION);

    let executor = Arc::new(KubectlExecutor::with_default_env(kubectl_config(&cli)));
    let service = QdmanageService::new(executor, Arc::new(SystemTimeProvider::new()));

    match &cli.command {
        Commands::Query { target } => {
            let entity_type = target.parse_entity_type()?;
            let filters = target.parse_filters()?;
            let matches_all = |e: &RawEntity| filters.iter().all(|f| f.matches(e));
            let filter: Option<EntityFilter<'_, RawEntity>> = if filters.is_empty() {
                None
            } else {
                Some(&matches_all)
            };

            let entities = service
                .query_as::<RawEntity>(&target.pod, &entity_type, filter)
                .await
                .with_context(|| format!("qdmanage query failed on pod {}", target.pod))?;

            print_records(&entities, &entity_type, target.output)?;
        }

        Commands::Wait {
            target,
            min_count,
            delay,
            timeout,
        } => {
            let entity_type = target.parse_entity_type()?;
            let filters = target.parse_filters()?;
            let min_count = *min_count;
            let matches_all = |e: &RawEntity| filters.iter().all(|f| f.matches(e));
            let filter: Option<EntityFilter<'_, RawEntity>> = if filters.is_empty() {
                None
            } else {
                Some(&matches_all)
            };
            let enough = |r: &qdprobe_core::Result<Vec<RawEntity>>| {
                matches!(r, Ok(entities) if entities.len() >= min_count)
            };

            let outcome = service
                .query_as_with_retries::<RawEntity>(
                    &target.pod,
                    &entity_type,
                    PollOptions::from_secs(*delay, *timeout),
                    filter,
                    Some(&enough),
                )
                .await;

            match outcome {
                Ok(entities) if entities.len() >= min_count => {
                    print_records(&entities, &entity_type, target.output)?;
                }
                Ok(entities) => {
                    anyhow::bail!(
                        "not satisfied within {}s: {} of {} matching {} record(s) found on pod {}",
                        timeout,
                        entities.len(),
                        min_count,
                        entity_type.short_name(),
                        target.pod
                    );
                }
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("no successful attempt within {}s on pod {}", timeout, target.pod)
                    });
                }
            }
        }
    }

    Ok(())
}
