//! CLI entrypoint for Treasury Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use council_application::{
    AuditLogger, AutonomousEngine, ContextProvider, DeliberateUseCase, ExecutionDispatcher,
    NoAuditLogger, NoProgress, VoterPanel,
};
use council_domain::{NewDecision, TreasurySnapshot};
use council_infrastructure::config::FileLoggingConfig;
use council_infrastructure::{
    ConfigLoader, DryRunDispatcher, FileConfig, FileOutputFormat, HttpContextProvider,
    HttpExecutionDispatcher, HttpReasoningGateway, InMemoryDecisionStore, JsonlAuditLogger,
    Severity, StaticContextProvider,
};
use council_presentation::{
    Cli, Command, CouncilConsole, JsonFormatter, OutputFormat, OutputFormatter, ProgressMode,
    ProgressReporter, SimpleProgress, formatter_for, set_color_enabled,
};
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

type Deliberation = DeliberateUseCase<HttpReasoningGateway, InMemoryDecisionStore>;
type Engine = AutonomousEngine<HttpReasoningGateway, dyn ContextProvider, dyn ExecutionDispatcher>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from files (unless --no-config)
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let _log_guard = init_logging(cli.verbose, &config.logging);

    info!("Starting Treasury Council");

    set_color_enabled(config.output.color && !cli.no_color);

    let format = cli.output.unwrap_or(match config.output.format.unwrap_or_default() {
        FileOutputFormat::Text => OutputFormat::Text,
        FileOutputFormat::Json => OutputFormat::Json,
    });
    let formatter = formatter_for(format);

    if let Command::Config = cli.command {
        print_config(&cli, &config, format)?;
        return Ok(());
    }

    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Warning => eprintln!("Warning: {}", issue),
            Severity::Error => eprintln!("Error: {}", issue),
        }
    }
    if FileConfig::has_errors(&issues) {
        bail!("Configuration has errors; run `treasury-council config` to inspect it");
    }

    // === Dependency Injection ===
    let params = config.engine_params();
    let gateway = Arc::new(
        HttpReasoningGateway::new(config.reasoning.endpoint())
            .context("Failed to build the reasoning client")?,
    );
    if config.reasoning.resolve_api_key().is_none() {
        warn!(
            "No API key found in ${}; requests go out unauthenticated",
            config.reasoning.api_key_env
        );
    }
    let panel = Arc::new(
        VoterPanel::new(gateway, config.voters.profiles(), params.voter_timeout)
            .context("Invalid voter roster")?,
    );

    let audit: Arc<dyn AuditLogger> = match &config.logging.audit_log {
        Some(path) => match JsonlAuditLogger::open(path) {
            Some(logger) => Arc::new(logger),
            None => {
                warn!("Audit log {} could not be opened; auditing disabled", path.display());
                Arc::new(NoAuditLogger)
            }
        },
        None => Arc::new(NoAuditLogger),
    };

    let progress_mode = if !config.output.show_progress || cli.quiet || format == OutputFormat::Json {
        ProgressMode::Off
    } else if std::io::stdout().is_terminal() {
        ProgressMode::Bars
    } else {
        ProgressMode::Plain
    };

    match cli.command {
        Command::Decide {
            title,
            description,
            context,
            category,
            priority,
        } => {
            let deliberation = build_deliberation(&panel, &audit);
            let mut payload = NewDecision::new(title, category)
                .with_description(description)
                .with_priority(priority);
            if let Some(context) = context {
                payload = payload.with_context(context);
            }

            let outcome = match progress_mode {
                ProgressMode::Bars => {
                    let progress = ProgressReporter::new();
                    deliberation.create_and_deliberate(payload, &progress).await
                }
                ProgressMode::Plain => deliberation.create_and_deliberate(payload, &SimpleProgress).await,
                ProgressMode::Off => deliberation.create_and_deliberate(payload, &NoProgress).await,
            }?;
            println!("{}", formatter.format_decision(&outcome.decision));
        }

        Command::Cycle { dry_run } => {
            let engine = build_engine(&config, &panel, &audit, dry_run || config.execution.dry_run)?;
            let decision = engine.run_cycle().await;
            println!("{}", formatter.format_autonomous(&decision));
        }

        Command::Run {
            interval_ms,
            dry_run,
        } => {
            let mut config = config;
            if let Some(ms) = interval_ms {
                if ms == 0 {
                    bail!("--interval-ms must be greater than zero");
                }
                config.autonomous.interval_ms = ms;
            }
            let engine = build_engine(&config, &panel, &audit, dry_run || config.execution.dry_run)?;
            run_engine(engine, formatter).await?;
        }

        Command::Console => {
            let deliberation = Arc::new(build_deliberation(&panel, &audit));
            let engine = build_engine(&config, &panel, &audit, config.execution.dry_run)?;
            if config.autonomous.auto_start {
                engine.start();
            }

            let console = CouncilConsole::new(deliberation, engine)
                .with_formatter(formatter)
                .with_progress(progress_mode);
            console.run().await?;
        }

        // Printed before any adapter is built
        Command::Config => {}
    }

    Ok(())
}

fn build_deliberation(
    panel: &Arc<VoterPanel<HttpReasoningGateway>>,
    audit: &Arc<dyn AuditLogger>,
) -> Deliberation {
    DeliberateUseCase::new(Arc::clone(panel), Arc::new(InMemoryDecisionStore::new()))
        .with_audit_logger(Arc::clone(audit))
}

fn build_engine(
    config: &FileConfig,
    panel: &Arc<VoterPanel<HttpReasoningGateway>>,
    audit: &Arc<dyn AuditLogger>,
    dry_run: bool,
) -> Result<Arc<Engine>> {
    let context: Arc<dyn ContextProvider>;
    let dispatcher: Arc<dyn ExecutionDispatcher>;
    match config.treasury.client() {
        Some(client) => {
            let client = client.context("Failed to build the treasury client")?;
            info!(base_url = client.base_url(), dry_run, "Using treasury API");
            context = Arc::new(HttpContextProvider::new(client.clone()));
            dispatcher = if dry_run {
                Arc::new(DryRunDispatcher)
            } else {
                Arc::new(HttpExecutionDispatcher::new(client))
            };
        }
        None => {
            warn!("No [treasury] base_url configured; using an empty snapshot and dry-run execution");
            context = Arc::new(StaticContextProvider::new(TreasurySnapshot::default()));
            dispatcher = Arc::new(DryRunDispatcher);
        }
    }

    Ok(Arc::new(
        AutonomousEngine::new(Arc::clone(panel), context, dispatcher)
            .with_policy(config.execution.policy())
            .with_params(config.engine_params())
            .with_audit_logger(Arc::clone(audit)),
    ))
}

/// Run the timer until Ctrl-C, printing each new decision
async fn run_engine(engine: Arc<Engine>, formatter: Box<dyn OutputFormatter>) -> Result<()> {
    engine.start();
    let status = engine.status();
    eprintln!(
        "Autonomous engine running every {} ms; press Ctrl-C to stop",
        status.interval_ms
    );

    let mut seen = 0u64;
    let mut poll = tokio::time::interval(Duration::from_millis(500));
    loop {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result.context("Failed to listen for Ctrl-C")?;
                break;
            }
            _ = poll.tick() => {
                let status = engine.status();
                if status.total_cycles > seen {
                    let fresh = (status.total_cycles - seen) as usize;
                    seen = status.total_cycles;
                    for decision in engine.history(fresh).iter().rev() {
                        println!("{}", formatter.format_autonomous(decision));
                    }
                }
            }
        }
    }

    engine.stop();
    println!("{}", formatter.format_status(&engine.status()));
    Ok(())
}

fn print_config(cli: &Cli, config: &FileConfig, format: OutputFormat) -> Result<()> {
    let mut shown = config.clone();
    if shown.reasoning.api_key.is_some() {
        shown.reasoning.api_key = Some("***".to_string());
    }
    if shown.treasury.api_key.is_some() {
        shown.treasury.api_key = Some("***".to_string());
    }

    match format {
        OutputFormat::Json => println!("{}", JsonFormatter::to_json(&shown)),
        OutputFormat::Text => {
            if cli.no_config {
                println!("Configuration files disabled (--no-config)");
            } else {
                for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
                    println!("{}", line);
                }
            }
            println!();
            println!(
                "{}",
                toml::to_string_pretty(&shown).context("Failed to render configuration")?
            );
            for issue in config.validate() {
                println!("{}", issue);
            }
        }
    }
    Ok(())
}

/// Install the diagnostic subscriber; the guard must live until exit
fn init_logging(verbose: u8, logging: &FileLoggingConfig) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let stderr = fmt::layer().with_target(false).with_writer(std::io::stderr);

    match &logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "treasury-council.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry().with(filter).with(stderr).init();
            None
        }
    }
}
