// # trackctl - Courier Tracking CLI
//
// Thin integration layer over tracker-core. No tracking or carrier logic
// lives here; this binary only:
// 1. Parses command-line arguments
// 2. Initializes tracing
// 3. Registers courier factories and instantiates adapters
// 4. Runs detection/tracking through the engine and prints results
//
// ## Example
//
// ```bash
// trackctl SE101046219GR
// trackctl --json BN12345678
// trackctl --courier elta SE101046219GR
// trackctl --detect-only SE101046219GR BN12345678 1234567890
// ```

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use tracker_core::{
    CourierConfig, CourierRegistry, EngineConfig, TrackerConfig, TrackingEngine, TrackingResult,
};

/// Exit codes for different termination scenarios
///
/// - 0: All lookups completed
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum TrackExitCode {
    Ok = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<TrackExitCode> for ExitCode {
    fn from(code: TrackExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Track parcels across Greek courier services
#[derive(Parser, Debug)]
#[command(name = "trackctl", version, about)]
struct Args {
    /// Tracking numbers to look up
    #[arg(required = true)]
    tracking_numbers: Vec<String>,

    /// Explicit courier key (skips detection), e.g. "elta" or "box_now"
    #[arg(short, long)]
    courier: Option<String>,

    /// Only classify the numbers; no carrier API is called
    #[arg(long)]
    detect_only: bool,

    /// Overall timeout per tracking request, in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Emit results as JSON instead of human-readable text
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing
    let log_level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => {
            eprintln!("Invalid log level: {}", other);
            return TrackExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return TrackExitCode::ConfigError.into();
    }

    // Enter tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return TrackExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        match run(&args).await {
            Ok(()) => TrackExitCode::Ok,
            Err(e) => {
                error!("trackctl error: {:#}", e);
                eprintln!("Error: {:#}", e);
                TrackExitCode::RuntimeError
            }
        }
    })
    .into()
}

/// Assemble the tracker configuration from the enabled courier features
fn default_config(args: &Args) -> TrackerConfig {
    // Detection order follows the courier list order; grammars are disjoint
    // today, so the order is only a future tie-break
    let mut couriers: Vec<CourierConfig> = Vec::new();
    #[cfg(feature = "box_now")]
    couriers.push(CourierConfig::BoxNow { endpoint: None });
    #[cfg(feature = "elta")]
    couriers.push(CourierConfig::Elta { endpoint: None });

    TrackerConfig {
        couriers,
        engine: EngineConfig {
            timeout_secs: args.timeout,
        },
    }
}

/// Register courier factories and instantiate the configured adapters
fn build_registry(config: &TrackerConfig) -> Result<Arc<CourierRegistry>> {
    let registry = Arc::new(CourierRegistry::new());

    #[cfg(feature = "box_now")]
    tracker_courier_boxnow::register(&registry);
    #[cfg(feature = "elta")]
    tracker_courier_elta::register(&registry);

    for courier in &config.couriers {
        registry.create_courier(courier)?;
    }

    Ok(registry)
}

async fn run(args: &Args) -> Result<()> {
    let config = default_config(args);
    config.validate()?;

    let registry = build_registry(&config)?;
    info!("registered couriers: {:?}", registry.list_couriers());

    let engine = TrackingEngine::new(registry, config.engine)?;

    for number in &args.tracking_numbers {
        if args.detect_only {
            match engine.detect(number) {
                Some(key) => println!("{}: {}", number, key),
                None => println!("{}: no known courier pattern", number),
            }
            continue;
        }

        let result = engine.track(number, args.courier.as_deref()).await;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            print_result(&result);
        }
    }

    Ok(())
}

fn print_result(result: &TrackingResult) {
    println!("{} [{}]", result.tracking_number, result.courier_name);
    println!("  status: {} ({})", result.status, result.status_category);
    if let Some(ref message) = result.error_message {
        println!("  error: {}", message);
    }
    for event in &result.events {
        println!(
            "  {} {}  {}  {}",
            event.date,
            event.time.as_deref().unwrap_or("--:--"),
            event.location.as_deref().unwrap_or("-"),
            event.status_translated,
        );
    }
    println!();
}
