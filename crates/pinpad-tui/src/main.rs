//! PIN pad TUI entry point.

use std::{fs::File, path::PathBuf, process::ExitCode, sync::Mutex, time::Duration};

use clap::Parser;
use pinpad_app::{Runtime, StaticVerifier, SystemEnv};
use pinpad_core::{
    Environment, FeedbackConfig, KeypadOrder, PaymentContext, PinCode, PinError, SessionConfig,
    SessionOutcome,
};
use pinpad_tui::TerminalDriver;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Payment terminal PIN entry screen
#[derive(Parser, Debug)]
#[command(name = "pinpad-tui")]
#[command(about = "PIN entry screen for a payment terminal, in the terminal")]
#[command(version)]
struct Args {
    /// Amount shown in the header
    #[arg(long, default_value = "12.50")]
    amount: String,

    /// Currency shown in the header
    #[arg(long, default_value = "EUR")]
    currency: String,

    /// PIN the demo verifier accepts
    #[arg(long, default_value = "1234")]
    pin: String,

    /// Simulated verifier latency in milliseconds
    #[arg(long, default_value = "800")]
    verify_latency_ms: u64,

    /// Duration of each shake step in milliseconds
    #[arg(long, default_value = "100")]
    shake_step_ms: u64,

    /// Haptic pulse duration in milliseconds
    #[arg(long, default_value = "100")]
    pulse_ms: u64,

    /// Fixed keypad layout seed
    ///
    /// Without a seed every run draws a fresh layout from OS entropy.
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write logs to this file (the terminal is the screen, so logs are off
    /// without it)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            feedback: FeedbackConfig {
                pulse: Duration::from_millis(self.pulse_ms),
                shake_step: Duration::from_millis(self.shake_step_ms),
                ..FeedbackConfig::default()
            },
            payment: PaymentContext::new(&self.amount, &self.currency),
        }
    }

    fn keypad<E: Environment>(&self, env: &E) -> Result<KeypadOrder, PinError> {
        let Some(seed) = self.seed else {
            return Ok(KeypadOrder::shuffled(env));
        };
        let mut values = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
        values.shuffle(&mut StdRng::seed_from_u64(seed));
        KeypadOrder::from_permutation(values)
    }
}

fn init_logging(args: &Args) -> std::io::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let file_layer = match &args.log_file {
        Some(path) => {
            let file = File::create(path)?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        },
        None => None,
    };

    tracing_subscriber::registry().with(file_layer).with(filter).init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    let expected: PinCode = args.pin.parse()?;
    let env = SystemEnv::new();
    let keypad = args.keypad(&env)?;
    let verifier = StaticVerifier::new(env, expected)
        .with_latency(Duration::from_millis(args.verify_latency_ms));

    tracing::info!(amount = %args.amount, currency = %args.currency, "PIN entry starting");

    let driver = TerminalDriver::new(keypad.clone())?;
    let runtime = Runtime::with_keypad(driver, verifier, env, keypad, args.session_config());
    let outcome = runtime.run().await?;

    tracing::info!(?outcome, "PIN entry ended");
    Ok(match outcome {
        SessionOutcome::Confirmed => ExitCode::SUCCESS,
        SessionOutcome::Cancelled => ExitCode::from(1),
        SessionOutcome::LockedOut => ExitCode::from(2),
    })
}
