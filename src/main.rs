use clap::Parser;
use miette::{IntoDiagnostic, Result};
use paywizard::application::dispatcher::spawn_store;
use paywizard::application::keypad::Keypad;
use paywizard::application::store::WizardStore;
use paywizard::application::wizard::PaymentWizard;
use paywizard::config::{DigitMode, WizardConfig};
use paywizard::domain::ports::{CardDirectoryBox, PaymentGatewayBox};
use paywizard::infrastructure::mock::{MockCardDirectory, MockPaymentGateway};
use paywizard::interfaces::csv::action_reader::ActionReader;
use paywizard::interfaces::csv::session_writer::SessionWriter;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// CSV script of wizard actions (header: action,value)
    input: PathBuf,

    /// JSON config file. Missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the configured digit semantics.
    #[arg(long, value_enum)]
    digit_mode: Option<DigitMode>,

    /// Make the mock gateway reject every payment with this reason.
    #[arg(long)]
    fail_with: Option<String>,

    /// Reject only the first N attempts, so a retry can succeed.
    #[arg(long, requires = "fail_with")]
    fail_times: Option<usize>,

    /// Skip the simulated network latency.
    #[arg(long)]
    no_delay: bool,

    /// Print the session after every action instead of only at the end.
    #[arg(long)]
    trace: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => WizardConfig::from_path(path).into_diagnostic()?,
        None => WizardConfig::default(),
    };
    if let Some(mode) = cli.digit_mode {
        config.digit_mode = mode;
    }
    if cli.no_delay {
        config = config.without_delays();
    }

    let cards: CardDirectoryBox = Box::new(MockCardDirectory::new(config.card_list_latency()));
    let gateway: PaymentGatewayBox = match (cli.fail_with, cli.fail_times) {
        (Some(reason), Some(times)) => Box::new(MockPaymentGateway::rejecting_first(
            times,
            reason,
            config.payment_latency(),
        )),
        (Some(reason), None) => Box::new(MockPaymentGateway::rejecting(
            reason,
            config.payment_latency(),
        )),
        (None, _) => Box::new(MockPaymentGateway::approving(config.payment_latency())),
    };

    let (store, store_task) = spawn_store(WizardStore::new());
    let mut wizard = PaymentWizard::new(cards, gateway, store, Keypad::from_config(&config));

    let stdout = io::stdout();
    let mut writer = SessionWriter::new(stdout.lock());

    // Replay the script
    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = ActionReader::new(file);
    for action in reader.actions() {
        match action {
            Ok(action) => {
                if let Err(e) = wizard.perform(action).await {
                    eprintln!("Error performing action: {}", e);
                }
            }
            Err(e) => {
                eprintln!("Error reading action: {}", e);
                continue;
            }
        }
        if cli.trace {
            writer.write_session(&wizard.session()).into_diagnostic()?;
        }
    }

    if !cli.trace {
        writer.write_session(&wizard.session()).into_diagnostic()?;
    }
    writer.flush().into_diagnostic()?;

    drop(wizard);
    store_task.await.into_diagnostic()?;

    Ok(())
}
