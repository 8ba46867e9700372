use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};
use payform::application::checkout::{PaymentForm, SessionContext};
use payform::domain::navigation::NavigationRequest;
use payform::domain::payment::{PaymentMethod, PaymentRequest};
use payform::infrastructure::in_memory::{RecordingOpener, RecordingSurface};
use payform::infrastructure::properties::PropertiesFileSource;
use payform::interfaces::csv::decision_writer::{DecisionRecord, DecisionWriter, write_json_lines};
use payform::interfaces::csv::trace_reader::TraceReader;
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct FormArgs {
    /// Configuration file; repeat to layer files, later ones win
    #[arg(long = "config", required = true)]
    configs: Vec<PathBuf>,

    /// Order id; generated when omitted
    #[arg(long)]
    order_id: Option<String>,

    #[arg(long, default_value = "199")]
    amount: Decimal,

    #[arg(long, default_value = "RUB")]
    currency: String,

    /// Payment method name, or "all"
    #[arg(long, default_value = "all")]
    method: String,
}

impl FormArgs {
    fn into_parts(self) -> (PaymentForm, PaymentRequest) {
        let form = PaymentForm::new(Box::new(PropertiesFileSource::new(self.configs)));
        let mut request = PaymentRequest::new(self.amount, self.currency)
            .with_method(PaymentMethod::parse(&self.method));
        if let Some(order_id) = self.order_id {
            request = request.with_order_id(order_id);
        }
        (form, request)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Print the payment form URL
    Url {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Replay a recorded navigation trace and print each decision
    Replay {
        #[command(flatten)]
        form: FormArgs,

        /// CSV file with url,main_frame,finishing columns
        #[arg(long)]
        trace: PathBuf,

        #[arg(long, value_enum, default_value = "csv")]
        format: OutputFormat,
    },
}

fn init_logging(level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("payform={},warn", level)));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Command::Url { form } => print_url(form).await,
        Command::Replay {
            form,
            trace,
            format,
        } => replay(form, trace, format).await,
    }
}

async fn print_url(args: FormArgs) -> Result<()> {
    let (form, request) = args.into_parts();
    let url = form.payment_url(&request).await.into_diagnostic()?;
    println!("{}", url);
    Ok(())
}

async fn replay(args: FormArgs, trace: PathBuf, format: OutputFormat) -> Result<()> {
    let (form, request) = args.into_parts();

    // Replays run headless: nothing is rendered and no external app exists.
    let mut surface = RecordingSurface::new();
    let context = SessionContext::new(Arc::new(RecordingOpener::new()), |outcome| {
        tracing::info!(%outcome, "Host notified");
    });
    let interceptor = form
        .show_payment_form(request, &mut surface, context)
        .await
        .into_diagnostic()?;

    let file = File::open(trace).into_diagnostic()?;
    let mut records = Vec::new();
    for attempt in TraceReader::new(file).attempts() {
        let attempt = match attempt {
            Ok(attempt) => attempt,
            Err(e) => {
                tracing::warn!(error = %e, "Error reading navigation attempt");
                continue;
            }
        };
        if attempt.is_finishing() {
            interceptor.session().teardown_signal().begin();
        }

        let url = attempt.url.as_deref();
        let decision = surface.dispatch(NavigationRequest {
            url,
            is_main_frame: attempt.is_main_frame(),
        });
        records.push(DecisionRecord::new(url, decision));
    }

    let stdout = io::stdout();
    match format {
        OutputFormat::Csv => DecisionWriter::new(stdout.lock())
            .write_records(records)
            .into_diagnostic()?,
        OutputFormat::Json => write_json_lines(stdout.lock(), records).into_diagnostic()?,
    }
    Ok(())
}
