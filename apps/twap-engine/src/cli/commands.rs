//! Command execution: wire adapters to use cases and render the outcome.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::{Cli, Command, LimitArgs, MarketArgs, TwapArgs};
use crate::application::ports::{AuditEvent, AuditSink, OrderVenue};
use crate::application::services::{OutputFormat, ReportRenderer};
use crate::application::use_cases::{ExecuteTwapUseCase, PlaceOrderUseCase};
use crate::config::Config;
use crate::domain::execution_tactics::{ExecutionReport, validate_twap};
use crate::domain::order_execution::OrderRequest;
use crate::domain::shared::ValidationError;
use crate::error::{AppError, ErrorCode, EXIT_SUCCESS};
use crate::infrastructure::{BinanceVenueAdapter, SimulatedVenue, TokioScheduler, TracingAuditSink};

/// Rendered output and exit code of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Text for stdout.
    pub rendered: String,
    /// Process exit code.
    pub exit_code: u8,
}

/// Run the parsed command.
///
/// Returns `Err` only when the invocation itself fails: bad input, bad
/// configuration, or a rejected one-shot order. A TWAP run that stops early
/// is an `Outcome` with a non-zero exit code.
pub async fn execute(
    cli: &Cli,
    config: &Config,
    cancel: CancellationToken,
) -> Result<Outcome, AppError> {
    let format = OutputFormat::from(cli.output);
    let venue_needed = match &cli.command {
        Command::Twap(args) => !args.dry_run,
        Command::Limit(_) | Command::Market(_) => true,
    };

    if cli.simulate || !venue_needed {
        tracing::info!("Using simulated venue");
        return dispatch(cli, Arc::new(SimulatedVenue::new()), config, cancel, format).await;
    }

    validate_command(&cli.command).inspect_err(|e| {
        tracing::warn!(field = e.field(), error = %e, "Request rejected");
        TracingAuditSink.record(&AuditEvent::ValidationFailed {
            field: e.field(),
            reason: e.to_string(),
        });
    })?;
    config.require_credentials()?;
    let venue = BinanceVenueAdapter::new(config.venue.to_binance_config())
        .map_err(|e| AppError::new(ErrorCode::InvalidConfig, e.to_string()))?;
    tracing::info!(environment = %config.venue.environment, "Using Binance venue");
    dispatch(cli, Arc::new(venue), config, cancel, format).await
}

/// Check the request before credentials are looked up, so malformed input
/// is reported as such even when the venue is not configured.
fn validate_command(command: &Command) -> Result<(), ValidationError> {
    match command {
        Command::Twap(args) => validate_twap(&args.to_fields()).map(drop),
        Command::Limit(args) => OrderRequest::validate(&args.to_fields()).map(drop),
        Command::Market(args) => OrderRequest::validate(&args.to_fields()).map(drop),
    }
}

async fn dispatch<V: OrderVenue>(
    cli: &Cli,
    venue: Arc<V>,
    config: &Config,
    cancel: CancellationToken,
    format: OutputFormat,
) -> Result<Outcome, AppError> {
    let renderer = ReportRenderer::new(config.execution.quantity_precision);
    match &cli.command {
        Command::Twap(args) => run_twap(args, venue, config, cancel, renderer, format).await,
        Command::Limit(args) => run_limit(args, venue, config, renderer, format).await,
        Command::Market(args) => run_market(args, venue, config, renderer, format).await,
    }
}

async fn run_twap<V: OrderVenue>(
    args: &TwapArgs,
    venue: Arc<V>,
    config: &Config,
    cancel: CancellationToken,
    renderer: ReportRenderer,
    format: OutputFormat,
) -> Result<Outcome, AppError> {
    let use_case = ExecuteTwapUseCase::new(
        venue,
        Arc::new(TokioScheduler::new(cancel)),
        Arc::new(TracingAuditSink),
        config.execution.dispatch_settings(),
    );

    let report = use_case.execute(&args.to_fields()).await?;
    let rendered = renderer
        .render(&report, format)
        .map_err(|e| AppError::new(ErrorCode::InvalidVenueResponse, e.to_string()))?;

    Ok(Outcome {
        rendered,
        exit_code: report_exit_code(&report),
    })
}

async fn run_limit<V: OrderVenue>(
    args: &LimitArgs,
    venue: Arc<V>,
    config: &Config,
    renderer: ReportRenderer,
    format: OutputFormat,
) -> Result<Outcome, AppError> {
    let use_case = PlaceOrderUseCase::new(
        venue,
        Arc::new(TracingAuditSink),
        config.execution.dispatch_settings(),
    );
    let placement = use_case.execute(&args.to_fields()).await?;
    let rendered = renderer
        .render_placement(&placement, format)
        .map_err(|e| AppError::new(ErrorCode::InvalidVenueResponse, e.to_string()))?;
    Ok(Outcome {
        rendered,
        exit_code: EXIT_SUCCESS,
    })
}

async fn run_market<V: OrderVenue>(
    args: &MarketArgs,
    venue: Arc<V>,
    config: &Config,
    renderer: ReportRenderer,
    format: OutputFormat,
) -> Result<Outcome, AppError> {
    let use_case = PlaceOrderUseCase::new(
        venue,
        Arc::new(TracingAuditSink),
        config.execution.dispatch_settings(),
    );
    let placement = use_case.execute(&args.to_fields()).await?;
    let rendered = renderer
        .render_placement(&placement, format)
        .map_err(|e| AppError::new(ErrorCode::InvalidVenueResponse, e.to_string()))?;
    Ok(Outcome {
        rendered,
        exit_code: EXIT_SUCCESS,
    })
}

fn report_exit_code(report: &ExecutionReport) -> u8 {
    ErrorCode::for_status(report.status()).map_or(EXIT_SUCCESS, |code| code.exit_code())
}
