//! Command-line interface.
//!
//! ```text
//! twap twap BTCUSDT BUY 1.0 60000 4 60 --dry-run
//! twap limit BTCUSDT SELL 0.01 65000
//! twap market ETHUSDT BUY 0.5
//! ```
//!
//! Symbol and side are upper-cased here; every other check belongs to the
//! validator, so numeric arguments accept negative values and let it reject
//! them.

mod commands;
pub mod shutdown;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use crate::application::services::OutputFormat;
use crate::domain::execution_tactics::TwapFields;
use crate::domain::order_execution::OrderFields;

pub use commands::{Outcome, execute};

/// TWAP execution engine for Binance USD-M futures
#[derive(Debug, Parser)]
#[command(name = "twap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Acknowledge orders in-process instead of sending them to the venue
    #[arg(long, global = true)]
    pub simulate: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputArg::Text)]
    pub output: OutputArg,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Split an order into equal limit orders placed at a fixed interval
    Twap(TwapArgs),

    /// Place a single GTC limit order
    Limit(LimitArgs),

    /// Place a single market order
    Market(MarketArgs),
}

/// Output format argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    /// Human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Text => Self::Text,
            OutputArg::Json => Self::Json,
        }
    }
}

/// Arguments for the twap command.
#[derive(Debug, Args)]
#[command(allow_negative_numbers = true)]
pub struct TwapArgs {
    /// Instrument symbol, e.g. BTCUSDT
    pub symbol: String,
    /// BUY or SELL
    pub side: String,
    /// Total quantity across all chunks
    pub quantity: Decimal,
    /// Limit price for every chunk
    pub price: Decimal,
    /// Number of chunks
    pub chunks: i64,
    /// Seconds between chunks
    pub interval: i64,
    /// Print the plan without placing orders
    #[arg(long)]
    pub dry_run: bool,
}

impl TwapArgs {
    /// Raw fields for the validator.
    #[must_use]
    pub fn to_fields(&self) -> TwapFields {
        TwapFields {
            symbol: self.symbol.to_uppercase(),
            side: self.side.to_uppercase(),
            total_quantity: self.quantity,
            limit_price: self.price,
            chunk_count: self.chunks,
            interval_seconds: self.interval,
            dry_run: self.dry_run,
        }
    }
}

/// Arguments for the limit command.
#[derive(Debug, Args)]
#[command(allow_negative_numbers = true)]
pub struct LimitArgs {
    /// Instrument symbol
    pub symbol: String,
    /// BUY or SELL
    pub side: String,
    /// Order quantity
    pub quantity: Decimal,
    /// Limit price
    pub price: Decimal,
}

impl LimitArgs {
    /// Raw fields for the validator.
    #[must_use]
    pub fn to_fields(&self) -> OrderFields {
        OrderFields {
            symbol: self.symbol.to_uppercase(),
            side: self.side.to_uppercase(),
            quantity: self.quantity,
            price: Some(self.price),
        }
    }
}

/// Arguments for the market command.
#[derive(Debug, Args)]
#[command(allow_negative_numbers = true)]
pub struct MarketArgs {
    /// Instrument symbol
    pub symbol: String,
    /// BUY or SELL
    pub side: String,
    /// Order quantity
    pub quantity: Decimal,
}

impl MarketArgs {
    /// Raw fields for the validator.
    #[must_use]
    pub fn to_fields(&self) -> OrderFields {
        OrderFields {
            symbol: self.symbol.to_uppercase(),
            side: self.side.to_uppercase(),
            quantity: self.quantity,
            price: None,
        }
    }
}
