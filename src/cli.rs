use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};

use crate::{
    quantity::spot::SpotPrice,
    tariff::{TariffType, VoltageLevel},
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    /// Tariff book TOML file; the built-in Portuguese book is used when
    /// absent. Administrative commands write the book back to this path.
    #[clap(long = "book", env = "TARIFA_BOOK")]
    pub book_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Price one moment: resolve the slot and compute buy/export prices.
    Quote(QuoteArgs),

    /// Print the resolved slot table for a whole day.
    Slots(SlotsArgs),

    /// Administer the versioned tariff definitions.
    #[clap(subcommand)]
    Definitions(DefinitionsCommand),
}

#[derive(Parser)]
pub struct QuoteArgs {
    /// Wholesale (OMIE) price in €/MWh.
    #[clap(long = "spot-price", alias = "spot", env = "SPOT_PRICE_EUR_MWH")]
    pub spot_price: SpotPrice,

    /// Local timestamp, for example `2025-07-16T23:00:00`; defaults to now.
    #[clap(long = "at")]
    pub at: Option<NaiveDateTime>,

    #[clap(flatten)]
    pub context: ContextArgs,

    /// Print the quote as JSON instead of a table.
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct SlotsArgs {
    /// Local date, for example `2025-07-16`; defaults to today.
    #[clap(long = "date")]
    pub date: Option<NaiveDate>,

    #[clap(flatten)]
    pub context: ContextArgs,
}

/// Pricing context; site defaults from the book apply when omitted.
#[derive(Copy, Clone, Parser)]
pub struct ContextArgs {
    #[clap(long = "tariff-type", env = "TARIFF_TYPE")]
    pub tariff_type: Option<TariffType>,

    #[clap(long = "voltage-level", env = "VOLTAGE_LEVEL")]
    pub voltage_level: Option<VoltageLevel>,
}

#[derive(Subcommand)]
pub enum DefinitionsCommand {
    /// List the definitions, optionally for one tariff family.
    List(ListDefinitionsArgs),

    /// Create a new definition version.
    Add(AddDefinitionArgs),

    /// Patch an existing definition by id.
    Edit(EditDefinitionArgs),

    /// Delete a definition by id.
    Remove(RemoveDefinitionArgs),
}

#[derive(Parser)]
pub struct ListDefinitionsArgs {
    #[clap(long = "tariff-type")]
    pub tariff_type: Option<TariffType>,

    /// Print the definitions as JSON instead of a table.
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct AddDefinitionArgs {
    #[clap(long = "tariff-type")]
    pub tariff_type: TariffType,

    /// First valid day (inclusive).
    #[clap(long = "valid-from")]
    pub valid_from: NaiveDate,

    /// Last valid day (inclusive).
    #[clap(long = "valid-to")]
    pub valid_to: NaiveDate,

    /// Network-loss multiplier on the wholesale price.
    #[clap(long = "loss-factor", default_value = "1.08")]
    pub loss_factor: f64,

    /// Retailer spread in €/kWh.
    #[clap(long = "buy-spread", default_value = "0.005")]
    pub buy_spread: f64,

    /// Multiplicative VAT factor.
    #[clap(long = "vat-rate", default_value = "1.23")]
    pub vat_rate: f64,

    /// Fraction of the wholesale price paid for exports.
    #[clap(long = "export-multiplier", default_value = "0.8")]
    pub export_multiplier: f64,
}

#[derive(Parser)]
pub struct EditDefinitionArgs {
    pub id: u32,

    #[clap(long = "tariff-type")]
    pub tariff_type: Option<TariffType>,

    #[clap(long = "valid-from")]
    pub valid_from: Option<NaiveDate>,

    #[clap(long = "valid-to")]
    pub valid_to: Option<NaiveDate>,

    #[clap(long = "loss-factor")]
    pub loss_factor: Option<f64>,

    #[clap(long = "buy-spread")]
    pub buy_spread: Option<f64>,

    #[clap(long = "vat-rate")]
    pub vat_rate: Option<f64>,

    #[clap(long = "export-multiplier")]
    pub export_multiplier: Option<f64>,
}

#[derive(Parser)]
pub struct RemoveDefinitionArgs {
    pub id: u32,
}
