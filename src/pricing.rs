//! Buy/export price evaluation on top of the tariff book.
//!
//! Buy price: `((spot / 1000) × loss_factor + buy_spread + grid_access) × vat_rate`.
//! Export price: `(spot / 1000) × export_multiplier`.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{
    calendar::{DayType, Season},
    prelude::*,
    quantity::{rate::KilowattHourRate, spot::SpotPrice, window::ClockTime},
    tariff::{SlotName, TariffBook, TariffType, VoltageLevel},
};

/// Outcome of a single pricing evaluation. Computed fresh on every call —
/// the spot price varies per timestamp, so nothing is worth caching.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct PriceQuote {
    pub timestamp: NaiveDateTime,
    pub season: Season,
    pub day_of_week: DayType,
    pub slot_name: SlotName,
    pub buy_price: KilowattHourRate,
    pub export_price: KilowattHourRate,

    /// Some parameter table had a gap and a documented fallback was used.
    pub degraded: bool,
}

/// Stateless evaluator over a shared tariff book. Every call is an
/// independent read; the book is only ever mutated through the
/// administration path.
#[derive(Copy, Clone, bon::Builder)]
pub struct PricingEngine<'a> {
    book: &'a TariffBook,
}

impl PricingEngine<'_> {
    /// Evaluate both prices for one timestamp. `tariff_type` and
    /// `voltage_level` fall back to the site defaults when not supplied.
    pub fn quote(
        &self,
        spot_price: SpotPrice,
        timestamp: NaiveDateTime,
        tariff_type: Option<TariffType>,
        voltage_level: Option<VoltageLevel>,
    ) -> PriceQuote {
        let tariff_type = tariff_type.unwrap_or(self.book.site.tariff_type);
        let voltage_level = voltage_level.unwrap_or(self.book.site.voltage_level);

        let date = timestamp.date();
        let season = Season::of(date);
        let day_of_week = DayType::of(date, &self.book.holidays);

        let slot = self.book.resolve_slot(
            tariff_type,
            voltage_level,
            season,
            day_of_week,
            ClockTime::from(timestamp.time()),
        );
        if slot.is_fallback() {
            warn!(
                %tariff_type, %voltage_level, %season, %day_of_week, %timestamp,
                "no grid-access row covers this time, using the fallback charge"
            );
        }
        let definition = self.book.lookup_definition(tariff_type, date);
        if definition.is_fallback() {
            warn!(
                %tariff_type, %date,
                "no tariff definition covers this date, using neutral parameters"
            );
        }

        let degraded = slot.is_fallback() || definition.is_fallback();
        let slot = slot.value();
        let definition = definition.value();

        let spot_per_kwh = spot_price.per_kilowatt_hour();
        let buy_price = (spot_per_kwh * definition.loss_factor
            + definition.buy_spread
            + slot.grid_access)
            * definition.vat_rate;
        let export_price = spot_per_kwh * definition.export_multiplier;

        PriceQuote {
            timestamp,
            season,
            day_of_week,
            slot_name: slot.slot_name,
            buy_price,
            export_price,
            degraded,
        }
    }

    /// Final consumer price in €/kWh.
    pub fn buy_price(
        &self,
        spot_price: SpotPrice,
        timestamp: NaiveDateTime,
        tariff_type: Option<TariffType>,
        voltage_level: Option<VoltageLevel>,
    ) -> KilowattHourRate {
        self.quote(spot_price, timestamp, tariff_type, voltage_level).buy_price
    }

    /// Feed-in price in €/kWh: no grid-access and no VAT term.
    pub fn export_price(
        &self,
        spot_price: SpotPrice,
        tariff_type: Option<TariffType>,
        timestamp: NaiveDateTime,
    ) -> KilowattHourRate {
        let tariff_type = tariff_type.unwrap_or(self.book.site.tariff_type);
        let definition = self.book.lookup_definition(tariff_type, timestamp.date()).value();
        spot_price.per_kilowatt_hour() * definition.export_multiplier
    }
}
