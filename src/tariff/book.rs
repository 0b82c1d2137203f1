//! In-memory read model over the versioned tariff tables.

use std::{fs, path::Path};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    calendar::{DayType, HolidayCalendar, Season},
    prelude::*,
    quantity::{rate::KilowattHourRate, window::ClockTime},
    settings::SiteSettings,
    tariff::{
        definition::{TariffDefinition, TariffType},
        grid_access::{FALLBACK_GRID_ACCESS, GridAccessCost, SlotName, VoltageLevel, find_slot},
    },
};

/// Lookup outcome: either the stored value, or the documented fallback when
/// the tables have a gap. Pricing must always produce a displayable number,
/// so gaps degrade instead of failing — but the caller can still tell.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Lookup<T> {
    Matched(T),
    Fallback(T),
}

impl<T> Lookup<T> {
    pub fn value(self) -> T {
        match self {
            Self::Matched(value) | Self::Fallback(value) => value,
        }
    }

    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// A tariff definition under administration, addressable by id.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredDefinition {
    pub id: u32,

    #[serde(flatten)]
    pub definition: TariffDefinition,
}

/// The active slot for a point in time, as reported on a quote.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResolvedSlot {
    pub slot_name: SlotName,
    pub grid_access: KilowattHourRate,
}

/// All regulatory parameter tables: tariff definitions, grid-access rows,
/// holidays and site defaults. The whole book round-trips through TOML;
/// generic storage mechanics live outside this crate.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TariffBook {
    #[serde(default, rename = "definition")]
    pub definitions: Vec<StoredDefinition>,

    #[serde(default, rename = "grid_access_cost")]
    pub grid_costs: Vec<GridAccessCost>,

    #[serde(default)]
    pub holidays: HolidayCalendar,

    #[serde(default)]
    pub site: SiteSettings,
}

impl TariffBook {
    /// Definition valid on the date, for the family.
    ///
    /// Should several definitions cover the same date (a data error the
    /// administration path rejects), the one with the greatest
    /// `valid_from` deterministically wins. With no match, the neutral
    /// parameters are returned as a flagged fallback.
    pub fn lookup_definition(
        &self,
        tariff_type: TariffType,
        date: NaiveDate,
    ) -> Lookup<TariffDefinition> {
        self.definitions
            .iter()
            .filter(|stored| {
                (stored.definition.tariff_type == tariff_type)
                    && stored.definition.is_valid_on(date)
            })
            .max_by_key(|stored| stored.definition.valid_from)
            .map_or_else(
                || Lookup::Fallback(TariffDefinition::neutral(tariff_type)),
                |stored| Lookup::Matched(stored.definition),
            )
    }

    /// Grid-access rows for the context, in stable load order. The set is
    /// expected, not enforced here, to tile the 24-hour day.
    pub fn lookup_costs(
        &self,
        tariff_type: TariffType,
        voltage_level: VoltageLevel,
        season: Season,
        day_of_week: DayType,
    ) -> impl Iterator<Item = &GridAccessCost> {
        self.grid_costs
            .iter()
            .filter(move |row| row.matches(tariff_type, voltage_level, season, day_of_week))
    }

    /// Resolve the slot active at the given time of day, degrading to the
    /// fallback access charge (reported as `standard`) on a coverage gap.
    pub fn resolve_slot(
        &self,
        tariff_type: TariffType,
        voltage_level: VoltageLevel,
        season: Season,
        day_of_week: DayType,
        time: ClockTime,
    ) -> Lookup<ResolvedSlot> {
        find_slot(self.lookup_costs(tariff_type, voltage_level, season, day_of_week), time)
            .map_or(
                Lookup::Fallback(ResolvedSlot {
                    slot_name: SlotName::Standard,
                    grid_access: FALLBACK_GRID_ACCESS,
                }),
                |row| {
                    Lookup::Matched(ResolvedSlot {
                        slot_name: row.slot_name,
                        grid_access: row.grid_access,
                    })
                },
            )
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_from(path: &Path) -> Result<Self> {
        toml::from_str(
            &fs::read_to_string(path)
                .with_context(|| format!("failed to read `{}`", path.display()))?,
        )
        .with_context(|| format!("failed to parse the tariff book `{}`", path.display()))
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn write_to(&self, path: &Path) -> Result {
        fs::write(path, toml::to_string(self).context("failed to serialize the tariff book")?)
            .with_context(|| format!("failed to write `{}`", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn stored(id: u32, valid_from: NaiveDate, valid_to: NaiveDate, vat_rate: f64) -> StoredDefinition {
        StoredDefinition {
            id,
            definition: TariffDefinition {
                tariff_type: TariffType::Simple,
                valid_from,
                valid_to,
                loss_factor: 1.08,
                buy_spread: KilowattHourRate::from(0.005),
                vat_rate,
                export_multiplier: 0.8,
            },
        }
    }

    #[test]
    fn test_lookup_definition_by_date() {
        let book = TariffBook {
            definitions: vec![
                stored(1, date(2024, 1, 1), date(2024, 12, 31), 1.23),
                stored(2, date(2025, 1, 1), date(2025, 12, 31), 1.06),
            ],
            ..TariffBook::default()
        };
        let lookup = book.lookup_definition(TariffType::Simple, date(2025, 7, 16));
        assert!(!lookup.is_fallback());
        assert_eq!(lookup.value().vat_rate, 1.06);
    }

    #[test]
    fn test_lookup_definition_latest_valid_from_wins() {
        // Overlapping data (should not happen, but must stay deterministic).
        let book = TariffBook {
            definitions: vec![
                stored(1, date(2025, 1, 1), date(2025, 12, 31), 1.23),
                stored(2, date(2025, 6, 1), date(2025, 12, 31), 1.06),
            ],
            ..TariffBook::default()
        };
        assert_eq!(
            book.lookup_definition(TariffType::Simple, date(2025, 7, 16)).value().vat_rate,
            1.06
        );
    }

    #[test]
    fn test_lookup_definition_falls_back_to_neutral() {
        let book = TariffBook::default();
        let lookup = book.lookup_definition(TariffType::FourRate, date(2025, 7, 16));
        assert!(lookup.is_fallback());
        let definition = lookup.value();
        assert_eq!(definition.loss_factor, 1.0);
        assert_eq!(definition.buy_spread, KilowattHourRate::ZERO);
        assert_eq!(definition.vat_rate, 1.0);
        assert_eq!(definition.export_multiplier, 0.8);
    }

    #[test]
    fn test_resolve_slot_falls_back_on_gap() {
        let book = TariffBook::default();
        let lookup = book.resolve_slot(
            TariffType::Simple,
            VoltageLevel::Low,
            Season::Winter,
            DayType::Weekday,
            ClockTime::new(12, 0),
        );
        assert!(lookup.is_fallback());
        assert_eq!(lookup.value().slot_name, SlotName::Standard);
        assert_eq!(lookup.value().grid_access, FALLBACK_GRID_ACCESS);
    }

    #[test]
    fn test_book_toml_round_trip() -> Result {
        let book = TariffBook::portugal();
        let serialized = toml::to_string(&book)?;
        let deserialized: TariffBook = toml::from_str(&serialized)?;
        assert_eq!(deserialized, book);
        Ok(())
    }
}
