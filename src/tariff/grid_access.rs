use serde::{Deserialize, Serialize};

use crate::{
    calendar::{DayType, Season},
    quantity::{
        Quantity,
        rate::KilowattHourRate,
        window::{ClockTime, ClockWindow},
    },
    tariff::definition::TariffType,
};

/// Grid-access charge applied when no row covers the requested time: the
/// network operator never bills nothing, and the dashboard must always
/// show a price.
pub const FALLBACK_GRID_ACCESS: KilowattHourRate = Quantity(0.05);

/// Connection class. Selects which regulated access table applies.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum VoltageLevel {
    #[display("low_voltage")]
    #[serde(rename = "low_voltage", alias = "low")]
    Low,

    #[display("medium_voltage")]
    #[serde(rename = "medium_voltage", alias = "medium")]
    Medium,
}

/// Named time-of-day price band («ponta», «cheias», «vazio», «super vazio»).
#[derive(enumset::EnumSetType, Debug, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum SlotName {
    #[display("super_off_peak")]
    SuperOffPeak,

    #[display("off_peak")]
    OffPeak,

    #[display("standard")]
    Standard,

    #[display("peak")]
    Peak,
}

/// Regulated network charge for one fully-qualified slot.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridAccessCost {
    pub tariff_type: TariffType,
    pub voltage_level: VoltageLevel,
    pub season: Season,
    pub day_of_week: DayType,
    pub slot_name: SlotName,

    /// Start inclusive, end exclusive; may wrap past midnight.
    #[serde(flatten)]
    pub window: ClockWindow,

    /// €/kWh.
    pub grid_access: KilowattHourRate,
}

impl GridAccessCost {
    pub fn matches(
        &self,
        tariff_type: TariffType,
        voltage_level: VoltageLevel,
        season: Season,
        day_of_week: DayType,
    ) -> bool {
        (self.tariff_type == tariff_type)
            && (self.voltage_level == voltage_level)
            && (self.season == season)
            && (self.day_of_week == day_of_week)
    }
}

/// Find the row whose window contains the given time of day.
///
/// The first match in row order wins; overlapping rows are a data bug for
/// the seed tiling tests to catch, not a runtime error.
pub fn find_slot<'a>(
    rows: impl IntoIterator<Item = &'a GridAccessCost>,
    time: ClockTime,
) -> Option<&'a GridAccessCost> {
    rows.into_iter().find(|row| row.window.contains(time))
}
