use chrono::NaiveDate;
use enumset::{EnumSet, enum_set};
use serde::{Deserialize, Serialize};

use crate::{quantity::rate::KilowattHourRate, tariff::grid_access::SlotName};

/// ERSE tariff family, named after how many time-of-day price slots it
/// defines («tarifa simples», «bi-horária», «tri-horária», «tetra-horária»).
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum TariffType {
    #[display("simple")]
    Simple,

    #[display("two_rate")]
    TwoRate,

    #[display("three_rate")]
    ThreeRate,

    #[display("four_rate")]
    FourRate,
}

impl TariffType {
    pub const ALL: [Self; 4] = [Self::Simple, Self::TwoRate, Self::ThreeRate, Self::FourRate];

    /// Slot names the family's tables are allowed to use.
    pub const fn slot_names(self) -> EnumSet<SlotName> {
        match self {
            Self::Simple => enum_set!(SlotName::Standard),
            Self::TwoRate => enum_set!(SlotName::Standard | SlotName::OffPeak),
            Self::ThreeRate => {
                enum_set!(SlotName::Standard | SlotName::OffPeak | SlotName::Peak)
            }
            Self::FourRate => enum_set!(
                SlotName::Standard | SlotName::OffPeak | SlotName::Peak | SlotName::SuperOffPeak
            ),
        }
    }
}

/// One version of the global pricing parameters for one tariff family,
/// valid over an inclusive date range.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, bon::Builder)]
pub struct TariffDefinition {
    pub tariff_type: TariffType,

    /// Inclusive.
    pub valid_from: NaiveDate,

    /// Inclusive.
    pub valid_to: NaiveDate,

    /// Network-loss multiplier applied to the wholesale price, ≥ 1.
    pub loss_factor: f64,

    /// Retailer spread added on top of the wholesale-derived term.
    pub buy_spread: KilowattHourRate,

    /// Multiplicative VAT factor, for example `1.23`.
    pub vat_rate: f64,

    /// Fraction of the wholesale price paid back for exported energy.
    pub export_multiplier: f64,
}

impl TariffDefinition {
    /// Neutral parameters used when no definition covers a date: pricing
    /// must still produce a number for display.
    pub const fn neutral(tariff_type: TariffType) -> Self {
        Self {
            tariff_type,
            valid_from: NaiveDate::MIN,
            valid_to: NaiveDate::MAX,
            loss_factor: 1.0,
            buy_spread: KilowattHourRate::ZERO,
            vat_rate: 1.0,
            export_multiplier: 0.8,
        }
    }

    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        (self.valid_from <= date) && (date <= self.valid_to)
    }

    /// Whether the validity ranges of two same-family definitions collide.
    pub fn overlaps(&self, other: &Self) -> bool {
        (self.tariff_type == other.tariff_type)
            && (self.valid_from <= other.valid_to)
            && (other.valid_from <= self.valid_to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn definition(valid_from: NaiveDate, valid_to: NaiveDate) -> TariffDefinition {
        TariffDefinition::builder()
            .tariff_type(TariffType::Simple)
            .valid_from(valid_from)
            .valid_to(valid_to)
            .loss_factor(1.08)
            .buy_spread(KilowattHourRate::from(0.005))
            .vat_rate(1.23)
            .export_multiplier(0.8)
            .build()
    }

    #[test]
    fn test_validity_is_inclusive() {
        let definition = definition(date(2025, 1, 1), date(2025, 12, 31));
        assert!(definition.is_valid_on(date(2025, 1, 1)));
        assert!(definition.is_valid_on(date(2025, 12, 31)));
        assert!(!definition.is_valid_on(date(2024, 12, 31)));
        assert!(!definition.is_valid_on(date(2026, 1, 1)));
    }

    #[test]
    fn test_overlaps() {
        let lhs = definition(date(2025, 1, 1), date(2025, 12, 31));
        assert!(lhs.overlaps(&definition(date(2025, 12, 31), date(2026, 12, 31))));
        assert!(!lhs.overlaps(&definition(date(2026, 1, 1), date(2026, 12, 31))));
        // Different families never collide.
        let mut rhs = definition(date(2025, 6, 1), date(2025, 6, 30));
        rhs.tariff_type = TariffType::FourRate;
        assert!(!lhs.overlaps(&rhs));
    }

    #[test]
    fn test_slot_names_are_nested() {
        assert!(TariffType::Simple.slot_names().is_subset(TariffType::TwoRate.slot_names()));
        assert!(TariffType::TwoRate.slot_names().is_subset(TariffType::ThreeRate.slot_names()));
        assert!(TariffType::ThreeRate.slot_names().is_subset(TariffType::FourRate.slot_names()));
        assert_eq!(TariffType::FourRate.slot_names().len(), 4);
    }
}
