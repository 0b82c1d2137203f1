use serde::{Deserialize, Serialize};

use crate::tariff::{TariffType, VoltageLevel};

/// Site-wide defaults used when a pricing call does not name a context
/// explicitly. The power and consumption figures are informational only.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    pub voltage_level: VoltageLevel,
    pub tariff_type: TariffType,
    pub contracted_power_kva: f64,
    pub assumed_daily_kwh: f64,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            voltage_level: VoltageLevel::Medium,
            tariff_type: TariffType::ThreeRate,
            contracted_power_kva: 250.0,
            assumed_daily_kwh: 500.0,
        }
    }
}
