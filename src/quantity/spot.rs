use std::fmt::{Debug, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::quantity::rate::KilowattHourRate;

/// Wholesale (OMIE day-ahead) price in euro per megawatt-hour.
///
/// Kept separate from [`KilowattHourRate`] so that the per-MWh feed unit can
/// never be mixed into the per-kWh price formula without an explicit
/// conversion.
#[derive(
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
    derive_more::From,
    derive_more::FromStr,
)]
pub struct SpotPrice(pub f64);

impl SpotPrice {
    pub fn per_kilowatt_hour(self) -> KilowattHourRate {
        KilowattHourRate::from(self.0 / 1000.0)
    }
}

impl Display for SpotPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} €/MWh", self.0)
    }
}

impl Debug for SpotPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}€/MWh", self.0)
    }
}
