//! Built-in Portuguese dataset: ERSE tariff definitions, grid-access slot
//! tables for both voltage levels, national holidays and site defaults.
//! Used whenever no tariff book file is supplied.

use chrono::NaiveDate;

use crate::{
    calendar::{DayType, HolidayCalendar, Season},
    quantity::{
        rate::KilowattHourRate,
        window::{ClockTime, ClockWindow},
    },
    settings::SiteSettings,
    tariff::{
        book::{StoredDefinition, TariffBook},
        definition::{TariffDefinition, TariffType},
        grid_access::{GridAccessCost, SlotName, VoltageLevel},
    },
};

/// Slot windows for one (tariff family, season, day type) context. Every
/// list tiles the full 24-hour day; the night windows wrap past midnight.
fn windows(
    tariff_type: TariffType,
    season: Season,
    day_of_week: DayType,
) -> Vec<(SlotName, (u16, u16), (u16, u16))> {
    use SlotName::{OffPeak, Peak, Standard, SuperOffPeak};

    match (tariff_type, season, day_of_week) {
        (TariffType::Simple, _, _) => vec![(Standard, (0, 0), (24, 0))],

        // Daily cycle: the night window is the same the whole week.
        (TariffType::TwoRate, _, _) => {
            vec![(Standard, (8, 0), (22, 0)), (OffPeak, (22, 0), (8, 0))]
        }

        (TariffType::ThreeRate, Season::Summer, DayType::Weekday) => vec![
            (Standard, (8, 0), (10, 30)),
            (Peak, (10, 30), (13, 0)),
            (Standard, (13, 0), (19, 30)),
            (Peak, (19, 30), (21, 0)),
            (Standard, (21, 0), (22, 0)),
            (OffPeak, (22, 0), (8, 0)),
        ],
        (TariffType::ThreeRate, Season::Winter, DayType::Weekday) => vec![
            (Standard, (8, 0), (9, 0)),
            (Peak, (9, 0), (10, 30)),
            (Standard, (10, 30), (18, 0)),
            (Peak, (18, 0), (20, 30)),
            (Standard, (20, 30), (22, 0)),
            (OffPeak, (22, 0), (8, 0)),
        ],
        (TariffType::ThreeRate, _, DayType::Saturday) => vec![
            (Standard, (9, 0), (14, 0)),
            (OffPeak, (14, 0), (20, 0)),
            (Standard, (20, 0), (22, 0)),
            (OffPeak, (22, 0), (9, 0)),
        ],
        (TariffType::ThreeRate, _, DayType::Sunday) => vec![(OffPeak, (0, 0), (24, 0))],

        (TariffType::FourRate, Season::Summer, DayType::Weekday) => vec![
            (OffPeak, (6, 0), (8, 0)),
            (Standard, (8, 0), (10, 30)),
            (Peak, (10, 30), (13, 0)),
            (Standard, (13, 0), (19, 30)),
            (Peak, (19, 30), (21, 0)),
            (Standard, (21, 0), (22, 0)),
            (SuperOffPeak, (22, 0), (6, 0)),
        ],
        (TariffType::FourRate, Season::Winter, DayType::Weekday) => vec![
            (OffPeak, (6, 0), (8, 0)),
            (Standard, (8, 0), (9, 0)),
            (Peak, (9, 0), (10, 30)),
            (Standard, (10, 30), (18, 0)),
            (Peak, (18, 0), (20, 30)),
            (Standard, (20, 30), (22, 0)),
            (SuperOffPeak, (22, 0), (6, 0)),
        ],
        (TariffType::FourRate, _, DayType::Saturday) => vec![
            (OffPeak, (6, 0), (9, 0)),
            (Standard, (9, 0), (14, 0)),
            (OffPeak, (14, 0), (20, 0)),
            (Standard, (20, 0), (22, 0)),
            (SuperOffPeak, (22, 0), (6, 0)),
        ],
        (TariffType::FourRate, _, DayType::Sunday) => {
            vec![(OffPeak, (6, 0), (22, 0)), (SuperOffPeak, (22, 0), (6, 0))]
        }
    }
}

/// Regulated €/kWh access charges per family, voltage level and slot.
const fn access_charge(
    tariff_type: TariffType,
    voltage_level: VoltageLevel,
    slot_name: SlotName,
) -> f64 {
    match (tariff_type, voltage_level, slot_name) {
        (TariffType::Simple, VoltageLevel::Low, _) => 0.08,
        (TariffType::Simple, VoltageLevel::Medium, _) => 0.055,

        (TariffType::TwoRate, VoltageLevel::Low, SlotName::OffPeak) => 0.05,
        (TariffType::TwoRate, VoltageLevel::Low, _) => 0.09,
        (TariffType::TwoRate, VoltageLevel::Medium, SlotName::OffPeak) => 0.035,
        (TariffType::TwoRate, VoltageLevel::Medium, _) => 0.065,

        (TariffType::ThreeRate, VoltageLevel::Low, SlotName::Peak) => 0.11,
        (TariffType::ThreeRate, VoltageLevel::Low, SlotName::OffPeak) => 0.045,
        (TariffType::ThreeRate, VoltageLevel::Low, _) => 0.07,
        (TariffType::ThreeRate, VoltageLevel::Medium, SlotName::Peak) => 0.08,
        (TariffType::ThreeRate, VoltageLevel::Medium, SlotName::OffPeak) => 0.03,
        (TariffType::ThreeRate, VoltageLevel::Medium, _) => 0.05,

        (TariffType::FourRate, VoltageLevel::Low, SlotName::Peak) => 0.12,
        (TariffType::FourRate, VoltageLevel::Low, SlotName::OffPeak) => 0.05,
        (TariffType::FourRate, VoltageLevel::Low, SlotName::SuperOffPeak) => 0.03,
        (TariffType::FourRate, VoltageLevel::Low, _) => 0.08,
        (TariffType::FourRate, VoltageLevel::Medium, SlotName::Peak) => 0.09,
        (TariffType::FourRate, VoltageLevel::Medium, SlotName::OffPeak) => 0.035,
        (TariffType::FourRate, VoltageLevel::Medium, SlotName::SuperOffPeak) => 0.02,
        (TariffType::FourRate, VoltageLevel::Medium, _) => 0.06,
    }
}

fn grid_costs() -> Vec<GridAccessCost> {
    let mut rows = Vec::new();
    for tariff_type in TariffType::ALL {
        for voltage_level in [VoltageLevel::Low, VoltageLevel::Medium] {
            for season in [Season::Summer, Season::Winter] {
                for day_of_week in [DayType::Weekday, DayType::Saturday, DayType::Sunday] {
                    for (slot_name, start, end) in windows(tariff_type, season, day_of_week) {
                        rows.push(GridAccessCost {
                            tariff_type,
                            voltage_level,
                            season,
                            day_of_week,
                            slot_name,
                            window: ClockWindow::new(
                                ClockTime::new(start.0, start.1),
                                ClockTime::new(end.0, end.1),
                            ),
                            grid_access: KilowattHourRate::from(access_charge(
                                tariff_type,
                                voltage_level,
                                slot_name,
                            )),
                        });
                    }
                }
            }
        }
    }
    rows
}

fn definitions() -> Vec<StoredDefinition> {
    let mut stored = Vec::new();
    for (index, tariff_type) in TariffType::ALL.into_iter().enumerate() {
        // 2024 parameters, superseded by the 2025 revision.
        stored.push(StoredDefinition {
            id: (index as u32) * 2 + 1,
            definition: TariffDefinition::builder()
                .tariff_type(tariff_type)
                .valid_from(date(2024, 1, 1))
                .valid_to(date(2024, 12, 31))
                .loss_factor(1.07)
                .buy_spread(KilowattHourRate::from(0.004))
                .vat_rate(1.23)
                .export_multiplier(0.75)
                .build(),
        });
        stored.push(StoredDefinition {
            id: (index as u32) * 2 + 2,
            definition: TariffDefinition::builder()
                .tariff_type(tariff_type)
                .valid_from(date(2025, 1, 1))
                .valid_to(date(2026, 12, 31))
                .loss_factor(1.08)
                .buy_spread(KilowattHourRate::from(0.005))
                .vat_rate(1.23)
                .export_multiplier(0.8)
                .build(),
        });
    }
    stored
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

impl HolidayCalendar {
    /// Portuguese national holidays, 2024 through 2026.
    pub fn portugal() -> Self {
        let fixed: [(u32, u32, &str); 10] = [
            (1, 1, "Ano Novo"),
            (4, 25, "Dia da Liberdade"),
            (5, 1, "Dia do Trabalhador"),
            (6, 10, "Dia de Portugal"),
            (8, 15, "Assunção de Nossa Senhora"),
            (10, 5, "Implantação da República"),
            (11, 1, "Dia de Todos os Santos"),
            (12, 1, "Restauração da Independência"),
            (12, 8, "Imaculada Conceição"),
            (12, 25, "Natal"),
        ];
        let movable: [(i32, u32, u32, &str); 9] = [
            (2024, 3, 29, "Sexta-feira Santa"),
            (2024, 3, 31, "Páscoa"),
            (2024, 5, 30, "Corpo de Deus"),
            (2025, 4, 18, "Sexta-feira Santa"),
            (2025, 4, 20, "Páscoa"),
            (2025, 6, 19, "Corpo de Deus"),
            (2026, 4, 3, "Sexta-feira Santa"),
            (2026, 4, 5, "Páscoa"),
            (2026, 6, 4, "Corpo de Deus"),
        ];
        let mut calendar = Self::default();
        for year in 2024..=2026 {
            for (month, day, name) in fixed {
                calendar.insert(date(year, month, day), name);
            }
        }
        for (year, month, day, name) in movable {
            calendar.insert(date(year, month, day), name);
        }
        calendar
    }
}

impl TariffBook {
    /// The built-in Portuguese book.
    pub fn portugal() -> Self {
        Self {
            definitions: definitions(),
            grid_costs: grid_costs(),
            holidays: HolidayCalendar::portugal(),
            site: SiteSettings::default(),
        }
    }
}
