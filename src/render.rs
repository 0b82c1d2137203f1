use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use ordered_float::OrderedFloat;

use crate::{
    pricing::PriceQuote,
    tariff::{GridAccessCost, SlotName, book::StoredDefinition},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

const fn slot_color(slot_name: SlotName) -> Color {
    match slot_name {
        SlotName::Peak => Color::Red,
        SlotName::Standard => Color::DarkYellow,
        SlotName::OffPeak => Color::Green,
        SlotName::SuperOffPeak => Color::DarkGreen,
    }
}

pub fn quote_table(quote: &PriceQuote) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Timestamp", "Season", "Day", "Slot", "Buy", "Export"]);
    let mut row = vec![
        Cell::new(quote.timestamp.format("%Y-%m-%d %H:%M")),
        Cell::new(quote.season),
        Cell::new(quote.day_of_week),
        Cell::new(quote.slot_name).fg(slot_color(quote.slot_name)),
        Cell::new(quote.buy_price).set_alignment(CellAlignment::Right),
        Cell::new(quote.export_price).set_alignment(CellAlignment::Right),
    ];
    if quote.degraded {
        row = row.into_iter().map(|cell| cell.add_attribute(Attribute::Dim)).collect();
    }
    table.add_row(row);
    table
}

/// Day table for one resolved context, one row per slot window.
pub fn day_table(rows: &[&GridAccessCost]) -> Table {
    let dearest = rows.iter().map(|row| OrderedFloat(row.grid_access.0)).max();
    let cheapest = rows.iter().map(|row| OrderedFloat(row.grid_access.0)).min();

    let mut table = new_table();
    table.set_header(vec!["Window", "Slot", "Grid access"]);
    for row in rows {
        let access = OrderedFloat(row.grid_access.0);
        table.add_row(vec![
            Cell::new(row.window),
            Cell::new(row.slot_name).fg(slot_color(row.slot_name)),
            Cell::new(row.grid_access).set_alignment(CellAlignment::Right).fg(
                if Some(access) == dearest {
                    Color::Red
                } else if Some(access) == cheapest {
                    Color::Green
                } else {
                    Color::DarkYellow
                },
            ),
        ]);
    }
    table
}

pub fn definitions_table(definitions: &[&StoredDefinition]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Id",
        "Tariff",
        "Valid from",
        "Valid to",
        "Loss factor",
        "Buy spread",
        "VAT",
        "Export ×",
    ]);
    for stored in definitions {
        let definition = &stored.definition;
        table.add_row(vec![
            Cell::new(stored.id).add_attribute(Attribute::Dim),
            Cell::new(definition.tariff_type),
            Cell::new(definition.valid_from),
            Cell::new(definition.valid_to),
            Cell::new(definition.loss_factor).set_alignment(CellAlignment::Right),
            Cell::new(definition.buy_spread).set_alignment(CellAlignment::Right),
            Cell::new(definition.vat_rate).set_alignment(CellAlignment::Right),
            Cell::new(definition.export_multiplier).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
