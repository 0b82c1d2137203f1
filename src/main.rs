mod calendar;
mod cli;
mod prelude;
mod pricing;
mod quantity;
mod render;
mod settings;
mod tariff;

use std::path::Path;

use chrono::Local;
use clap::Parser;
use itertools::Itertools;
use tracing_subscriber::EnvFilter;

use crate::{
    calendar::{DayType, Season},
    cli::{Args, Command, DefinitionsCommand},
    prelude::*,
    pricing::PricingEngine,
    tariff::{TariffBook, TariffDefinition, TariffPatch},
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let mut book = match args.book_path.as_deref() {
        Some(path) if path.is_file() => TariffBook::read_from(path)?,
        Some(path) => {
            info!(path = %path.display(), "the book file does not exist yet, starting from the built-in book");
            TariffBook::portugal()
        }
        None => TariffBook::portugal(),
    };

    match args.command {
        Command::Quote(quote_args) => {
            let timestamp = quote_args.at.unwrap_or_else(|| Local::now().naive_local());
            let engine = PricingEngine::builder().book(&book).build();
            let quote = engine.quote(
                quote_args.spot_price,
                timestamp,
                quote_args.context.tariff_type,
                quote_args.context.voltage_level,
            );
            if quote_args.json {
                println!("{}", serde_json::to_string_pretty(&quote)?);
            } else {
                println!("{}", render::quote_table(&quote));
            }
            Ok(())
        }

        Command::Slots(slots_args) => {
            let date = slots_args.date.unwrap_or_else(|| Local::now().date_naive());
            let tariff_type = slots_args.context.tariff_type.unwrap_or(book.site.tariff_type);
            let voltage_level =
                slots_args.context.voltage_level.unwrap_or(book.site.voltage_level);
            let season = Season::of(date);
            let day_of_week = DayType::of(date, &book.holidays);
            if let Some(name) = book.holidays.name_of(date) {
                info!(%date, name, "the date is a holiday, using the Sunday tables");
            }
            let mut rows = book
                .lookup_costs(tariff_type, voltage_level, season, day_of_week)
                .collect_vec();
            rows.sort_by_key(|row| row.window.start);
            info!(%tariff_type, %voltage_level, %season, %day_of_week, n_slots = rows.len());
            println!("{}", render::day_table(&rows));
            Ok(())
        }

        Command::Definitions(command) => match command {
            DefinitionsCommand::List(list_args) => {
                let definitions = book.list_definitions(list_args.tariff_type);
                if list_args.json {
                    println!("{}", serde_json::to_string_pretty(&definitions)?);
                } else {
                    println!("{}", render::definitions_table(&definitions));
                }
                Ok(())
            }

            DefinitionsCommand::Add(add_args) => {
                let id = book.create_definition(
                    TariffDefinition::builder()
                        .tariff_type(add_args.tariff_type)
                        .valid_from(add_args.valid_from)
                        .valid_to(add_args.valid_to)
                        .loss_factor(add_args.loss_factor)
                        .buy_spread(add_args.buy_spread.into())
                        .vat_rate(add_args.vat_rate)
                        .export_multiplier(add_args.export_multiplier)
                        .build(),
                )?;
                info!(id, "created");
                persist(&book, args.book_path.as_deref())
            }

            DefinitionsCommand::Edit(edit_args) => {
                book.update_definition(
                    edit_args.id,
                    TariffPatch {
                        tariff_type: edit_args.tariff_type,
                        valid_from: edit_args.valid_from,
                        valid_to: edit_args.valid_to,
                        loss_factor: edit_args.loss_factor,
                        buy_spread: edit_args.buy_spread.map(Into::into),
                        vat_rate: edit_args.vat_rate,
                        export_multiplier: edit_args.export_multiplier,
                    },
                )?;
                info!(id = edit_args.id, "updated");
                persist(&book, args.book_path.as_deref())
            }

            DefinitionsCommand::Remove(remove_args) => {
                let removed = book.delete_definition(remove_args.id)?;
                info!(id = remove_args.id, tariff_type = %removed.tariff_type, "deleted");
                persist(&book, args.book_path.as_deref())
            }
        },
    }
}

fn persist(book: &TariffBook, path: Option<&Path>) -> Result {
    match path {
        Some(path) => book.write_to(path),
        None => {
            warn!("no book file given, the change is not persisted");
            Ok(())
        }
    }
}
