//! Administrative operations over the tariff definitions.
//!
//! Writes go through `&mut TariffBook`, so the exclusive borrow is the
//! single-writer discipline that keeps the non-overlap invariant safe;
//! reads may freely run against any shared snapshot of the book.

use chrono::NaiveDate;

use crate::{
    quantity::rate::KilowattHourRate,
    tariff::{
        book::{StoredDefinition, TariffBook},
        definition::{TariffDefinition, TariffType},
    },
};

/// Typed failure of an administrative write. Never recovered silently:
/// the request itself must be corrected by the operator.
#[derive(Debug, Eq, PartialEq, derive_more::Display, derive_more::Error)]
pub enum AdminError {
    #[display("no tariff definition #{id}")]
    NotFound { id: u32 },

    #[display("the validity range collides with tariff definition #{with}")]
    Conflict { with: u32 },

    #[display("`valid_from` {valid_from} is after `valid_to` {valid_to}")]
    InvertedRange { valid_from: NaiveDate, valid_to: NaiveDate },
}

/// Partial update of a definition; `None` keeps the stored value.
#[derive(Copy, Clone, Debug, Default, bon::Builder)]
pub struct TariffPatch {
    pub tariff_type: Option<TariffType>,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
    pub loss_factor: Option<f64>,
    pub buy_spread: Option<KilowattHourRate>,
    pub vat_rate: Option<f64>,
    pub export_multiplier: Option<f64>,
}

impl TariffPatch {
    pub fn applied_to(self, mut definition: TariffDefinition) -> TariffDefinition {
        if let Some(tariff_type) = self.tariff_type {
            definition.tariff_type = tariff_type;
        }
        if let Some(valid_from) = self.valid_from {
            definition.valid_from = valid_from;
        }
        if let Some(valid_to) = self.valid_to {
            definition.valid_to = valid_to;
        }
        if let Some(loss_factor) = self.loss_factor {
            definition.loss_factor = loss_factor;
        }
        if let Some(buy_spread) = self.buy_spread {
            definition.buy_spread = buy_spread;
        }
        if let Some(vat_rate) = self.vat_rate {
            definition.vat_rate = vat_rate;
        }
        if let Some(export_multiplier) = self.export_multiplier {
            definition.export_multiplier = export_multiplier;
        }
        definition
    }
}

impl TariffBook {
    /// Insert a new definition, enforcing the versioning invariants:
    /// within one family, validity ranges must not collide. Returns the
    /// assigned id.
    pub fn create_definition(
        &mut self,
        definition: TariffDefinition,
    ) -> Result<u32, AdminError> {
        self.validate_against_others(&definition, None)?;
        let id = self.definitions.iter().map(|stored| stored.id).max().unwrap_or(0) + 1;
        self.definitions.push(StoredDefinition { id, definition });
        Ok(id)
    }

    /// Apply a patch to the definition with the given id, re-validating
    /// the invariants on the patched result. The book is left unchanged
    /// on any failure.
    pub fn update_definition(&mut self, id: u32, patch: TariffPatch) -> Result<(), AdminError> {
        let index = self
            .definitions
            .iter()
            .position(|stored| stored.id == id)
            .ok_or(AdminError::NotFound { id })?;
        let patched = patch.applied_to(self.definitions[index].definition);
        self.validate_against_others(&patched, Some(id))?;
        self.definitions[index].definition = patched;
        Ok(())
    }

    /// Remove and return the definition with the given id. Grid-access
    /// rows are independent of definitions, so nothing cascades.
    pub fn delete_definition(&mut self, id: u32) -> Result<TariffDefinition, AdminError> {
        let index = self
            .definitions
            .iter()
            .position(|stored| stored.id == id)
            .ok_or(AdminError::NotFound { id })?;
        Ok(self.definitions.remove(index).definition)
    }

    /// All definitions, optionally filtered by family, ordered by
    /// (family, `valid_from`).
    pub fn list_definitions(&self, tariff_type: Option<TariffType>) -> Vec<&StoredDefinition> {
        let mut definitions: Vec<&StoredDefinition> = self
            .definitions
            .iter()
            .filter(|stored| {
                tariff_type.is_none_or(|tariff_type| stored.definition.tariff_type == tariff_type)
            })
            .collect();
        definitions.sort_by_key(|stored| {
            (stored.definition.tariff_type, stored.definition.valid_from)
        });
        definitions
    }

    fn validate_against_others(
        &self,
        definition: &TariffDefinition,
        skip_id: Option<u32>,
    ) -> Result<(), AdminError> {
        if definition.valid_from > definition.valid_to {
            return Err(AdminError::InvertedRange {
                valid_from: definition.valid_from,
                valid_to: definition.valid_to,
            });
        }
        for stored in &self.definitions {
            if Some(stored.id) == skip_id {
                continue;
            }
            if stored.definition.overlaps(definition) {
                return Err(AdminError::Conflict { with: stored.id });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn definition(
        tariff_type: TariffType,
        valid_from: NaiveDate,
        valid_to: NaiveDate,
    ) -> TariffDefinition {
        TariffDefinition::builder()
            .tariff_type(tariff_type)
            .valid_from(valid_from)
            .valid_to(valid_to)
            .loss_factor(1.08)
            .buy_spread(KilowattHourRate::from(0.005))
            .vat_rate(1.23)
            .export_multiplier(0.8)
            .build()
    }

    #[test]
    fn test_create_assigns_sequential_ids() -> Result<(), AdminError> {
        let mut book = TariffBook::default();
        let first = book.create_definition(definition(
            TariffType::Simple,
            date(2025, 1, 1),
            date(2025, 12, 31),
        ))?;
        let second = book.create_definition(definition(
            TariffType::Simple,
            date(2026, 1, 1),
            date(2026, 12, 31),
        ))?;
        assert_eq!(first, 1);
        assert_eq!(second, 2);
        Ok(())
    }

    #[test]
    fn test_create_rejects_overlap_within_family() {
        let mut book = TariffBook::default();
        let id = book
            .create_definition(definition(TariffType::Simple, date(2025, 1, 1), date(2025, 12, 31)))
            .unwrap();
        // Duplicate `valid_from`.
        assert_eq!(
            book.create_definition(definition(
                TariffType::Simple,
                date(2025, 1, 1),
                date(2026, 12, 31),
            )),
            Err(AdminError::Conflict { with: id }),
        );
        // Touching the last valid day.
        assert_eq!(
            book.create_definition(definition(
                TariffType::Simple,
                date(2025, 12, 31),
                date(2026, 12, 31),
            )),
            Err(AdminError::Conflict { with: id }),
        );
        // The same range under another family is fine.
        assert!(
            book.create_definition(definition(
                TariffType::FourRate,
                date(2025, 1, 1),
                date(2025, 12, 31),
            ))
            .is_ok()
        );
        assert_eq!(book.definitions.len(), 2);
    }

    #[test]
    fn test_create_rejects_inverted_range() {
        let mut book = TariffBook::default();
        assert_eq!(
            book.create_definition(definition(
                TariffType::Simple,
                date(2025, 12, 31),
                date(2025, 1, 1),
            )),
            Err(AdminError::InvertedRange {
                valid_from: date(2025, 12, 31),
                valid_to: date(2025, 1, 1),
            }),
        );
        assert!(book.definitions.is_empty());
    }

    #[test]
    fn test_update_revalidates_and_keeps_book_intact_on_conflict() {
        let mut book = TariffBook::default();
        let first = book
            .create_definition(definition(TariffType::Simple, date(2025, 1, 1), date(2025, 12, 31)))
            .unwrap();
        let second = book
            .create_definition(definition(TariffType::Simple, date(2026, 1, 1), date(2026, 12, 31)))
            .unwrap();
        let before = book.clone();
        assert_eq!(
            book.update_definition(
                second,
                TariffPatch::builder().valid_from(date(2025, 6, 1)).build(),
            ),
            Err(AdminError::Conflict { with: first }),
        );
        assert_eq!(book, before);
    }

    #[test]
    fn test_update_applies_patch() -> Result<(), AdminError> {
        let mut book = TariffBook::default();
        let id = book.create_definition(definition(
            TariffType::Simple,
            date(2025, 1, 1),
            date(2025, 12, 31),
        ))?;
        book.update_definition(id, TariffPatch::builder().vat_rate(1.06).build())?;
        assert_eq!(book.definitions[0].definition.vat_rate, 1.06);
        // Untouched fields keep their values.
        assert_eq!(book.definitions[0].definition.loss_factor, 1.08);
        Ok(())
    }

    #[test]
    fn test_update_unknown_id() {
        let mut book = TariffBook::default();
        assert_eq!(
            book.update_definition(42, TariffPatch::default()),
            Err(AdminError::NotFound { id: 42 }),
        );
    }

    #[test]
    fn test_delete() {
        let mut book = TariffBook::default();
        let id = book
            .create_definition(definition(TariffType::Simple, date(2025, 1, 1), date(2025, 12, 31)))
            .unwrap();
        assert_eq!(book.delete_definition(id).map(|definition| definition.tariff_type), Ok(TariffType::Simple));
        assert_eq!(book.delete_definition(id), Err(AdminError::NotFound { id }));
    }

    #[test]
    fn test_list_is_ordered_and_filtered() {
        let mut book = TariffBook::default();
        book.create_definition(definition(TariffType::FourRate, date(2025, 1, 1), date(2025, 12, 31)))
            .unwrap();
        book.create_definition(definition(TariffType::Simple, date(2026, 1, 1), date(2026, 12, 31)))
            .unwrap();
        book.create_definition(definition(TariffType::Simple, date(2025, 1, 1), date(2025, 12, 31)))
            .unwrap();
        let all = book.list_definitions(None);
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].definition.tariff_type, TariffType::Simple);
        assert_eq!(all[0].definition.valid_from, date(2025, 1, 1));
        assert_eq!(all[2].definition.tariff_type, TariffType::FourRate);
        assert_eq!(book.list_definitions(Some(TariffType::Simple)).len(), 2);
    }
}
