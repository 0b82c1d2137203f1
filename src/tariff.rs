pub mod admin;
pub mod book;
pub mod definition;
pub mod grid_access;
pub mod seed;

pub use self::{
    admin::{AdminError, TariffPatch},
    book::{Lookup, ResolvedSlot, StoredDefinition, TariffBook},
    definition::{TariffDefinition, TariffType},
    grid_access::{GridAccessCost, SlotName, VoltageLevel, find_slot},
};
