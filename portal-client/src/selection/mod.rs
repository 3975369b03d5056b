//! Dependent-selection form engine

mod cascade;
mod chain;
mod sources;

pub use cascade::{Cascade, FetchOutcome, OptionSource};
pub use chain::{Applied, FetchTicket, SelectionChain, SelectionLevel};
pub use sources::{GeoSource, GuestInvoiceSource, RoomBedSource};
