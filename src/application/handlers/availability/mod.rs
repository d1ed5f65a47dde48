//! Availability handlers: publish, list, and book slots.

mod book_slot;
mod list_open_slots;
mod publish_slots;

pub use book_slot::{BookSlotCommand, BookSlotHandler};
pub use list_open_slots::{ListOpenSlotsHandler, ListOpenSlotsQuery};
pub use publish_slots::{PublishSlotsCommand, PublishSlotsHandler, SlotDraft};
