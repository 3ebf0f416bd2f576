//! sea-orm entities for the practice service.

pub mod appointments;
pub mod case_documents;
pub mod case_notes;
pub mod cases;
pub mod invoices;
pub mod messages;
pub mod notifications;
pub mod users;
