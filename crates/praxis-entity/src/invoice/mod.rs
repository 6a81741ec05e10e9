//! Invoice entity.

pub mod model;
pub mod status;

pub use model::Invoice;
pub use status::InvoiceStatus;
