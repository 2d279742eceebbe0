pub mod purchase;
pub mod update;

pub use purchase::{Buyer, Ticket, BUYERS_TABLE, TICKETS_TABLE};
pub use update::{classify, InvoicePayload, PaymentPurchase, PreCheckoutQuery, UpdateKind};
