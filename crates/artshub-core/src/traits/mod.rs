//! Abstract traits implemented by collaborator integrations.

pub mod payment;

pub use payment::{PaymentGateway, PaymentRequestOutcome};
