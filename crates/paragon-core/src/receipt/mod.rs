//! Receipt text parsing module.

pub mod lines;
mod parser;
pub mod profile;
pub mod rules;

pub use parser::{ParseOutcome, ReceiptParser};
pub use profile::ReceiptProfile;
