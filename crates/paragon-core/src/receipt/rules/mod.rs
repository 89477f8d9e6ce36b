//! Rule-based field extractors for Polish receipts.
//!
//! Each extractor scans the preprocessed line sequence independently and
//! reports "not found" as `None`; heuristic misses never error.

pub mod amounts;
pub mod dates;
pub mod details;
pub mod names;
pub mod nip;
pub mod store;

pub use amounts::{extract_total, parse_receipt_amount};
pub use dates::extract_purchase_date;
pub use details::{DetailGroup, collect_detail_groups, locate_detail_header};
pub use names::collect_name_candidates;
pub use nip::{extract_nip, format_nip, validate_nip};
pub use store::extract_store_name;
