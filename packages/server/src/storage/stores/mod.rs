//! [`SheetStore`](crate::storage::SheetStore) implementations.
//!
//! [`MemorySheetStore`] backs tests and local development;
//! [`GoogleSheetStore`] is the production adapter over the Sheets v4 API.

pub mod google;
pub mod google_auth;
pub mod memory;

pub use google::{GoogleSheetConfig, GoogleSheetStore};
pub use google_auth::ServiceAccountAuth;
pub use memory::MemorySheetStore;
