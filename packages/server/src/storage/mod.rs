//! Storage layers for the Gearbook server.
//!
//! Two layers, both thin:
//!
//! - [`SheetStore`]: the store adapter — five operations a sheet-shaped
//!   tabular document exposes, with in-memory and Google Sheets
//!   implementations under [`stores`]
//! - [`RecordStore`]: the record operations (create/read/update/delete)
//!   built directly on an injected `Arc<dyn SheetStore>`

pub mod record_store;
pub mod sheet_store;
pub mod stores;

pub use record_store::{RecordError, RecordStore};
pub use sheet_store::SheetStore;
pub use stores::{GoogleSheetConfig, GoogleSheetStore, MemorySheetStore, ServiceAccountAuth};
