//! Gearbook Core — device records, sheet addressing, search, and wire payloads.

pub mod messages;
pub mod record;
pub mod search;
pub mod sheet;

pub use record::{DeviceRecord, RecordColumn};
pub use search::{matches, search, search_by_name, SearchError};
pub use sheet::{CellRef, RowRange, SheetLayout};
