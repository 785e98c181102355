//! Record operations over an injected sheet store.
//!
//! [`RecordStore`] maps create/read/update/delete onto the five
//! [`SheetStore`] operations. There is no model layer, cache, or
//! transaction boundary in between: every operation is at most one read
//! plus one write against the remote sheet.
//!
//! Identity is positional. A record is addressed by its 1-based display
//! index within the current `read` result; deleting a row permanently
//! renumbers every later record. Concurrent writers from different sessions
//! can interleave and corrupt that scheme — the store performs no locking
//! or versioning, matching the single-writer assumption of the sheet it
//! fronts.

use std::sync::Arc;

use metrics::counter;
use tracing::{debug, warn};

use gearbook_core::record::DeviceRecord;
use gearbook_core::sheet::{RowRange, SheetLayout};

use crate::storage::sheet_store::SheetStore;

/// Errors from record operations.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// Display index outside the currently valid range.
    ///
    /// Non-fatal: the operation was skipped and nothing was written. The
    /// display text is what the operator sees inline.
    #[error("Invalid row index.")]
    InvalidIndex {
        /// The index the caller supplied.
        index: i64,
        /// Highest currently valid index.
        limit: usize,
    },

    /// The sequence counter cell holds something that is not a number.
    #[error("sequence counter cell holds non-numeric content {content:?}")]
    Counter {
        /// Raw cell content.
        content: String,
    },

    /// Unrecovered store/network fault (auth, quota, connectivity).
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl RecordError {
    /// Whether this error is a non-fatal warning rather than a fault.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::InvalidIndex { .. })
    }
}

/// The record operations component.
///
/// Holds the injected store handle and the sheet geometry; construction is
/// the only wiring point (no ambient connection state).
pub struct RecordStore {
    sheet: Arc<dyn SheetStore>,
    layout: SheetLayout,
}

impl RecordStore {
    /// Creates a record store over `sheet` with the default layout.
    #[must_use]
    pub fn new(sheet: Arc<dyn SheetStore>) -> Self {
        Self::with_layout(sheet, SheetLayout::default())
    }

    /// Creates a record store with an explicit sheet layout.
    #[must_use]
    pub fn with_layout(sheet: Arc<dyn SheetStore>, layout: SheetLayout) -> Self {
        Self { sheet, layout }
    }

    /// Appends a record with the next sequence number.
    ///
    /// Reads the counter cell (absent/empty counts as 0), appends
    /// `[counter + 1, fullname, device, barcode]`, and writes the counter
    /// back. No duplicate check is performed, and the read-then-write pair
    /// is not atomic: two concurrent creators can assign the same sequence
    /// number.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Counter`] for a non-numeric counter cell and
    /// [`RecordError::Store`] for store faults.
    pub async fn create(
        &self,
        fullname: &str,
        device: &str,
        barcode: &str,
    ) -> Result<(), RecordError> {
        let sequence = self.next_sequence().await?;
        self.sheet
            .append_row(vec![
                sequence.to_string(),
                fullname.to_string(),
                device.to_string(),
                barcode.to_string(),
            ])
            .await?;
        self.sheet
            .update_range(
                RowRange::new(
                    self.layout.counter_cell.row,
                    self.layout.counter_cell.col,
                    self.layout.counter_cell.col,
                ),
                vec![sequence.to_string()],
            )
            .await?;

        counter!("gearbook_records_created_total").increment(1);
        debug!(sequence, "record appended");
        Ok(())
    }

    /// Reads all records, in sheet order.
    ///
    /// A sheet with no rows beyond the reserved region yields an empty list.
    /// The sequence column is dropped; short rows are padded with empty
    /// cells. The result is fully materialized.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Store`] for store faults.
    pub async fn read(&self) -> Result<Vec<DeviceRecord>, RecordError> {
        let rows = self.sheet.rows().await?;
        let reserved = self.layout.reserved_rows as usize;
        if rows.len() <= reserved {
            return Ok(Vec::new());
        }
        Ok(rows[reserved..]
            .iter()
            .map(|row| DeviceRecord::from_row(row))
            .collect())
    }

    /// Overwrites the field cells of the record at display `index`.
    ///
    /// Valid iff `1 <= index <= total_rows - reserved_rows`. Exactly the
    /// fullname/device/barcode cells of that row are written; the sequence
    /// column and every other row are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidIndex`] (a warning; no write happened)
    /// or [`RecordError::Store`] for store faults.
    pub async fn update(
        &self,
        index: i64,
        fullname: &str,
        device: &str,
        barcode: &str,
    ) -> Result<(), RecordError> {
        let total_rows = self.sheet.rows().await?.len();
        let limit = self.layout.data_capacity(total_rows);
        let display_index = checked_display_index(index, limit).ok_or_else(|| {
            counter!("gearbook_invalid_index_total").increment(1);
            warn!(index, limit, "update skipped: invalid row index");
            RecordError::InvalidIndex { index, limit }
        })?;

        self.sheet
            .update_range(
                self.layout.field_range(display_index),
                vec![fullname.to_string(), device.to_string(), barcode.to_string()],
            )
            .await?;

        counter!("gearbook_records_updated_total").increment(1);
        debug!(index = display_index, "record updated");
        Ok(())
    }

    /// Removes the record at display `index`.
    ///
    /// Valid iff `1 <= index <= record_count`. Every later record shifts up
    /// one position, permanently renumbering its display index.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidIndex`] (a warning; no write happened)
    /// or [`RecordError::Store`] for store faults.
    pub async fn delete(&self, index: i64) -> Result<(), RecordError> {
        let limit = self.read().await?.len();
        let display_index = checked_display_index(index, limit).ok_or_else(|| {
            counter!("gearbook_invalid_index_total").increment(1);
            warn!(index, limit, "delete skipped: invalid row index");
            RecordError::InvalidIndex { index, limit }
        })?;

        self.sheet.delete_row(self.layout.sheet_row(display_index)).await?;

        counter!("gearbook_records_deleted_total").increment(1);
        debug!(index = display_index, "record deleted");
        Ok(())
    }

    async fn next_sequence(&self) -> Result<u64, RecordError> {
        let last = match self.sheet.cell(self.layout.counter_cell).await? {
            None => 0,
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| RecordError::Counter { content: raw })?,
        };
        Ok(last + 1)
    }
}

/// Validates a 1-based display index against the current `limit`.
///
/// Returns the index as a row-arithmetic-friendly `u32`, or `None` for
/// anything non-positive or past the limit.
fn checked_display_index(index: i64, limit: usize) -> Option<u32> {
    let display = u32::try_from(index).ok()?;
    if display == 0 {
        return None;
    }
    if usize::try_from(display).ok()? <= limit {
        Some(display)
    } else {
        None
    }
}
