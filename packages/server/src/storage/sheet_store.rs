//! Store adapter trait over a sheet-shaped tabular document.
//!
//! Defines [`SheetStore`], the innermost storage layer: five operations a
//! remote sheet exposes (whole-sheet read, single-cell read, append-row,
//! range-update, row-delete). The [`RecordStore`](super::RecordStore) builds
//! the record operations directly on top of it.
//!
//! The store handle is an explicit dependency (`Arc<dyn SheetStore>`)
//! injected into whatever needs it; there is no ambient singleton.

use async_trait::async_trait;

use gearbook_core::sheet::{CellRef, RowRange};

/// A sheet-shaped tabular store.
///
/// Rows and columns are 1-based, matching A1 notation. All operations are
/// fallible: remote faults (auth, quota, connectivity) propagate to the
/// caller unrecovered — there is no retry or rollback at this layer.
///
/// Used as `Arc<dyn SheetStore>`.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Reads every cell of the sheet, row-major.
    ///
    /// The result is fully materialized. Rows may be ragged: trailing empty
    /// cells are not guaranteed to be present.
    async fn rows(&self) -> anyhow::Result<Vec<Vec<String>>>;

    /// Reads a single cell, or `None` when it is empty or out of range.
    async fn cell(&self, cell: CellRef) -> anyhow::Result<Option<String>>;

    /// Appends a row after the last non-empty row.
    async fn append_row(&self, row: Vec<String>) -> anyhow::Result<()>;

    /// Overwrites exactly the cells of the given row segment.
    ///
    /// `values` must have one entry per cell in `range`; cells outside the
    /// range are left untouched.
    async fn update_range(&self, range: RowRange, values: Vec<String>) -> anyhow::Result<()>;

    /// Removes the given 1-based sheet row. Every later row shifts up by one.
    async fn delete_row(&self, row: u32) -> anyhow::Result<()>;
}
