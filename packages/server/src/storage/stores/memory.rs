//! In-memory [`SheetStore`] implementation.
//!
//! Rows live behind a [`parking_lot::RwLock`]; ordering and 1-based
//! addressing match the remote sheet exactly, so the record operations can
//! be tested against it without a network. Also the backend for local
//! development runs.

use parking_lot::RwLock;

use gearbook_core::record::RecordColumn;
use gearbook_core::sheet::{CellRef, RowRange, SheetLayout};

use crate::storage::sheet_store::SheetStore;

/// In-memory sheet with the same positional semantics as the remote store.
///
/// Each operation takes the lock once; cross-operation interleavings are as
/// unsynchronized as they are against the real sheet.
pub struct MemorySheetStore {
    rows: RwLock<Vec<Vec<String>>>,
}

impl MemorySheetStore {
    /// Creates an empty sheet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }

    /// Creates a sheet pre-populated with the given rows.
    #[must_use]
    pub fn with_rows(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    /// Creates a sheet carrying the reserved title/header region of `layout`.
    ///
    /// The counter cell starts empty and the last reserved row holds the
    /// column header names, mirroring a freshly provisioned production
    /// document with no data rows yet.
    #[must_use]
    pub fn seeded(layout: &SheetLayout) -> Self {
        let mut rows: Vec<Vec<String>> = Vec::new();
        for _ in 0..layout.reserved_rows {
            rows.push(Vec::new());
        }
        if let Some(header) = rows.last_mut() {
            header.resize(layout.last_field_col as usize, String::new());
            header[0] = "No".to_string();
            for (offset, column) in RecordColumn::ALL.iter().enumerate() {
                header[layout.first_field_col as usize - 1 + offset] = column.as_str().to_string();
            }
        }
        Self::with_rows(rows)
    }

    /// Number of rows currently in the sheet.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.read().len()
    }
}

impl Default for MemorySheetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SheetStore for MemorySheetStore {
    async fn rows(&self) -> anyhow::Result<Vec<Vec<String>>> {
        Ok(self.rows.read().clone())
    }

    async fn cell(&self, cell: CellRef) -> anyhow::Result<Option<String>> {
        let rows = self.rows.read();
        let value = rows
            .get(cell.row as usize - 1)
            .and_then(|row| row.get(cell.col as usize - 1))
            .filter(|value| !value.is_empty())
            .cloned();
        Ok(value)
    }

    async fn append_row(&self, row: Vec<String>) -> anyhow::Result<()> {
        self.rows.write().push(row);
        Ok(())
    }

    async fn update_range(&self, range: RowRange, values: Vec<String>) -> anyhow::Result<()> {
        if values.len() != range.width() as usize {
            anyhow::bail!(
                "range {range} covers {} cells but {} values were given",
                range.width(),
                values.len(),
            );
        }

        let mut rows = self.rows.write();
        let row_idx = range.row as usize - 1;
        // Writing past the current extent grows the sheet, as the remote
        // store does.
        if rows.len() <= row_idx {
            rows.resize(row_idx + 1, Vec::new());
        }
        let row = &mut rows[row_idx];
        if row.len() < range.last_col as usize {
            row.resize(range.last_col as usize, String::new());
        }
        for (offset, value) in values.into_iter().enumerate() {
            row[range.first_col as usize - 1 + offset] = value;
        }
        Ok(())
    }

    async fn delete_row(&self, row: u32) -> anyhow::Result<()> {
        let mut rows = self.rows.write();
        if row == 0 || row as usize > rows.len() {
            anyhow::bail!("row {row} out of range (sheet has {} rows)", rows.len());
        }
        rows.remove(row as usize - 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn rows_returns_materialized_copy() {
        let store = MemorySheetStore::with_rows(vec![row(&["a", "b"]), row(&["c"])]);
        let rows = store.rows().await.expect("rows");
        assert_eq!(rows, vec![row(&["a", "b"]), row(&["c"])]);
    }

    #[tokio::test]
    async fn cell_reads_one_based_addresses() {
        let store = MemorySheetStore::with_rows(vec![row(&["5"]), row(&["x", "y"])]);

        let cell = store.cell(CellRef::new(1, 1)).await.expect("cell");
        assert_eq!(cell.as_deref(), Some("5"));

        let cell = store.cell(CellRef::new(2, 2)).await.expect("cell");
        assert_eq!(cell.as_deref(), Some("y"));
    }

    #[tokio::test]
    async fn cell_empty_or_out_of_range_is_none() {
        let store = MemorySheetStore::with_rows(vec![row(&["", "b"])]);

        assert!(store.cell(CellRef::new(1, 1)).await.expect("cell").is_none());
        assert!(store.cell(CellRef::new(3, 1)).await.expect("cell").is_none());
        assert!(store.cell(CellRef::new(1, 9)).await.expect("cell").is_none());
    }

    #[tokio::test]
    async fn append_row_adds_to_the_end() {
        let store = MemorySheetStore::new();
        store.append_row(row(&["1", "Ann"])).await.expect("append");
        store.append_row(row(&["2", "Bo"])).await.expect("append");

        let rows = store.rows().await.expect("rows");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], row(&["2", "Bo"]));
    }

    #[tokio::test]
    async fn update_range_overwrites_only_the_segment() {
        let store = MemorySheetStore::with_rows(vec![
            row(&["1", "Ann", "Laptop", "B001"]),
            row(&["2", "Bo", "Phone", "B002"]),
        ]);

        store
            .update_range(RowRange::new(2, 2, 4), row(&["Bo", "Tablet", "B009"]))
            .await
            .expect("update");

        let rows = store.rows().await.expect("rows");
        assert_eq!(rows[0], row(&["1", "Ann", "Laptop", "B001"]));
        assert_eq!(rows[1], row(&["2", "Bo", "Tablet", "B009"]));
    }

    #[tokio::test]
    async fn update_range_grows_short_rows() {
        let store = MemorySheetStore::with_rows(vec![row(&["1"])]);

        store
            .update_range(RowRange::new(1, 2, 4), row(&["Ann", "Laptop", "B001"]))
            .await
            .expect("update");

        let rows = store.rows().await.expect("rows");
        assert_eq!(rows[0], row(&["1", "Ann", "Laptop", "B001"]));
    }

    #[tokio::test]
    async fn update_range_rejects_width_mismatch() {
        let store = MemorySheetStore::new();
        let result = store
            .update_range(RowRange::new(1, 2, 4), row(&["only-one"]))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn delete_row_shifts_later_rows_up() {
        let store = MemorySheetStore::with_rows(vec![row(&["a"]), row(&["b"]), row(&["c"])]);

        store.delete_row(2).await.expect("delete");

        let rows = store.rows().await.expect("rows");
        assert_eq!(rows, vec![row(&["a"]), row(&["c"])]);
    }

    #[tokio::test]
    async fn delete_row_out_of_range_is_an_error() {
        let store = MemorySheetStore::with_rows(vec![row(&["a"])]);
        assert!(store.delete_row(0).await.is_err());
        assert!(store.delete_row(2).await.is_err());
    }

    #[tokio::test]
    async fn seeded_sheet_has_reserved_region_and_header() {
        let layout = SheetLayout::default();
        let store = MemorySheetStore::seeded(&layout);
        assert_eq!(store.row_count(), 3);

        // Counter cell starts empty.
        assert!(store
            .cell(layout.counter_cell)
            .await
            .expect("cell")
            .is_none());

        let rows = store.rows().await.expect("rows");
        assert_eq!(rows[2], row(&["No", "Fullname", "Device", "Barcode"]));
    }
}
