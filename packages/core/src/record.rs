//! Device record types.
//!
//! Defines [`DeviceRecord`], the one entity Gearbook manages, and
//! [`RecordColumn`], the typed selector over its searchable columns.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A device signed out to a named person.
///
/// Persisted as a sheet row `[sequence, fullname, device, barcode]`; the
/// sequence cell is dropped on read and the 1-based display index is derived
/// by the serving layer from the record's position in the read result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    /// Name of the person the device is signed out to.
    pub fullname: String,
    /// Device name.
    pub device: String,
    /// Device barcode.
    pub barcode: String,
}

impl DeviceRecord {
    /// Creates a record from its three field values.
    #[must_use]
    pub fn new(
        fullname: impl Into<String>,
        device: impl Into<String>,
        barcode: impl Into<String>,
    ) -> Self {
        Self {
            fullname: fullname.into(),
            device: device.into(),
            barcode: barcode.into(),
        }
    }

    /// Builds a record from a raw sheet row `[sequence, fullname, device, barcode]`.
    ///
    /// The leftmost (sequence) cell is skipped; missing trailing cells become
    /// empty strings so short rows never fail to materialize.
    #[must_use]
    pub fn from_row(row: &[String]) -> Self {
        let cell = |i: usize| row.get(i).cloned().unwrap_or_default();
        Self {
            fullname: cell(1),
            device: cell(2),
            barcode: cell(3),
        }
    }

    /// Returns the field cells in persisted order (fullname, device, barcode).
    ///
    /// This is the row segment written by an update; the sequence cell is
    /// deliberately absent.
    #[must_use]
    pub fn field_cells(&self) -> Vec<String> {
        vec![
            self.fullname.clone(),
            self.device.clone(),
            self.barcode.clone(),
        ]
    }

    /// Returns the value of the given column.
    #[must_use]
    pub fn column(&self, column: RecordColumn) -> &str {
        match column {
            RecordColumn::Fullname => &self.fullname,
            RecordColumn::Device => &self.device,
            RecordColumn::Barcode => &self.barcode,
        }
    }
}

/// Searchable (and displayed) record columns.
///
/// The sequence column is not addressable: it is internal to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RecordColumn {
    /// The person's name.
    Fullname,
    /// The device name.
    Device,
    /// The device barcode.
    Barcode,
}

impl RecordColumn {
    /// All columns, in display order.
    pub const ALL: [Self; 3] = [Self::Fullname, Self::Device, Self::Barcode];

    /// The column's display name as it appears in the sheet header row.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fullname => "Fullname",
            Self::Device => "Device",
            Self::Barcode => "Barcode",
        }
    }

    /// Parses an exact column name (`Fullname`, `Device`, `Barcode`).
    ///
    /// Matching is case-sensitive: an unrecognized name is how the caller
    /// learns to surface the "column not found" warning.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for RecordColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
