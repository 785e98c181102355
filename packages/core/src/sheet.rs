//! Sheet geometry and A1-notation addressing.
//!
//! The backing table is sheet-shaped: the first rows are a reserved
//! title/header region and data rows follow. [`SheetLayout`] captures that
//! geometry and the display-index arithmetic; [`CellRef`] and [`RowRange`]
//! are the A1-notation addresses the store adapter speaks.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Error from parsing an A1-notation cell address.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// The input is not of the form `<letters><row>` with a positive row.
    #[error("invalid cell address '{0}'")]
    Malformed(String),
}

/// A single cell address. Column and row are both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    /// 1-based column number (`A` = 1).
    pub col: u32,
    /// 1-based row number.
    pub row: u32,
}

impl CellRef {
    /// Creates a cell reference from 1-based column and row numbers.
    #[must_use]
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// Parses an A1-notation address such as `A1` or `D12`.
    ///
    /// Lowercase column letters are accepted and normalized. Row numbers
    /// start at 1; `B0` is malformed.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::Malformed`] when the input does not match
    /// `<letters><digits>` or names row 0.
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        let caps = cell_pattern()
            .captures(input)
            .ok_or_else(|| AddressError::Malformed(input.to_string()))?;

        let col = column_number(&caps[1].to_ascii_uppercase());
        let row: u32 = caps[2]
            .parse()
            .map_err(|_| AddressError::Malformed(input.to_string()))?;
        if row == 0 {
            return Err(AddressError::Malformed(input.to_string()));
        }

        Ok(Self { col, row })
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.col), self.row)
    }
}

/// A contiguous segment of cells within a single row, e.g. `B5:D5`.
///
/// This is the address shape of a record-field update: one row, a fixed
/// column span, and never the sequence column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    /// 1-based sheet row.
    pub row: u32,
    /// 1-based first column of the segment.
    pub first_col: u32,
    /// 1-based last column of the segment (inclusive).
    pub last_col: u32,
}

impl RowRange {
    /// Creates a row segment spanning `first_col..=last_col` of `row`.
    #[must_use]
    pub const fn new(row: u32, first_col: u32, last_col: u32) -> Self {
        Self {
            row,
            first_col,
            last_col,
        }
    }

    /// Number of cells in the segment.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.last_col - self.first_col + 1
    }
}

impl fmt::Display for RowRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}:{}{}",
            column_letters(self.first_col),
            self.row,
            column_letters(self.last_col),
            self.row
        )
    }
}

/// Geometry of the backing sheet.
///
/// The default matches the production document: three reserved rows
/// (title/spacer plus a header row in row 3), the sequence counter in `A1`,
/// data rows from sheet row 4, sequence numbers in column `A`, and record
/// fields in columns `B..=D`.
#[derive(Debug, Clone)]
pub struct SheetLayout {
    /// Rows reserved for the title/header region; data starts below them.
    pub reserved_rows: u32,
    /// Cell holding the last assigned sequence number.
    pub counter_cell: CellRef,
    /// First column of the record fields (fullname).
    pub first_field_col: u32,
    /// Last column of the record fields (barcode), inclusive.
    pub last_field_col: u32,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            reserved_rows: 3,
            counter_cell: CellRef::new(1, 1),
            first_field_col: 2,
            last_field_col: 4,
        }
    }
}

impl SheetLayout {
    /// The 1-based sheet row holding the data row at 1-based display `index`.
    #[must_use]
    pub const fn sheet_row(&self, index: u32) -> u32 {
        self.reserved_rows + index
    }

    /// The range covering exactly the record-field cells of display `index`.
    ///
    /// The sequence column is outside the range; an update through it can
    /// never touch a record's sequence number.
    #[must_use]
    pub const fn field_range(&self, index: u32) -> RowRange {
        RowRange::new(
            self.sheet_row(index),
            self.first_field_col,
            self.last_field_col,
        )
    }

    /// Number of data rows a sheet with `total_rows` rows can address.
    #[must_use]
    pub fn data_capacity(&self, total_rows: usize) -> usize {
        total_rows.saturating_sub(self.reserved_rows as usize)
    }
}

fn cell_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([A-Za-z]+)([0-9]+)$").expect("valid cell pattern"))
}

/// Converts a 1-based column number to its letter form (`1` -> `A`, `27` -> `AA`).
fn column_letters(mut col: u32) -> String {
    debug_assert!(col >= 1, "columns are 1-based");
    let mut letters = Vec::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        letters.push(char::from(b'A' + u8::try_from(rem).unwrap_or(0)));
        col = (col - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Converts an uppercase letter run to its 1-based column number.
fn column_number(letters: &str) -> u32 {
    letters
        .bytes()
        .fold(0, |acc, b| acc * 26 + u32::from(b - b'A' + 1))
}
