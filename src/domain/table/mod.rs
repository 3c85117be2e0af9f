//! Generic sortable, filterable table engine.
//!
//! [`TableState`] owns the transient UI state of one table view and derives
//! the visible rows from a column list and a row slice. [`TableModel`] turns
//! that into plain rendered text for the UI layer.

pub mod column;
pub mod compare;
pub mod model;
pub mod state;

pub use column::{CellValue, Column, TableSpec, EMPTY_CELL};
pub use compare::natural_cmp;
pub use model::{CellModel, HeaderModel, RowModel, TableModel};
pub use state::{SortDirection, SortState, TableState};
