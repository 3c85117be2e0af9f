use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::table::column::Column;
use crate::domain::table::compare::natural_cmp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub column_id: String,
    pub direction: SortDirection,
}

/// Transient sort, filter and search state of one table view.
///
/// A fresh value is created for every mounted view; nothing here is
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    sort: Option<SortState>,
    filters: BTreeMap<String, String>,
    search: String,
}

impl TableState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_global_search(&mut self, text: &str) {
        self.search = text.to_string();
    }

    /// Stores the trimmed filter text. Filters on columns that are not
    /// filterable are kept but never applied.
    pub fn set_column_filter(&mut self, column_id: &str, text: &str) {
        self.filters
            .insert(column_id.to_string(), text.trim().to_string());
    }

    /// Advances the sort cycle: unsorted → ascending → descending → unsorted.
    /// Selecting another column starts it at ascending and clears the previous
    /// column.
    pub fn toggle_sort(&mut self, column_id: &str) {
        self.sort = match self.sort.take() {
            Some(current) if current.column_id == column_id => match current.direction {
                SortDirection::Ascending => Some(SortState {
                    column_id: current.column_id,
                    direction: SortDirection::Descending,
                }),
                SortDirection::Descending => None,
            },
            _ => Some(SortState {
                column_id: column_id.to_string(),
                direction: SortDirection::Ascending,
            }),
        };
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn sort_direction_for(&self, column_id: &str) -> Option<SortDirection> {
        self.sort()
            .filter(|sort| sort.column_id == column_id)
            .map(|sort| sort.direction)
    }

    pub fn filter_value(&self, column_id: &str) -> &str {
        self.filters.get(column_id).map(String::as_str).unwrap_or("")
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Rows to display, in display order.
    ///
    /// Global search runs first, then every non-empty filter on a filterable
    /// column (all must match), then the active sort. The input slice is left
    /// untouched; ties keep their input order in both directions.
    pub fn visible_rows<'a, T>(&self, columns: &[Column<T>], rows: &'a [T]) -> Vec<&'a T> {
        let mut result: Vec<&T> = rows.iter().collect();

        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty() {
            result.retain(|row| {
                columns
                    .iter()
                    .any(|column| column.value(row).contains_folded(&needle))
            });
        }

        for column in columns.iter().filter(|column| column.filterable) {
            let filter = self.filter_value(&column.id).to_lowercase();
            if filter.is_empty() {
                continue;
            }
            result.retain(|row| column.value(row).contains_folded(&filter));
        }

        if let Some(sort) = &self.sort {
            if let Some(column) = columns.iter().find(|column| column.id == sort.column_id) {
                result.sort_by(|a, b| {
                    let ordering =
                        natural_cmp(&column.value(a).as_text(), &column.value(b).as_text());
                    sort.direction.apply(ordering)
                });
            }
        }

        result
    }
}
