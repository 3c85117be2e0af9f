use crate::domain::table::column::TableSpec;
use crate::domain::table::state::{SortDirection, TableState};

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderModel {
    pub id: String,
    pub label: String,
    pub sortable: bool,
    pub filterable: bool,
    pub sort: Option<SortDirection>,
    pub filter: String,
    pub style: Option<String>,
}

impl HeaderModel {
    pub fn sort_indicator(&self) -> &'static str {
        match self.sort {
            None => "↕",
            Some(SortDirection::Ascending) => "↑",
            Some(SortDirection::Descending) => "↓",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellModel {
    pub text: String,
    pub style: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowModel {
    pub key: String,
    pub cells: Vec<CellModel>,
}

/// Everything a renderer needs for one frame of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableModel {
    pub headers: Vec<HeaderModel>,
    pub rows: Vec<RowModel>,
    pub search: String,
    pub search_placeholder: Option<String>,
    pub empty_message: String,
}

impl TableModel {
    pub fn build<T>(spec: &TableSpec<T>, state: &TableState, rows: &[T]) -> Self {
        let headers = spec
            .columns
            .iter()
            .map(|column| HeaderModel {
                id: column.id.clone(),
                label: column.label.clone(),
                sortable: column.sortable,
                filterable: column.filterable,
                sort: state.sort_direction_for(&column.id),
                filter: state.filter_value(&column.id).to_string(),
                style: column.header_style.clone(),
            })
            .collect();

        let rows = state
            .visible_rows(&spec.columns, rows)
            .into_iter()
            .map(|row| RowModel {
                key: spec.row_key(row),
                cells: spec
                    .columns
                    .iter()
                    .map(|column| CellModel {
                        text: column.render(row),
                        style: column.cell_style.clone(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            headers,
            rows,
            search: state.search().to_string(),
            search_placeholder: spec.search_placeholder.clone(),
            empty_message: spec.empty_message.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::column::{CellValue, Column, EMPTY_CELL};

    struct Unit {
        tag: String,
        owner: Option<String>,
    }

    fn spec() -> TableSpec<Unit> {
        TableSpec::new(
            vec![
                Column::new("tag", "Tag", |u: &Unit| CellValue::from(&u.tag)).filterable(),
                Column::new("owner", "Owner", |u: &Unit| u.owner.clone().into()).unsortable(),
            ],
            |u| u.tag.clone(),
        )
        .searchable("Search units...")
    }

    fn units() -> Vec<Unit> {
        vec![
            Unit {
                tag: "U-10".to_string(),
                owner: Some("Ana".to_string()),
            },
            Unit {
                tag: "U-2".to_string(),
                owner: None,
            },
        ]
    }

    #[test]
    fn build_reflects_state_in_headers() {
        let mut state = TableState::new();
        state.toggle_sort("tag");
        state.set_column_filter("tag", "u-");

        let model = TableModel::build(&spec(), &state, &units());

        assert_eq!(model.headers[0].sort, Some(SortDirection::Ascending));
        assert_eq!(model.headers[0].sort_indicator(), "↑");
        assert_eq!(model.headers[0].filter, "u-");
        assert_eq!(model.headers[1].sort_indicator(), "↕");
        assert!(!model.headers[1].sortable);
    }

    #[test]
    fn build_renders_rows_in_visible_order_with_keys() {
        let mut state = TableState::new();
        state.toggle_sort("tag");

        let model = TableModel::build(&spec(), &state, &units());

        let keys: Vec<&str> = model.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["U-2", "U-10"]);
        assert_eq!(model.rows[0].cells[1].text, EMPTY_CELL);
    }

    #[test]
    fn empty_result_keeps_search_and_message() {
        let mut state = TableState::new();
        state.set_global_search("nothing matches");

        let model = TableModel::build(&spec(), &state, &units());

        assert!(model.is_empty());
        assert_eq!(model.search, "nothing matches");
        assert_eq!(model.empty_message, "No data found.");
        assert_eq!(model.search_placeholder.as_deref(), Some("Search units..."));
    }
}
