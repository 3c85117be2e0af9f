use std::fmt;
use std::rc::Rc;

/// Placeholder shown for a cell whose accessor yields no value.
pub const EMPTY_CELL: &str = "—";

/// The primitive a column exposes for searching, filtering and sorting.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Stringified form; `Empty` becomes `""`.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Number(value) => format_number(*value),
            CellValue::Empty => String::new(),
        }
    }

    /// Case-insensitive substring test used by search and column filters.
    /// `needle` must already be lower-cased.
    pub fn contains_folded(&self, needle: &str) -> bool {
        self.as_text().to_lowercase().contains(needle)
    }
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&String> for CellValue {
    fn from(value: &String) -> Self {
        CellValue::Text(value.clone())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<usize> for CellValue {
    fn from(value: usize) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl<V> From<Option<V>> for CellValue
where
    V: Into<CellValue>,
{
    fn from(value: Option<V>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

pub type Accessor<T> = Rc<dyn Fn(&T) -> CellValue>;
pub type CellRenderer<T> = Rc<dyn Fn(&T) -> String>;
pub type RowKey<T> = Rc<dyn Fn(&T) -> String>;

/// One column of a table: identity, label, accessor and behaviour flags.
pub struct Column<T> {
    pub id: String,
    pub label: String,
    pub sortable: bool,
    pub filterable: bool,
    pub header_style: Option<String>,
    pub cell_style: Option<String>,
    accessor: Accessor<T>,
    cell: Option<CellRenderer<T>>,
}

impl<T> Column<T> {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        accessor: impl Fn(&T) -> CellValue + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            sortable: true,
            filterable: false,
            header_style: None,
            cell_style: None,
            accessor: Rc::new(accessor),
            cell: None,
        }
    }

    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn cell(mut self, render: impl Fn(&T) -> String + 'static) -> Self {
        self.cell = Some(Rc::new(render));
        self
    }

    pub fn header_style(mut self, style: impl Into<String>) -> Self {
        self.header_style = Some(style.into());
        self
    }

    pub fn cell_style(mut self, style: impl Into<String>) -> Self {
        self.cell_style = Some(style.into());
        self
    }

    pub fn value(&self, row: &T) -> CellValue {
        (self.accessor)(row)
    }

    /// Display text for a cell: the custom renderer when present, otherwise
    /// the accessor value with [`EMPTY_CELL`] standing in for `Empty`.
    pub fn render(&self, row: &T) -> String {
        if let Some(cell) = &self.cell {
            return cell(row);
        }
        match self.value(row) {
            CellValue::Empty => EMPTY_CELL.to_string(),
            value => value.as_text(),
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            sortable: self.sortable,
            filterable: self.filterable,
            header_style: self.header_style.clone(),
            cell_style: self.cell_style.clone(),
            accessor: Rc::clone(&self.accessor),
            cell: self.cell.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .finish_non_exhaustive()
    }
}

/// Columns plus the caller-side contract needed to render a table.
///
/// The row-key function must return a distinct, stable string per row;
/// duplicate keys are a caller error and are not detected here.
pub struct TableSpec<T> {
    pub columns: Vec<Column<T>>,
    pub empty_message: String,
    pub search_placeholder: Option<String>,
    row_key: RowKey<T>,
}

impl<T> TableSpec<T> {
    pub fn new(columns: Vec<Column<T>>, row_key: impl Fn(&T) -> String + 'static) -> Self {
        Self {
            columns,
            empty_message: "No data found.".to_string(),
            search_placeholder: None,
            row_key: Rc::new(row_key),
        }
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn searchable(mut self, placeholder: impl Into<String>) -> Self {
        self.search_placeholder = Some(placeholder.into());
        self
    }

    pub fn row_key(&self, row: &T) -> String {
        (self.row_key)(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        name: Option<String>,
        count: i64,
    }

    #[test]
    fn column_defaults_to_sortable_and_unfiltered() {
        let column = Column::new("name", "Name", |item: &Item| item.name.clone().into());

        assert!(column.sortable);
        assert!(!column.filterable);
    }

    #[test]
    fn render_uses_placeholder_for_empty_values() {
        let column = Column::new("name", "Name", |item: &Item| item.name.clone().into());
        let item = Item { name: None, count: 0 };

        assert_eq!(column.render(&item), EMPTY_CELL);
        assert_eq!(column.value(&item).as_text(), "");
    }

    #[test]
    fn custom_cell_renderer_overrides_default_text() {
        let column = Column::new("count", "Count", |item: &Item| item.count.into())
            .cell(|item| format!("{} open", item.count));
        let item = Item {
            name: Some("pump".to_string()),
            count: 3,
        };

        assert_eq!(column.render(&item), "3 open");
        assert_eq!(column.value(&item), CellValue::Number(3.0));
    }

    #[test]
    fn integral_numbers_print_without_fraction() {
        assert_eq!(CellValue::from(42_i64).as_text(), "42");
        assert_eq!(CellValue::from(1.5).as_text(), "1.5");
    }

    #[test]
    fn optional_values_map_to_empty() {
        assert!(CellValue::from(None::<String>).is_empty());
        assert_eq!(
            CellValue::from(Some("x")),
            CellValue::Text("x".to_string())
        );
    }
}
