pub mod add_form;
pub mod data_table;

pub use add_form::{form_optional, form_value, AddForm, FormField};
pub use data_table::DataTable;
