pub mod records;
pub mod view;
