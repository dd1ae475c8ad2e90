mod file_table;

pub use file_table::load_locale_table;
