pub mod console;
pub mod csv_export;
pub mod finding;
