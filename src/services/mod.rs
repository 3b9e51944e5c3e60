pub mod file_processor;
pub mod series;
