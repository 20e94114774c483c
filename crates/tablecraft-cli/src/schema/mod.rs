pub mod report;
pub mod round_file;
