pub mod excel_read;
pub mod summary_write;
