//! Data module - upload decoding and table cleaning

mod loader;
mod processor;

pub use loader::{column_names, DataLoader, UploadedFile};
pub use processor::{is_numeric_dtype, DataProcessor};
