//! エクスポート機能

#[cfg(feature = "excel")]
pub mod excel_core;

#[cfg(feature = "excel")]
pub use excel_core::save_workbook_to_buffer;
