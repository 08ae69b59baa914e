//! Futian Common Library
//!
//! 貼り付けテキストからの個人情報抽出と、Excel 名簿への1行追記。
//! CLI とその他のフロントエンドで共有する。

pub mod types;
pub mod alias;
pub mod normalizer;
pub mod parser;
pub mod layout;
pub mod workbook;
pub mod template;
pub mod appender;
pub mod error;
pub mod export;
#[cfg(feature = "excel")]
pub mod import;
#[cfg(feature = "excel")]
pub mod sheet_layout;

pub use types::{Field, FieldMap, UNKNOWN_NAME};
pub use alias::resolve_label;
pub use normalizer::normalize_birth_date;
pub use parser::extract_person_info;
pub use layout::{DEFAULT_HEADERS, SEQUENCE_HEADER};
pub use workbook::{Cell, CellValue, Sheet, Workbook};
pub use template::create_blank_workbook;
pub use appender::{append_record, header_map, AppendOutcome, NO_HEADER_MESSAGE};
pub use error::{Error, Result};
#[cfg(feature = "excel")]
pub use export::save_workbook_to_buffer;
#[cfg(feature = "excel")]
pub use import::load_workbook_from_bytes;
