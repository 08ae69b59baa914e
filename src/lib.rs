//! 福田登记表 智能填表助手
//!
//! 抽出・追記のコアは futian_common、このクレートは CLI とセッション管理。

pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod interactive;
pub mod io;
pub mod preview;
pub mod session;
pub mod store;
