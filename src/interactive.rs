//! 対話モード
//!
//! テキストを貼り付け → 追記 → 履歴確認 → 保存 を繰り返す。

use crate::config::Config;
use crate::error::{FillerError, Result};
use crate::session::Session;
use dialoguer::{Confirm, Editor, Input, Select};
use std::path::{Path, PathBuf};

/// メニュー項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// テキストを貼り付けて追記
    Append,
    /// 末尾数件を表示
    Preview,
    /// 操作履歴を表示
    History,
    /// 履歴を消去
    ClearHistory,
    /// 上書き保存
    Save,
    /// 名前を付けて保存
    SaveAs,
    /// 終了
    Quit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 7] = [
        MenuAction::Append,
        MenuAction::Preview,
        MenuAction::History,
        MenuAction::ClearHistory,
        MenuAction::Save,
        MenuAction::SaveAs,
        MenuAction::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Append => "⚡ 粘贴文本并追加",
            MenuAction::Preview => "👀 预览最后几条",
            MenuAction::History => "📋 本次操作历史",
            MenuAction::ClearHistory => "🗑️ 清空历史记录",
            MenuAction::Save => "💾 保存",
            MenuAction::SaveAs => "📁 另存为",
            MenuAction::Quit => "退出",
        }
    }
}

fn prompt_error(e: dialoguer::Error) -> FillerError {
    FillerError::Prompt(e.to_string())
}

/// 対話モードを実行
pub fn run_interactive(session: &mut Session, config: &Config) -> Result<()> {
    println!("📝 福田登记表 智能填表助手\n");
    if session.workbook().is_none() {
        println!("⚠ 未指定文件，已创建新表格模板");
        session.create_blank(Some(&config.new_file_name));
    }
    println!("当前文件: {}\n", session.file_name());

    let labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();

    loop {
        let choice = Select::new()
            .with_prompt("请选择操作")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        match MenuAction::ALL[choice] {
            MenuAction::Append => append_from_editor(session)?,
            MenuAction::Preview => {
                if let Some(preview) = session.preview(config.preview_rows) {
                    println!("{}", preview);
                }
            }
            MenuAction::History => print_history(session),
            MenuAction::ClearHistory => {
                session.clear_history();
                println!("✔ 历史记录已清空\n");
            }
            MenuAction::Save => {
                if session.path().is_some() {
                    report_save(session.save().map(|p| p.display().to_string()));
                } else {
                    save_as(session)?;
                }
            }
            MenuAction::SaveAs => save_as(session)?,
            MenuAction::Quit => {
                let target = if session.is_dirty() && confirm_save()? {
                    Some(prompt_save_path(session)?)
                } else {
                    None
                };
                if save_before_quit(session, target.as_deref()) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn append_from_editor(session: &mut Session) -> Result<()> {
    let text = Editor::new().extension(".txt").edit("").map_err(prompt_error)?;

    let Some(text) = text else {
        println!("⚠ 已取消\n");
        return Ok(());
    };

    match session.submit(&text) {
        Ok(submission) if submission.outcome.ok => {
            println!("✔ {}", submission.outcome.message);
            if let Ok(json) = submission.info.to_json(true) {
                println!("本次解析结果预览:\n{}\n", json);
            }
        }
        Ok(submission) => println!("✘ {}\n", submission.outcome.message),
        Err(e @ (FillerError::EmptyInput | FillerError::NoWorkbook)) => println!("⚠ {}\n", e),
        Err(e) => return Err(e),
    }
    Ok(())
}

fn print_history(session: &Session) {
    let history = session.history();
    if history.is_empty() {
        println!("（暂无记录）\n");
        return;
    }
    println!("姓名 | 电话 | 职业 | 时间");
    for entry in history.iter() {
        println!(
            "{} | {} | {} | {}",
            entry.name, entry.phone, entry.occupation, entry.time
        );
    }
    println!();
}

fn confirm_save() -> Result<bool> {
    Confirm::new()
        .with_prompt("有未保存的修改，是否保存？")
        .default(true)
        .interact()
        .map_err(prompt_error)
}

fn prompt_save_path(session: &Session) -> Result<PathBuf> {
    let default = session
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| session.file_name().to_string());
    let input: String = Input::new()
        .with_prompt("保存到")
        .default(default)
        .interact_text()
        .map_err(prompt_error)?;
    Ok(PathBuf::from(input.trim()))
}

fn save_as(session: &mut Session) -> Result<()> {
    let path = prompt_save_path(session)?;
    report_save(session.save_as(&path).map(|_| path.display().to_string()));
    Ok(())
}

/// 終了前の保存
///
/// 保存先なし（保存しない選択）なら終了してよい。保存に失敗したら false を返し、
/// 追記済みの内容を持ったままメニューへ戻る。
fn save_before_quit(session: &mut Session, target: Option<&Path>) -> bool {
    let Some(path) = target else {
        return true;
    };
    let saved = session.save_as(path).map(|_| path.display().to_string());
    let ok = saved.is_ok();
    report_save(saved);
    if !ok {
        println!("⚠ 保存失败，已返回菜单（未保存的数据仍在）\n");
    }
    ok
}

/// 保存結果を表示
fn report_save(result: Result<String>) {
    match result {
        Ok(path) => println!("✔ 已保存: {}\n", path),
        Err(e) => println!("✘ {}\n", e),
    }
}
