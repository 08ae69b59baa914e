use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "futian-fill")]
#[command(about = "福田登记表 智能填表助手：从粘贴文本提取信息并追加到 Excel", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 输出详细日志
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 新建带标准表头的 Excel 文件
    New {
        /// 输出路径（默认: 当前目录/团队统计表.xlsx）
        path: Option<PathBuf>,

        /// 覆盖已存在的文件
        #[arg(short, long)]
        force: bool,
    },

    /// 只解析文本，输出 JSON
    Extract {
        /// 文本文件（省略时读取标准输入）
        input: Option<PathBuf>,

        /// 单行 JSON
        #[arg(long)]
        compact: bool,
    },

    /// 解析文本并追加到 Excel
    Append {
        /// 文本文件（省略时读取标准输入）
        input: Option<PathBuf>,

        /// 目标 Excel 文件（默认: 配置或 FUTIAN_WORKBOOK）
        #[arg(short, long)]
        workbook: Option<PathBuf>,

        /// 另存为（省略时覆盖原文件）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 文件不存在时先用模板新建
        #[arg(long)]
        create: bool,
    },

    /// 预览 Excel 最后几条数据
    Preview {
        /// Excel 文件（默认: 配置或 FUTIAN_WORKBOOK）
        workbook: Option<PathBuf>,

        /// 显示条数
        #[arg(short, long)]
        rows: Option<usize>,
    },

    /// 交互模式（粘贴 → 追加 → 保存）
    Interactive {
        /// Excel 文件（省略时新建模板）
        workbook: Option<PathBuf>,
    },

    /// 显示/修改配置
    Config {
        /// 设置默认 Excel 文件
        #[arg(long)]
        set_default_workbook: Option<PathBuf>,

        /// 设置预览条数
        #[arg(long)]
        set_preview_rows: Option<usize>,

        /// 显示配置
        #[arg(long)]
        show: bool,
    },
}
