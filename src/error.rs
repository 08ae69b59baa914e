use thiserror::Error;

#[derive(Error, Debug)]
pub enum FillerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("找不到文件，请先创建或选择文件！({0})")]
    FileNotFound(String),

    #[error("文件已存在: {0}（如需覆盖请加 --force）")]
    FileExists(String),

    #[error("打开 Excel 失败: {0}")]
    WorkbookOpen(String),

    #[error("无法保存！请先关闭该 Excel 文件后再试。({0})")]
    SaveLocked(String),

    #[error("请先 [选择文件] 或 [新建文件]！")]
    NoWorkbook,

    #[error("文本框是空的！")]
    EmptyInput,

    #[error("处理失败: {0}")]
    AppendRejected(String),

    #[error("交互输入错误: {0}")]
    Prompt(String),

    #[error("JSON解析错误: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] futian_common::Error),
}

pub type Result<T> = std::result::Result<T, FillerError>;
