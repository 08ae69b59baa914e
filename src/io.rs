use crate::error::{FillerError, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

/// 入力テキストを読み込み（パス省略時は標準入力）
pub fn read_input_text(input: Option<&Path>) -> Result<String> {
    let text = match input {
        Some(path) => {
            if !path.exists() {
                return Err(FillerError::FileNotFound(path.display().to_string()));
            }
            std::fs::read_to_string(path)?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(text)
}

/// 新規ファイルのパス（省略時はカレントに既定名）
pub fn new_file_path(path: Option<PathBuf>, default_name: &str) -> PathBuf {
    match path {
        Some(p) if p.is_dir() => p.join(default_name),
        Some(p) if p.extension().is_none() => p.with_extension("xlsx"),
        Some(p) => p,
        None => PathBuf::from(default_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, "姓名：张三\n").unwrap();
        assert_eq!(read_input_text(Some(&path)).unwrap(), "姓名：张三\n");
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_input_text(Some(Path::new("/nonexistent/input.txt"))).unwrap_err();
        assert!(matches!(err, FillerError::FileNotFound(_)));
    }

    #[test]
    fn test_new_file_path() {
        let dir = tempdir().unwrap();
        assert_eq!(
            new_file_path(Some(dir.path().to_path_buf()), "团队统计表.xlsx"),
            dir.path().join("团队统计表.xlsx")
        );
        assert_eq!(
            new_file_path(Some(PathBuf::from("名单")), "x.xlsx"),
            PathBuf::from("名单.xlsx")
        );
        assert_eq!(new_file_path(None, "团队统计表.xlsx"), PathBuf::from("团队统计表.xlsx"));
    }
}
