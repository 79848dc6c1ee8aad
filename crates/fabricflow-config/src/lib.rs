pub mod error;
pub mod settings;
pub mod task;

pub use error::*;
pub use settings::ControllerSettings;
pub use task::{TaskFile, load_task_file, parse_task_file};

use std::path::{Path, PathBuf};

/// タスクファイル名の候補（優先順）
const TASK_FILE_NAMES: [&str; 4] = [
    "fabric.local.kdl",
    ".fabric.local.kdl",
    "fabric.kdl",
    ".fabric.kdl",
];

/// プロジェクトのタスクファイルを探す
///
/// 以下の優先順位で検索:
/// 1. 環境変数 FABRIC_TASKS_PATH (直接パス指定、存在しなければエラー)
/// 2. カレントディレクトリ、次に ./.fabricflow/ 内の候補ファイル
/// 3. ~/.config/fabricflow/fabric.kdl (グローバル設定)
pub fn find_task_file() -> Result<PathBuf> {
    if let Some(tasks_path) = std::env::var_os("FABRIC_TASKS_PATH") {
        let path = PathBuf::from(tasks_path);
        return if path.is_file() {
            Ok(path)
        } else {
            Err(ConfigError::TaskPathMissing(path))
        };
    }

    let current_dir = std::env::current_dir()?;
    let global = dirs::config_dir().map(|dir| dir.join("fabricflow").join("fabric.kdl"));
    find_task_file_from(&current_dir, global.as_deref())
}

/// `dir` とその `.fabricflow/` から候補を探し、なければ `global` を使う
pub fn find_task_file_from(dir: &Path, global: Option<&Path>) -> Result<PathBuf> {
    let found = [dir.to_path_buf(), dir.join(".fabricflow")]
        .iter()
        .flat_map(|base| TASK_FILE_NAMES.iter().map(move |name| base.join(name)))
        .chain(global.map(Path::to_path_buf))
        .find(|path| path.is_file());

    match found {
        Some(path) => {
            tracing::debug!("タスクファイル: {}", path.display());
            Ok(path)
        }
        None => Err(ConfigError::TaskFileNotFound),
    }
}
