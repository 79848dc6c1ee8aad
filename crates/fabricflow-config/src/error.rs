use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("FABRIC_TASKS_PATH に指定されたタスクファイルがありません: {}", .0.display())]
    TaskPathMissing(PathBuf),

    #[error(
        "タスクファイルが見つかりません。以下の場所を確認してください:\n\
        - カレントディレクトリ: fabric.local.kdl, .fabric.local.kdl, fabric.kdl, .fabric.kdl\n\
        - ./.fabricflow/ ディレクトリ\n\
        - ~/.config/fabricflow/fabric.kdl\n\
        または FABRIC_TASKS_PATH 環境変数で直接指定できます"
    )]
    TaskFileNotFound,

    #[error("KDLパースエラー: {0}")]
    KdlParse(#[from] kdl::KdlError),

    #[error("ファイル読み込みエラー: {path}\n理由: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("無効なタスク '{node}': {message}")]
    InvalidTask { node: String, message: String },

    #[error("タスク '{node}': {source}")]
    Task {
        node: String,
        source: fabricflow_aci::FabricError,
    },

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid(node: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidTask {
            node: node.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
