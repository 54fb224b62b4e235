use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 入力ルール違反を表すバリデーションエラー
///
/// 1つのルール違反につき1件生成される。`code` は違反したフィールドごとに固定。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub code: u16,
    pub message: String,
}

impl ValidationError {
    /// バリデーションエラーを作成する
    ///
    /// # 引数
    /// * `code` - エラーコード
    /// * `message` - エラーメッセージ
    pub fn of<S: Into<String>>(code: u16, message: S) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// アプリケーション全体で使用される統一エラー型
#[derive(Debug, Error)]
pub enum AppError {
    /// データベース関連のエラー（永続化層のエラーをそのまま保持する）
    #[error("データベースエラー: {0}")]
    Database(#[from] rusqlite::Error),

    /// バリデーション関連のエラー（検出順に並んだエラー一覧）
    #[error("バリデーションエラー: {}", join_validation_errors(.0))]
    Validation(Vec<ValidationError>),

    /// リソースが見つからない場合のエラー
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// データベース接続のロック取得に失敗した場合のエラー
    #[error("ロックエラー: {0}")]
    Lock(String),

    /// 設定関連のエラー
    #[error("設定エラー: {0}")]
    Configuration(String),

    /// I/O関連のエラー
    #[error("I/Oエラー: {0}")]
    Io(#[from] std::io::Error),
}

/// エラーの重要度を表す列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    /// 低重要度（ユーザー入力エラーなど）
    Low,
    /// 中重要度（ファイル操作エラーなど）
    Medium,
    /// 高重要度（データベースエラーなど）
    High,
}

/// 重要度に応じたログレベル
impl From<ErrorSeverity> for log::Level {
    fn from(severity: ErrorSeverity) -> Self {
        match severity {
            ErrorSeverity::Low => log::Level::Info,
            ErrorSeverity::Medium => log::Level::Warn,
            ErrorSeverity::High => log::Level::Error,
        }
    }
}

fn join_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl AppError {
    /// ユーザーに表示するためのフレンドリーなメッセージを取得
    ///
    /// # 戻り値
    /// ユーザーに表示可能なエラーメッセージ
    pub fn user_message(&self) -> String {
        match self {
            AppError::Database(_) => "データベース操作でエラーが発生しました".to_string(),
            AppError::Validation(errors) => join_validation_errors(errors),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Lock(_) => "データベース接続の取得でエラーが発生しました".to_string(),
            AppError::Configuration(_) => "設定エラーが発生しました".to_string(),
            AppError::Io(_) => "ファイル操作でエラーが発生しました".to_string(),
        }
    }

    /// エラーの重要度を取得
    ///
    /// # 戻り値
    /// エラーの重要度レベル
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Database(_) => ErrorSeverity::High,
            AppError::Validation(_) => ErrorSeverity::Low,
            AppError::NotFound(_) => ErrorSeverity::Low,
            AppError::Lock(_) => ErrorSeverity::High,
            AppError::Configuration(_) => ErrorSeverity::High,
            AppError::Io(_) => ErrorSeverity::Medium,
        }
    }

    /// バリデーションエラーの一覧を取得する
    ///
    /// # 戻り値
    /// バリデーションエラーの場合はエラー一覧、それ以外はNone
    pub fn validation_errors(&self) -> Option<&[ValidationError]> {
        match self {
            AppError::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// リソース未発見エラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `resource` - 見つからなかったリソース名
    ///
    /// # 戻り値
    /// リソース未発見エラー
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        AppError::NotFound(format!("{}が見つかりません", resource.into()))
    }

    /// 設定エラーを作成するヘルパー関数
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// ロックエラーを作成するヘルパー関数
    pub fn lock<S: Into<String>>(message: S) -> Self {
        AppError::Lock(message.into())
    }
}

/// AppErrorからStringへの変換（呼び出し側での表示用）
impl From<AppError> for String {
    fn from(error: AppError) -> Self {
        error.user_message()
    }
}

/// Result型のエイリアス（アプリケーション全体で使用）
pub type AppResult<T> = Result<T, AppError>;
