use super::environment::{Environment, EnvironmentConfig};
use crate::shared::database::initialize_database;
use crate::shared::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// アプリケーション初期化の結果を表す構造体
#[derive(Debug)]
pub struct InitializationResult {
    /// 初回起動かどうか
    pub is_first_run: bool,
    /// データベースファイルのパス
    pub database_path: PathBuf,
    /// 実行環境
    pub environment: Environment,
    /// 初期化済みのデータベース接続
    pub connection: Connection,
}

/// アプリケーションの初期化を実行する
///
/// # 引数
/// * `config` - 環境設定
///
/// # 戻り値
/// 初期化結果、または失敗時はエラー
///
/// # 処理内容
/// 1. データベースパスの検証
/// 2. 初回起動の判定（データベースファイルの有無）
/// 3. データベースファイルとテーブルの初期化
pub fn initialize_application(config: &EnvironmentConfig) -> AppResult<InitializationResult> {
    let database_path = config.database_path.clone();
    if database_path.is_dir() {
        return Err(AppError::configuration(format!(
            "データベースパスがディレクトリを指しています: {database_path:?}"
        )));
    }

    let is_first_run = !database_path.exists();

    if is_first_run {
        log_first_run_initialization(config.environment, &database_path);
    }

    let connection = initialize_database(&database_path)?;

    Ok(InitializationResult {
        is_first_run,
        database_path,
        environment: config.environment,
        connection,
    })
}

fn log_first_run_initialization(environment: Environment, database_path: &Path) {
    log::info!("=== アプリケーション初回起動 ===");
    log::info!("実行環境: {environment:?}");
    log::info!("データベースファイル: {database_path:?}");
}

/// 初期化完了ログを出力する
///
/// # 引数
/// * `result` - 初期化結果
pub fn log_initialization_complete(result: &InitializationResult) {
    if result.is_first_run {
        log::info!("初回起動の初期化が正常に完了しました");
    } else {
        log::info!("アプリケーション起動完了（既存データベースを使用）");
    }
    log::info!(
        "環境: {:?}, データベース: {:?}",
        result.environment,
        result.database_path
    );
}
