pub mod features;
pub mod shared;

use features::subscriptions::{
    CreateSubscriptionMapper, CreateSubscriptionValidator, SqliteSubscriptionRepository,
    SubscriptionService,
};
use rusqlite::Connection;
use shared::clock::{Clock, SystemClock};
use shared::config::{
    initialize_application, initialize_logging_system, load_environment_variables,
    log_initialization_complete, EnvironmentConfig,
};
use shared::errors::AppResult;
use std::sync::{Arc, Mutex};

/// アプリケーション状態（起動時に一度だけ組み立てたコンポーネントを保持）
pub struct AppContext {
    pub config: EnvironmentConfig,
    pub subscription_service: SubscriptionService,
}

impl AppContext {
    /// 環境変数からアプリケーションを初期化する
    ///
    /// # 処理内容
    /// 1. .envファイルの読み込み
    /// 2. ログシステムの初期化
    /// 3. データベースの初期化
    /// 4. サービスの組み立て
    pub fn initialize() -> AppResult<Self> {
        load_environment_variables();
        let config = EnvironmentConfig::from_env();
        initialize_logging_system(&config);

        log::info!("アプリケーション初期化を開始します...");

        let init_result = initialize_application(&config).map_err(|e| {
            let level: log::Level = e.severity().into();
            log::log!(level, "データベースの初期化に失敗しました: {e}");
            e
        })?;
        log_initialization_complete(&init_result);

        Ok(Self::with_connection(
            config,
            init_result.connection,
            Arc::new(SystemClock),
        ))
    }

    /// 既存の接続と時計からアプリケーション状態を組み立てる
    ///
    /// # 引数
    /// * `config` - 環境設定
    /// * `connection` - テーブル作成済みのデータベース接続
    /// * `clock` - 時計
    pub fn with_connection(
        config: EnvironmentConfig,
        connection: Connection,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let repository = SqliteSubscriptionRepository::new(Arc::new(Mutex::new(connection)));
        let subscription_service = SubscriptionService::new(
            Arc::new(repository),
            CreateSubscriptionMapper::new(),
            CreateSubscriptionValidator::new(Arc::clone(&clock)),
            clock,
        );

        Self {
            config,
            subscription_service,
        }
    }
}
