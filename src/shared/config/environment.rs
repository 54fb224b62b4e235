use std::path::PathBuf;

/// データディレクトリ配下のアプリケーションディレクトリ名
const APP_DIR_NAME: &str = "subscription-manager";

/// アプリケーションの実行環境を表す列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// 開発環境
    Development,
    /// プロダクション環境
    Production,
}

/// 環境設定を管理する構造体
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    /// 実行環境
    pub environment: Environment,
    /// デバッグモードの有効/無効
    pub debug_mode: bool,
    /// ログレベル
    pub log_level: String,
    /// データベースファイルのパス
    pub database_path: PathBuf,
}

impl EnvironmentConfig {
    /// 環境変数から設定を読み込む
    ///
    /// # 戻り値
    /// 環境設定
    ///
    /// # 参照する環境変数
    /// - `LOG_LEVEL`: ログレベル（未設定時は開発環境でdebug、本番環境でinfo）
    /// - `DATABASE_PATH`: データベースファイルのパス（未設定時はデータディレクトリ配下）
    pub fn from_env() -> Self {
        let environment = get_environment();
        let debug_mode = environment == Environment::Development;
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| {
            if debug_mode {
                "debug".to_string()
            } else {
                "info".to_string()
            }
        });
        let database_path = resolve_database_path(
            std::env::var("DATABASE_PATH").ok(),
            dirs::data_dir(),
            environment,
        );

        Self {
            environment,
            debug_mode,
            log_level,
            database_path,
        }
    }

    /// プロダクション環境かどうかを判定
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// 開発環境かどうかを判定
    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// ログレベルを取得する（不明な値はInfo）
    pub fn log_level_filter(&self) -> log::LevelFilter {
        match self.log_level.to_lowercase().as_str() {
            "error" => log::LevelFilter::Error,
            "warn" => log::LevelFilter::Warn,
            "info" => log::LevelFilter::Info,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            _ => log::LevelFilter::Info,
        }
    }
}

/// 現在の実行環境を判定する
///
/// # 戻り値
/// 現在の実行環境（Development または Production）
///
/// # 判定ロジック
/// 1. コンパイル時埋め込み環境変数を最優先
/// 2. 実行時環境変数 ENVIRONMENT を確認
/// 3. デバッグビルドの場合は Development
/// 4. リリースビルドの場合は Production
pub fn get_environment() -> Environment {
    if let Some(embedded_env) = option_env!("EMBEDDED_ENVIRONMENT") {
        let env = parse_environment(embedded_env);
        log::debug!("環境判定: コンパイル時埋め込み値を使用 -> {embedded_env} -> {env:?}");
        return env;
    }

    if let Ok(env_var) = std::env::var("ENVIRONMENT") {
        let env = parse_environment(&env_var);
        log::debug!("環境判定: 実行時環境変数を使用 -> {env_var} -> {env:?}");
        return env;
    }

    let env = if cfg!(debug_assertions) {
        Environment::Development
    } else {
        Environment::Production
    };
    log::debug!(
        "環境判定: ビルド設定を使用 -> debug_assertions={} -> {env:?}",
        cfg!(debug_assertions)
    );
    env
}

fn parse_environment(value: &str) -> Environment {
    match value {
        "production" => Environment::Production,
        _ => Environment::Development,
    }
}

/// 環境に応じたデータベースファイル名を取得する
///
/// # ファイル名の規則
/// - 開発環境: "dev_subscriptions.db"
/// - プロダクション環境: "subscriptions.db"
pub fn get_database_filename(env: Environment) -> &'static str {
    match env {
        Environment::Development => "dev_subscriptions.db",
        Environment::Production => "subscriptions.db",
    }
}

/// データベースファイルのパスを決定する
///
/// # 引数
/// * `explicit_path` - 明示的に指定されたパス（`DATABASE_PATH`）
/// * `data_dir` - OSのデータディレクトリ
/// * `env` - 実行環境
///
/// # 戻り値
/// 明示指定があればそのパス、なければデータディレクトリ配下（取得できない場合はカレントディレクトリ）
pub fn resolve_database_path(
    explicit_path: Option<String>,
    data_dir: Option<PathBuf>,
    env: Environment,
) -> PathBuf {
    if let Some(path) = explicit_path.filter(|p| !p.trim().is_empty()) {
        return PathBuf::from(path);
    }

    let filename = get_database_filename(env);
    match data_dir {
        Some(dir) => dir.join(APP_DIR_NAME).join(filename),
        None => {
            log::warn!("データディレクトリを取得できないため、カレントディレクトリを使用します");
            PathBuf::from(filename)
        }
    }
}

/// 環境に応じた.envファイルを読み込む
///
/// # 処理内容
/// 1. コンパイル時埋め込み環境変数をチェック
/// 2. 環境に応じた.envファイルを読み込み
/// 3. フォールバック処理
pub fn load_environment_variables() {
    if let Some(env) = option_env!("EMBEDDED_ENVIRONMENT") {
        log::info!("コンパイル時埋め込み環境設定を使用: {env}");
        return;
    }

    let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

    let env_file = match environment.as_str() {
        "production" => ".env.production",
        _ => ".env",
    };

    log::info!("環境: {environment}, 読み込み対象: {env_file}");

    match dotenv::from_filename(env_file) {
        Ok(_) => {
            log::info!("{env_file}ファイルを読み込みました");
        }
        Err(_) => {
            if env_file != ".env" && dotenv::dotenv().is_ok() {
                log::warn!("{env_file}が見つからないため、デフォルトの.envファイルを読み込みました");
            } else {
                log::warn!("環境変数ファイルが見つかりません。直接設定された環境変数を使用します。");
            }
        }
    }
}

/// ログシステムを初期化する
///
/// 2回目以降の呼び出しは無視される。
///
/// # 引数
/// * `config` - 環境設定
pub fn initialize_logging_system(config: &EnvironmentConfig) {
    let initialized = env_logger::Builder::from_default_env()
        .filter_level(config.log_level_filter())
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false)
        .try_init();

    if initialized.is_ok() {
        log::info!(
            "ログシステムを初期化しました: level={}, environment={:?}",
            config.log_level,
            config.environment
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(environment: Environment, log_level: &str) -> EnvironmentConfig {
        EnvironmentConfig {
            environment,
            debug_mode: environment == Environment::Development,
            log_level: log_level.to_string(),
            database_path: PathBuf::from("test.db"),
        }
    }

    #[test]
    fn test_get_database_filename() {
        assert_eq!(
            get_database_filename(Environment::Development),
            "dev_subscriptions.db"
        );
        assert_eq!(
            get_database_filename(Environment::Production),
            "subscriptions.db"
        );
    }

    #[test]
    fn test_get_environment() {
        let env = get_environment();

        assert!(matches!(
            env,
            Environment::Development | Environment::Production
        ));
    }

    #[test]
    fn test_parse_environment() {
        assert_eq!(parse_environment("production"), Environment::Production);
        assert_eq!(parse_environment("development"), Environment::Development);
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn test_environment_config_methods() {
        let dev_config = config(Environment::Development, "debug");
        let prod_config = config(Environment::Production, "info");

        assert!(dev_config.is_development());
        assert!(!dev_config.is_production());
        assert!(!prod_config.is_development());
        assert!(prod_config.is_production());
    }

    #[test]
    fn test_log_level_filter() {
        assert_eq!(
            config(Environment::Development, "DEBUG").log_level_filter(),
            log::LevelFilter::Debug
        );
        assert_eq!(
            config(Environment::Production, "warn").log_level_filter(),
            log::LevelFilter::Warn
        );
        assert_eq!(
            config(Environment::Production, "verbose").log_level_filter(),
            log::LevelFilter::Info
        );
    }

    #[test]
    fn test_resolve_database_path_prefers_explicit_path() {
        let path = resolve_database_path(
            Some("/tmp/custom.db".to_string()),
            Some(PathBuf::from("/data")),
            Environment::Production,
        );

        assert_eq!(path, PathBuf::from("/tmp/custom.db"));
    }

    #[test]
    fn test_resolve_database_path_uses_data_dir() {
        let path = resolve_database_path(
            Some("  ".to_string()),
            Some(PathBuf::from("/data")),
            Environment::Development,
        );

        assert_eq!(
            path,
            PathBuf::from("/data")
                .join("subscription-manager")
                .join("dev_subscriptions.db")
        );
    }

    #[test]
    fn test_resolve_database_path_without_data_dir() {
        let path = resolve_database_path(None, None, Environment::Production);

        assert_eq!(path, PathBuf::from("subscriptions.db"));
    }

    #[test]
    fn test_environment_config_from_env() {
        let config = EnvironmentConfig::from_env();

        assert!(!config.log_level.is_empty());
        assert!(!config.database_path.as_os_str().is_empty());
    }

    #[test]
    fn test_load_environment_variables() {
        // .envファイルの有無に関わらずパニックしない
        load_environment_variables();
    }
}
