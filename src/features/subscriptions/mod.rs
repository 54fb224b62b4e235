/// サブスクリプション機能モジュール
///
/// このモジュールは、サブスクリプション管理に関連するすべての機能を提供します：
/// - 作成リクエストのバリデーションとエンティティへの変換
/// - サブスクリプションの作成・更新（upsert）
/// - 解約（CANCELED）と失効（EXPIRED）への状態遷移
/// - IDやユーザーIDによる参照
pub mod mapper;
pub mod models;
pub mod repository;
pub mod service;
pub mod validator;


// 公開インターフェース
pub use mapper::CreateSubscriptionMapper;
pub use models::{CreateSubscriptionDto, Provider, Status, Subscription};
pub use repository::{SqliteSubscriptionRepository, SubscriptionRepository};
pub use service::SubscriptionService;
pub use validator::{
    CreateSubscriptionValidator, ValidationResult, INVALID_EXPIRATION_DATE, INVALID_NAME,
    INVALID_PROVIDER, INVALID_USER_ID,
};
