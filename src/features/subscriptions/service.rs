use super::mapper::CreateSubscriptionMapper;
use super::models::{CreateSubscriptionDto, Status, Subscription};
use super::repository::SubscriptionRepository;
use super::validator::CreateSubscriptionValidator;
use crate::shared::clock::Clock;
use crate::shared::errors::{AppError, AppResult};
use std::sync::Arc;

/// サブスクリプションサービス
///
/// 作成・更新（upsert）、解約、失効、参照の各操作を提供する。
/// 依存コンポーネントはすべて生成時に注入される。
#[derive(Clone)]
pub struct SubscriptionService {
    /// 永続化層
    subscription_repository: Arc<dyn SubscriptionRepository>,
    /// 作成リクエストのマッパー
    mapper: CreateSubscriptionMapper,
    /// 作成リクエストのバリデーター
    validator: CreateSubscriptionValidator,
    /// 失効時刻の取得元
    clock: Arc<dyn Clock>,
}

impl SubscriptionService {
    /// 新しいSubscriptionServiceを作成する
    ///
    /// # 引数
    /// * `subscription_repository` - 永続化層
    /// * `mapper` - 作成リクエストのマッパー
    /// * `validator` - 作成リクエストのバリデーター
    /// * `clock` - 失効処理に使う時計
    pub fn new(
        subscription_repository: Arc<dyn SubscriptionRepository>,
        mapper: CreateSubscriptionMapper,
        validator: CreateSubscriptionValidator,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            subscription_repository,
            mapper,
            validator,
            clock,
        }
    }

    /// サブスクリプションを作成または更新する
    ///
    /// # 引数
    /// * `dto` - サブスクリプション作成用DTO
    ///
    /// # 戻り値
    /// 永続化されたサブスクリプション、または失敗時はエラー
    ///
    /// # 処理内容
    /// 1. 入力を検証し、違反があれば永続化を行わずにエラー一覧を返す
    /// 2. DTOをエンティティへ変換する
    /// 3. 同じユーザー・名前・提供元の既存サブスクリプションがあればそのIDを引き継ぐ
    /// 4. 永続化層のupsertに委譲する
    pub fn upsert(&self, dto: &CreateSubscriptionDto) -> AppResult<Subscription> {
        let validation_result = self.validator.validate(dto);
        if validation_result.has_errors() {
            log::warn!(
                "サブスクリプションの入力が不正です: {:?}",
                validation_result.errors()
            );
            return Err(AppError::Validation(validation_result.into_errors()));
        }

        let mut subscription = self.mapper.map(dto)?;
        subscription.id = self
            .subscription_repository
            .find_by_user_id(subscription.user_id)?
            .into_iter()
            .find(|existing| {
                existing.name == subscription.name && existing.provider == subscription.provider
            })
            .and_then(|existing| existing.id);

        if let Some(id) = subscription.id {
            log::debug!("既存のサブスクリプションを更新します: id={id}");
        }

        self.subscription_repository.upsert(subscription)
    }

    /// サブスクリプションを解約する
    ///
    /// 現在の状態に関わらずCANCELEDに変更する。
    ///
    /// # 引数
    /// * `id` - サブスクリプションID
    ///
    /// # 戻り値
    /// 成功時はOk(())、存在しない場合はNotFound
    pub fn cancel(&self, id: i64) -> AppResult<()> {
        let mut subscription = self.load(id)?;
        subscription.status = Status::Canceled;
        self.persist(&subscription)?;

        log::info!("サブスクリプションを解約しました: id={id}");
        Ok(())
    }

    /// サブスクリプションを失効させる
    ///
    /// 注入された時計の現在時刻を有効期限として記録し、状態をEXPIREDに変更する。
    /// 有効期限が実際に過ぎているかは確認しない。
    ///
    /// # 引数
    /// * `id` - サブスクリプションID
    ///
    /// # 戻り値
    /// 成功時はOk(())、存在しない場合はNotFound
    pub fn expire(&self, id: i64) -> AppResult<()> {
        let mut subscription = self.load(id)?;
        subscription.expiration_date = self.clock.now();
        subscription.status = Status::Expired;
        self.persist(&subscription)?;

        log::info!(
            "サブスクリプションを失効させました: id={id}, expiration_date={}",
            subscription.expiration_date
        );
        Ok(())
    }

    /// IDでサブスクリプションを取得する
    pub fn find_by_id(&self, id: i64) -> AppResult<Subscription> {
        self.load(id)
    }

    /// ユーザーのサブスクリプション一覧を取得する（並び順は保証しない）
    pub fn find_by_user_id(&self, user_id: i64) -> AppResult<Vec<Subscription>> {
        self.subscription_repository.find_by_user_id(user_id)
    }

    /// すべてのサブスクリプションを取得する（並び順は保証しない）
    pub fn find_all(&self) -> AppResult<Vec<Subscription>> {
        self.subscription_repository.find_all()
    }

    /// サブスクリプションを削除する
    ///
    /// # 戻り値
    /// 削除された場合はtrue、存在しなかった場合はfalse
    pub fn delete(&self, id: i64) -> AppResult<bool> {
        self.subscription_repository.delete(id)
    }

    fn load(&self, id: i64) -> AppResult<Subscription> {
        self.subscription_repository
            .find_by_id(id)?
            .ok_or_else(|| {
                log::warn!("サブスクリプションが見つかりません: id={id}");
                AppError::not_found(format!("ID {id} のサブスクリプション"))
            })
    }

    fn persist(&self, subscription: &Subscription) -> AppResult<()> {
        if self.subscription_repository.update(subscription)? {
            return Ok(());
        }
        // 読み込み後に削除された場合
        Err(AppError::not_found(format!(
            "ID {:?} のサブスクリプション",
            subscription.id
        )))
    }
}
