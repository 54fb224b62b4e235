use super::models::{CreateSubscriptionDto, Provider, Status, Subscription};
use super::validator::{
    INVALID_EXPIRATION_DATE, INVALID_NAME, INVALID_PROVIDER, INVALID_USER_ID,
};
use crate::shared::errors::{AppError, AppResult, ValidationError};

/// 作成リクエストをサブスクリプションへ変換するマッパー
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateSubscriptionMapper;

impl CreateSubscriptionMapper {
    pub fn new() -> Self {
        Self
    }

    /// 検証済みの作成リクエストをサブスクリプションへ変換する
    ///
    /// IDは未採番、状態は常にACTIVEとなる。入力の再検証は行わないが、
    /// 未検証の入力で必須フィールドが欠けている場合は該当コードのエラーを返す。
    ///
    /// # 引数
    /// * `dto` - バリデーション済みのサブスクリプション作成用DTO
    ///
    /// # 戻り値
    /// 永続化前のサブスクリプション
    pub fn map(&self, dto: &CreateSubscriptionDto) -> AppResult<Subscription> {
        Ok(Subscription {
            id: None,
            user_id: dto.user_id.ok_or_else(|| missing(INVALID_USER_ID, "userId"))?,
            name: dto
                .name
                .clone()
                .ok_or_else(|| missing(INVALID_NAME, "name"))?,
            provider: dto
                .provider
                .as_deref()
                .and_then(Provider::parse)
                .ok_or_else(|| missing(INVALID_PROVIDER, "provider"))?,
            expiration_date: dto
                .expiration_date
                .ok_or_else(|| missing(INVALID_EXPIRATION_DATE, "expirationDate"))?,
            status: Status::Active,
        })
    }
}

fn missing(code: u16, field: &str) -> AppError {
    AppError::Validation(vec![ValidationError::of(code, format!("{field} is invalid"))])
}
