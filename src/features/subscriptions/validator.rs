use super::models::{CreateSubscriptionDto, Provider};
use crate::shared::clock::Clock;
use crate::shared::errors::ValidationError;
use std::sync::Arc;

/// ユーザーIDが未指定
pub const INVALID_USER_ID: u16 = 100;
/// 名前が未指定または空
pub const INVALID_NAME: u16 = 101;
/// 提供元が未指定・空・未知
pub const INVALID_PROVIDER: u16 = 102;
/// 有効期限が未指定または現在時刻以前
pub const INVALID_EXPIRATION_DATE: u16 = 103;

/// バリデーション結果
///
/// エラーは検出順に保持される。空であれば入力は有効。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// エラーを追加する
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// エラーが1件以上あるか
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

/// サブスクリプション作成リクエストのバリデーター
///
/// 各ルールは独立して評価され、違反したルールごとにエラーが1件追加される。
#[derive(Clone)]
pub struct CreateSubscriptionValidator {
    clock: Arc<dyn Clock>,
}

impl CreateSubscriptionValidator {
    /// 新しいバリデーターを作成する
    ///
    /// # 引数
    /// * `clock` - 有効期限の判定に使う時計
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// 作成リクエストを検証する
    ///
    /// # 引数
    /// * `dto` - サブスクリプション作成用DTO
    ///
    /// # 戻り値
    /// バリデーション結果（有効な場合は空）
    pub fn validate(&self, dto: &CreateSubscriptionDto) -> ValidationResult {
        let mut result = ValidationResult::new();

        if dto.user_id.is_none() {
            result.add(ValidationError::of(INVALID_USER_ID, "userId is invalid"));
        }

        if dto.name.as_deref().map_or(true, str::is_empty) {
            result.add(ValidationError::of(INVALID_NAME, "name is invalid"));
        }

        // 空文字列も未知の提供元も同じコードで報告する
        if dto.provider.as_deref().and_then(Provider::parse).is_none() {
            result.add(ValidationError::of(INVALID_PROVIDER, "provider is invalid"));
        }

        let now = self.clock.now();
        if !dto.expiration_date.is_some_and(|date| date > now) {
            result.add(ValidationError::of(
                INVALID_EXPIRATION_DATE,
                "expirationDate is invalid",
            ));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::clock::FixedClock;
    use chrono::{DateTime, Duration, Utc};
    use quickcheck_macros::quickcheck;

    fn instant(value: &str) -> DateTime<Utc> {
        value.parse().unwrap()
    }

    /// 2023-09-25T10:15:30Z より前に固定したバリデーター
    fn validator() -> CreateSubscriptionValidator {
        CreateSubscriptionValidator::new(Arc::new(FixedClock::new(instant(
            "2023-01-01T00:00:00Z",
        ))))
    }

    fn valid_dto() -> CreateSubscriptionDto {
        CreateSubscriptionDto {
            user_id: Some(1),
            name: Some("name".to_string()),
            provider: Some("GOOGLE".to_string()),
            expiration_date: Some(instant("2023-09-25T10:15:30Z")),
        }
    }

    fn codes(result: &ValidationResult) -> Vec<u16> {
        result.errors().iter().map(|e| e.code).collect()
    }

    #[test]
    fn test_validate_valid_dto_returns_empty_result() {
        let result = validator().validate(&valid_dto());

        assert!(!result.has_errors());
        assert!(result.errors().is_empty());
    }

    #[test]
    fn test_validate_single_invalid_field() {
        let cases = [
            (
                CreateSubscriptionDto {
                    user_id: None,
                    ..valid_dto()
                },
                INVALID_USER_ID,
            ),
            (
                CreateSubscriptionDto {
                    name: Some(String::new()),
                    ..valid_dto()
                },
                INVALID_NAME,
            ),
            (
                CreateSubscriptionDto {
                    provider: Some(String::new()),
                    ..valid_dto()
                },
                INVALID_PROVIDER,
            ),
            (
                CreateSubscriptionDto {
                    expiration_date: None,
                    ..valid_dto()
                },
                INVALID_EXPIRATION_DATE,
            ),
        ];

        for (dto, expected) in cases {
            let result = validator().validate(&dto);
            assert_eq!(codes(&result), vec![expected], "dto: {dto:?}");
        }
    }

    #[test]
    fn test_validate_missing_name_and_provider() {
        let dto = CreateSubscriptionDto {
            name: None,
            provider: None,
            ..valid_dto()
        };

        assert_eq!(
            codes(&validator().validate(&dto)),
            vec![INVALID_NAME, INVALID_PROVIDER]
        );
    }

    #[test]
    fn test_validate_unknown_provider_uses_provider_code() {
        for provider in ["google", "SAMSUNG", " GOOGLE"] {
            let dto = CreateSubscriptionDto {
                provider: Some(provider.to_string()),
                ..valid_dto()
            };
            assert_eq!(codes(&validator().validate(&dto)), vec![INVALID_PROVIDER]);
        }
    }

    #[test]
    fn test_validate_expiration_date_before_now() {
        let validator = CreateSubscriptionValidator::new(Arc::new(FixedClock::new(instant(
            "2024-01-01T00:00:00Z",
        ))));

        let result = validator.validate(&valid_dto());

        assert_eq!(codes(&result), vec![INVALID_EXPIRATION_DATE]);
    }

    #[test]
    fn test_validate_expiration_date_equal_to_now() {
        let validator = CreateSubscriptionValidator::new(Arc::new(FixedClock::new(instant(
            "2023-09-25T10:15:30Z",
        ))));

        let result = validator.validate(&valid_dto());

        assert_eq!(codes(&result), vec![INVALID_EXPIRATION_DATE]);
    }

    #[test]
    fn test_validate_all_fields_invalid() {
        let dto = CreateSubscriptionDto {
            user_id: None,
            name: Some(String::new()),
            provider: Some(String::new()),
            expiration_date: None,
        };

        let result = validator().validate(&dto);

        assert_eq!(result.errors().len(), 4);
        let mut actual = codes(&result);
        actual.sort_unstable();
        assert_eq!(actual, vec![100, 101, 102, 103]);
    }

    #[quickcheck]
    fn prop_valid_requests_have_no_errors(
        user_id: i64,
        name: String,
        use_apple: bool,
        seconds_ahead: u32,
    ) -> bool {
        if name.is_empty() {
            return true;
        }
        let clock = FixedClock::new(instant("2023-01-01T00:00:00Z"));
        let provider = if use_apple { Provider::Apple } else { Provider::Google };
        let dto = CreateSubscriptionDto {
            user_id: Some(user_id),
            name: Some(name),
            provider: Some(provider.to_string()),
            expiration_date: Some(clock.now() + Duration::seconds(i64::from(seconds_ahead) + 1)),
        };

        !CreateSubscriptionValidator::new(Arc::new(clock))
            .validate(&dto)
            .has_errors()
    }

    #[quickcheck]
    fn prop_unknown_provider_yields_single_provider_error(provider: String) -> bool {
        if Provider::parse(&provider).is_some() {
            return true;
        }
        let dto = CreateSubscriptionDto {
            provider: Some(provider),
            ..valid_dto()
        };

        codes(&validator().validate(&dto)) == vec![INVALID_PROVIDER]
    }

    #[quickcheck]
    fn prop_past_expiration_yields_single_date_error(seconds_behind: u32) -> bool {
        let clock = FixedClock::new(instant("2030-01-01T00:00:00Z"));
        let dto = CreateSubscriptionDto {
            expiration_date: Some(clock.now() - Duration::seconds(i64::from(seconds_behind))),
            ..valid_dto()
        };

        codes(&CreateSubscriptionValidator::new(Arc::new(clock)).validate(&dto))
            == vec![INVALID_EXPIRATION_DATE]
    }
}
