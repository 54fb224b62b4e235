use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// サブスクリプションの提供元ストア
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Provider {
    Google,
    Apple,
}

impl Provider {
    /// 既知のすべての提供元
    pub const ALL: [Provider; 2] = [Provider::Google, Provider::Apple];

    /// 文字列から提供元を解析する（大文字小文字を区別する）
    ///
    /// # 引数
    /// * `value` - 提供元名（"GOOGLE" など）
    ///
    /// # 戻り値
    /// 既知の提供元であればSome、未知の値・空文字列はNone
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|provider| provider.as_str() == value)
    }

    /// 提供元名を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Google => "GOOGLE",
            Provider::Apple => "APPLE",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for Provider {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Provider {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        Provider::parse(text)
            .ok_or_else(|| FromSqlError::Other(format!("未知の提供元です: {text}").into()))
    }
}

/// サブスクリプションの状態
///
/// ACTIVE から CANCELED または EXPIRED へ遷移する。CANCELED と EXPIRED は終端状態。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Active,
    Canceled,
    Expired,
}

impl Status {
    /// 既知のすべての状態
    pub const ALL: [Status; 3] = [Status::Active, Status::Canceled, Status::Expired];

    /// 文字列から状態を解析する（大文字小文字を区別する）
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }

    /// 状態名を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "ACTIVE",
            Status::Canceled => "CANCELED",
            Status::Expired => "EXPIRED",
        }
    }

    /// 終端状態かどうか
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Canceled | Status::Expired)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for Status {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Status {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        Status::parse(text)
            .ok_or_else(|| FromSqlError::Other(format!("未知の状態です: {text}").into()))
    }
}

/// サブスクリプションデータモデル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: Option<i64>,                 // 永続化前はNone、挿入時に採番される
    pub user_id: i64,                    // 所有ユーザーID
    pub name: String,                    // サブスクリプション名（空文字不可）
    pub provider: Provider,              // 提供元ストア
    pub expiration_date: DateTime<Utc>,  // 有効期限（UTC）
    pub status: Status,                  // 状態
}

/// サブスクリプション作成用DTO
///
/// 検証前の入力をそのまま保持するため、すべてのフィールドが省略可能。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionDto {
    pub user_id: Option<i64>,
    pub name: Option<String>,
    pub provider: Option<String>,
    pub expiration_date: Option<DateTime<Utc>>,
}
