use super::models::Subscription;
use crate::shared::errors::{AppError, AppResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

/// サブスクリプションの永続化インターフェース
///
/// 一覧系の取得結果の並び順は保証しない。
pub trait SubscriptionRepository: Send + Sync {
    /// すべてのサブスクリプションを取得する
    fn find_all(&self) -> AppResult<Vec<Subscription>>;

    /// IDでサブスクリプションを取得する
    ///
    /// # 戻り値
    /// 存在する場合はSome、存在しない場合はNone
    fn find_by_id(&self, id: i64) -> AppResult<Option<Subscription>>;

    /// ユーザーIDでサブスクリプションを取得する
    fn find_by_user_id(&self, user_id: i64) -> AppResult<Vec<Subscription>>;

    /// サブスクリプションを挿入する
    ///
    /// # 戻り値
    /// IDが採番されたサブスクリプション
    fn insert(&self, subscription: Subscription) -> AppResult<Subscription>;

    /// サブスクリプションを更新する
    ///
    /// # 戻り値
    /// 該当する行が更新された場合はtrue
    fn update(&self, subscription: &Subscription) -> AppResult<bool>;

    /// サブスクリプションを削除する
    ///
    /// # 戻り値
    /// 該当する行が存在し削除された場合はtrue
    fn delete(&self, id: i64) -> AppResult<bool>;

    /// IDが未採番なら挿入し、採番済みなら更新する
    ///
    /// # 戻り値
    /// 永続化後のサブスクリプション
    fn upsert(&self, subscription: Subscription) -> AppResult<Subscription> {
        if subscription.id.is_none() {
            return self.insert(subscription);
        }

        if !self.update(&subscription)? {
            log::warn!(
                "更新対象のサブスクリプションが存在しません: id={:?}",
                subscription.id
            );
        }
        Ok(subscription)
    }
}

const SELECT_SUBSCRIPTION: &str =
    "SELECT id, user_id, name, provider, expiration_date, status FROM subscriptions";

/// SQLiteを使ったサブスクリプションリポジトリ
#[derive(Clone)]
pub struct SqliteSubscriptionRepository {
    /// データベース接続
    db_connection: Arc<Mutex<Connection>>,
}

impl SqliteSubscriptionRepository {
    /// 新しいリポジトリを作成する
    ///
    /// # 引数
    /// * `db_connection` - データベース接続
    pub fn new(db_connection: Arc<Mutex<Connection>>) -> Self {
        Self { db_connection }
    }

    fn connection(&self) -> AppResult<MutexGuard<'_, Connection>> {
        self.db_connection
            .lock()
            .map_err(|e| AppError::lock(format!("データベースロック取得失敗: {e}")))
    }
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<Subscription> {
    Ok(Subscription {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        provider: row.get(3)?,
        expiration_date: row.get(4)?,
        status: row.get(5)?,
    })
}

impl SubscriptionRepository for SqliteSubscriptionRepository {
    fn find_all(&self) -> AppResult<Vec<Subscription>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(SELECT_SUBSCRIPTION)?;
        let subscriptions = stmt
            .query_map([], map_row)?
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("サブスクリプションを{}件取得しました", subscriptions.len());
        Ok(subscriptions)
    }

    fn find_by_id(&self, id: i64) -> AppResult<Option<Subscription>> {
        let conn = self.connection()?;
        let subscription = conn
            .query_row(
                &format!("{SELECT_SUBSCRIPTION} WHERE id = ?1"),
                params![id],
                map_row,
            )
            .optional()?;

        Ok(subscription)
    }

    fn find_by_user_id(&self, user_id: i64) -> AppResult<Vec<Subscription>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(&format!("{SELECT_SUBSCRIPTION} WHERE user_id = ?1"))?;
        let subscriptions = stmt
            .query_map(params![user_id], map_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(subscriptions)
    }

    fn insert(&self, subscription: Subscription) -> AppResult<Subscription> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO subscriptions (user_id, name, provider, expiration_date, status)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                subscription.user_id,
                subscription.name,
                subscription.provider,
                subscription.expiration_date,
                subscription.status
            ],
        )?;

        let id = conn.last_insert_rowid();
        log::info!("サブスクリプションを作成しました: id={id}");

        Ok(Subscription {
            id: Some(id),
            ..subscription
        })
    }

    fn update(&self, subscription: &Subscription) -> AppResult<bool> {
        let Some(id) = subscription.id else {
            return Ok(false);
        };

        let conn = self.connection()?;
        let rows_affected = conn.execute(
            "UPDATE subscriptions
             SET user_id = ?1, name = ?2, provider = ?3, expiration_date = ?4, status = ?5
             WHERE id = ?6",
            params![
                subscription.user_id,
                subscription.name,
                subscription.provider,
                subscription.expiration_date,
                subscription.status,
                id
            ],
        )?;

        if rows_affected > 0 {
            log::info!(
                "サブスクリプションを更新しました: id={id}, status={}",
                subscription.status
            );
        }
        Ok(rows_affected > 0)
    }

    fn delete(&self, id: i64) -> AppResult<bool> {
        let conn = self.connection()?;
        let rows_affected = conn.execute("DELETE FROM subscriptions WHERE id = ?1", params![id])?;

        if rows_affected > 0 {
            log::info!("サブスクリプションを削除しました: id={id}");
        }
        Ok(rows_affected > 0)
    }
}
