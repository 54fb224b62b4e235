use chrono::{DateTime, Utc};

/// 現在時刻の取得元
///
/// 時刻に依存する処理（有効期限の検証・失効処理）はこのトレイト経由で時刻を取得する。
pub trait Clock: Send + Sync {
    /// 現在時刻を取得する
    fn now(&self) -> DateTime<Utc>;
}

/// システム時計（実時間）
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 常に同じ時刻を返す時計
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    /// 指定した時刻に固定された時計を作成する
    ///
    /// # 引数
    /// * `instant` - 固定する時刻
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}
