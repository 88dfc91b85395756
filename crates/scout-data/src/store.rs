//! Feature 스냅샷 읽기 전용 조회.
//!
//! 업스트림 feature 파이프라인이 기록한 테이블에서 심볼별 최신
//! 스냅샷 한 건을 조회합니다. 이 모듈은 저장소에 어떤 쓰기도
//! 수행하지 않습니다.

use crate::error::Result;
use chrono::{DateTime, Utc};
use scout_core::FeatureSnapshot;
use serde_json::{Map, Value};
use sqlx::postgres::PgPool;
use sqlx::types::Json;
use sqlx::FromRow;
use tracing::{debug, instrument};
use uuid::Uuid;

/// feature 스냅샷 데이터베이스 레코드.
#[derive(Debug, FromRow)]
struct SnapshotRow {
    id: Uuid,
    symbol: String,
    timestamp: DateTime<Utc>,
    features: Json<Map<String, Value>>,
}

impl SnapshotRow {
    /// 도메인 타입으로 변환.
    fn into_snapshot(self) -> FeatureSnapshot {
        FeatureSnapshot {
            id: self.id,
            symbol: self.symbol,
            timestamp: self.timestamp,
            features: self.features.0,
        }
    }
}

/// feature 저장소 읽기 클라이언트.
#[derive(Clone)]
pub struct FeatureStore {
    pool: PgPool,
    table: String,
}

impl FeatureStore {
    /// 새 저장소 클라이언트 생성.
    ///
    /// 테이블 이름은 설정 단계에서 식별자로 검증된 값이어야 합니다
    /// (바인드 파라미터로 전달할 수 없어 쿼리에 직접 삽입됨).
    pub fn new(pool: PgPool, table: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
        }
    }

    /// 심볼의 최신 feature 스냅샷 조회.
    ///
    /// timestamp 내림차순 첫 번째 행을 반환하며, 스냅샷이 없는
    /// 심볼은 `None`입니다 (호출자가 경고 후 건너뜀).
    #[instrument(skip(self))]
    pub async fn latest_snapshot(&self, symbol: &str) -> Result<Option<FeatureSnapshot>> {
        let sql = format!(
            r#"
            SELECT id, symbol, timestamp, features
            FROM {}
            WHERE symbol = $1
            ORDER BY timestamp DESC
            LIMIT 1
            "#,
            self.table
        );

        let row: Option<SnapshotRow> = sqlx::query_as(&sql)
            .bind(symbol)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(ref r) = row {
            debug!(
                symbol = symbol,
                snapshot_id = %r.id,
                timestamp = %r.timestamp,
                "최신 스냅샷 조회"
            );
        }

        Ok(row.map(SnapshotRow::into_snapshot))
    }
}
