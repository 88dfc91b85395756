//! 파이프라인 도메인 타입.
//!
//! 업스트림 feature 파이프라인이 기록한 스냅샷과,
//! 추론 결과로 생성되는 매수 제안 레코드를 정의합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// 현재 버전의 기본 액션 라벨.
///
/// 필드 자체는 개방형 문자열이므로 추후 모델이 다중 클래스를
/// 내보내더라도 스키마 변경이 필요 없습니다.
pub const DEFAULT_ACTION: &str = "BUY";

/// 한 심볼의 특정 시점 feature 스냅샷.
///
/// 업스트림 파이프라인이 (symbol, timestamp)당 한 행으로 기록하며,
/// 이 시스템은 심볼별 최신 한 건만 읽습니다. 기록 후 불변입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSnapshot {
    /// 스냅샷 고유 식별자
    pub id: Uuid,
    /// 심볼 (예: "BTCUSDT")
    pub symbol: String,
    /// feature 계산 시점
    pub timestamp: DateTime<Utc>,
    /// feature 이름 → 값 맵 (숫자 컬럼의 상위집합)
    pub features: Map<String, Value>,
}

impl FeatureSnapshot {
    /// 이름으로 숫자 feature 값 조회.
    ///
    /// 값이 없거나 숫자가 아니면 `None`을 반환합니다.
    pub fn numeric_feature(&self, name: &str) -> Option<f64> {
        self.features.get(name).and_then(Value::as_f64)
    }
}

/// 저장소에 영속되는 매수 제안 레코드.
///
/// 중복 제거 식별자는 (symbol, prediction)이며, 파이프라인 재실행 시
/// 같은 키의 레코드는 덮어써집니다 (절대 중복 생성되지 않음).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedTrade {
    /// 심볼
    pub symbol: String,
    /// 원본 스냅샷 식별자 (추적용)
    pub buyid: String,
    /// 액션 라벨 (현재 버전은 항상 "BUY")
    pub prediction: String,
    /// 모델 신뢰도 점수 (0.0 ~ 1.0 기대, 강제하지 않음)
    pub confidence_score: f32,
}

impl SuggestedTrade {
    /// 스냅샷과 신뢰도 점수로 매수 제안 생성.
    ///
    /// `buyid`에 원본 스냅샷의 식별자를 기록합니다.
    pub fn for_snapshot(snapshot: &FeatureSnapshot, confidence_score: f32) -> Self {
        Self {
            symbol: snapshot.symbol.clone(),
            buyid: snapshot.id.to_string(),
            prediction: DEFAULT_ACTION.to_string(),
            confidence_score,
        }
    }
}
