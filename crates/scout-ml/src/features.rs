//! Feature reconciliation.
//!
//! 모델이 기대하는 정규 feature 목록과 배치에 실제 존재하는 숫자
//! 컬럼의 교집합을 계산하여 추론용 행렬을 구성합니다. feature
//! 파이프라인은 모델과 독립적으로 진화하므로 일부 컬럼 누락은
//! 에러가 아니며, 사용 가능한 컬럼이 하나도 없을 때만 실패합니다.

use crate::error::{MlError, MlResult};
use scout_core::FeatureSnapshot;
use tracing::debug;

/// 모델 계약상의 정규 feature 컬럼 목록.
///
/// 학습 시점에 사용된 컬럼 집합이며, 추론 시 이 목록과 스냅샷
/// 컬럼의 교집합만 사용됩니다.
const CANONICAL_FEATURES: [&str; 24] = [
    "open",
    "high",
    "low",
    "close",
    "volume",
    "quote_asset_volume",
    "number_of_trades",
    "taker_buy_base",
    "taker_buy_quote",
    "macd",
    "macd_signal",
    "macd_histogram",
    "rsi",
    "rsi_sma",
    "ema_100",
    "ema_200",
    "atr",
    "relative_volume",
    "quote_volume_ratio",
    "buy_sell_pressure",
    "ema_ratio",
    "rsi_x_relative_volume",
    "macd_histogram_x_atr",
    "buy_sell_pressure_x_ema_ratio",
];

/// 정규 feature 컬럼의 순서 있는 목록.
///
/// 생성 시 중복 이름을 제거하며 (첫 등장 순서 유지),
/// 중복 컬럼은 스코어링에 정의된 의미가 없습니다.
#[derive(Debug, Clone)]
pub struct RequiredFeatureSet {
    names: Vec<String>,
}

impl RequiredFeatureSet {
    /// 이름 목록으로 feature 집합 생성 (중복 제거).
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = Vec::new();
        for name in names {
            let name = name.into();
            if !seen.contains(&name) {
                seen.push(name);
            }
        }
        Self { names: seen }
    }

    /// 컬럼 이름 슬라이스 반환.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// 컬럼 수 반환.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// 집합이 비어있는지 확인.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for RequiredFeatureSet {
    fn default() -> Self {
        Self::new(CANONICAL_FEATURES)
    }
}

/// 추론 입력용 행 우선(row-major) feature 행렬.
///
/// 행 순서는 입력 스냅샷 순서와 동일하며, 이후 점수를 위치 인덱스로
/// 다시 연결하므로 순서가 바뀌면 안 됩니다.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    values: Vec<f32>,
    rows: usize,
    columns: Vec<String>,
}

impl FeatureMatrix {
    /// 행 수 반환.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// 열 수 반환.
    pub fn cols(&self) -> usize {
        self.columns.len()
    }

    /// 실제 사용된 컬럼 이름 반환.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// i번째 행을 슬라이스로 반환.
    pub fn row(&self, i: usize) -> &[f32] {
        let cols = self.cols();
        &self.values[i * cols..(i + 1) * cols]
    }

    /// 전체 값을 행 우선 슬라이스로 반환.
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}

/// 배치에서 사용 가능한 feature 컬럼을 선별하여 행렬 구성.
///
/// 사용 컬럼 = `required` 중 (a) 배치의 **모든** 행에 존재하고
/// (b) 유한한 숫자 값인 컬럼. 교집합이 비면
/// [`MlError::NoUsableColumns`]로 실패하며, 이는 추론 시도 전에
/// 파이프라인을 중단시킵니다.
pub fn select_features(
    batch: &[FeatureSnapshot],
    required: &RequiredFeatureSet,
) -> MlResult<FeatureMatrix> {
    if batch.is_empty() {
        return Err(MlError::InvalidInput("empty snapshot batch".to_string()));
    }

    let columns: Vec<String> = required
        .names()
        .iter()
        .filter(|name| {
            batch
                .iter()
                .all(|s| s.numeric_feature(name).is_some_and(f64::is_finite))
        })
        .cloned()
        .collect();

    if columns.is_empty() {
        return Err(MlError::NoUsableColumns);
    }

    if columns.len() < required.len() {
        debug!(
            used = columns.len(),
            required = required.len(),
            "일부 feature 컬럼이 배치에 없어 제외됨"
        );
    }

    let mut values = Vec::with_capacity(batch.len() * columns.len());
    for snapshot in batch {
        for name in &columns {
            let v = snapshot.numeric_feature(name).ok_or_else(|| {
                MlError::InvalidInput(format!(
                    "column '{}' vanished while building matrix for {}",
                    name, snapshot.symbol
                ))
            })?;
            values.push(v as f32);
        }
    }

    Ok(FeatureMatrix {
        values,
        rows: batch.len(),
        columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::{json, Map, Value};
    use uuid::Uuid;

    fn snapshot(symbol: &str, pairs: &[(&str, Value)]) -> FeatureSnapshot {
        let mut features = Map::new();
        for (name, value) in pairs {
            features.insert(name.to_string(), value.clone());
        }
        FeatureSnapshot {
            id: Uuid::new_v4(),
            symbol: symbol.to_string(),
            timestamp: Utc::now(),
            features,
        }
    }

    #[test]
    fn test_required_set_dedups_preserving_order() {
        let set = RequiredFeatureSet::new(["rsi", "close", "rsi", "atr", "close"]);
        assert_eq!(set.names(), ["rsi", "close", "atr"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_canonical_set_has_no_duplicates() {
        let set = RequiredFeatureSet::default();
        assert_eq!(set.len(), CANONICAL_FEATURES.len());
    }

    #[test]
    fn test_select_features_intersection() {
        let required = RequiredFeatureSet::new(["close", "rsi", "atr"]);
        let batch = vec![
            snapshot("BTCUSDT", &[("close", json!(1.0)), ("rsi", json!(55.0))]),
            snapshot("ETHUSDT", &[("close", json!(2.0)), ("rsi", json!(48.0))]),
        ];

        let matrix = select_features(&batch, &required).unwrap();
        // "atr"는 어느 행에도 없으므로 제외, required 순서 유지
        assert_eq!(matrix.columns(), ["close", "rsi"]);
        assert_eq!(matrix.rows(), 2);
        assert_eq!(matrix.row(0), [1.0, 55.0]);
        assert_eq!(matrix.row(1), [2.0, 48.0]);
    }

    #[test]
    fn test_select_features_column_missing_in_one_row() {
        let required = RequiredFeatureSet::new(["close", "rsi"]);
        let batch = vec![
            snapshot("BTCUSDT", &[("close", json!(1.0)), ("rsi", json!(55.0))]),
            snapshot("ETHUSDT", &[("close", json!(2.0))]),
        ];

        let matrix = select_features(&batch, &required).unwrap();
        // rsi가 한 행에만 있으므로 전체에서 제외
        assert_eq!(matrix.columns(), ["close"]);
    }

    #[test]
    fn test_select_features_rejects_non_numeric_and_nan() {
        let required = RequiredFeatureSet::new(["close", "note", "bad"]);
        let batch = vec![snapshot(
            "BTCUSDT",
            &[
                ("close", json!(1.0)),
                ("note", json!("text")),
                ("bad", Value::Null),
            ],
        )];

        let matrix = select_features(&batch, &required).unwrap();
        assert_eq!(matrix.columns(), ["close"]);
    }

    #[test]
    fn test_select_features_no_usable_columns() {
        let required = RequiredFeatureSet::new(["macd", "atr"]);
        let batch = vec![snapshot("BTCUSDT", &[("close", json!(1.0))])];

        assert!(matches!(
            select_features(&batch, &required),
            Err(MlError::NoUsableColumns)
        ));
    }

    #[test]
    fn test_select_features_empty_batch() {
        let required = RequiredFeatureSet::default();
        assert!(matches!(
            select_features(&[], &required),
            Err(MlError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_matrix_row_order_matches_batch_order() {
        let required = RequiredFeatureSet::new(["close"]);
        let batch: Vec<FeatureSnapshot> = (0..5)
            .map(|i| snapshot(&format!("SYM{}", i), &[("close", json!(i as f64))]))
            .collect();

        let matrix = select_features(&batch, &required).unwrap();
        for (i, _) in batch.iter().enumerate() {
            assert_eq!(matrix.row(i), [i as f32]);
        }
    }
}
