//! 파이프라인 오케스트레이션.
//!
//! 단일 패스, 재시도 없음:
//! 설정 검증 → 코인 로드 → 스냅샷 조회 → reconciliation → 스코어링
//! → 영속화. 스코어링 이전의 실패는 쓰기 없이 전체를 중단시키고
//! (저장소 무변화), 영속화 단계는 레코드 단위로 격리됩니다.
//! 모든 심볼이 필터링되어 저장 레코드가 0건이어도 정상 종료입니다.

use crate::error::{PipelineError, Result};
use crate::stats::RunStats;
use scout_core::{load_coins, FeatureSnapshot, PipelineConfig, SuggestedTrade};
use scout_data::{FeatureStore, SuggestedTradeWriter};
use scout_ml::{select_features, OnnxPredictor, RequiredFeatureSet, ScorePredictor};
use sqlx::postgres::PgPool;
use std::time::Instant;
use tracing::{info, warn};

/// 스냅샷 배치를 스코어링하여 매수 제안으로 변환.
///
/// reconciliation과 배치 추론을 묶은 순수 스코어링 단계로,
/// 저장소나 실제 모델 파일 없이도 단위 테스트할 수 있습니다.
/// 점수는 입력 행 순서 그대로 반환된다는 predictor 계약에 따라
/// 위치 인덱스로 스냅샷에 다시 연결됩니다. 유한하지 않은 점수
/// (NaN/무한대)의 행은 경고 후 제외되어 저장되지 않습니다.
///
/// 성공 시 (제안 목록, 사용된 컬럼 수)를 반환합니다.
pub fn score_snapshots<P: ScorePredictor>(
    batch: &[FeatureSnapshot],
    required: &RequiredFeatureSet,
    predictor: &mut P,
) -> Result<(Vec<SuggestedTrade>, usize)> {
    let matrix = select_features(batch, required)?;
    let scores = predictor.predict_batch(&matrix)?;

    if scores.len() != batch.len() {
        return Err(PipelineError::ScoreMismatch {
            rows: batch.len(),
            scores: scores.len(),
        });
    }

    let mut trades = Vec::with_capacity(batch.len());
    for (snapshot, score) in batch.iter().zip(scores) {
        if !score.is_finite() {
            warn!(symbol = %snapshot.symbol, score = score, "유효하지 않은 신뢰도 점수, 건너뜀");
            continue;
        }
        trades.push(SuggestedTrade::for_snapshot(snapshot, score));
    }

    Ok((trades, matrix.cols()))
}

/// 파이프라인 전체 실행.
///
/// 자체 연결 풀을 생성하고 종료 시 닫습니다.
pub async fn run_pipeline(config: &PipelineConfig) -> Result<RunStats> {
    let pool = PgPool::connect(&config.database_url)
        .await
        .map_err(|e| PipelineError::StoreConnection(e.to_string()))?;
    info!("데이터베이스 연결 성공");

    let result = run_with_pool(&pool, config).await;
    pool.close().await;
    result
}

/// 기존 연결 풀로 파이프라인 실행.
pub async fn run_with_pool(pool: &PgPool, config: &PipelineConfig) -> Result<RunStats> {
    let start = Instant::now();
    let mut stats = RunStats::new();

    // 1. 코인 목록 로드 (빈 목록 / 배열 아님은 중단)
    let coins = load_coins(&config.coins_file)?;
    stats.symbols = coins.len();
    info!(coins = coins.len(), "코인 목록 로드 완료");

    // 2. 심볼별 최신 스냅샷 조회 (순차, 스냅샷 없는 심볼은 건너뜀)
    let store = FeatureStore::new(pool.clone(), &config.features_table);
    let mut batch: Vec<FeatureSnapshot> = Vec::with_capacity(coins.len());

    for symbol in &coins {
        match store.latest_snapshot(symbol).await? {
            Some(snapshot) => batch.push(snapshot),
            None => {
                warn!(symbol = %symbol, "feature 스냅샷이 없어 건너뜀");
                stats.skipped += 1;
            }
        }
    }

    if batch.is_empty() {
        return Err(PipelineError::NoData);
    }
    stats.fetched = batch.len();
    info!(fetched = batch.len(), "최신 스냅샷 조회 완료");

    // 3. 모델 로드 (실행당 1회, 실패는 치명적)
    let mut predictor = OnnxPredictor::load(&config.model_file).map_err(PipelineError::from)?;

    // 4. Reconciliation + 배치 스코어링
    let required = RequiredFeatureSet::default();
    let (trades, used_columns) = score_snapshots(&batch, &required, &mut predictor)?;
    stats.used_columns = used_columns;
    info!(
        scored = trades.len(),
        used_columns = used_columns,
        model = predictor.model_name(),
        "배치 스코어링 완료"
    );

    // 5. 영속화 (스키마 보장 후 레코드 단위 upsert)
    let writer = SuggestedTradeWriter::new(pool.clone(), &config.suggested_trades_table);
    writer.ensure_schema().await?;

    let outcome = writer.upsert_all(&trades).await;
    stats.saved = outcome.saved;
    stats.write_errors = outcome.failed;

    stats.elapsed = start.elapsed();
    Ok(stats)
}
