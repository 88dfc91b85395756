//! 파이프라인 에러 타입 정의.
//!
//! 스코어링 이전 단계의 에러는 모두 실행 전체를 중단시키는 치명적
//! 에러입니다. 레코드 단위 쓰기 실패는 여기 포함되지 않으며
//! writer에서 로그 후 건너뜁니다.

use scout_core::ConfigError;
use scout_data::DataError;
use scout_ml::MlError;
use thiserror::Error;

/// 파이프라인 에러 타입.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// 설정/파일 에러 (실행 전 검증 단계)
    #[error("설정 에러: {0}")]
    Config(#[from] ConfigError),

    /// 저장소 연결 실패 (부분 실행 대신 전체 중단)
    #[error("저장소 연결 에러: {0}")]
    StoreConnection(String),

    /// 어떤 심볼에도 스냅샷이 없음 (스코어링할 데이터 없음)
    #[error("스코어링할 데이터 없음: 어떤 심볼에도 스냅샷이 없습니다")]
    NoData,

    /// 사용 가능한 feature 컬럼 없음 (추론 시도 전 중단)
    #[error("feature 에러: {0}")]
    Feature(MlError),

    /// 모델 아티팩트 로드 실패
    #[error("모델 로드 에러: {0}")]
    ModelLoad(MlError),

    /// 배치 추론 실패
    #[error("추론 에러: {0}")]
    Prediction(MlError),

    /// 점수 수가 입력 행 수와 일치하지 않음
    #[error("점수 불일치: {rows}개 행에 {scores}개 점수")]
    ScoreMismatch { rows: usize, scores: usize },

    /// 저장소 조회 에러
    #[error("데이터 에러: {0}")]
    Data(#[from] DataError),
}

impl From<MlError> for PipelineError {
    fn from(err: MlError) -> Self {
        match err {
            MlError::ModelLoad(_) => PipelineError::ModelLoad(err),
            MlError::NoUsableColumns => PipelineError::Feature(err),
            _ => PipelineError::Prediction(err),
        }
    }
}

/// Result 타입 별칭.
pub type Result<T> = std::result::Result<T, PipelineError>;
