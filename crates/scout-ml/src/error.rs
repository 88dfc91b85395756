//! ML 모듈 에러 타입.

use thiserror::Error;

/// ML 작업에서 발생할 수 있는 에러.
#[derive(Debug, Error)]
pub enum MlError {
    /// ONNX 모델 로드 에러
    #[error("Model load error: {0}")]
    ModelLoad(String),

    /// 모델 추론 중 에러
    #[error("Inference error: {0}")]
    Inference(String),

    /// 사용 가능한 feature 컬럼이 하나도 없음
    ///
    /// 정규 목록과 배치에 실제 존재하는 숫자 컬럼의 교집합이 비어 있는
    /// 경우로, 추론 시도 전에 파이프라인을 중단시켜야 합니다.
    #[error("No usable feature columns: required columns absent or non-numeric")]
    NoUsableColumns,

    /// 유효하지 않은 입력 데이터
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// ML 작업을 위한 Result 타입.
pub type MlResult<T> = Result<T, MlError>;

// ONNX Runtime 에러로부터 변환
impl From<ort::Error> for MlError {
    fn from(err: ort::Error) -> Self {
        MlError::Inference(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MlError::ModelLoad("file not found".to_string());
        assert_eq!(err.to_string(), "Model load error: file not found");

        let err = MlError::NoUsableColumns;
        assert!(err.to_string().contains("No usable feature columns"));
    }
}
