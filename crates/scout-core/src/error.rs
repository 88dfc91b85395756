//! 설정 에러 타입.

use thiserror::Error;

/// 설정 검증 단계에서 발생하는 에러.
///
/// 이 단계의 에러는 모두 실행 전 치명적(fatal)이며,
/// 어떤 I/O도 수행되기 전에 실행을 중단시킵니다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 필수 설정 키 누락 (누락된 키 전체를 한 번에 보고)
    #[error("필수 설정 누락: {}", .keys.join(", "))]
    MissingKeys { keys: Vec<String> },

    /// 잘못된 설정 값
    #[error("잘못된 설정 값 ({key}): {reason}")]
    InvalidValue { key: String, reason: String },

    /// 코인 목록 파일 오류 (없음, 파싱 실패, 빈 목록)
    #[error("코인 목록 파일 오류 ({path}): {reason}")]
    CoinsFile { path: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_display() {
        let err = ConfigError::MissingKeys {
            keys: vec!["DATABASE_URL".to_string(), "MODEL_FILE".to_string()],
        };
        assert_eq!(err.to_string(), "필수 설정 누락: DATABASE_URL, MODEL_FILE");
    }
}
