//! 실행 통계 구조체.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 파이프라인 실행 통계.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// 코인 목록의 총 심볼 수
    pub symbols: usize,
    /// 스냅샷이 조회된 심볼 수
    pub fetched: usize,
    /// 스냅샷이 없어 건너뛴 심볼 수
    pub skipped: usize,
    /// 추론에 실제 사용된 feature 컬럼 수
    pub used_columns: usize,
    /// 저장된 매수 제안 수
    pub saved: usize,
    /// 저장 실패로 건너뛴 레코드 수
    pub write_errors: usize,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl RunStats {
    /// 새 통계 객체 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장 성공률 계산 (%).
    pub fn save_rate(&self) -> f64 {
        if self.fetched == 0 {
            0.0
        } else {
            (self.saved as f64 / self.fetched as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력.
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            symbols = self.symbols,
            fetched = self.fetched,
            skipped = self.skipped,
            used_columns = self.used_columns,
            saved = self.saved,
            write_errors = self.write_errors,
            save_rate = format!("{:.1}%", self.save_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "실행 완료"
        );
    }
}
