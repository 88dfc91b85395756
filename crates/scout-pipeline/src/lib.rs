//! CoinScout Stage-2 매수 제안 파이프라인.
//!
//! 이 crate는 단일 패스 배치 추론 오케스트레이터를 제공합니다:
//! - 설정 검증 → 코인 목록 로드 → 심볼별 최신 스냅샷 조회
//! - feature reconciliation → 배치 스코어링 → 멱등 upsert
//!
//! 스코어링 이전 단계의 실패는 전체 실행을 중단시키며 어떤 쓰기도
//! 수행하지 않습니다. 영속화 단계의 실패는 레코드 단위로 격리됩니다.

pub mod error;
pub mod run;
pub mod stats;

pub use error::{PipelineError, Result};
pub use run::{run_pipeline, score_snapshots};
pub use stats::RunStats;
