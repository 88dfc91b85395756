//! CoinScout 파이프라인의 핵심 도메인 모델과 설정.
//!
//! 이 crate는 파이프라인 전 단계에서 공유되는 타입을 제공합니다:
//! - Feature 스냅샷과 매수 제안 레코드 (domain)
//! - 환경변수 기반 설정과 코인 목록 로딩 (config)
//! - 설정 에러 타입 (error)

pub mod config;
pub mod domain;
pub mod error;

pub use config::{load_coins, PipelineConfig};
pub use domain::{FeatureSnapshot, SuggestedTrade, DEFAULT_ACTION};
pub use error::ConfigError;
