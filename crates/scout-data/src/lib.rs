//! CoinScout의 데이터 접근 계층.
//!
//! 이 crate는 Postgres 기반 저장소 접근을 제공합니다:
//! - feature 스냅샷 읽기 전용 조회 (store)
//! - 매수 제안 레코드의 멱등 upsert (writer)

pub mod error;
pub mod store;
pub mod writer;

pub use error::{DataError, Result};
pub use store::FeatureStore;
pub use writer::{SuggestedTradeWriter, UpsertOutcome};
