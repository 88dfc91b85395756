//! CoinScout의 ML 추론 기능.
//!
//! 이 crate는 배치 추론에 필요한 두 단계를 제공합니다:
//!
//! - **Feature Reconciliation**: 정규 feature 목록과 실제 스냅샷에
//!   존재하는 숫자 컬럼의 교집합으로 추론 행렬 구성
//! - **Batch Inference**: ONNX Runtime 기반 모델로 행렬 전체를
//!   한 번에 스코어링 (행 순서 보존)
//!
//! # 아키텍처
//!
//! ```text
//! FeatureSnapshot 배치
//!        │
//!        ▼
//! ┌──────────────────┐
//! │ select_features  │ ← required ∩ (존재 ∧ 숫자)
//! └────────┬─────────┘
//!          │ FeatureMatrix
//!          ▼
//! ┌──────────────────┐
//! │  ScorePredictor  │ ← ONNX Runtime (배치 1회 호출)
//! └────────┬─────────┘
//!          │ Vec<f32> (입력 행 순서 그대로)
//!          ▼
//!   SuggestedTrade 변환
//! ```

pub mod error;
pub mod features;
pub mod predictor;

pub use error::{MlError, MlResult};
pub use features::{select_features, FeatureMatrix, RequiredFeatureSet};
pub use predictor::{MockPredictor, OnnxPredictor, ScorePredictor};
