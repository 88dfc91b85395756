//! ONNX 모델을 사용한 배치 스코어링.
//!
//! 학습된 부스티드 트리 분류기를 ONNX 형식으로 내보낸 아티팩트를
//! 로드하고, feature 행렬 전체를 한 번의 호출로 스코어링합니다.
//! 모델은 별도로 학습되어야 하며 (예: Python/XGBoost 사용)
//! ONNX 형식으로 내보내야 합니다.

use crate::error::{MlError, MlResult};
use crate::features::FeatureMatrix;
use ort::session::Session;
use std::path::Path;
use tracing::{debug, info};

/// 배치 스코어링을 수행하는 predictor trait.
///
/// 반환되는 점수는 **입력 행 순서와 동일한 순서**여야 합니다.
/// 다운스트림에서 위치 인덱스로 심볼에 점수를 다시 연결하기 때문에
/// 순서 보존은 계약의 일부입니다.
pub trait ScorePredictor {
    /// feature 행렬 전체를 스코어링하여 행당 신뢰도 점수 반환.
    fn predict_batch(&mut self, matrix: &FeatureMatrix) -> MlResult<Vec<f32>>;

    /// 모델 이름 반환 (로깅용).
    fn model_name(&self) -> &str;
}

/// ONNX Runtime 기반 배치 predictor.
///
/// 모델은 다음을 가져야 합니다:
/// - 입력: [batch_size, num_features] 형태의 float32 텐서
/// - 출력: [batch_size] 또는 [batch_size, 1] 형태의 점수, 혹은
///   [batch_size, 2] 형태의 이진 클래스 확률 (양성 클래스 사용)
pub struct OnnxPredictor {
    session: Session,
    model_name: String,
}

impl OnnxPredictor {
    /// 지정된 경로에서 ONNX 모델 로드.
    ///
    /// 파일 없음 / 손상된 형식은 [`MlError::ModelLoad`]로 즉시
    /// 표면화되며, 조용히 재시도하지 않습니다.
    pub fn load(path: impl AsRef<Path>) -> MlResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(MlError::ModelLoad(format!(
                "Model file not found: {}",
                path.display()
            )));
        }

        info!("Loading ONNX model from: {}", path.display());

        let session = Session::builder()
            .map_err(|e| MlError::ModelLoad(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(ort::session::builder::GraphOptimizationLevel::Level3)
            .map_err(|e| MlError::ModelLoad(format!("Failed to set optimization level: {}", e)))?
            .commit_from_file(path)
            .map_err(|e| MlError::ModelLoad(format!("Failed to load model: {}", e)))?;

        let model_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "onnx_model".to_string());

        info!(model = %model_name, "ONNX model loaded successfully");

        Ok(Self {
            session,
            model_name,
        })
    }
}

impl ScorePredictor for OnnxPredictor {
    fn predict_batch(&mut self, matrix: &FeatureMatrix) -> MlResult<Vec<f32>> {
        let rows = matrix.rows();
        let cols = matrix.cols();

        if rows == 0 || cols == 0 {
            return Err(MlError::InvalidInput("empty feature matrix".to_string()));
        }

        // 입력 텐서 생성 [rows, cols] - 배치 전체를 한 번에
        let input_shape = [rows as i64, cols as i64];
        let input_data = matrix.as_slice().to_vec();

        let input_tensor =
            ort::value::Tensor::from_array((input_shape, input_data.into_boxed_slice()))
                .map_err(|e| MlError::Inference(format!("Failed to create input tensor: {}", e)))?;

        let outputs = self
            .session
            .run(ort::inputs!["input" => input_tensor])
            .map_err(|e| MlError::Inference(format!("Inference failed: {}", e)))?;

        // 첫 번째 출력 가져오기 (이름은 모델 내보내기에 따라 다름)
        let output_name = outputs
            .iter()
            .next()
            .map(|(name, _)| name.to_string())
            .ok_or_else(|| MlError::Inference("No output tensor found".to_string()))?;

        let output = outputs
            .get(&output_name)
            .ok_or_else(|| MlError::Inference("Failed to get output by name".to_string()))?;

        let (_, output_slice) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| MlError::Inference(format!("Failed to extract output tensor: {}", e)))?;

        // 출력 형태 해석: [N] / [N,1]은 점수, [N,2]는 클래스 확률
        let scores: Vec<f32> = if output_slice.len() == rows {
            output_slice.to_vec()
        } else if output_slice.len() == rows * 2 {
            // 이진 분류 확률에서 양성 클래스 컬럼 추출
            output_slice.chunks_exact(2).map(|pair| pair[1]).collect()
        } else {
            return Err(MlError::Inference(format!(
                "Expected {} or {} output values, got {}",
                rows,
                rows * 2,
                output_slice.len()
            )));
        };

        debug!(
            rows = rows,
            cols = cols,
            model = %self.model_name,
            "Batch inference completed"
        );

        Ok(scores)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// 실제 모델 파일 없이 테스트하기 위한 mock predictor.
///
/// 고정 점수가 설정되면 그대로 반환하고, 아니면 행 평균의
/// 시그모이드를 점수로 사용합니다 (결정적).
#[derive(Debug, Default)]
pub struct MockPredictor {
    /// 반환할 고정 점수 (행 수와 일치해야 함)
    pub fixed_scores: Option<Vec<f32>>,
}

impl MockPredictor {
    /// 새 mock predictor 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 항상 반환할 고정 점수 설정.
    pub fn with_fixed_scores(mut self, scores: Vec<f32>) -> Self {
        self.fixed_scores = Some(scores);
        self
    }

    /// 단일 행에 대한 mock 점수 계산.
    fn score_row(row: &[f32]) -> f32 {
        let mean = row.iter().sum::<f32>() / row.len() as f32;
        1.0 / (1.0 + (-mean).exp())
    }
}

impl ScorePredictor for MockPredictor {
    fn predict_batch(&mut self, matrix: &FeatureMatrix) -> MlResult<Vec<f32>> {
        if matrix.rows() == 0 {
            return Err(MlError::InvalidInput("empty feature matrix".to_string()));
        }

        if let Some(ref scores) = self.fixed_scores {
            if scores.len() != matrix.rows() {
                return Err(MlError::InvalidInput(format!(
                    "fixed scores length {} != batch rows {}",
                    scores.len(),
                    matrix.rows()
                )));
            }
            return Ok(scores.clone());
        }

        Ok((0..matrix.rows())
            .map(|i| Self::score_row(matrix.row(i)))
            .collect())
    }

    fn model_name(&self) -> &str {
        "mock_predictor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{select_features, RequiredFeatureSet};
    use chrono::Utc;
    use scout_core::FeatureSnapshot;
    use serde_json::{json, Map};
    use uuid::Uuid;

    fn matrix_from(rows: &[(&str, f64)]) -> FeatureMatrix {
        let batch: Vec<FeatureSnapshot> = rows
            .iter()
            .map(|(symbol, close)| {
                let mut features = Map::new();
                features.insert("close".to_string(), json!(close));
                FeatureSnapshot {
                    id: Uuid::new_v4(),
                    symbol: symbol.to_string(),
                    timestamp: Utc::now(),
                    features,
                }
            })
            .collect();
        select_features(&batch, &RequiredFeatureSet::new(["close"])).unwrap()
    }

    #[test]
    fn test_model_not_found() {
        let result = OnnxPredictor::load("nonexistent/model.onnx");

        match result {
            Err(MlError::ModelLoad(msg)) => assert!(msg.contains("not found")),
            _ => panic!("Expected ModelLoad error"),
        }
    }

    #[test]
    fn test_mock_predictor_deterministic() {
        let matrix = matrix_from(&[("BTCUSDT", 0.5), ("ETHUSDT", -0.5)]);
        let mut predictor = MockPredictor::new();

        let first = predictor.predict_batch(&matrix).unwrap();
        let second = predictor.predict_batch(&matrix).unwrap();
        assert_eq!(first, second);
        assert!(first[0] > 0.5);
        assert!(first[1] < 0.5);
    }

    #[test]
    fn test_mock_batch_matches_per_row_scoring() {
        // 배치 스코어링과 행 단위 스코어링이 위치별로 일치해야 함
        let full = matrix_from(&[("A", 1.0), ("B", 2.0), ("C", -1.0), ("D", 0.0)]);
        let mut predictor = MockPredictor::new();
        let batch_scores = predictor.predict_batch(&full).unwrap();

        for (i, (symbol, close)) in [("A", 1.0), ("B", 2.0), ("C", -1.0), ("D", 0.0)]
            .iter()
            .enumerate()
        {
            let single = matrix_from(&[(symbol, *close)]);
            let score = predictor.predict_batch(&single).unwrap();
            assert_eq!(batch_scores[i], score[0]);
        }
    }

    #[test]
    fn test_mock_fixed_scores() {
        let matrix = matrix_from(&[("BTCUSDT", 1.0), ("ETHUSDT", 2.0)]);
        let mut predictor = MockPredictor::new().with_fixed_scores(vec![0.9, 0.1]);

        assert_eq!(predictor.predict_batch(&matrix).unwrap(), vec![0.9, 0.1]);

        let mut mismatched = MockPredictor::new().with_fixed_scores(vec![0.9]);
        assert!(matches!(
            mismatched.predict_batch(&matrix),
            Err(MlError::InvalidInput(_))
        ));
    }
}
