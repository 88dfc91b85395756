//! Standalone stage-2 buy-suggestion pipeline CLI.

use clap::Parser;
use scout_core::PipelineConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "scout-pipeline")]
#[command(about = "CoinScout Stage-2 Buy Suggestion Pipeline", long_about = None)]
#[command(version)]
struct Cli {
    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // 로깅 초기화
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "scout_pipeline={level},scout_data={level},scout_ml={level}",
                    level = cli.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("CoinScout Stage-2 파이프라인 시작");

    // 설정 로드 (필수 키 누락은 I/O 전에 전부 보고)
    let config = match PipelineConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "설정 검증 실패");
            std::process::exit(1);
        }
    };
    tracing::debug!(
        features_table = %config.features_table,
        suggested_trades_table = %config.suggested_trades_table,
        "설정 로드 완료"
    );

    match scout_pipeline::run_pipeline(&config).await {
        Ok(stats) => {
            stats.log_summary("매수 제안 파이프라인");
            tracing::info!(saved = stats.saved, "파이프라인 정상 종료");
        }
        Err(e) => {
            tracing::error!(error = %e, "파이프라인 중단");
            std::process::exit(1);
        }
    }
}
