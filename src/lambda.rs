#[cfg(feature = "lambda")]
use aws_config::BehaviorVersion;
#[cfg(feature = "lambda")]
use aws_sdk_s3::config::Region;
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use guest_letters::config::lambda::{LambdaConfig, S3Storage};
#[cfg(feature = "lambda")]
use guest_letters::core::{engine::MergeEngine, pipeline::MergePipeline};
#[cfg(feature = "lambda")]
use guest_letters::domain::ports::Storage;
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "lambda")]
#[derive(Deserialize)]
pub struct Request {
    pub spreadsheet_key: Option<String>,
    pub s3_bucket: Option<String>,
    pub s3_prefix: Option<String>,
    pub settings_key: Option<String>,
}

#[cfg(feature = "lambda")]
#[derive(Serialize)]
pub struct Response {
    pub message: String,
    pub output_key: String,
}

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    tracing::info!("Starting guest-letters Lambda function");

    // 設置環境變量 (如果事件中有的話)
    if let Some(key) = &event.payload.spreadsheet_key {
        std::env::set_var("SPREADSHEET_KEY", key);
    }
    if let Some(bucket) = &event.payload.s3_bucket {
        std::env::set_var("S3_BUCKET", bucket);
    }
    if let Some(prefix) = &event.payload.s3_prefix {
        std::env::set_var("S3_PREFIX", prefix);
    }

    // 創建Lambda配置
    let mut lambda_config = LambdaConfig::from_env()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    // 創建AWS配置和S3客戶端
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let region = Region::new(lambda_config.s3_region.clone());
    let config = aws_sdk_s3::config::Builder::from(&config)
        .region(region)
        .force_path_style(true)
        .build();
    let s3_client = S3Client::from_conf(config);

    let storage = S3Storage::new(s3_client, lambda_config.s3_bucket.clone());

    // 事件可指定桶內的 TOML 設定檔（模板、組別、信件樣式）
    if let Some(settings_key) = &event.payload.settings_key {
        let content = storage
            .read_file(settings_key)
            .await
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
        let content = String::from_utf8_lossy(&content);
        lambda_config
            .apply_settings_toml(&content)
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    }

    // 創建管道並運行合併
    let pipeline = MergePipeline::new(storage, lambda_config);
    let engine = MergeEngine::new(pipeline);
    let output_key = engine
        .run()
        .await
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    let response = Response {
        message: "Mail merge completed successfully".to_string(),
        output_key,
    };

    tracing::info!("guest-letters Lambda function completed successfully");
    Ok(response)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    guest_letters::utils::logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
