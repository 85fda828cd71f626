use clap::Parser;
use guest_letters::utils::{logger, validation::Validate};
use guest_letters::{CliConfig, LocalStorage, MergeConfig, MergeEngine, MergePipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting guest-letters CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 解析配置（CLI 旗標 > 設定檔 > 預設值）
    let config = match MergeConfig::resolve(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitoring;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 創建存儲和管道（基底為目前目錄，輸出路徑由配置決定）
    let storage = LocalStorage::new(".".to_string());
    let pipeline = MergePipeline::new(storage, config);

    // 創建合併引擎並運行
    let engine = MergeEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Mail merge completed successfully!");
            tracing::info!("📁 Letters saved to: {}", output_path);
            println!("✅ Mail merge completed successfully!");
            println!("📁 Letters saved to: {}", output_path);
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Mail merge failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                guest_letters::utils::error::ErrorSeverity::Low => 0,
                guest_letters::utils::error::ErrorSeverity::Medium => 2,
                guest_letters::utils::error::ErrorSeverity::High => 1,
                guest_letters::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
