use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct MergeEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> MergeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        println!("Starting mail merge...");

        // Extract
        println!("Reading guest list...");
        let records = self.pipeline.extract().await?;
        println!("Loaded {} guests", records.len());
        self.monitor.log_stats("Extract");

        // Transform
        println!("Generating letters...");
        let result = self.pipeline.transform(records).await?;
        println!(
            "Generated {} letters ({} rows skipped)",
            result.letters.len(),
            result.skipped.len()
        );
        self.monitor.log_stats("Transform");

        // Load
        println!("Packaging letters...");
        let output_path = self.pipeline.load(result).await?;
        println!("Output saved to: {}", output_path);
        self.monitor.log_stats("Load");

        if self.monitor.is_enabled() {
            self.monitor.log_final_stats();
        }

        Ok(output_path)
    }
}
