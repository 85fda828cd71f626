use guest_letters::utils::validation::Validate;
use guest_letters::{LocalStorage, MergeConfig, MergeEngine, MergeError, MergePipeline};
use tempfile::TempDir;

fn config_for(dir: &TempDir, csv: &str) -> MergeConfig {
    let path = dir.path().join("guests.csv");
    std::fs::write(&path, csv).unwrap();

    MergeConfig {
        spreadsheet_path: path.to_str().unwrap().to_string(),
        output_path: dir.path().join("out").to_str().unwrap().to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_missing_group_column_is_validation_error_not_crash() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_for(
        &temp_dir,
        "FullName,Address,Institution\nDana Levi,1 Main St,City Hospital\n",
    );

    let storage = LocalStorage::new(".".to_string());
    let pipeline = MergePipeline::new(storage, config);
    let engine = MergeEngine::new(pipeline);

    let err = engine.run().await.unwrap_err();
    match err {
        MergeError::MissingColumnError { column } => assert_eq!(column, "Group"),
        other => panic!("expected MissingColumnError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_column_error_is_user_facing() {
    let err = MergeError::MissingColumnError {
        column: "Group".to_string(),
    };
    assert!(err.user_friendly_message().contains("'Group'"));
    assert!(!err.recovery_suggestion().is_empty());
}

#[tokio::test]
async fn test_headers_only_guest_list_produces_empty_archive() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_for(&temp_dir, "FullName,Address,Institution,Group\n");

    let storage = LocalStorage::new(".".to_string());
    let pipeline = MergePipeline::new(storage, config);
    let engine = MergeEngine::new(pipeline);

    let archive_path = engine.run().await.unwrap();
    let data = std::fs::read(&archive_path).unwrap();
    let archive = zip::ZipArchive::new(std::io::Cursor::new(data)).unwrap();
    assert_eq!(archive.len(), 0);
}

#[tokio::test]
async fn test_missing_spreadsheet_file_fails_cleanly() {
    let temp_dir = TempDir::new().unwrap();
    let config = MergeConfig {
        spreadsheet_path: temp_dir
            .path()
            .join("no-such-file.csv")
            .to_str()
            .unwrap()
            .to_string(),
        output_path: temp_dir.path().join("out").to_str().unwrap().to_string(),
        ..Default::default()
    };

    let storage = LocalStorage::new(".".to_string());
    let pipeline = MergePipeline::new(storage, config);
    let engine = MergeEngine::new(pipeline);

    assert!(matches!(
        engine.run().await.unwrap_err(),
        MergeError::IoError(_)
    ));
}

#[test]
fn test_config_rejects_out_of_range_style() {
    let mut config = MergeConfig::default();
    config.settings.letter.style.margins.top = 5.0;

    let err = config.validate().unwrap_err();
    assert!(matches!(err, MergeError::InvalidConfigValueError { .. }));
}
