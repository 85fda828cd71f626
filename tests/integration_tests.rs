use guest_letters::domain::model::{Group, SkippedRow};
use guest_letters::{LocalStorage, MergeConfig, MergeEngine, MergePipeline};
use std::io::Read;
use tempfile::TempDir;

const GUEST_LIST: &str = "\
FullName,Address,Institution,Group
Dana Levi,1 Main St,City Hospital,Blue
Noa Cohen,2 Side St,Tech Institute,Green
Avi Mizrahi,3 Back St,Art Academy,Yellow
Lost Guest,9 Nowhere,Unknown Org,Purple
";

fn write_guest_list(dir: &TempDir, content: &str) -> String {
    let path = dir.path().join("guests.csv");
    std::fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

fn open_archive(path: &str) -> zip::ZipArchive<std::io::Cursor<Vec<u8>>> {
    let data = std::fs::read(path).unwrap();
    zip::ZipArchive::new(std::io::Cursor::new(data)).unwrap()
}

fn read_entry(
    archive: &mut zip::ZipArchive<std::io::Cursor<Vec<u8>>>,
    name: &str,
) -> Vec<u8> {
    let mut file = archive.by_name(name).unwrap();
    let mut content = Vec::new();
    file.read_to_end(&mut content).unwrap();
    content
}

fn docx_document_xml(docx: &[u8]) -> String {
    let cursor = std::io::Cursor::new(docx.to_vec());
    let mut archive = zip::ZipArchive::new(cursor).unwrap();
    let mut file = archive.by_name("word/document.xml").unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    content
}

#[tokio::test]
async fn test_end_to_end_merge() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let spreadsheet_path = write_guest_list(&temp_dir, GUEST_LIST);
    let output_path = temp_dir.path().join("out");

    let config = MergeConfig {
        spreadsheet_path,
        output_path: output_path.to_str().unwrap().to_string(),
        ..Default::default()
    };

    let storage = LocalStorage::new(".".to_string());
    let pipeline = MergePipeline::new(storage, config);
    let engine = MergeEngine::new_with_monitoring(pipeline, false);

    let archive_path = engine.run().await?;
    assert!(archive_path.ends_with("letters_output.zip"));
    assert!(std::path::Path::new(&archive_path).exists());

    let mut archive = open_archive(&archive_path);

    // three letters plus the skipped-rows summary
    assert_eq!(archive.len(), 4);

    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "Avi Mizrahi - Yellow.docx",
            "Dana Levi - Blue.docx",
            "Noa Cohen - Green.docx",
            "skipped.json",
        ]
    );

    // the Blue guest got the Blue template, fully filled
    let letter = read_entry(&mut archive, "Dana Levi - Blue.docx");
    let doc = docx_document_xml(&letter);
    assert!(doc.contains("Dana Levi"));
    assert!(doc.contains("City Hospital"));
    assert!(doc.contains("delighted to invite"));
    assert!(!doc.contains("Group Green"));
    assert!(!doc.contains("{{"));

    // the unknown-group row landed in the summary, not in a letter
    let summary = read_entry(&mut archive, "skipped.json");
    let skipped: Vec<SkippedRow> = serde_json::from_slice(&summary)?;
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].full_name, "Lost Guest");
    assert_eq!(skipped[0].group_value, "Purple");

    Ok(())
}

#[tokio::test]
async fn test_merge_with_settings_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let guest_list = "\
FullName,Address,Institution,Group
Dana Levi,1 Main St,City Hospital,כחול
";
    let spreadsheet_path = write_guest_list(&temp_dir, guest_list);

    let settings = format!(
        r#"
[source]
spreadsheet = "{spreadsheet}"

[load]
output_path = "{output}"
archive_name = "batch.zip"

[groups]
blue = "כחול"
green = "ירוק"
yellow = "צהוב"

[templates]
blue = "Shalom {{{{FullName}}}}, welcome to {{{{Institution}}}}."

[letter]
salutation = "Dear guest,"
filename_pattern = "{{Group}}-{{FullName}}"

[letter.style]
font_name = "David"
font_size_pt = 14
"#,
        spreadsheet = spreadsheet_path.replace('\\', "/"),
        output = temp_dir.path().join("letters").to_str().unwrap().replace('\\', "/"),
    );
    let settings_path = temp_dir.path().join("settings.toml");
    std::fs::write(&settings_path, settings)?;

    let file = guest_letters::config::toml_config::MergeFileConfig::from_file(&settings_path)?;
    let mut config = MergeConfig::default();
    file.apply_to(&mut config);

    let storage = LocalStorage::new(".".to_string());
    let pipeline = MergePipeline::new(storage, config);
    let engine = MergeEngine::new(pipeline);

    let archive_path = engine.run().await?;
    assert!(archive_path.ends_with("batch.zip"));

    let mut archive = open_archive(&archive_path);
    assert_eq!(archive.len(), 1);

    // {Group} expands to the raw column value, not the resolved group name
    let letter = read_entry(&mut archive, "כחול-Dana Levi.docx");
    let doc = docx_document_xml(&letter);
    assert!(doc.contains("Dear guest,"));
    assert!(doc.contains("Shalom Dana Levi, welcome to City Hospital."));
    assert!(doc.contains(r#"w:ascii="David""#));
    // 14pt -> 28 half-points
    assert!(doc.contains(r#"<w:sz w:val="28"/>"#));

    Ok(())
}

#[tokio::test]
async fn test_each_group_selects_its_own_template() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let spreadsheet_path = write_guest_list(&temp_dir, GUEST_LIST);

    let config = MergeConfig {
        spreadsheet_path,
        output_path: temp_dir.path().join("out").to_str().unwrap().to_string(),
        ..Default::default()
    };

    let storage = LocalStorage::new(".".to_string());
    let pipeline = MergePipeline::new(storage, config);

    use guest_letters::domain::ports::Pipeline;
    let records = pipeline.extract().await?;
    let result = pipeline.transform(records).await?;

    let groups: Vec<Group> = result.letters.iter().map(|l| l.group).collect();
    assert_eq!(groups, vec![Group::Blue, Group::Green, Group::Yellow]);

    let green_doc = docx_document_xml(&result.letters[1].content);
    assert!(green_doc.contains("Group Green"));
    assert!(!green_doc.contains("delighted to invite"));

    let yellow_doc = docx_document_xml(&result.letters[2].content);
    assert!(yellow_doc.contains("hosting you"));

    Ok(())
}
