use std::fs;
use tempfile::TempDir;
use wordtree::config::{ConfigLoader, WordtreeConfig};
use wordtree::tooling::cli::{CliContext, Commands};

fn shelf(temp: &TempDir) -> std::path::PathBuf {
    let root = temp.path().join("shelf");
    fs::create_dir_all(root.join("poems")).unwrap();
    fs::write(root.join("poems/ode.txt"), "Thou still unravish'd bride").unwrap();
    fs::write(root.join("broken.zip"), "not an archive").unwrap();
    fs::write(root.join("photo.png"), [0u8; 10]).unwrap();
    root
}

#[test]
fn scan_json_contract_has_required_fields() {
    let temp = TempDir::new().unwrap();
    let root = shelf(&temp);
    let context = CliContext::from_config(WordtreeConfig::default()).unwrap();

    let output = context
        .execute(&Commands::Scan {
            dir: root,
            format: "json".to_string(),
            workers: None,
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

    let stats = &parsed["stats"];
    for key in [
        "folders",
        "files",
        "totalSizeBytes",
        "totalWords",
        "startedAt",
        "finishedAt",
        "elapsedSeconds",
        "estimatedReadingTime",
    ] {
        assert!(stats.get(key).is_some(), "stats.{} missing", key);
    }
    assert_eq!(stats["totalWords"], 5);
    assert_eq!(stats["totalSizeBytes"], 27 + 14 + 10);

    let tree = &parsed["tree"];
    assert_eq!(tree["kind"], "folder");
    assert_eq!(tree["path"], serde_json::json!([]));
    assert!(tree.get("sizeBytes").is_none());

    let children = tree["children"].as_array().unwrap();
    let names: Vec<_> = children.iter().map(|c| c["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["poems", "broken.zip", "photo.png"]);

    let broken = &children[1];
    assert_eq!(broken["kind"], "file");
    assert!(broken["wordCount"].is_null());
    assert_eq!(broken["path"], serde_json::json!(["broken.zip"]));
    assert!(children[2].get("wordCount").is_none());
}

#[test]
fn scan_text_report_lists_tree_and_statistics() {
    let temp = TempDir::new().unwrap();
    let root = shelf(&temp);
    let context = CliContext::from_config(WordtreeConfig::default()).unwrap();

    let output = context
        .execute(&Commands::Scan {
            dir: root,
            format: "text".to_string(),
            workers: Some(1),
        })
        .unwrap();
    assert!(output.contains("[5] shelf/"));
    assert!(output.contains("    [5] ode.txt (27 B)"));
    assert!(output.contains("  photo.png (10 B)"));
    assert!(output.contains("Reading time"));
}

#[test]
fn scan_root_config_file_is_applied() {
    let temp = TempDir::new().unwrap();
    let root = shelf(&temp);
    fs::write(
        root.join("wordtree.toml"),
        "[reading]\nwords_per_minute = 1\n\n[aggregation]\nmax_workers = 2\n",
    )
    .unwrap();

    let config = ConfigLoader::load(&root).unwrap();
    assert_eq!(config.reading.words_per_minute, 1);
    assert_eq!(config.aggregation.max_workers, Some(2));

    let context = CliContext::new(&root, None).unwrap();
    let output = context
        .execute(&Commands::Scan {
            dir: root,
            format: "json".to_string(),
            workers: None,
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["stats"]["estimatedReadingTime"], "5 min");
}

#[test]
fn invalid_config_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.toml");
    fs::write(&path, "[reading]\nwords_per_minute = 0\n").unwrap();
    assert!(ConfigLoader::load_from_file(&path).is_err());
    assert!(CliContext::new(temp.path(), Some(&path)).is_err());
}
