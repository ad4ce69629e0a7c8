use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use showcase_pipeline::{
    read_records, DatasetError, FetchError, Pipeline, PipelineConfig, PipelineError,
    RepositoryRecord, RunSummary, Settings, SketchSource, Stage,
};
use tempfile::TempDir;
use url::Url;

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

#[derive(Default)]
struct FakeSource {
    responses: HashMap<String, Vec<u8>>,
    requests: RefCell<Vec<String>>,
}

impl SketchSource for FakeSource {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        self.requests.borrow_mut().push(url.to_string());
        self.responses
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

fn discovered(name: &str, description: &str) -> RepositoryRecord {
    RepositoryRecord {
        name: name.to_string(),
        full_name: format!("UBC-MDS/{name}"),
        html_url: format!("https://github.com/UBC-MDS/{name}"),
        description: description.to_string(),
        created_at: "2026-01-05T18:02:11+00:00".to_string(),
        updated_at: "2026-02-20T09:15:40+00:00".to_string(),
        ..Default::default()
    }
}

fn pipeline(base: &Path) -> Pipeline {
    Pipeline::new(PipelineConfig::new(base.to_path_buf(), Settings::default()))
}

#[tokio::test]
async fn stages_two_to_four_build_pages_from_discovered_repositories() {
    let temp = TempDir::new().unwrap();
    let pipeline = pipeline(temp.path());
    let mut summary = RunSummary::new();

    let records = vec![
        discovered("DSCI-532_2026_7_dashboard", "Crime rates\nby city"),
        discovered("DSCI-532_2026_demo_template", ""),
        discovered("unrelated-repo", "Not a course project"),
    ];
    pipeline.save_discovered(&records, &mut summary).unwrap();
    pipeline.parse(&mut summary).unwrap();

    let mut source = FakeSource::default();
    source.responses.insert(
        "https://raw.githubusercontent.com/UBC-MDS/DSCI-532_2026_7_dashboard/master/img/sketch.png"
            .to_string(),
        b"png".to_vec(),
    );
    pipeline.sketches_with(&source, &mut summary).await.unwrap();
    pipeline.pages(&mut summary).unwrap();

    // main is tried before master; "demo" has no sketch on either branch and
    // the unrelated repository is never requested
    assert_eq!(source.requests.borrow().len(), 4);
    assert_eq!(
        fs::read(temp.path().join("group_data/7/sketch.png")).unwrap(),
        b"png"
    );
    assert!(!temp.path().join("group_data/demo").exists());

    let dataset = read_records(&temp.path().join("data/repos.csv"), Stage::Pages).unwrap();
    assert_eq!(dataset[0].group_number, "7");
    assert_eq!(dataset[0].project_name, "dashboard");
    assert_eq!(dataset[0].sketch_path, "group_data/7/sketch.png");
    assert_eq!(dataset[1].group_number, "demo");
    assert_eq!(dataset[1].sketch_path, "");
    assert_eq!(dataset[2].group_number, "");
    assert_eq!(dataset[2].project_name, "");

    let projects = temp.path().join("projects");
    let mut files: Vec<_> = fs::read_dir(&projects)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    assert_eq!(files, vec!["group-7.qmd", "group-demo.qmd"]);

    let numeric = fs::read_to_string(projects.join("group-7.qmd")).unwrap();
    assert!(numeric.contains("title: \"Group 7\""));
    assert!(numeric.contains("subtitle: \"dashboard\""));
    assert!(numeric.contains("  Crime rates\n  by city\n"));
    assert!(numeric.contains("image: ../group_data/7/sketch.png"));
    assert!(numeric.contains("order: 7"));

    let word = fs::read_to_string(projects.join("group-demo.qmd")).unwrap();
    assert!(word.contains("order: 9000"));
    assert!(word.contains("image: https://via.placeholder.com/400x300?text=No+Sketch"));

    assert_eq!(summary.stages, Stage::ALL.to_vec());
    assert_eq!(summary.repositories_discovered, 3);
    assert_eq!(summary.names_grouped, 2);
    assert_eq!(summary.sketches_downloaded, 1);
    assert_eq!(summary.sketches_missing, 1);
    assert_eq!(summary.sketches_skipped, 1);
    assert_eq!(summary.pages_numeric, 1);
    assert_eq!(summary.pages_non_numeric, 1);
}

#[test]
fn empty_discovery_still_writes_a_dataset() {
    let temp = TempDir::new().unwrap();
    let pipeline = pipeline(temp.path());
    let mut summary = RunSummary::new();

    pipeline.save_discovered(&[], &mut summary).unwrap();

    let content = fs::read_to_string(temp.path().join("data/repos.csv")).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.starts_with("name,full_name,html_url"));
    assert_eq!(summary.repositories_discovered, 0);
}

#[test]
fn legacy_dataset_without_derived_columns_parses() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("parsed.csv");
    let config = PipelineConfig::new(temp.path().to_path_buf(), Settings::default())
        .with_dataset_path(fixtures_root().join("legacy_repos.csv"))
        .with_output_path(output.clone());
    let mut summary = RunSummary::new();

    Pipeline::new(config).parse(&mut summary).unwrap();

    let records = read_records(&output, Stage::Pages).unwrap();
    assert_eq!(records.len(), 3);
    assert!(!records[0].private);
    assert!(records[1].private);
    assert_eq!(records[1].group_number, "12");
    assert_eq!(records[1].project_name, "air-quality");
    assert_eq!(records[2].group_number, "demo");
    assert_eq!(records[2].project_name, "template");
    assert!(records.iter().all(|r| r.sketch_path.is_empty()));
    assert_eq!(summary.names_grouped, 3);
}

#[test]
fn pages_before_parse_reports_missing_columns() {
    let config = PipelineConfig::new(PathBuf::from("."), Settings::default())
        .with_dataset_path(fixtures_root().join("legacy_repos.csv"));
    let mut summary = RunSummary::new();

    let result = Pipeline::new(config).pages(&mut summary);

    assert!(matches!(
        result,
        Err(PipelineError::Dataset(DatasetError::MissingColumn { .. }))
    ));
}

#[test]
fn parse_without_dataset_names_the_fetch_stage() {
    let temp = TempDir::new().unwrap();
    let mut summary = RunSummary::new();

    let err = pipeline(temp.path()).parse(&mut summary).unwrap_err();

    assert!(err.to_string().contains("showcase fetch"));
}
