//! Sketch retrieval.
//!
//! Each repository with a group identifier is asked for its sketch image on
//! a fixed list of branches, first success wins. The image is saved as
//! `<group_data>/<group>/<file name>` and the path, relative to the base
//! directory, is stored on the record. A group without a sketch gets an
//! empty path; nothing here aborts the stage.

mod error;
mod source;

pub use error::FetchError;
pub use source::{HttpSketchSource, SketchSource};

use crate::dataset::RepositoryRecord;
use crate::progress::Progress;
use crate::summary::SketchOutcome;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, info_span, warn, Instrument};
use url::Url;

/// Where sketches are fetched from and stored.
#[derive(Debug, Clone)]
pub struct SketchLayout {
    /// Root that recorded paths are relative to.
    pub base_dir: PathBuf,

    /// Directory holding one subdirectory per group, relative to `base_dir`.
    pub group_data_dir: PathBuf,

    /// Raw file host, e.g. `https://raw.githubusercontent.com`.
    pub raw_host: String,

    /// Branches tried in order.
    pub branches: Vec<String>,

    /// Path of the sketch inside a repository.
    pub sketch_path: String,

    /// File name the sketch is stored under.
    pub file_name: String,
}

impl SketchLayout {
    /// Builds the raw URL of the sketch on `branch` of `full_name`.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if the pieces do not form a valid URL.
    pub fn sketch_url(&self, full_name: &str, branch: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!(
            "{}/{}/{}/{}",
            self.raw_host.trim_end_matches('/'),
            full_name.trim_matches('/'),
            branch,
            self.sketch_path.trim_start_matches('/'),
        ))
    }

    /// Returns the stored path relative to `base_dir`, always `/`-separated.
    #[must_use]
    pub fn relative_path(&self, group: &str) -> String {
        let mut parts: Vec<String> = self
            .group_data_dir
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        parts.push(group.to_string());
        parts.push(self.file_name.clone());
        parts.join("/")
    }

    fn group_dir(&self, group: &str) -> PathBuf {
        self.base_dir.join(&self.group_data_dir).join(group)
    }
}

/// Fetches sketches for every record and fills in `sketch_path`.
///
/// Records are processed one at a time in input order. Returns one outcome
/// per record, in the same order.
pub async fn retrieve_sketches<S: SketchSource>(
    records: &mut [RepositoryRecord],
    source: &S,
    layout: &SketchLayout,
) -> Vec<SketchOutcome> {
    let span = info_span!("sketches", count = records.len());

    async {
        info!("Downloading sketch files");
        let progress = Progress::bar(records.len() as u64, "Processing repos");
        let mut outcomes = Vec::with_capacity(records.len());

        for record in records.iter_mut() {
            let outcome = download_sketch(source, layout, record).await;
            record.sketch_path = outcome.path().unwrap_or_default().to_string();
            outcomes.push(outcome);
            progress.inc(1);
        }

        progress.finish_clear();
        let downloaded = outcomes.iter().filter(|o| o.path().is_some()).count();
        info!(downloaded, total = records.len(), "Sketch download complete");
        outcomes
    }
    .instrument(span)
    .await
}

/// Fetches and stores the sketch of a single record.
///
/// Never fails: every problem is logged and reported as an outcome without
/// a path.
pub async fn download_sketch<S: SketchSource>(
    source: &S,
    layout: &SketchLayout,
    record: &RepositoryRecord,
) -> SketchOutcome {
    let group = record.group_number.as_str();
    if !record.has_group() {
        debug!(repo = %record.name, "No group number, skipping");
        return SketchOutcome::Skipped {
            repository: record.name.clone(),
            reason: "no group number".to_string(),
        };
    }

    if !is_plain_dir_name(group) {
        warn!(repo = %record.name, group, "Group number is not a usable directory name, skipping");
        return SketchOutcome::Skipped {
            repository: record.name.clone(),
            reason: format!("unusable group directory '{group}'"),
        };
    }

    for branch in &layout.branches {
        let url = match layout.sketch_url(&record.full_name, branch) {
            Ok(url) => url,
            Err(e) => {
                warn!(repo = %record.name, branch = %branch, error = %e, "Invalid sketch URL");
                continue;
            }
        };

        let bytes = match source.fetch(&url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(repo = %record.name, branch = %branch, error = %e, "Sketch not available");
                continue;
            }
        };

        return match save_sketch(layout, group, &bytes) {
            Ok(path) => {
                debug!(repo = %record.name, branch = %branch, path = %path, "Saved sketch");
                SketchOutcome::Saved {
                    repository: record.name.clone(),
                    branch: branch.clone(),
                    path,
                }
            }
            Err(e) => {
                error!(repo = %record.name, error = %e, "Failed to write sketch");
                SketchOutcome::Failed {
                    repository: record.name.clone(),
                    error: e.to_string(),
                }
            }
        };
    }

    info!(repo = %record.name, "No sketch found on any branch");
    SketchOutcome::Missing {
        repository: record.name.clone(),
    }
}

fn save_sketch(layout: &SketchLayout, group: &str, bytes: &[u8]) -> std::io::Result<String> {
    let dir = layout.group_dir(group);
    std::fs::create_dir_all(&dir)?;
    std::fs::write(dir.join(&layout.file_name), bytes)?;
    Ok(layout.relative_path(group))
}

/// A group becomes a single directory below the group data root.
fn is_plain_dir_name(group: &str) -> bool {
    group != "."
        && group != ".."
        && !group.contains(['/', '\\'])
        && Path::new(group).components().count() == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    /// Serves fixed responses per URL and remembers every request.
    #[derive(Default)]
    struct FakeSource {
        responses: HashMap<String, Vec<u8>>,
        requests: RefCell<Vec<String>>,
    }

    impl FakeSource {
        fn with(mut self, url: &str, body: &[u8]) -> Self {
            self.responses.insert(url.to_string(), body.to_vec());
            self
        }
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

    fn layout(base: &Path) -> SketchLayout {
        SketchLayout {
            base_dir: base.to_path_buf(),
            group_data_dir: PathBuf::from("group_data"),
            raw_host: "https://raw.githubusercontent.com".to_string(),
            branches: vec!["main".to_string(), "master".to_string()],
            sketch_path: "img/sketch.png".to_string(),
            file_name: "sketch.png".to_string(),
        }
    }

    fn record(group: &str) -> RepositoryRecord {
        RepositoryRecord {
            name: format!("DSCI-532_2026_{group}_proj"),
            full_name: format!("UBC-MDS/DSCI-532_2026_{group}_proj"),
            group_number: group.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn builds_raw_url() {
        let layout = layout(Path::new("."));
        let url = layout.sketch_url("UBC-MDS/repo", "main").unwrap();
        assert_eq!(
            url.as_str(),
            "https://raw.githubusercontent.com/UBC-MDS/repo/main/img/sketch.png"
        );
    }

    #[tokio::test]
    async fn empty_group_makes_no_request() {
        let temp = TempDir::new().unwrap();
        let source = FakeSource::default();
        let mut records = vec![RepositoryRecord {
            name: "unrelated".to_string(),
            full_name: "UBC-MDS/unrelated".to_string(),
            sketch_path: "stale/value.png".to_string(),
            ..Default::default()
        }];

        let outcomes = retrieve_sketches(&mut records, &source, &layout(temp.path())).await;

        assert!(source.requests.borrow().is_empty());
        assert_eq!(records[0].sketch_path, "");
        assert!(matches!(outcomes[0], SketchOutcome::Skipped { .. }));
    }

    #[tokio::test]
    async fn falls_back_to_second_branch() {
        let temp = TempDir::new().unwrap();
        let source = FakeSource::default().with(
            "https://raw.githubusercontent.com/UBC-MDS/DSCI-532_2026_4_proj/master/img/sketch.png",
            b"master-bytes",
        );
        let mut records = vec![record("4")];

        retrieve_sketches(&mut records, &source, &layout(temp.path())).await;

        assert_eq!(source.requests.borrow().len(), 2);
        assert!(source.requests.borrow()[0].contains("/main/"));
        assert_eq!(records[0].sketch_path, "group_data/4/sketch.png");
        assert_eq!(
            fs::read(temp.path().join("group_data/4/sketch.png")).unwrap(),
            b"master-bytes"
        );
    }

    #[tokio::test]
    async fn first_branch_success_skips_second() {
        let temp = TempDir::new().unwrap();
        let source = FakeSource::default().with(
            "https://raw.githubusercontent.com/UBC-MDS/DSCI-532_2026_5_proj/main/img/sketch.png",
            b"main-bytes",
        );

        let outcome = download_sketch(&source, &layout(temp.path()), &record("5")).await;

        assert_eq!(source.requests.borrow().len(), 1);
        assert!(matches!(
            outcome,
            SketchOutcome::Saved { ref branch, .. } if branch == "main"
        ));
    }

    #[tokio::test]
    async fn all_branches_failing_records_no_asset() {
        let temp = TempDir::new().unwrap();
        let source = FakeSource::default();
        let mut records = vec![record("6"), record("7")];

        let outcomes = retrieve_sketches(&mut records, &source, &layout(temp.path())).await;

        assert_eq!(source.requests.borrow().len(), 4);
        assert!(records.iter().all(|r| r.sketch_path.is_empty()));
        assert!(outcomes
            .iter()
            .all(|o| matches!(o, SketchOutcome::Missing { .. })));
        assert!(!temp.path().join("group_data/6").exists());
    }

    #[tokio::test]
    async fn dot_dot_group_is_not_written() {
        let temp = TempDir::new().unwrap();
        let source = FakeSource::default();

        let outcome = download_sketch(&source, &layout(temp.path()), &record("..")).await;

        assert!(source.requests.borrow().is_empty());
        assert!(matches!(outcome, SketchOutcome::Skipped { .. }));
    }
}
