#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod credentials;
pub mod dataset;
pub mod decompose;
pub mod discovery;
pub mod pages;
pub mod progress;
pub mod rate_limit;
pub mod runner;
pub mod sketches;
pub mod stage;
pub mod summary;

pub use config::{ConfigError, Settings, DEFAULT_ORGANIZATION, DEFAULT_PATTERN, SETTINGS_FILE_NAME};
pub use credentials::{CredentialError, TokenResolver, TokenSource, TOKEN_VARS};
pub use dataset::{read_records, write_records, DatasetError, RepositoryRecord};
pub use decompose::{decompose_records, parse_repo_name};
pub use discovery::{collect_matches, discover_repositories, DiscoveryError, RepositoryDescriptor};
pub use pages::{
    generate_pages, numeric_group, plan_pages, PageError, PageRenderer, ProjectPage,
    DEFAULT_PAGE_TEMPLATE, NON_NUMERIC_ORDER_BASE,
};
pub use rate_limit::{check_core_rate_limit, ensure_core_rate_limit, wait_if_needed, RateLimitInfo};
pub use runner::{Pipeline, PipelineConfig, PipelineError};
pub use sketches::{
    download_sketch, retrieve_sketches, FetchError, HttpSketchSource, SketchLayout, SketchSource,
};
pub use stage::Stage;
pub use summary::{RunSummary, SketchOutcome};
