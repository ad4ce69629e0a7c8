//! Repository discovery using the GitHub organization listing.
//!
//! Walks every page of an organization's repositories and keeps the ones
//! whose name starts with the configured prefix.

mod descriptor;
mod error;

pub use descriptor::RepositoryDescriptor;
pub use error::DiscoveryError;

use crate::dataset::RepositoryRecord;
use crate::progress::Progress;
use crate::rate_limit::ensure_core_rate_limit;
use octocrab::models::Repository;
use octocrab::Octocrab;
use tracing::{debug, info, info_span, Instrument};

/// Results per page for the repository listing.
const RESULTS_PER_PAGE: u8 = 100;

/// Discovers all repositories of `organization` whose name starts with `pattern`.
///
/// The token is verified first so a bad credential fails before any
/// listing request. Records keep listing order.
///
/// # Errors
///
/// Returns [`DiscoveryError::InvalidCredential`] if the token is rejected and
/// [`DiscoveryError::GitHubError`] if any listing request fails.
pub async fn discover_repositories(
    octocrab: &Octocrab,
    organization: &str,
    pattern: &str,
) -> Result<Vec<RepositoryRecord>, DiscoveryError> {
    let span = info_span!("discover", organization, pattern);

    async {
        verify_credentials(octocrab).await?;

        info!("Fetching repositories");
        let progress = Progress::spinner("Scanning repos (0 matches)");
        let mut matches = Vec::new();

        let mut page = octocrab
            .orgs(organization)
            .list_repos()
            .per_page(RESULTS_PER_PAGE)
            .send()
            .await?;

        loop {
            let descriptors = page
                .items
                .iter()
                .map(|repo| RepositoryDescriptor::from_model(repo, organization));
            collect_matches(descriptors, pattern, &mut matches, &progress);

            if page.next.is_none() {
                break;
            }

            // Check rate limit before next page
            ensure_core_rate_limit(octocrab).await?;

            match octocrab.get_page::<Repository>(&page.next).await? {
                Some(next_page) => page = next_page,
                None => break,
            }
        }

        progress.finish_clear();
        info!(count = matches.len(), "Discovery complete");
        for record in &matches {
            debug!(repo = %record.name, "Matched repository");
        }
        Ok(matches)
    }
    .instrument(span)
    .await
}

/// Fails fast with [`DiscoveryError::InvalidCredential`] on a rejected token.
async fn verify_credentials(octocrab: &Octocrab) -> Result<(), DiscoveryError> {
    match octocrab.current().user().await {
        Ok(user) => {
            debug!(login = %user.login, "Authenticated with GitHub");
            Ok(())
        }
        Err(octocrab::Error::GitHub { source, .. }) if source.status_code.as_u16() == 401 => {
            Err(DiscoveryError::InvalidCredential)
        }
        Err(e) => Err(e.into()),
    }
}

/// Appends every descriptor whose name starts with `pattern` to `matches`.
///
/// Ticks `progress` once per descriptor scanned.
pub fn collect_matches<I>(
    descriptors: I,
    pattern: &str,
    matches: &mut Vec<RepositoryRecord>,
    progress: &Progress,
) where
    I: IntoIterator<Item = RepositoryDescriptor>,
{
    for descriptor in descriptors {
        progress.inc(1);
        if descriptor.name.starts_with(pattern) {
            matches.push(descriptor.into_record());
            progress.set_message(format!("Scanning repos ({} matches)", matches.len()));
        }
    }
}
