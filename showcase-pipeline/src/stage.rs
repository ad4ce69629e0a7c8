//! Pipeline stage identifiers.

use std::fmt;

/// One of the four sequential pipeline phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Repository discovery.
    Fetch,
    /// Name decomposition.
    Parse,
    /// Sketch retrieval.
    Sketches,
    /// Page generation.
    Pages,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Stage; 4] = [Stage::Fetch, Stage::Parse, Stage::Sketches, Stage::Pages];

    /// Returns the CLI subcommand running this stage.
    #[must_use]
    pub fn command(self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Parse => "parse",
            Self::Sketches => "sketches",
            Self::Pages => "pages",
        }
    }

    /// Returns the 1-based position of the stage.
    #[must_use]
    pub fn number(self) -> usize {
        match self {
            Self::Fetch => 1,
            Self::Parse => 2,
            Self::Sketches => 3,
            Self::Pages => 4,
        }
    }

    /// Returns the stages whose output this stage expects to find.
    #[must_use]
    pub fn upstream(self) -> &'static [Stage] {
        let end = self.number() - 1;
        &Self::ALL[..end]
    }

    /// Returns the dataset columns this stage reads.
    #[must_use]
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            Self::Fetch => &[],
            Self::Parse => &["name"],
            Self::Sketches => &["name", "full_name", "group_number"],
            Self::Pages => &[
                "name",
                "html_url",
                "description",
                "group_number",
                "project_name",
                "sketch_path",
            ],
        }
    }

    /// Describes what has to be run before this stage, e.g.
    /// "run `showcase fetch` (stage 1) and `showcase parse` (stage 2) first".
    #[must_use]
    pub fn prerequisite_hint(self) -> String {
        let steps: Vec<String> = self
            .upstream()
            .iter()
            .map(|stage| format!("`showcase {}` (stage {})", stage.command(), stage.number()))
            .collect();

        let joined = match steps.as_slice() {
            [] => return "no earlier stage is required".to_string(),
            [only] => only.clone(),
            [first, second] => format!("{first} and {second}"),
            [rest @ .., last] => format!("{}, and {last}", rest.join(", ")),
        };

        format!("run {joined} first")
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_follows_execution_order() {
        assert!(Stage::Fetch.upstream().is_empty());
        assert_eq!(Stage::Parse.upstream(), &[Stage::Fetch]);
        assert_eq!(
            Stage::Pages.upstream(),
            &[Stage::Fetch, Stage::Parse, Stage::Sketches]
        );
    }

    #[test]
    fn prerequisite_hint_names_every_upstream_stage() {
        assert_eq!(
            Stage::Parse.prerequisite_hint(),
            "run `showcase fetch` (stage 1) first"
        );
        assert_eq!(
            Stage::Sketches.prerequisite_hint(),
            "run `showcase fetch` (stage 1) and `showcase parse` (stage 2) first"
        );
        assert_eq!(
            Stage::Pages.prerequisite_hint(),
            "run `showcase fetch` (stage 1), `showcase parse` (stage 2), \
             and `showcase sketches` (stage 3) first"
        );
    }
}
