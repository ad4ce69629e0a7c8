//! Page renderer.

use super::{PageError, ProjectPage};
use handlebars::{no_escape, Handlebars};
use serde_json::json;

/// Built-in Quarto listing page.
pub const DEFAULT_PAGE_TEMPLATE: &str = r#"---
title: "Group {{group}}"
subtitle: "{{subtitle}}"
description: |
  {{description}}
image: {{image}}
order: {{order}}
---

This page displays in the project listing grid.
"#;

/// Creates a configured Handlebars registry.
///
/// The registry is configured with:
/// - No HTML escaping (pages are Markdown with YAML frontmatter)
/// - Strict mode (catches missing variables)
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();

    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);

    hbs
}

/// Renders project pages from a Handlebars template.
///
/// Templates see `group`, `subtitle`, `description`, `image` and `order`.
pub struct PageRenderer {
    handlebars: Handlebars<'static>,
    template: String,
    placeholder_image: String,
}

impl PageRenderer {
    /// Creates a renderer using the built-in page template.
    #[must_use]
    pub fn new(placeholder_image: impl Into<String>) -> Self {
        Self::with_template(DEFAULT_PAGE_TEMPLATE, placeholder_image)
    }

    /// Creates a renderer using a custom template.
    #[must_use]
    pub fn with_template(
        template: impl Into<String>,
        placeholder_image: impl Into<String>,
    ) -> Self {
        Self {
            handlebars: create_handlebars_registry(),
            template: template.into(),
            placeholder_image: placeholder_image.into(),
        }
    }

    /// Renders one page.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render(&self, page: &ProjectPage) -> Result<String, PageError> {
        let data = json!({
            "group": page.label,
            "subtitle": page.project_name,
            "description": page.description_block(),
            "image": page.image(&self.placeholder_image),
            "order": page.order,
        });

        Ok(self.handlebars.render_template(&self.template, &data)?)
    }
}
