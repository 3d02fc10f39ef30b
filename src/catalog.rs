//! Project catalog loading and the card view-models behind the three
//! project views.

use log::error;

use crate::compose;
use crate::models::project::{Project, ProjectCatalog};
use crate::render;
use crate::source::ContentSource;

/// Fetch the shared catalog. One fetch per invocation, no caching: page
/// views always reflect the current `projects.json`.
pub fn load_catalog(source: &ContentSource) -> Result<ProjectCatalog, String> {
    let body = source.fetch_text("projects.json")?;
    serde_json::from_str(&body).map_err(|e| format!("projects.json: {}", e))
}

#[derive(Debug, Clone)]
pub struct FilterControl {
    pub value: String,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct ProjectCard {
    pub project: Project,
    pub visible: bool,
}

/// The completed-projects view: the full card list plus its filter
/// controls. Filtering toggles card visibility in place; the card list
/// is never re-fetched or rebuilt.
#[derive(Debug, Clone)]
pub struct CompletedView {
    pub controls: Vec<FilterControl>,
    pub cards: Vec<ProjectCard>,
}

impl CompletedView {
    /// Build the view with the wildcard control active and every card
    /// visible. Controls are the wildcard plus one per distinct category,
    /// in order of first appearance.
    pub fn new(projects: &[Project]) -> Self {
        let mut controls = vec![FilterControl {
            value: "all".to_string(),
            label: "All".to_string(),
            active: true,
        }];

        for project in projects {
            if !project.category.is_empty()
                && !controls.iter().any(|c| c.value == project.category)
            {
                controls.push(FilterControl {
                    value: project.category.clone(),
                    label: project.category.clone(),
                    active: false,
                });
            }
        }

        let cards = projects
            .iter()
            .cloned()
            .map(|project| ProjectCard {
                project,
                visible: true,
            })
            .collect();

        CompletedView { controls, cards }
    }

    /// Activate one filter control and show only matching cards, or all
    /// cards for the wildcard. A value with no control falls back to the
    /// wildcard, keeping the one-active-control invariant.
    pub fn apply_filter(&mut self, value: &str) {
        let known = self.controls.iter().any(|c| c.value == value);
        let value = if known { value } else { "all" };

        for control in &mut self.controls {
            control.active = control.value == value;
        }
        for card in &mut self.cards {
            card.visible = value == "all" || card.project.category == value;
        }
    }

    pub fn visible_count(&self) -> usize {
        self.cards.iter().filter(|c| c.visible).count()
    }
}

const VIEW_CONTAINERS: &[&str] = &[
    "homepage-projects-grid",
    "completed-projects-grid",
    "ongoing-projects-list",
];

/// Render the catalog views into whichever containers the page carries.
/// The catalog is fetched only when at least one container is present;
/// a failed fetch puts a visible error placeholder in each dependent
/// container and renders no cards.
pub fn inject_views(page_html: &str, source: &ContentSource, filter: Option<&str>) -> String {
    let mut html = page_html.to_string();

    if !VIEW_CONTAINERS
        .iter()
        .any(|id| compose::has_element(&html, id))
    {
        return html;
    }

    match load_catalog(source) {
        Ok(catalog) => {
            if let Some(updated) = compose::set_content(
                &html,
                "homepage-projects-grid",
                &render::render_featured_grid(catalog.featured()),
            ) {
                html = updated;
            }

            if compose::has_element(&html, "completed-projects-grid") {
                let mut view = CompletedView::new(&catalog.completed);
                if let Some(value) = filter {
                    view.apply_filter(value);
                }
                if let Some(updated) = compose::set_content(
                    &html,
                    "completed-projects-grid",
                    &render::render_completed_view(&view),
                ) {
                    html = updated;
                }
            }

            if let Some(updated) = compose::set_content(
                &html,
                "ongoing-projects-list",
                &render::render_ongoing_list(&catalog.ongoing),
            ) {
                html = updated;
            }
        }
        Err(e) => {
            error!("Failed to load project catalog: {}", e);
            let placeholder =
                render::error_placeholder("Could not load projects. Please try again later.");
            for id in VIEW_CONTAINERS {
                if let Some(updated) = compose::set_content(&html, id, &placeholder) {
                    html = updated;
                }
            }
        }
    }

    html
}
