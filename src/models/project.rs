use serde::{Deserialize, Serialize};

/// One entry in the shared project catalog. Catalog entries are read-only:
/// the engine never writes `projects.json`, it only renders from it.
/// Every field defaults so a sparse entry renders as an incomplete card
/// instead of sinking the whole catalog.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub location: String,
    #[serde(rename = "type")]
    pub project_type: String,
    pub status: String,
    pub completion: String,
    /// 0–100; clamped at render time for the progress bar width
    pub progress: i64,
    pub hero_image: String,
    pub asset_folder: String,
}

impl Project {
    /// Resolve the card's hero image reference. A reference that already
    /// looks like a path is used as-is; a bare file name is composed with
    /// the project's asset folder; anything less resolves to an empty
    /// reference and the card renders without a background image.
    pub fn hero_image_url(&self) -> String {
        if self.hero_image.contains('/') {
            self.hero_image.clone()
        } else if !self.hero_image.is_empty() && !self.asset_folder.is_empty() {
            format!("images/projects/{}/{}", self.asset_folder, self.hero_image)
        } else {
            String::new()
        }
    }

    /// Link to the details page, parameterized by the project id.
    /// The id is URL-encoded; an absent id yields an empty query value.
    pub fn details_href(&self) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(self.id.as_bytes()).collect();
        format!("projects-details.html?id={}", encoded)
    }
}

/// The shared catalog consumed by the homepage, completed, and ongoing
/// views. Loaded fresh per page view; never cached across requests.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ProjectCatalog {
    pub completed: Vec<Project>,
    pub ongoing: Vec<Project>,
}

impl ProjectCatalog {
    /// The homepage shows the first three completed projects, in catalog order.
    pub fn featured(&self) -> &[Project] {
        &self.completed[..self.completed.len().min(3)]
    }
}
