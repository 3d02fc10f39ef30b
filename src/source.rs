use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Where site resources (page documents, fragments, the project catalog,
/// image assets) live. A root starting with a scheme is fetched over HTTP;
/// anything else is a directory on disk.
#[derive(Debug, Clone)]
pub enum ContentSource {
    Local(PathBuf),
    Remote(String),
}

impl ContentSource {
    pub fn from_root(root: &str) -> Self {
        if root.starts_with("http://") || root.starts_with("https://") {
            ContentSource::Remote(root.trim_end_matches('/').to_string())
        } else {
            ContentSource::Local(PathBuf::from(root))
        }
    }

    /// Retrieve a text resource by relative path. The error carries enough
    /// context to log; callers decide whether the failure is surfaced
    /// in-page or the target container is simply left unchanged.
    pub fn fetch_text(&self, rel: &str) -> Result<String, String> {
        match self {
            ContentSource::Local(root) => {
                fs::read_to_string(root.join(rel)).map_err(|e| format!("{}: {}", rel, e))
            }
            ContentSource::Remote(base) => {
                let client = reqwest::blocking::Client::builder()
                    .timeout(Duration::from_secs(10))
                    .build()
                    .map_err(|e| format!("HTTP client error: {}", e))?;
                let resp = client
                    .get(format!("{}/{}", base, rel))
                    .send()
                    .map_err(|e| format!("{}: {}", rel, e))?;
                if !resp.status().is_success() {
                    return Err(format!("{}: HTTP {}", rel, resp.status()));
                }
                resp.text().map_err(|e| format!("{}: {}", rel, e))
            }
        }
    }

    /// Existence check for a candidate resource. Transport errors, timeouts,
    /// and non-success statuses all read as absence, never as an error.
    pub fn probe(&self, rel: &str, timeout: Duration) -> bool {
        match self {
            ContentSource::Local(root) => root.join(rel).is_file(),
            ContentSource::Remote(base) => {
                let client = match reqwest::blocking::Client::builder().timeout(timeout).build() {
                    Ok(c) => c,
                    Err(_) => return false,
                };
                client
                    .get(format!("{}/{}", base, rel))
                    .send()
                    .map(|resp| resp.status().is_success())
                    .unwrap_or(false)
            }
        }
    }
}
