use log::{error, info, warn};
use std::fs;
use std::path::Path;
use std::process;

/// Runtime directories that will be created if missing
const RUNTIME_DIRS: &[&str] = &["website", "website/db"];

/// Directories expected under a local content root
const SITE_DIRS: &[&str] = &[
    "pages",
    "static",
    "images",
    "images/SlideShow",
    "images/projects",
];

/// Shared fragments the composer injects into every page that carries a
/// placeholder for them. Pages still render without these, so missing
/// fragments are a warning, not a hard error.
const SITE_FRAGMENTS: &[&str] = &["header.html", "footer.html"];

/// Verify/create the directories the server itself writes to.
/// Aborts if the database directory cannot be created or written.
pub fn ensure_runtime_dirs() {
    info!("SSA site boot check starting...");

    let mut errors = 0u32;

    for dir in RUNTIME_DIRS {
        let path = Path::new(dir);
        if !path.exists() {
            match fs::create_dir_all(path) {
                Ok(_) => info!("  Created directory: {}", dir),
                Err(e) => {
                    error!("  FAILED to create directory {}: {}", dir, e);
                    errors += 1;
                }
            }
        }
    }

    // Database directory writable
    let db_dir = Path::new("website/db");
    if db_dir.exists() {
        let test_file = db_dir.join(".write_test");
        match fs::write(&test_file, "test") {
            Ok(_) => {
                let _ = fs::remove_file(&test_file);
            }
            Err(e) => {
                error!("  Database directory not writable: {}", e);
                errors += 1;
            }
        }
    }

    if errors > 0 {
        error!("Boot check FAILED: {} error(s). Aborting.", errors);
        process::exit(1);
    }
}

/// Check the layout of a local content root. Every problem found here
/// degrades a single component at render time rather than the whole site,
/// so this only warns.
pub fn check_site_layout(root: &Path) {
    let mut warnings = 0u32;

    for dir in SITE_DIRS {
        let path = root.join(dir);
        if !path.exists() {
            match fs::create_dir_all(&path) {
                Ok(_) => info!("  Created directory: {}", path.display()),
                Err(e) => {
                    warn!("  Could not create {}: {}", path.display(), e);
                    warnings += 1;
                }
            }
        }
    }

    for fragment in SITE_FRAGMENTS {
        if !root.join(fragment).exists() {
            warn!(
                "  Missing fragment: {} (placeholder containers will stay empty)",
                fragment
            );
            warnings += 1;
        }
    }

    if !root.join("projects.json").exists() {
        warn!("  Missing projects.json (project views will show a load error)");
        warnings += 1;
    }

    let pages = root.join("pages");
    let has_pages = fs::read_dir(&pages)
        .map(|entries| {
            entries.filter_map(|e| e.ok()).any(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "html")
                    .unwrap_or(false)
            })
        })
        .unwrap_or(false);
    if !has_pages {
        warn!("  No page documents in {} (all routes will 404)", pages.display());
        warnings += 1;
    }

    if warnings > 0 {
        warn!(
            "Boot check passed with {} warning(s). Some components may not render.",
            warnings
        );
    } else {
        info!("Boot check passed. All systems go.");
    }
}
