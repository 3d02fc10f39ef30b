use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::info;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::tokio;
use rocket::{Orbit, Rocket};

use crate::db::DbPool;
use crate::models::settings::Setting;
use crate::render::html_escape;
use crate::source::ContentSource;

/// Extensions tried per index, in order. The first that resolves wins.
pub const SLIDE_EXTENSIONS: &[&str] = &["jpg", "png", "webp"];

#[derive(Debug, Clone)]
pub struct SlideshowConfig {
    /// Upper bound on sequential indices to check
    pub max_check: u32,
    /// Consecutive fully-missed indices that end the scan
    pub stop_after_misses: u32,
    /// Indices that must be checked before the miss run may end the scan;
    /// guards against stopping on an initial gap
    pub min_checked: u32,
    pub probe_timeout: Duration,
}

impl SlideshowConfig {
    pub fn from_settings(pool: &DbPool) -> Self {
        SlideshowConfig {
            max_check: Setting::get_i64(pool, "slideshow_max_check").max(1) as u32,
            stop_after_misses: Setting::get_i64(pool, "slideshow_stop_after_misses").max(1) as u32,
            min_checked: Setting::get_i64(pool, "slideshow_min_checked").max(0) as u32,
            probe_timeout: Duration::from_millis(
                Setting::get_i64(pool, "slideshow_probe_timeout_ms").max(1) as u64,
            ),
        }
    }
}

/// Probe the conventional image sequence and collect whatever exists, in
/// discovery order. Probes within one index run sequentially; a timeout
/// counts as a miss. Runs once per process, so latency over correctness
/// of the found set is the wrong trade here.
pub fn discover(source: &ContentSource, config: &SlideshowConfig) -> Vec<String> {
    let mut slides = Vec::new();
    let mut miss_run = 0u32;

    for index in 1..=config.max_check {
        let mut found = false;
        for ext in SLIDE_EXTENSIONS {
            let rel = format!("images/SlideShow/image{}.{}", index, ext);
            if source.probe(&rel, config.probe_timeout) {
                slides.push(format!("/{}", rel));
                found = true;
                break;
            }
        }

        if found {
            miss_run = 0;
        } else {
            miss_run += 1;
            if miss_run >= config.stop_after_misses && index > config.min_checked {
                break;
            }
        }
    }

    info!("[slideshow] Discovered {} image(s)", slides.len());
    slides
}

#[derive(Debug, Default)]
struct SlideshowState {
    slides: Vec<String>,
    current: usize,
    /// Transient marker left by manual slide selection; cleared on the
    /// next automatic advance
    previous: Option<usize>,
}

/// Shared rotation state. The ticker task advances it on a fixed interval
/// for the lifetime of the process; there is no cancellation.
pub struct Slideshow {
    state: Mutex<SlideshowState>,
}

impl Slideshow {
    pub fn new(slides: Vec<String>) -> Self {
        Slideshow {
            state: Mutex::new(SlideshowState {
                slides,
                current: 0,
                previous: None,
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().unwrap().slides.is_empty()
    }

    pub fn slide_count(&self) -> usize {
        self.state.lock().unwrap().slides.len()
    }

    pub fn current_index(&self) -> usize {
        self.state.lock().unwrap().current
    }

    /// Advance to the next slide, wrapping, and clear any transient marker
    /// left by a manual selection.
    pub fn advance(&self) {
        let mut state = self.state.lock().unwrap();
        state.previous = None;
        if state.slides.is_empty() {
            return;
        }
        state.current = (state.current + 1) % state.slides.len();
    }

    /// Manual selection: jump to a slide and remember the one being left.
    pub fn select(&self, index: usize) {
        let mut state = self.state.lock().unwrap();
        if index >= state.slides.len() || index == state.current {
            return;
        }
        state.previous = Some(state.current);
        state.current = index;
    }

    pub fn has_previous_marker(&self) -> bool {
        self.state.lock().unwrap().previous.is_some()
    }

    /// Markup for the slideshow container: every discovered slide, the
    /// current one marked active. Zero slides renders a visible placeholder
    /// instead.
    pub fn render(&self) -> String {
        let state = self.state.lock().unwrap();

        if state.slides.is_empty() {
            return "<p>No slideshow images found in /images/SlideShow/</p>".to_string();
        }

        let mut html = String::new();
        for (index, src) in state.slides.iter().enumerate() {
            let mut class = String::from("slide-image");
            if index == state.current {
                class.push_str(" active");
            }
            if state.previous == Some(index) {
                class.push_str(" previous");
            }
            html.push_str(&format!(
                r#"<img class="{}" src="{}" alt="Slideshow image {}">"#,
                class,
                html_escape(src),
                index + 1
            ));
            html.push('\n');
        }
        html
    }
}

pub struct SlideshowTicker;

#[rocket::async_trait]
impl Fairing for SlideshowTicker {
    fn info(&self) -> Info {
        Info {
            name: "Slideshow Rotation",
            kind: Kind::Liftoff,
        }
    }

    async fn on_liftoff(&self, rocket: &Rocket<Orbit>) {
        let show = rocket
            .state::<Arc<Slideshow>>()
            .expect("Slideshow not found in managed state")
            .clone();

        if show.is_empty() {
            info!("[slideshow] No slides discovered, rotation disabled");
            return;
        }

        let pool = rocket
            .state::<DbPool>()
            .expect("DbPool not found in managed state")
            .clone();

        tokio::spawn(async move {
            loop {
                let interval = Setting::get_i64(&pool, "slideshow_interval_ms").max(250) as u64;
                tokio::time::sleep(Duration::from_millis(interval)).await;
                show.advance();
            }
        });

        info!("[slideshow] Rotation started");
    }
}
