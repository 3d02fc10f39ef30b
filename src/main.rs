#[macro_use]
extern crate rocket;

use std::sync::Arc;

use rocket::fs::FileServer;
use rocket::response::content::RawHtml;

mod boot;
mod catalog;
mod compose;
mod db;
mod models;
mod render;
mod routes;
mod slideshow;
mod source;


use models::settings::Setting;
use slideshow::{Slideshow, SlideshowConfig, SlideshowTicker};
use source::ContentSource;

#[catch(404)]
fn not_found() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>404</h1><p>Page not found.</p><a href='/'>← Home</a></body></html>".to_string())
}

#[catch(500)]
fn server_error() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>500</h1><p>Internal server error.</p><a href='/'>← Home</a></body></html>".to_string())
}

#[launch]
fn rocket() -> _ {
    env_logger::init();

    // Boot check: verify/create runtime directories before anything opens the DB
    boot::ensure_runtime_dirs();

    let pool = db::init_pool().expect("Failed to initialize database pool");
    db::run_migrations(&pool).expect("Failed to run database migrations");
    db::seed_defaults(&pool).expect("Failed to seed default settings");

    let content_root = Setting::get_or(&pool, "content_root", "website/site");
    let source = ContentSource::from_root(&content_root);

    if let ContentSource::Local(root) = &source {
        boot::check_site_layout(root);
    }

    // Slideshow discovery runs once, before launch. The rotation task is
    // started by the ticker fairing at liftoff.
    let config = SlideshowConfig::from_settings(&pool);
    let slides = slideshow::discover(&source, &config);
    let show = Arc::new(Slideshow::new(slides));

    let mut rocket = rocket::build()
        .manage(pool)
        .manage(source.clone())
        .manage(show)
        .attach(SlideshowTicker)
        .mount("/", routes::public::routes())
        .register("/", catchers![not_found, server_error]);

    if let ContentSource::Local(root) = &source {
        let images = root.join("images");
        if images.is_dir() {
            rocket = rocket.mount("/images", FileServer::from(images));
        }
        let static_dir = root.join("static");
        if static_dir.is_dir() {
            rocket = rocket.mount("/static", FileServer::from(static_dir));
        }
    }

    rocket
}
