use std::sync::Arc;

use rocket::form::Form;
use rocket::request::FlashMessage;
use rocket::response::content::RawHtml;
use rocket::response::{Flash, Redirect};
use rocket::State;

use crate::catalog;
use crate::compose;
use crate::db::DbPool;
use crate::models::inquiry::{Inquiry, InquiryForm};
use crate::render;
use crate::slideshow::Slideshow;
use crate::source::ContentSource;

pub fn routes() -> Vec<rocket::Route> {
    routes![homepage, page, contact_submit]
}

// ── Pages ──────────────────────────────────────────────

#[get("/?<filter>")]
pub fn homepage(
    source: &State<ContentSource>,
    show: &State<Arc<Slideshow>>,
    filter: Option<&str>,
    flash: Option<FlashMessage<'_>>,
) -> Option<RawHtml<String>> {
    serve_page(source, show, "index.html", filter, flash)
}

#[get("/<page>?<filter>", rank = 5)]
pub fn page(
    source: &State<ContentSource>,
    show: &State<Arc<Slideshow>>,
    page: &str,
    filter: Option<&str>,
    flash: Option<FlashMessage<'_>>,
) -> Option<RawHtml<String>> {
    if !page.ends_with(".html") || page.contains('/') {
        return None;
    }
    serve_page(source, show, page, filter, flash)
}

/// Load the page document, inject the shared fragments, then fill in
/// whichever component containers the page carries. Absent containers mean
/// the component is skipped; every failure degrades one container only.
fn serve_page(
    source: &ContentSource,
    show: &Slideshow,
    page: &str,
    filter: Option<&str>,
    flash: Option<FlashMessage<'_>>,
) -> Option<RawHtml<String>> {
    let document = match source.fetch_text(&format!("pages/{}", page)) {
        Ok(html) => html,
        Err(e) => {
            log::warn!("Page {} not served: {}", page, e);
            return None;
        }
    };

    let mut html = compose::compose_page(source, page, &document);

    if compose::has_element(&html, "slideshow-container") {
        if let Some(updated) = compose::set_content(&html, "slideshow-container", &show.render()) {
            html = updated;
        }
    }

    html = catalog::inject_views(&html, source, filter);

    if let Some(flash) = flash {
        let (container, class) = if flash.kind() == "success" {
            ("form-success", "form-message success")
        } else {
            ("form-error", "form-message error")
        };
        let message = format!(
            r#"<p class="{}">{}</p>"#,
            class,
            render::html_escape(flash.message())
        );
        if let Some(updated) = compose::set_content(&html, container, &message) {
            html = updated;
        }
    }

    Some(RawHtml(html))
}

// ── Inquiry form ───────────────────────────────────────

#[post("/contact", data = "<form>")]
pub fn contact_submit(pool: &State<DbPool>, form: Form<InquiryForm>) -> Flash<Redirect> {
    let form = form.into_inner();

    // Only bounce back to a page we'd serve; anything else lands on home
    let back = if form.page.ends_with(".html") && !form.page.contains('/') {
        format!("/{}", form.page)
    } else {
        "/".to_string()
    };

    if let Err(message) = form.validate() {
        return Flash::error(Redirect::to(back), message);
    }

    match Inquiry::append(pool, form.to_inquiry()) {
        Ok(()) => Flash::success(
            Redirect::to(back),
            "Thank you! Your inquiry has been received.",
        ),
        Err(e) => {
            log::error!("Failed to save inquiry: {}", e);
            Flash::error(
                Redirect::to(back),
                "Sorry, your inquiry could not be saved. Please try again.",
            )
        }
    }
}
