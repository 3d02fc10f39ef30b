//! Page composition: injects shared fragments into placeholder containers
//! and marks the active navigation link.
//!
//! All mutation is string surgery over the page document. Elements are
//! located by `id="..."` with double-quoted attributes, and placeholder
//! containers are leaf elements; that is the binding contract between the
//! engine and the markup.

use log::error;

use crate::source::ContentSource;

/// Page file name → nav link id. Unmapped names fall back to the home entry.
const NAV_LINKS: &[(&str, &str)] = &[
    ("index.html", "nav-home"),
    ("services.html", "nav-services"),
    ("completed.html", "nav-completed"),
    ("ongoing.html", "nav-ongoing"),
    ("about.html", "nav-about"),
    ("", "nav-home"),
];

pub fn nav_link_for(page: &str) -> &'static str {
    NAV_LINKS
        .iter()
        .find(|(name, _)| *name == page)
        .map(|(_, link_id)| *link_id)
        .unwrap_or("nav-home")
}

struct ElementSpan {
    open_start: usize,
    /// Index just past the opening tag's `>`
    open_end: usize,
    /// Index of the closing tag's `<`
    inner_end: usize,
}

fn find_element(html: &str, id: &str) -> Option<ElementSpan> {
    let needle = format!("id=\"{}\"", id);
    let attr_pos = html.find(&needle)?;
    let open_start = html[..attr_pos].rfind('<')?;
    let open_end = open_start + html[open_start..].find('>')? + 1;
    if attr_pos >= open_end {
        // The id text was not inside a tag
        return None;
    }

    let tag: String = html[open_start + 1..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if tag.is_empty() {
        return None;
    }

    let close = format!("</{}>", tag);
    let inner_end = open_end + html[open_end..].find(&close)?;
    Some(ElementSpan {
        open_start,
        open_end,
        inner_end,
    })
}

pub fn has_element(html: &str, id: &str) -> bool {
    find_element(html, id).is_some()
}

/// Replace the content of the element with the given id.
/// Returns `None` when the element is absent so callers can skip silently.
pub fn set_content(html: &str, id: &str, content: &str) -> Option<String> {
    let el = find_element(html, id)?;
    let mut out = String::with_capacity(html.len() + content.len());
    out.push_str(&html[..el.open_end]);
    out.push_str(content);
    out.push_str(&html[el.inner_end..]);
    Some(out)
}

/// Byte range of the value of a double-quoted `class` attribute within an
/// opening tag, skipping lookalikes such as `data-class`.
fn class_attr_range(tag: &str) -> Option<(usize, usize)> {
    let mut search = 0;
    while let Some(found) = tag[search..].find("class=\"") {
        let pos = search + found;
        let preceded_by_space = tag[..pos]
            .chars()
            .last()
            .map(|c| c.is_whitespace())
            .unwrap_or(false);
        if preceded_by_space {
            let start = pos + "class=\"".len();
            let end = start + tag[start..].find('"')?;
            return Some((start, end));
        }
        search = pos + 1;
    }
    None
}

pub fn has_class(html: &str, id: &str, class: &str) -> bool {
    let el = match find_element(html, id) {
        Some(el) => el,
        None => return false,
    };
    let tag = &html[el.open_start..el.open_end];
    match class_attr_range(tag) {
        Some((start, end)) => tag[start..end].split_whitespace().any(|t| t == class),
        None => false,
    }
}

/// Add a class token to the element with the given id. Idempotent.
/// Returns `None` when the element is absent.
pub fn add_class(html: &str, id: &str, class: &str) -> Option<String> {
    let el = find_element(html, id)?;
    let tag = &html[el.open_start..el.open_end];

    let new_tag = match class_attr_range(tag) {
        Some((start, end)) => {
            let value = &tag[start..end];
            if value.split_whitespace().any(|t| t == class) {
                return Some(html.to_string());
            }
            let sep = if value.trim().is_empty() { "" } else { " " };
            format!("{}{}{}{}", &tag[..end], sep, class, &tag[end..])
        }
        None => {
            let insert = if tag.ends_with("/>") {
                tag.len() - 2
            } else {
                tag.len() - 1
            };
            format!(
                "{} class=\"{}\"{}",
                tag[..insert].trim_end(),
                class,
                &tag[insert..]
            )
        }
    };

    let mut out = String::with_capacity(html.len() + class.len() + 9);
    out.push_str(&html[..el.open_start]);
    out.push_str(&new_tag);
    out.push_str(&html[el.open_end..]);
    Some(out)
}

/// Remove a class token from the element with the given id. A missing
/// class attribute or token is a no-op. Returns `None` when the element
/// is absent.
pub fn remove_class(html: &str, id: &str, class: &str) -> Option<String> {
    let el = find_element(html, id)?;
    let tag = &html[el.open_start..el.open_end];

    let (start, end) = match class_attr_range(tag) {
        Some(range) => range,
        None => return Some(html.to_string()),
    };

    let value = &tag[start..end];
    if !value.split_whitespace().any(|t| t == class) {
        return Some(html.to_string());
    }

    let kept: Vec<&str> = value.split_whitespace().filter(|t| *t != class).collect();
    let new_tag = format!("{}{}{}", &tag[..start], kept.join(" "), &tag[end..]);

    let mut out = String::with_capacity(html.len());
    out.push_str(&html[..el.open_start]);
    out.push_str(&new_tag);
    out.push_str(&html[el.open_end..]);
    Some(out)
}

/// Mark exactly one navigation link active for the given page file name.
/// Clears the marker from every mapped link first, so repeated calls
/// converge on the same single active link.
pub fn set_active_nav(html: &str, page: &str) -> String {
    let target = nav_link_for(page);
    let mut out = html.to_string();
    for (_, link_id) in NAV_LINKS {
        if let Some(updated) = remove_class(&out, link_id, "active") {
            out = updated;
        }
    }
    if let Some(updated) = add_class(&out, target, "active") {
        out = updated;
    }
    out
}

/// Inject the shared header and footer fragments into their placeholder
/// containers. Absent containers are skipped silently; a failed fetch is
/// logged and leaves the container unchanged. The home page additionally
/// gets the transparent-header presentation flag, and the navigation
/// highlighter runs once the header fragment is in place.
pub fn compose_page(source: &ContentSource, page: &str, page_html: &str) -> String {
    let mut html = page_html.to_string();

    if has_element(&html, "header-placeholder") {
        match source.fetch_text("header.html") {
            Ok(fragment) => {
                if let Some(updated) = set_content(&html, "header-placeholder", &fragment) {
                    html = updated;
                }
                if page.is_empty() || page == "index.html" {
                    if let Some(updated) = add_class(&html, "header-placeholder", "transparent-header")
                    {
                        html = updated;
                    }
                }
                html = set_active_nav(&html, page);
            }
            Err(e) => error!("Failed to load header.html: {}", e),
        }
    }

    if has_element(&html, "footer-placeholder") {
        match source.fetch_text("footer.html") {
            Ok(fragment) => {
                if let Some(updated) = set_content(&html, "footer-placeholder", &fragment) {
                    html = updated;
                }
            }
            Err(e) => error!("Failed to load footer.html: {}", e),
        }
    }

    html
}
