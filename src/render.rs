use crate::catalog::CompletedView;
use crate::models::project::Project;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Visible in-page placeholder for a failed resource load.
pub fn error_placeholder(message: &str) -> String {
    format!(r#"<p class="load-error">{}</p>"#, html_escape(message))
}

/// One project card. Cards link to the details page and carry their
/// category so the filter can toggle visibility without a re-render.
fn render_card(project: &Project, visible: Option<bool>) -> String {
    let mut card_class = String::from("project-card");
    if visible == Some(false) {
        card_class.push_str(" hidden");
    }

    let image = project.hero_image_url();
    let image_style = if image.is_empty() {
        String::new()
    } else {
        format!(r#" style="background-image:url('{}')""#, html_escape(&image))
    };

    let mut meta = html_escape(&project.location);
    if !project.project_type.is_empty() {
        if !meta.is_empty() {
            meta.push_str(" · ");
        }
        meta.push_str(&html_escape(&project.project_type));
    }

    let mut status = html_escape(&project.status);
    if !project.completion.is_empty() {
        if !status.is_empty() {
            status.push_str(" · ");
        }
        status.push_str(&html_escape(&project.completion));
    }

    format!(
        r#"<a class="{card_class}" href="{href}" data-category="{category}">
    <div class="project-card-image"{image_style}></div>
    <div class="project-card-body">
        <h3>{title}</h3>
        <p class="project-card-meta">{meta}</p>
        <p class="project-card-desc">{description}</p>
        <span class="project-card-status">{status}</span>
    </div>
</a>
"#,
        card_class = card_class,
        href = project.details_href(),
        category = html_escape(&project.category),
        image_style = image_style,
        title = html_escape(&project.title),
        meta = meta,
        description = html_escape(&project.description),
        status = status,
    )
}

/// Homepage featured grid: the first three completed projects.
pub fn render_featured_grid(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "<p>No projects to show yet.</p>".to_string();
    }

    let mut html = String::new();
    for project in projects {
        html.push_str(&render_card(project, None));
    }
    html
}

/// Completed grid: filter controls followed by every card, with hidden
/// cards carrying the `hidden` class and exactly one control active.
pub fn render_completed_view(view: &CompletedView) -> String {
    let mut html = String::from(r#"<div class="project-filters">"#);
    for control in &view.controls {
        let class = if control.active {
            "filter-btn active"
        } else {
            "filter-btn"
        };
        html.push_str(&format!(
            r#"<button class="{}" data-filter="{}">{}</button>"#,
            class,
            html_escape(&control.value),
            html_escape(&control.label)
        ));
    }
    html.push_str("</div>\n");

    for card in &view.cards {
        html.push_str(&render_card(&card.project, Some(card.visible)));
    }
    html
}

/// Ongoing list: one row per project with a progress bar.
pub fn render_ongoing_list(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "<p>No ongoing projects right now.</p>".to_string();
    }

    let mut html = String::new();
    for project in projects {
        let progress = project.progress.clamp(0, 100);

        let mut meta = html_escape(&project.location);
        if !project.project_type.is_empty() {
            if !meta.is_empty() {
                meta.push_str(" · ");
            }
            meta.push_str(&html_escape(&project.project_type));
        }

        html.push_str(&format!(
            r#"<div class="ongoing-item">
    <a class="ongoing-title" href="{href}"><h3>{title}</h3></a>
    <p class="ongoing-meta">{meta}</p>
    <div class="progress-bar">
        <div class="progress-fill" style="width:{progress}%"></div>
        <span class="progress-label">{progress}%</span>
    </div>
</div>
"#,
            href = project.details_href(),
            title = html_escape(&project.title),
            meta = meta,
            progress = progress,
        ));
    }
    html
}
