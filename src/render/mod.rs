// src/render/mod.rs
//! Server-side HTML for the project board.

use crate::board::{BoardState, View};
use crate::config::Config;
use crate::process::ProjectRecord;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub mod escape;

pub use escape::escape_html;

const TITLE: &str = "CICS BuildBoard";
const TAGLINE: &str = "Collaborate. Create. Code.";
const BANNER_TEXT: &str = "Currently Accepting Project Applications for Spring 26.";

const STYLE: &str = "\
body{margin:0;font-family:system-ui,sans-serif;background:#f5f6f8;color:#1d2330}\
.top-banner{display:flex;gap:1rem;align-items:center;justify-content:center;padding:.6rem;background:#881c1c;color:#fff}\
.top-banner a{color:#fff}\
.header{display:flex;justify-content:space-between;align-items:center;padding:1.5rem 2rem;background:#fff}\
.nav-links{display:flex;gap:.75rem}\
.nav-button{padding:.5rem 1rem;border-radius:6px;background:#881c1c;color:#fff;text-decoration:none}\
.main-content{max-width:1100px;margin:0 auto;padding:1.5rem}\
.projects-grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(280px,1fr));gap:1rem}\
.project-card{background:#fff;border-radius:8px;padding:1rem;box-shadow:0 1px 3px rgba(0,0,0,.1)}\
.campus-badge{font-size:.8rem;padding:.1rem .5rem;border-radius:999px;background:#eee}\
.footer{text-align:center;padding:1.5rem;color:#666}";

/// Outbound links and per-request toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    pub join_url: String,
    pub propose_url: String,
    pub show_banner: bool,
}

impl PageOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            join_url: config.join_url.to_string(),
            propose_url: config.propose_url.to_string(),
            show_banner: true,
        }
    }

    pub fn with_banner(mut self, show: bool) -> Self {
        self.show_banner = show;
        self
    }
}

/// Output of `buildboard render`.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Html,
    Json,
}

pub fn render_output(state: &BoardState, options: &PageOptions, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Html => Ok(render_page(state, options)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(state).context("serializing board state")
        }
    }
}

/// Write rendered output to `path`, creating missing parent directories.
pub fn write_output(path: &Path, body: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(path, body).with_context(|| format!("writing {}", path.display()))
}

fn external_link(out: &mut String, href: &str, class: &str, label: &str) {
    out.push_str(&format!(
        r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="{}">{}</a>"#,
        escape_html(href),
        class,
        escape_html(label)
    ));
}

fn render_banner(out: &mut String, options: &PageOptions) {
    out.push_str(r#"<div class="top-banner">"#);
    out.push_str(&format!("<span>{}</span>", escape_html(BANNER_TEXT)));
    external_link(out, &options.propose_url, "banner-link", "Apply now →");
    out.push_str(r#"<a href="?banner=hidden" class="close-btn" aria-label="Dismiss banner">×</a>"#);
    out.push_str("</div>");
}

fn render_header(out: &mut String, options: &PageOptions) {
    out.push_str(r#"<header class="header"><div class="header-content">"#);
    out.push_str(&format!(r#"<h1>{}</h1><p class="subtitle">{}</p>"#, TITLE, TAGLINE));
    out.push_str(r#"</div><nav class="nav-links">"#);
    external_link(out, &options.join_url, "nav-button interest-button", "Join a Project");
    external_link(out, &options.propose_url, "nav-button proposal-button", "Propose a Project");
    out.push_str("</nav></header>");
}

fn render_about(out: &mut String) {
    out.push_str(
        r#"<section class="about-section"><h2>About the Program</h2><div class="about-content"><div class="about-text">
<p>This project board is run under the <strong>MUSIC (Manning Undergraduate Student Impact Council)</strong> Tech and Innovation Subcommittee, working closely with <strong>Dean Keith Marzullo</strong>.</p>
<p>We encourage professors, students, and the UMass community to propose new projects or join a project team. This is a great way to build skills and gain project-based experience for students, and an excellent opportunity for professors from various departments to collaborate on innovative initiatives.</p>
<p class="contact-note"><strong>Note:</strong> You will be contacted by email when you are selected for a project.</p>
</div><div class="about-image"><div class="image-placeholder"><p>📸</p><p class="caption">Tech Team with Dean Keith Marzullo</p><p class="tbd">(Photo TBD)</p></div></div></div></section>"#,
    );
}

fn render_card(out: &mut String, project: &ProjectRecord, options: &PageOptions) {
    out.push_str(&format!(
        r#"<div class="project-card" id="{}"><div class="project-header"><h3>{}</h3><span class="campus-badge">{}</span></div>"#,
        escape_html(&project.id),
        escape_html(&project.name),
        escape_html(&project.campus)
    ));
    if let Some(org) = &project.organization {
        out.push_str(&format!(
            r#"<div class="project-org"><span class="org-icon">🏛️</span><span class="org-name">{}</span></div>"#,
            escape_html(org)
        ));
    }
    out.push_str(&format!(
        r#"<p class="project-description">{}</p>"#,
        escape_html(&project.description)
    ));
    external_link(out, &options.join_url, "interest-link", "Join This Project →");
    out.push_str("</div>");
}

fn render_projects(out: &mut String, state: &BoardState, options: &PageOptions) {
    out.push_str(r#"<section class="projects-section"><h2>Available Projects</h2>"#);
    match state.view() {
        View::Error(msg) => {
            out.push_str(&format!(
                r#"<div class="error-message"><h3>⚠️ Error</h3><p>{}</p></div>"#,
                escape_html(msg)
            ));
        }
        View::Loading => out.push_str(
            r#"<div class="loading-state"><div class="spinner"></div><p>Loading available projects...</p></div>"#,
        ),
        View::Empty => out.push_str(
            r#"<div class="empty-state"><h3>No Projects Available Yet</h3><p>Check back soon for exciting collaboration opportunities!</p><p class="hint">Have an idea? Click "Propose a Project" above to get started.</p></div>"#,
        ),
        View::Projects(projects) => {
            out.push_str(r#"<div class="projects-grid">"#);
            for project in projects {
                render_card(out, project, options);
            }
            out.push_str("</div>");
        }
    }
    out.push_str("</section>");
}

fn render_footer(out: &mut String, state: &BoardState) {
    out.push_str(&format!(r#"<footer class="footer"><p>© 2025 {} | {}</p>"#, TITLE, TAGLINE));
    if let Some(ts) = state.last_fetch {
        out.push_str(&format!(
            r#"<p class="last-updated">Last updated <time datetime="{}">{}</time></p>"#,
            ts.to_rfc3339(),
            ts.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    out.push_str("</footer>");
}

/// Full HTML document for one board snapshot.
pub fn render_page(state: &BoardState, options: &PageOptions) -> String {
    let mut out = String::with_capacity(8 * 1024);
    out.push_str(&format!(
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{}</title><style>{}</style></head><body><div class="app">"#,
        TITLE, STYLE
    ));
    if options.show_banner {
        render_banner(&mut out, options);
    }
    render_header(&mut out, options);
    out.push_str(r#"<main class="main-content">"#);
    render_about(&mut out);
    render_projects(&mut out, state, options);
    out.push_str("</main>");
    render_footer(&mut out, state);
    out.push_str("</div></body></html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::FETCH_ERROR_MESSAGE;
    use chrono::{TimeZone, Utc};
    use scraper::{Html, Selector};

    fn options() -> PageOptions {
        PageOptions::from_config(&Config::default())
    }

    fn project(id: &str, name: &str, org: Option<&str>) -> ProjectRecord {
        ProjectRecord {
            id: id.to_string(),
            name: name.to_string(),
            description: "Builds things".to_string(),
            campus: "Amherst".to_string(),
            organization: org.map(str::to_string),
        }
    }

    fn loaded(projects: Vec<ProjectRecord>) -> BoardState {
        BoardState {
            loading: false,
            error: None,
            projects,
            last_fetch: Some(Utc.with_ymd_and_hms(2025, 2, 1, 9, 30, 0).unwrap()),
        }
    }

    fn select_texts(doc: &Html, css: &str) -> Vec<String> {
        let sel = Selector::parse(css).unwrap();
        doc.select(&sel)
            .map(|e| e.text().collect::<String>())
            .collect()
    }

    #[test]
    fn test_cards_rendered_in_order() {
        let state = loaded(vec![
            project("project-0-1", "Solar Tracker", None),
            project("project-1-1", "Robot Arm", Some("Robotics Club")),
        ]);
        let doc = Html::parse_document(&render_page(&state, &options()));

        assert_eq!(select_texts(&doc, ".project-card h3"), ["Solar Tracker", "Robot Arm"]);
        assert_eq!(select_texts(&doc, ".org-name"), ["Robotics Club"]);
        assert_eq!(select_texts(&doc, ".campus-badge"), ["Amherst", "Amherst"]);
        assert_eq!(select_texts(&doc, ".interest-link").len(), 2);
        assert!(select_texts(&doc, ".empty-state").is_empty());
        assert_eq!(select_texts(&doc, ".last-updated"), ["Last updated 2025-02-01 09:30 UTC"]);
    }

    #[test]
    fn test_card_links_point_at_join_form() {
        let state = loaded(vec![project("project-0-1", "A", None)]);
        let doc = Html::parse_document(&render_page(&state, &options()));
        let sel = Selector::parse(".interest-link").unwrap();
        let link = doc.select(&sel).next().unwrap();
        assert_eq!(link.value().attr("href"), Some(crate::config::DEFAULT_JOIN_URL));
        assert_eq!(link.value().attr("rel"), Some("noopener noreferrer"));
    }

    #[test]
    fn test_fields_are_escaped() {
        let mut p = project("project-0-1", "<script>alert(1)</script>", Some("R&D \"Lab\""));
        p.description = "a < b".to_string();
        let html = render_page(&loaded(vec![p]), &options());
        assert!(!html.contains("<script>alert(1)"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("R&amp;D &quot;Lab&quot;"));

        let doc = Html::parse_document(&html);
        assert_eq!(select_texts(&doc, ".project-description"), ["a < b"]);
    }

    #[test]
    fn test_state_messages() {
        let doc = Html::parse_document(&render_page(&BoardState::default(), &options()));
        assert_eq!(select_texts(&doc, ".loading-state p"), ["Loading available projects..."]);

        let doc = Html::parse_document(&render_page(&loaded(vec![]), &options()));
        assert_eq!(select_texts(&doc, ".empty-state h3"), ["No Projects Available Yet"]);

        let failed = BoardState {
            loading: false,
            error: Some(FETCH_ERROR_MESSAGE.to_string()),
            projects: vec![],
            last_fetch: None,
        };
        let doc = Html::parse_document(&render_page(&failed, &options()));
        assert_eq!(select_texts(&doc, ".error-message p"), [FETCH_ERROR_MESSAGE]);
        assert!(select_texts(&doc, ".loading-state").is_empty());
        assert!(select_texts(&doc, ".last-updated").is_empty());
    }

    #[test]
    fn test_banner_toggle() {
        let state = loaded(vec![]);
        let shown = Html::parse_document(&render_page(&state, &options()));
        assert_eq!(select_texts(&shown, ".top-banner span"), [BANNER_TEXT]);

        let hidden = Html::parse_document(&render_page(&state, &options().with_banner(false)));
        assert!(select_texts(&hidden, ".top-banner").is_empty());
        assert_eq!(select_texts(&hidden, ".nav-button").len(), 2);
    }

    #[test]
    fn test_render_output_json() -> Result<()> {
        let state = loaded(vec![project("project-0-1", "A", None)]);
        let json = render_output(&state, &options(), OutputFormat::Json)?;
        let value: serde_json::Value = serde_json::from_str(&json)?;
        assert_eq!(value["loading"], false);
        assert_eq!(value["projects"][0]["name"], "A");
        assert!(value["projects"][0]["organization"].is_null());
        Ok(())
    }

    #[test]
    fn test_write_output_creates_parents() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("site").join("index.html");
        let html = render_page(&loaded(vec![]), &options());
        write_output(&path, &html)?;
        assert_eq!(fs::read_to_string(&path)?, html);
        Ok(())
    }
}
