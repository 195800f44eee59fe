//! Pure projection from [`PageState`] to what the page shows.
//!
//! [`project`] builds a [`PageView`] and does no I/O. [`PageView::to_html`]
//! runs it through the askama templates under `templates/`.

use askama::Template;
use serde::Serialize;
use thiserror::Error;

use crate::{
    core::lifecycle::PageState,
    types::{related_projects, ProjectRecord, RelatedProjectSummary},
};

pub const LOADING_TEXT: &str = "Loading...";
pub const BANNER_IMAGE: &str = "/api/placeholder/1200/300";
pub const PICTURE_PLACEHOLDER: &str = "/api/placeholder/600/400";
pub const SUPPORT_COLUMNS: [&str; 4] = ["Items", "Quantity", "Needed By", "Drop Location"];

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),
    #[error("view serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PageView {
    Loading,
    Failed { message: String },
    Ready(ProfileView),
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ProfileView {
    pub banner_url: &'static str,
    pub header: HeaderView,
    pub details: DetailView,
    pub picture_url: String,
    pub support: SupportTable,
    pub other_support: String,
    pub related: RelatedSection,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct HeaderView {
    pub initials: String,
    pub full_name: String,
    pub title: String,
    pub category: String,
}

/// Dates are shown exactly as stored.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct DetailView {
    pub objective: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SupportTable {
    pub columns: [&'static str; 4],
    pub rows: Vec<SupportRow>,
}

/// Rows are keyed by their position in `supportItems`.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SupportRow {
    pub position: usize,
    pub item: String,
    pub quantity: String,
    pub by_when: String,
    pub drop_location: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RelatedSection {
    pub heading: String,
    pub projects: Vec<RelatedCard>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RelatedCard {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub category: &'static str,
}

impl From<&RelatedProjectSummary> for RelatedCard {
    fn from(summary: &RelatedProjectSummary) -> Self {
        RelatedCard {
            id: summary.id,
            title: summary.title,
            description: summary.description,
            image: summary.image,
            category: summary.category,
        }
    }
}

pub fn project(state: &PageState) -> PageView {
    match state {
        PageState::Loading => PageView::Loading,
        PageState::Failed(message) => PageView::Failed {
            message: message.clone(),
        },
        PageState::Ready(record) => PageView::Ready(profile(record)),
    }
}

fn profile(record: &ProjectRecord) -> ProfileView {
    ProfileView {
        banner_url: BANNER_IMAGE,
        header: HeaderView {
            initials: record.initials(),
            full_name: record.full_name(),
            title: record.title.clone(),
            category: record.category.clone(),
        },
        details: DetailView {
            objective: record.objective.clone(),
            start_date: record.duration.start_date.clone(),
            end_date: record.duration.end_date.clone(),
            description: record.description.clone(),
        },
        picture_url: record
            .picture_of_success
            .as_ref()
            .map(|picture| picture.url.as_str())
            .filter(|url| !url.is_empty())
            .unwrap_or(PICTURE_PLACEHOLDER)
            .to_string(),
        support: SupportTable {
            columns: SUPPORT_COLUMNS,
            rows: record
                .support_items
                .iter()
                .enumerate()
                .map(|(position, entry)| SupportRow {
                    position,
                    item: entry.item.clone(),
                    quantity: entry.quantity.clone(),
                    by_when: entry.by_when.clone(),
                    drop_location: entry.drop_location.clone(),
                })
                .collect(),
        },
        other_support: record.other_support.clone(),
        related: RelatedSection {
            heading: format!("Other Projects by {}", record.first_name),
            projects: related_projects().iter().map(RelatedCard::from).collect(),
        },
    }
}

#[derive(Template)]
#[template(path = "loading.html")]
struct LoadingPage {
    text: &'static str,
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPage<'a> {
    message: &'a str,
}

#[derive(Template)]
#[template(path = "profile.html")]
struct ProfilePage<'a> {
    view: &'a ProfileView,
}

impl PageView {
    pub fn to_html(&self) -> Result<String, RenderError> {
        let html = match self {
            PageView::Loading => LoadingPage { text: LOADING_TEXT }.render()?,
            PageView::Failed { message } => ErrorPage { message }.render()?,
            PageView::Ready(view) => ProfilePage { view }.render()?,
        };
        Ok(html)
    }

    pub fn to_json(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::{PictureOfSuccess, ProjectDuration, SupportItem};

    fn ada() -> ProjectRecord {
        ProjectRecord {
            id: "p1".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            title: "Engineer".to_string(),
            objective: "Teach engines".to_string(),
            category: "Education".to_string(),
            duration: ProjectDuration {
                start_date: "2024-01-01".to_string(),
                end_date: "2024-06-01".to_string(),
            },
            description: "Analytical".to_string(),
            support_items: vec![SupportItem {
                item: "Laptop".to_string(),
                quantity: "2".to_string(),
                by_when: "2024-02-01".to_string(),
                drop_location: "HQ".to_string(),
            }],
            other_support: "None".to_string(),
            picture_of_success: None,
        }
    }

    fn ready(record: ProjectRecord) -> ProfileView {
        match project(&PageState::Ready(record)) {
            PageView::Ready(view) => view,
            other => panic!("expected ready view, got {other:?}"),
        }
    }

    #[test]
    fn header_and_support_rows() {
        let view = ready(ada());
        assert_eq!(
            view.header,
            HeaderView {
                initials: "AL".to_string(),
                full_name: "Ada Lovelace".to_string(),
                title: "Engineer".to_string(),
                category: "Education".to_string(),
            }
        );
        assert_eq!(view.support.columns, SUPPORT_COLUMNS);
        assert_eq!(
            view.support.rows,
            vec![SupportRow {
                position: 0,
                item: "Laptop".to_string(),
                quantity: "2".to_string(),
                by_when: "2024-02-01".to_string(),
                drop_location: "HQ".to_string(),
            }]
        );
        assert_eq!(view.details.start_date, "2024-01-01");
        assert_eq!(view.related.heading, "Other Projects by Ada");
        assert_eq!(view.related.projects.len(), 2);
    }

    #[test]
    fn empty_support_items_yield_no_rows() {
        let mut record = ada();
        record.support_items.clear();
        let view = ready(record);
        assert!(view.support.rows.is_empty());
        let html = PageView::Ready(view).to_html().unwrap();
        assert!(html.contains("Drop Location"));
        assert!(!html.contains("data-row="));
    }

    #[test]
    fn picture_falls_back_to_placeholder() {
        assert_eq!(ready(ada()).picture_url, PICTURE_PLACEHOLDER);

        let mut record = ada();
        record.picture_of_success = Some(PictureOfSuccess {
            url: "/uploads/vision.png".to_string(),
        });
        assert_eq!(ready(record).picture_url, "/uploads/vision.png");

        let mut record = ada();
        record.picture_of_success = Some(PictureOfSuccess { url: String::new() });
        assert_eq!(ready(record).picture_url, PICTURE_PLACEHOLDER);
    }

    #[test]
    fn loading_and_failed_views() {
        assert_eq!(project(&PageState::Loading), PageView::Loading);
        let failed = project(&PageState::Failed("Failed to fetch project data".to_string()));
        let html = failed.to_html().unwrap();
        assert!(html.contains("Error: Failed to fetch project data"));
        assert!(!html.contains("Support Required"));
        assert!(PageView::Loading.to_html().unwrap().contains(LOADING_TEXT));
    }

    #[test]
    fn html_lists_rows_in_order() {
        let mut record = ada();
        record.support_items.push(SupportItem {
            item: "Projector".to_string(),
            quantity: "1".to_string(),
            by_when: "2024-03-01".to_string(),
            drop_location: "Annex".to_string(),
        });
        let html = project(&PageState::Ready(record)).to_html().unwrap();
        let laptop = html.find("Laptop").unwrap();
        let projector = html.find("Projector").unwrap();
        assert!(laptop < projector);
        assert!(html.contains(r#"data-row="1""#));
        assert!(html.contains("Starts 2024-01-01 | Ends 2024-06-01"));
        assert!(html.contains("Support Project"));
        assert!(html.contains(BANNER_IMAGE));
        assert!(!html.contains("60%"));
    }

    #[test]
    fn record_text_is_escaped() {
        let mut record = ada();
        record.title = "<script>alert(1)</script>".to_string();
        let html = project(&PageState::Ready(record)).to_html().unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn json_view_is_tagged() {
        let json: serde_json::Value =
            serde_json::from_str(&project(&PageState::Ready(ada())).to_json().unwrap()).unwrap();
        assert_eq!(json["state"], "ready");
        assert_eq!(json["header"]["initials"], "AL");
        assert_eq!(json["support"]["rows"][0]["drop_location"], "HQ");

        let loading: serde_json::Value =
            serde_json::from_str(&PageView::Loading.to_json().unwrap()).unwrap();
        assert_eq!(loading["state"], "loading");
    }
}
