use serde::{Deserialize, Serialize};

/// One submitter's support project, as returned by `GET /api/projects/{id}`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub objective: String,
    pub category: String,
    pub duration: ProjectDuration,
    pub description: String,
    pub support_items: Vec<SupportItem>,
    #[serde(default)]
    pub other_support: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_of_success: Option<PictureOfSuccess>,
}

/// Start and end dates, kept exactly as the backend sent them.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDuration {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SupportItem {
    pub item: String,
    pub quantity: String,
    pub by_when: String,
    pub drop_location: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PictureOfSuccess {
    pub url: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RelatedProjectSummary {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub category: &'static str,
    pub progress: u8,
}

const RELATED_PROJECTS: [RelatedProjectSummary; 2] = [
    RelatedProjectSummary {
        id: "1",
        title: "Digital Literacy Program",
        description: "Empowering communities through technology education",
        image: "/api/placeholder/400/320",
        category: "Education",
        progress: 60,
    },
    RelatedProjectSummary {
        id: "2",
        title: "Youth Mentorship Initiative",
        description: "Connecting students with professional mentors",
        image: "/api/placeholder/400/320",
        category: "Human Development",
        progress: 45,
    },
];

/// Sample "other projects" shown under every profile. Not fetched.
pub fn related_projects() -> &'static [RelatedProjectSummary] {
    &RELATED_PROJECTS
}

impl ProjectRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// First character of each name part. Case is left to the stylesheet.
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .collect()
    }
}
