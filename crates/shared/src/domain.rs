use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Home,
    Experience,
    Projects,
    Skills,
    Profiles,
    Contact,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Home,
        Section::Experience,
        Section::Projects,
        Section::Skills,
        Section::Profiles,
        Section::Contact,
    ];

    /// Entries shown in the navigation bar. Contact is reached from the page body.
    pub const NAV: [Section; 5] = [
        Section::Home,
        Section::Experience,
        Section::Projects,
        Section::Skills,
        Section::Profiles,
    ];

    pub fn anchor(self) -> &'static str {
        match self {
            Section::Home => "#home",
            Section::Experience => "#experience",
            Section::Projects => "#projects",
            Section::Skills => "#skills",
            Section::Profiles => "#profiles",
            Section::Contact => "#contact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Home => "HOME",
            Section::Experience => "EXPERIENCE",
            Section::Projects => "PROJECTS",
            Section::Skills => "SKILLS",
            Section::Profiles => "PROFILES",
            Section::Contact => "CONTACT",
        }
    }

    pub fn from_name(raw: &str) -> Option<Self> {
        let raw = raw.trim().trim_start_matches('#');
        Self::ALL
            .into_iter()
            .find(|section| section.anchor()[1..].eq_ignore_ascii_case(raw))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub name: String,
    pub initials: String,
    pub headline: String,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub blurb: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub role: String,
    pub company: String,
    pub period: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub live: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileLink {
    pub platform: String,
    pub username: String,
    pub url: String,
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
