use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use shared::domain::{
    ContactDetails, ExperienceEntry, Owner, ProfileLink, ProjectEntry, SkillCategory,
};
use thiserror::Error;
use tracing::info;

const BUILTIN_CATALOG: &str = include_str!("../data/portfolio.toml");

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read portfolio catalog '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse portfolio catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid {record} #{index}: {reason}")]
    InvalidRecord {
        record: &'static str,
        index: usize,
        reason: String,
    },
    #[error("duplicate skill category '{0}'")]
    DuplicateSkillCategory(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    pub owner: Owner,
    pub contact: ContactDetails,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub skills: Vec<SkillCategory>,
    #[serde(default)]
    pub profiles: Vec<ProfileLink>,
}

impl Portfolio {
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ContentError> {
        let portfolio: Portfolio = toml::from_str(raw)?;
        portfolio.check()?;
        Ok(portfolio)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let portfolio = Self::from_toml_str(&raw)?;
        info!(
            path = %path.display(),
            experience = portfolio.experience.len(),
            projects = portfolio.projects.len(),
            "content: loaded portfolio catalog"
        );
        Ok(portfolio)
    }

    /// Loads the catalog at `path`, or the built-in one when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Arc<Self>, ContentError> {
        let portfolio = match path {
            Some(path) => Self::load_from_path(path)?,
            None => Self::builtin()?,
        };
        Ok(Arc::new(portfolio))
    }

    pub fn projects_for_company<'a>(
        &'a self,
        company: &'a str,
    ) -> impl Iterator<Item = &'a ProjectEntry> + 'a {
        self.projects.iter().filter(move |project| {
            project
                .company
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(company))
        })
    }

    pub fn skill_category(&self, category: &str) -> Option<&SkillCategory> {
        self.skills
            .iter()
            .find(|entry| entry.category.eq_ignore_ascii_case(category))
    }

    pub fn profile_for_platform(&self, platform: &str) -> Option<&ProfileLink> {
        self.profiles
            .iter()
            .find(|profile| profile.platform.eq_ignore_ascii_case(platform))
    }

    fn check(&self) -> Result<(), ContentError> {
        require("owner", 0, "name", &self.owner.name)?;
        require("contact", 0, "email", &self.contact.email)?;

        for (index, entry) in self.experience.iter().enumerate() {
            require("experience", index, "role", &entry.role)?;
            require("experience", index, "company", &entry.company)?;
        }

        for (index, project) in self.projects.iter().enumerate() {
            require("project", index, "title", &project.title)?;
            for (name, link) in [("github", &project.github), ("live", &project.live)] {
                if let Some(link) = link {
                    require("project", index, name, link)?;
                }
            }
        }

        let mut seen = HashSet::new();
        for (index, entry) in self.skills.iter().enumerate() {
            require("skill category", index, "category", &entry.category)?;
            if entry.skills.is_empty() {
                return Err(ContentError::InvalidRecord {
                    record: "skill category",
                    index,
                    reason: format!("'{}' lists no skills", entry.category),
                });
            }
            if !seen.insert(entry.category.to_ascii_lowercase()) {
                return Err(ContentError::DuplicateSkillCategory(entry.category.clone()));
            }
        }

        for (index, profile) in self.profiles.iter().enumerate() {
            require("profile", index, "platform", &profile.platform)?;
            require("profile", index, "url", &profile.url)?;
        }

        Ok(())
    }
}

fn require(
    record: &'static str,
    index: usize,
    name: &str,
    value: &str,
) -> Result<(), ContentError> {
    if value.trim().is_empty() {
        return Err(ContentError::InvalidRecord {
            record,
            index,
            reason: format!("{name} must not be empty"),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
