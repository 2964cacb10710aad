use anyhow::{anyhow, bail};
use content::Portfolio;
use shared::domain::Section;

pub const NAV_OFFSET: usize = 80;
pub const SCROLLED_THRESHOLD: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavState {
    pub scrolled: bool,
}

impl NavState {
    pub fn on_scroll(&mut self, scroll_y: usize) {
        self.scrolled = scroll_y > SCROLLED_THRESHOLD;
    }

    pub fn navigate(&self, section: Section, offset_top: usize) -> usize {
        tracing::debug!(anchor = section.anchor(), offset_top, "nav: scrolling to section");
        offset_top.saturating_sub(NAV_OFFSET)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExperienceState {
    pub active: Option<usize>,
}

impl ExperienceState {
    pub fn toggle(&mut self, index: usize) {
        self.active = if self.active == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectsState {
    pub selected: Option<usize>,
}

impl ProjectsState {
    pub fn open(&mut self, index: usize) {
        self.selected = Some(index);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillsState {
    pub active: Option<String>,
}

impl SkillsState {
    pub fn toggle(&mut self, category: &str) {
        if self.active.as_deref() == Some(category) {
            self.active = None;
        } else {
            self.active = Some(category.to_string());
        }
    }

    pub fn is_active(&self, category: &str) -> bool {
        self.active.as_deref() == Some(category)
    }
}

pub struct ScrollProgress;

impl ScrollProgress {
    pub fn percent(scroll_y: usize, document_height: usize, viewport_height: usize) -> f32 {
        let scrollable = document_height.saturating_sub(viewport_height);
        if scrollable == 0 {
            return 0.0;
        }
        (scroll_y as f32 / scrollable as f32 * 100.0).clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub nav: NavState,
    pub experience: ExperienceState,
    pub projects: ProjectsState,
    pub skills: SkillsState,
}

impl ViewState {
    /// Applies command-line selections, resolving them against the catalog.
    pub fn from_selection(
        portfolio: &Portfolio,
        expand: Option<usize>,
        project: Option<usize>,
        category: Option<&str>,
    ) -> anyhow::Result<Self> {
        let mut view = Self::default();

        if let Some(index) = expand {
            if index >= portfolio.experience.len() {
                bail!("no experience entry at index {index} (have {})", portfolio.experience.len());
            }
            view.experience.toggle(index);
        }

        if let Some(index) = project {
            if index >= portfolio.projects.len() {
                bail!("no project at index {index} (have {})", portfolio.projects.len());
            }
            view.projects.open(index);
        }

        if let Some(raw) = category {
            let entry = portfolio
                .skill_category(raw)
                .ok_or_else(|| anyhow!("unknown skill category '{raw}'"))?;
            view.skills.toggle(&entry.category);
        }

        Ok(view)
    }
}

#[cfg(test)]
#[path = "../tests/state_tests.rs"]
mod tests;
