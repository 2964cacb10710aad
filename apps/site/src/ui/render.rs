use contact_form::{SubmissionStatus, ValidationErrors};
use content::Portfolio;
use shared::domain::Section;

use super::state::ViewState;

pub const LINE_HEIGHT_PX: usize = 24;

const HERO_PROFILES: [&str; 2] = ["GitHub", "LinkedIn"];

pub const SENDING_LABEL: &str = "Sending...";
pub const SUCCESS_TITLE: &str = "Thank You!";
pub const SUCCESS_MESSAGE: &str =
    "Your message has been sent successfully. I'll get back to you soon.";
pub const ERROR_TITLE: &str = "Oops!";
pub const ERROR_MESSAGE: &str = "Something went wrong. Please try again or contact me directly.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSection {
    pub section: Section,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub sections: Vec<RenderedSection>,
    pub footer: String,
}

impl Document {
    pub fn render(portfolio: &Portfolio, view: &ViewState, year: i32) -> Self {
        let sections = Section::ALL
            .into_iter()
            .map(|section| RenderedSection {
                section,
                lines: render_section(portfolio, section, view),
            })
            .collect();
        Self {
            sections,
            footer: footer(&portfolio.owner.name, year),
        }
    }

    pub fn line_count(&self) -> usize {
        self.sections
            .iter()
            .map(|rendered| rendered.lines.len())
            .sum::<usize>()
            + 1
    }

    pub fn height_px(&self) -> usize {
        self.line_count() * LINE_HEIGHT_PX
    }

    pub fn offset_px(&self, section: Section) -> Option<usize> {
        let mut lines = 0;
        for rendered in &self.sections {
            if rendered.section == section {
                return Some(lines * LINE_HEIGHT_PX);
            }
            lines += rendered.lines.len();
        }
        None
    }
}

pub fn render_section(portfolio: &Portfolio, section: Section, view: &ViewState) -> Vec<String> {
    let mut lines = heading(section);
    match section {
        Section::Home => render_home(portfolio, &mut lines),
        Section::Experience => render_experience(portfolio, view, &mut lines),
        Section::Projects => render_projects(portfolio, view, &mut lines),
        Section::Skills => render_skills(portfolio, view, &mut lines),
        Section::Profiles => render_profiles(portfolio, &mut lines),
        Section::Contact => render_contact(portfolio, &mut lines),
    }
    lines.push(String::new());
    lines
}

fn heading(section: Section) -> Vec<String> {
    let title = match section {
        Section::Skills => "Professional Competencies",
        other => other.label(),
    };
    vec![title.to_string(), "=".repeat(title.chars().count())]
}

fn render_home(portfolio: &Portfolio, lines: &mut Vec<String>) {
    let owner = &portfolio.owner;
    lines.push(owner.headline.clone());
    lines.push(owner.name.to_uppercase());
    if !owner.summary.is_empty() {
        lines.push(owner.summary.clone());
    }
    let socials: Vec<String> = HERO_PROFILES
        .into_iter()
        .filter_map(|platform| portfolio.profile_for_platform(platform))
        .map(|profile| format!("{}: {}", profile.platform, profile.url))
        .collect();
    if !socials.is_empty() {
        lines.push(socials.join("  "));
    }
    lines.push(format!("VIEW MY WORK -> {}", Section::Projects.anchor()));
}

fn render_experience(portfolio: &Portfolio, view: &ViewState, lines: &mut Vec<String>) {
    for (index, entry) in portfolio.experience.iter().enumerate() {
        lines.push(format!(
            "[{index}] {} @ {} ({})",
            entry.role, entry.company, entry.period
        ));
        if view.experience.is_active(index) {
            lines.extend(entry.responsibilities.iter().map(|item| format!("    - {item}")));
        }
        if !entry.technologies.is_empty() {
            lines.push(format!("    {}", entry.technologies.join(" | ")));
        }
    }
}

fn render_projects(portfolio: &Portfolio, view: &ViewState, lines: &mut Vec<String>) {
    for (index, project) in portfolio.projects.iter().enumerate() {
        match &project.company {
            Some(company) => lines.push(format!("[{index}] {} ({company})", project.title)),
            None => lines.push(format!("[{index}] {}", project.title)),
        }
        lines.push(format!("    {}", project.description));
    }

    let Some(project) = view
        .projects
        .selected
        .and_then(|index| portfolio.projects.get(index))
    else {
        return;
    };

    lines.push(String::new());
    lines.push(format!("+ {}", project.title));
    lines.push(format!("| {}", project.description));
    if !project.technologies.is_empty() {
        lines.push(format!("| tech:   {}", project.technologies.join(", ")));
    }
    if let Some(github) = &project.github {
        lines.push(format!("| code:   {github}"));
    }
    if let Some(live) = &project.live {
        lines.push(format!("| live:   {live}"));
    }
    if let Some(image) = &project.image {
        lines.push(format!("| image:  {image}"));
    }

    if let Some(company) = &project.company {
        let related: Vec<&str> = portfolio
            .projects_for_company(company)
            .filter(|other| other.title != project.title)
            .map(|other| other.title.as_str())
            .collect();
        if !related.is_empty() {
            lines.push(format!("| more from {company}: {}", related.join(", ")));
        }
    }
}

fn render_skills(portfolio: &Portfolio, view: &ViewState, lines: &mut Vec<String>) {
    for entry in &portfolio.skills {
        if view.skills.is_active(&entry.category) {
            lines.push(format!("* {}", entry.category));
            lines.extend(entry.skills.iter().map(|skill| format!("    - {skill}")));
        } else {
            lines.push(format!("  {} ({})", entry.category, entry.skills.len()));
        }
    }
}

fn render_profiles(portfolio: &Portfolio, lines: &mut Vec<String>) {
    let width = portfolio
        .profiles
        .iter()
        .map(|profile| profile.platform.chars().count())
        .max()
        .unwrap_or(0);
    for profile in &portfolio.profiles {
        lines.push(format!(
            "{:<width$}  {}  <{}>",
            profile.platform, profile.username, profile.url
        ));
    }
}

fn render_contact(portfolio: &Portfolio, lines: &mut Vec<String>) {
    let contact = &portfolio.contact;
    lines.push("Get In Touch".to_string());
    if !contact.blurb.is_empty() {
        lines.push(contact.blurb.clone());
    }
    lines.push(format!("mail:  {}", contact.email));
    if let Some(phone) = &contact.phone {
        lines.push(format!("phone: {phone}"));
    }
    if let Some(location) = &contact.location {
        lines.push(format!("where: {location}"));
    }
}

pub fn nav_bar(initials: &str) -> String {
    let links: Vec<&str> = Section::NAV.iter().map(|section| section.label()).collect();
    format!("{initials} | {}", links.join("  "))
}

pub fn footer(owner: &str, year: i32) -> String {
    format!("\u{a9} {year} {owner}. All rights reserved.")
}

pub fn status_message(status: SubmissionStatus) -> Option<(&'static str, &'static str)> {
    match status {
        SubmissionStatus::Success => Some((SUCCESS_TITLE, SUCCESS_MESSAGE)),
        SubmissionStatus::Error => Some((ERROR_TITLE, ERROR_MESSAGE)),
        SubmissionStatus::Idle | SubmissionStatus::Submitting => None,
    }
}

pub fn field_error_lines(errors: &ValidationErrors) -> Vec<String> {
    errors
        .to_field_errors()
        .into_iter()
        .map(|error| format!("{}: {}", error.field, error.message))
        .collect()
}

pub fn progress_bar(percent: f32, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f32).round() as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled)),
        percent
    )
}

#[cfg(test)]
#[path = "../tests/render_tests.rs"]
mod tests;
