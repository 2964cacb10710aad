use std::{path::PathBuf, process::ExitCode};

use anyhow::{anyhow, Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use contact_form::SubmissionStatus;
use content::Portfolio;
use shared::domain::Section;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod contact;
mod ui;

use config::{load_settings, Settings, DEFAULT_CONFIG_PATH};
use ui::{
    effects::{EffectHost, ParticleField},
    render::{nav_bar, progress_bar, Document, LINE_HEIGHT_PX},
    state::ScrollProgress,
    ViewState,
};

const EFFECT_ROWS: u16 = 4;

#[derive(Parser, Debug)]
#[command(name = "site", about = "Personal portfolio in the terminal")]
struct Cli {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the page, or a single section of it.
    Show {
        #[arg(long)]
        section: Option<String>,
        /// Print the catalog as JSON instead of text.
        #[arg(long)]
        json: bool,
        /// Expand the experience card at this index.
        #[arg(long)]
        expand: Option<usize>,
        /// Open the detail popup of the project at this index.
        #[arg(long)]
        project: Option<usize>,
        /// Expand this skill category.
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value_t = 80)]
        width: u16,
        #[arg(long, default_value_t = 24)]
        height: u16,
    },
    /// List navigation entries and where each one scrolls to.
    Nav,
    /// Send a message through the contact form.
    Contact {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();
    let settings = load_settings(&cli.config)?;

    match cli.command {
        Command::Show {
            section,
            json,
            expand,
            project,
            category,
            width,
            height,
        } => {
            let portfolio = load_portfolio(&settings)?;
            let section = section
                .as_deref()
                .map(|raw| Section::from_name(raw).ok_or_else(|| anyhow!("unknown section '{raw}'")))
                .transpose()?;

            if json {
                print_json(&portfolio, section)?;
                return Ok(ExitCode::SUCCESS);
            }

            let mut view =
                ViewState::from_selection(&portfolio, expand, project, category.as_deref())?;

            show(&portfolio, &settings, &mut view, section, width, height);
            Ok(ExitCode::SUCCESS)
        }
        Command::Nav => {
            let portfolio = load_portfolio(&settings)?;
            let view = ViewState::default();
            let doc = Document::render(&portfolio, &view, current_year());
            for section in Section::NAV {
                let offset = doc.offset_px(section).unwrap_or_default();
                let target = view.nav.navigate(section, offset);
                println!("{:<12} {:<12} scroll_to={target}px", section.label(), section.anchor());
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Contact {
            name,
            email,
            message,
        } => {
            let form = contact::build_form(&settings)?;
            info!(endpoint = %form.transport().endpoint(), "contact: submitting form");
            let input = [("name", name), ("email", email), ("message", message)];
            let (status, lines) = contact::run_submission(&form, &input).await?;
            for line in lines {
                println!("{line}");
            }
            Ok(if status == SubmissionStatus::Success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn load_portfolio(settings: &Settings) -> Result<std::sync::Arc<Portfolio>> {
    Portfolio::load(settings.content_path.as_deref()).context("failed to load portfolio content")
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}

fn print_json(portfolio: &Portfolio, section: Option<Section>) -> Result<()> {
    let value = match section {
        None => serde_json::to_value(portfolio)?,
        Some(Section::Home) => serde_json::to_value(&portfolio.owner)?,
        Some(Section::Experience) => serde_json::to_value(&portfolio.experience)?,
        Some(Section::Projects) => serde_json::to_value(&portfolio.projects)?,
        Some(Section::Skills) => serde_json::to_value(&portfolio.skills)?,
        Some(Section::Profiles) => serde_json::to_value(&portfolio.profiles)?,
        Some(Section::Contact) => serde_json::to_value(&portfolio.contact)?,
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn show(
    portfolio: &Portfolio,
    settings: &Settings,
    view: &mut ViewState,
    only: Option<Section>,
    width: u16,
    height: u16,
) {
    let doc = Document::render(portfolio, view, current_year());
    let viewport_px = usize::from(height) * LINE_HEIGHT_PX;

    let mut effects = EffectHost::new(settings.effects_enabled);
    effects.add(Box::new(ParticleField::new(width, EFFECT_ROWS)));
    effects.resize_all(width, EFFECT_ROWS);
    effects.start_all();

    for rendered in &doc.sections {
        if only.is_some_and(|section| section != rendered.section) {
            continue;
        }

        let offset = doc.offset_px(rendered.section).unwrap_or_default();
        view.nav.on_scroll(offset);
        let progress = ScrollProgress::percent(offset, doc.height_px(), viewport_px);
        effects.scroll_all(progress);
        effects.tick_all();

        if only.is_none() {
            if view.nav.scrolled {
                println!("{}", nav_bar(&portfolio.owner.initials));
            }
            for line in effects.frames() {
                println!("{line}");
            }
        }
        for line in &rendered.lines {
            println!("{line}");
        }
        if only.is_none() {
            println!("{}", progress_bar(progress, usize::from(width.saturating_sub(8)).min(60)));
        }
    }

    if only.is_none() || only == Some(Section::Contact) {
        println!("{}", doc.footer);
    }
    effects.stop_all();
}
