use clap::{Args, ValueEnum};
use job_board::config::{AppConfig, FeedConfig};
use job_board::error::AppError;
use job_board::listings::{
    cards, control_options, load_listing, render_text, write_csv, CriterionName, CriterionUpdate,
    FilterCriteria, HttpJobFeed, JobBoardSession, JobCard, JsonFileJobFeed,
};
use job_board::telemetry;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ListArgs {
    /// Read a saved feed response instead of calling the configured endpoint
    #[arg(long)]
    pub(crate) file: Option<PathBuf>,
    /// Case-insensitive text matched against company, role, and location
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Minimum years of experience
    #[arg(long)]
    pub(crate) min_experience: Option<String>,
    /// Minimum base pay
    #[arg(long)]
    pub(crate) min_base_pay: Option<String>,
    /// Work arrangement: remote or onsite
    #[arg(long)]
    pub(crate) remote: Option<String>,
    /// Role category, compared exactly (e.g. "frontend")
    #[arg(long)]
    pub(crate) role: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

impl ListArgs {
    /// Flags in the same shape a control would emit them.
    pub(crate) fn criterion_updates(&self) -> Result<Vec<CriterionUpdate>, AppError> {
        let flags = [
            (CriterionName::SearchText, &self.search),
            (CriterionName::MinExperience, &self.min_experience),
            (CriterionName::MinBasePay, &self.min_base_pay),
            (CriterionName::RemoteOption, &self.remote),
            (CriterionName::Role, &self.role),
        ];

        let mut updates = Vec::new();
        for (name, raw) in flags {
            if let Some(raw) = raw {
                updates.push(CriterionUpdate::from_raw(name, raw)?);
            }
        }
        Ok(updates)
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct OptionsArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

pub(crate) async fn run_list(args: ListArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let session = build_session(&args, &config.feed).await?;
    let cards = cards(session.visible());

    let mut stdout = io::stdout().lock();
    if args.format == OutputFormat::Text {
        writeln!(
            stdout,
            "Showing {} of {} job listings\n",
            cards.len(),
            session.store().len()
        )?;
    }
    write_cards(args.format, &cards, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Validates the filter flags, then performs the one startup load with those
/// criteria already in place.
pub(crate) async fn build_session(
    args: &ListArgs,
    feed: &FeedConfig,
) -> Result<JobBoardSession, AppError> {
    let mut criteria = FilterCriteria::default();
    for update in args.criterion_updates()? {
        criteria.apply(update);
    }
    let mut session = JobBoardSession::with_criteria(criteria);

    let loaded = match &args.file {
        Some(path) => load_listing(&JsonFileJobFeed::new(path), &mut session).await,
        None => {
            let feed = HttpJobFeed::new(feed.clone())?;
            load_listing(&feed, &mut session).await
        }
    };
    if !loaded {
        warn!("no job listings loaded; the board will be empty");
    }

    Ok(session)
}

pub(crate) fn write_cards<W: Write>(
    format: OutputFormat,
    cards: &[JobCard],
    mut out: W,
) -> Result<(), AppError> {
    match format {
        OutputFormat::Text if cards.is_empty() => {
            writeln!(out, "No job listings match the current filters.")?;
        }
        OutputFormat::Text => render_text(cards, out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, cards).map_err(io::Error::from)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_csv(cards, out).map_err(io::Error::from)?,
    }
    Ok(())
}

pub(crate) fn run_options(args: OptionsArgs) -> Result<(), AppError> {
    let options = control_options();
    let mut stdout = io::stdout().lock();

    if args.format != OutputFormat::Text {
        serde_json::to_writer_pretty(&mut stdout, &options).map_err(io::Error::from)?;
        writeln!(stdout)?;
        return Ok(());
    }

    writeln!(stdout, "Min Experience")?;
    for choice in &options.min_experience {
        writeln!(stdout, "- {} ({})", choice.label, choice.value)?;
    }
    writeln!(stdout, "\nMin Base Pay")?;
    for choice in &options.min_base_pay {
        writeln!(stdout, "- {} ({})", choice.label, choice.value)?;
    }
    writeln!(stdout, "\nRemote Option")?;
    for choice in &options.remote_option {
        writeln!(stdout, "- {} ({})", choice.label, choice.value)?;
    }
    writeln!(stdout, "\nRole")?;
    for choice in &options.role {
        writeln!(stdout, "- {} ({})", choice.label, choice.value)?;
    }
    Ok(())
}
