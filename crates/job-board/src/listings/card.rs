use super::domain::JobRecord;
use serde::Serialize;
use std::io::{self, Write};

pub const DESCRIPTION_PREVIEW_CHARS: usize = 300;

const CSV_HEADERS: [&str; 10] = [
    "id",
    "company_name",
    "job_role",
    "location",
    "salary",
    "min_experience_years",
    "description_preview",
    "description_truncated",
    "logo_url",
    "job_link",
];

/// Display projection of one record. Field order matches the CSV columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobCard {
    pub id: String,
    pub company_name: String,
    pub job_role: String,
    pub location: String,
    pub salary: String,
    pub min_experience_years: Option<u32>,
    pub description_preview: String,
    pub description_truncated: bool,
    pub logo_url: Option<String>,
    pub job_link: Option<String>,
}

impl JobCard {
    pub fn from_record(record: &JobRecord) -> Self {
        let description = record.description.as_deref().unwrap_or_default();
        let (description_preview, description_truncated) = preview(description);

        Self {
            id: record.id.0.clone(),
            company_name: record.company_name.clone().unwrap_or_default(),
            job_role: record.job_role.clone().unwrap_or_default(),
            location: record.location.clone().unwrap_or_default(),
            salary: salary_line(record),
            min_experience_years: record.min_experience_years,
            description_preview,
            description_truncated,
            logo_url: record.logo_url.clone(),
            job_link: record.job_link.clone(),
        }
    }
}

pub fn cards<'a, I>(records: I) -> Vec<JobCard>
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    records.into_iter().map(JobCard::from_record).collect()
}

/// `"<currency> <min> - <max>"`; a missing minimum reads as 0 and a missing
/// maximum leaves an open range.
pub fn salary_line(record: &JobRecord) -> String {
    let min = format_amount(record.min_base_salary.unwrap_or(0.0));
    let range = match record.max_base_salary {
        Some(max) => format!("{min} - {}", format_amount(max)),
        None => format!("{min}+"),
    };

    match record.salary_currency_code.as_deref() {
        Some(code) if !code.is_empty() => format!("{code} {range}"),
        _ => range,
    }
}

fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount}")
    }
}

fn preview(description: &str) -> (String, bool) {
    let mut chars = description.chars();
    let head: String = chars.by_ref().take(DESCRIPTION_PREVIEW_CHARS).collect();
    let truncated = chars.next().is_some();
    (head, truncated)
}

pub fn render_text<W: Write>(cards: &[JobCard], mut out: W) -> io::Result<()> {
    for (index, card) in cards.iter().enumerate() {
        if index > 0 {
            writeln!(out)?;
        }
        writeln!(
            out,
            "{} | {} | {}",
            card.company_name, card.job_role, card.location
        )?;
        writeln!(out, "Estimated Salary: {}", card.salary)?;
        if card.description_truncated {
            writeln!(out, "About Company: {}... (view more)", card.description_preview)?;
        } else {
            writeln!(out, "About Company: {}", card.description_preview)?;
        }
        if let Some(years) = card.min_experience_years {
            writeln!(out, "Minimum Experience: {years}")?;
        }
        if let Some(link) = &card.job_link {
            writeln!(out, "Apply: {link}")?;
        }
    }
    Ok(())
}

/// Header row first, then one row per card, even when there are no cards.
pub fn write_csv<W: Write>(cards: &[JobCard], out: W) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);
    writer.write_record(CSV_HEADERS)?;
    for card in cards {
        writer.serialize(card)?;
    }
    writer.flush()?;
    Ok(())
}
