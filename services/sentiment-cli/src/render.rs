//! Report rendering (plain text and JSON)

use anyhow::Result;
use market_data::Origin;
use serde::Serialize;
use std::fmt::Write;

use sentiment_engine::{Indicator, SentimentReport};

/// Where one reading came from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SourceNote {
    pub indicator: Indicator,
    pub origin: Origin,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    report: &'a SentimentReport,
    #[serde(skip_serializing_if = "no_sources")]
    sources: &'a [SourceNote],
}

fn no_sources(sources: &&[SourceNote]) -> bool {
    sources.is_empty()
}

pub fn render_json(report: &SentimentReport, sources: &[SourceNote]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonOutput { report, sources })?)
}

pub fn render_text(report: &SentimentReport, sources: &[SourceNote]) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_text(&mut out, report, sources);
    out
}

fn write_text(
    out: &mut String,
    report: &SentimentReport,
    sources: &[SourceNote],
) -> std::fmt::Result {
    writeln!(out, "Market Sentiment ({})", report.profile.display_name())?;
    if let Some(uptrend) = report.uptrend {
        writeln!(
            out,
            "Trend: {}",
            if uptrend {
                "above 200-day MA"
            } else {
                "at or below 200-day MA"
            }
        )?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "{:<22} {:>10} {:>6} {:>7} {:>8}",
        "Indicator", "Reading", "Score", "Weight", "Points"
    )?;

    for line in &report.breakdown {
        if !report.profile.indicators().contains(&line.indicator) {
            continue;
        }
        let weight = match report.weights {
            Some(_) => format!("{:.2}", line.weight),
            None => "-".to_string(),
        };
        let live = sources
            .iter()
            .any(|s| s.indicator == line.indicator && s.origin == Origin::Live);
        writeln!(
            out,
            "{:<22} {:>10.2} {:>+6} {:>7} {:>+8.2}{}",
            line.indicator.display_name(),
            line.reading,
            line.score,
            weight,
            line.contribution,
            if live { "  (live)" } else { "" }
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Composite: {:.2}", report.composite)?;
    writeln!(out, "Tier: {}", report.tier)?;
    writeln!(out, "{}", report.tier.guidance())?;

    let drivers = report.top_contributors(3);
    if !drivers.is_empty() {
        let names: Vec<_> = drivers
            .iter()
            .map(|line| format!("{} ({:+.2})", line.indicator.display_name(), line.contribution))
            .collect();
        writeln!(out, "Drivers: {}", names.join(", "))?;
    }

    for note in sources.iter().filter(|s| s.origin == Origin::Fallback) {
        writeln!(
            out,
            "Note: live {} unavailable, used configured value",
            note.indicator.display_name()
        )?;
    }

    Ok(())
}
