use anyhow::Result;
use chrono::NaiveTime;
use clap::Args;
use folio_lib::types::AvailabilityRule;
use folio_lib::{validation, AdminClient};

use crate::output::{print_availability, OutputFormat};

#[derive(Args)]
pub struct AvailabilityArgs {
    /// Only rules whose window contains this time of day (HH:MM)
    #[arg(long)]
    pub at: Option<String>,
}

/// Whether `at` falls inside the rule's `[start, end)` window.
///
/// Rules with unreadable times never match.
fn covers(rule: &AvailabilityRule, at: NaiveTime) -> bool {
    match (
        validation::validate_time_of_day(&rule.start_time),
        validation::validate_time_of_day(&rule.end_time),
    ) {
        (Ok(start), Ok(end)) => start <= at && at < end,
        _ => false,
    }
}

pub async fn run(args: &AvailabilityArgs, client: &AdminClient, format: &OutputFormat) -> Result<()> {
    let at = args
        .at
        .as_deref()
        .map(validation::validate_time_of_day)
        .transpose()?;

    let mut rules = client.list_availability().await?;
    if let Some(at) = at {
        rules.retain(|r| covers(r, at));
    }
    rules.sort_by(|a, b| {
        a.day_of_week
            .cmp(&b.day_of_week)
            .then_with(|| a.start_time.cmp(&b.start_time))
    });
    print_availability(&rules, format);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(start: &str, end: &str) -> AvailabilityRule {
        AvailabilityRule {
            id: "r".to_string(),
            day_of_week: 1,
            start_time: start.to_string(),
            end_time: end.to_string(),
            is_active: true,
        }
    }

    #[test]
    fn window_is_half_open() {
        let r = rule("09:00", "17:00");
        let t = |s: &str| NaiveTime::parse_from_str(s, "%H:%M").unwrap();
        assert!(covers(&r, t("09:00")));
        assert!(covers(&r, t("16:59")));
        assert!(!covers(&r, t("17:00")));
        assert!(!covers(&r, t("08:30")));
        assert!(!covers(&rule("9am", "5pm"), t("10:00")));
    }
}
