#![forbid(unsafe_code)]

//! Human-readable tables of colleagues and their local times

use super::style::Style;
use crate::types::Colleague;
use chrono::{DateTime, NaiveTime, TimeZone, Timelike, Utc};

const EXTENDED_START: u32 = 7;
const WORK_START: u32 = 9;
const WORK_END: u32 = 17;
const EXTENDED_END: u32 = 20;

const TIME_FORMAT: &str = "%H:%M (%a %d %b)";

/// How reachable a colleague is at a given local hour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// 09:00 to 16:59
    Work,
    /// 07:00 to 08:59 and 17:00 to 19:59
    Extended,
    Off,
}

impl Availability {
    pub fn from_hour(hour: u32) -> Self {
        if (WORK_START..WORK_END).contains(&hour) {
            Availability::Work
        } else if (EXTENDED_START..WORK_START).contains(&hour)
            || (WORK_END..EXTENDED_END).contains(&hour)
        {
            Availability::Extended
        } else {
            Availability::Off
        }
    }
}

/// Human-readable output formatter
///
/// All colour decisions go through the [`Style`] it was built with.
pub struct HumanFormatter {
    style: Style,
}

impl HumanFormatter {
    pub fn new(style: Style) -> Self {
        HumanFormatter { style }
    }

    /// The `check` table: position, name and local time with availability
    ///
    /// Followed by the colour legend when colour is enabled.
    pub fn check_table(&self, rows: &[(usize, Colleague)], now: DateTime<Utc>) -> String {
        let mut output = String::new();
        if rows.is_empty() {
            return output;
        }

        let heading = self.style.bold();
        output.push('\n');
        output.push_str(&format!(
            "{} | {} | {}\n",
            heading.render(&format!("{:<4}", "ID")),
            heading.render(&format!("{:<20}", "Name")),
            heading.render(&format!("{:<32}", "Local Time")),
        ));
        output.push_str(&format!(
            "{} | {} | {}\n",
            "-".repeat(4),
            "-".repeat(20),
            "-".repeat(32)
        ));

        for (position, colleague) in rows {
            let time = match colleague.local_time(now) {
                Some(local) => self.display_time(&local),
                None => self.invalid_timezone(32),
            };
            output.push_str(&format!(
                "{:<4} | {:<20} | {}\n",
                position,
                colleague.name(),
                time
            ));
        }

        output.push('\n');
        output.push_str(&self.legend());
        output
    }

    /// The `list` table: every stored field plus the current local time
    pub fn list_table(&self, rows: &[(usize, Colleague)], now: DateTime<Utc>) -> String {
        let mut output = String::new();
        if rows.is_empty() {
            output.push_str(&self.empty_message("all"));
            return output;
        }

        let heading = self.style.bold();
        let separator = format!(
            "{}-+-{}-+-{}-+-{}-+-{}\n",
            "-".repeat(4),
            "-".repeat(20),
            "-".repeat(20),
            "-".repeat(24),
            "-".repeat(20)
        );

        output.push_str(&format!(
            "{} | {} | {} | {} | {}\n",
            heading.render(&format!("{:<4}", "ID")),
            heading.render(&format!("{:<20}", "Name")),
            heading.render(&format!("{:<20}", "City")),
            heading.render(&format!("{:<24}", "Timezone")),
            heading.render(&format!("{:<20}", "Local Time")),
        ));
        output.push_str(&separator);

        for (position, colleague) in rows {
            let time = match colleague.local_time(now) {
                Some(local) => local.format(TIME_FORMAT).to_string(),
                None => "ERROR: Invalid TZ".to_string(),
            };
            output.push_str(&format!(
                "{:<4} | {:<20} | {:<20} | {:<24} | {}\n",
                position,
                colleague.name(),
                colleague.city(),
                colleague.timezone(),
                time
            ));
        }

        output
    }

    /// Local time padded and coloured by availability
    pub fn display_time<Tz: TimeZone>(&self, local: &DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        let text = local.format(TIME_FORMAT).to_string();
        let base = self.style.bold();

        match Availability::from_hour(local.hour()) {
            Availability::Work => base.cyan().render(&format!("{:<32}", text)),
            Availability::Extended => base
                .yellow()
                .render(&format!("{:<32}", format!("{} [Extended]", text))),
            Availability::Off => base
                .red()
                .render(&format!("{:<32}", format!("{} [Off]", text))),
        }
    }

    /// Colour key for the `check` table; empty when colour is off
    pub fn legend(&self) -> String {
        if !self.style.color_enabled() {
            return String::new();
        }

        let mut output = String::new();
        output.push_str("Availability:\n");
        output.push_str(&format!(
            "{} - Work hours (9am-5pm)\n",
            self.style.cyan().bold().render("    Cyan")
        ));
        output.push_str(&format!(
            "{} - Extended hours\n",
            self.style.yellow().bold().render("    Yellow")
        ));
        output.push_str(&format!(
            "{} - Off hours\n",
            self.style.red().bold().render("    Red")
        ));
        output.push('\n');
        output
    }

    /// Message shown when a query has no results
    pub fn empty_message(&self, query: &str) -> String {
        let text = if query == "all" {
            "no colleagues found".to_string()
        } else {
            format!("no colleague found with name: {:?}", query)
        };
        format!("{}\n", self.style.cyan().render(&text))
    }

    pub fn watch_header(&self, interval_minutes: u64) -> String {
        format!(
            "{}\n\n",
            self.style.cyan().render(&format!(
                "⟳ Watch mode (updates every {} mins) - Press Ctrl+C to exit",
                interval_minutes
            ))
        )
    }

    pub fn last_updated(&self, at: NaiveTime) -> String {
        format!(
            "{}\n",
            self.style
                .dim()
                .render(&format!("Last updated: {}", at.format("%H:%M:%S")))
        )
    }

    pub fn watch_cancelled(&self) -> String {
        format!("{}\n", self.style.cyan().render("exiting watch mode..."))
    }

    fn invalid_timezone(&self, width: usize) -> String {
        self.style
            .bold()
            .red()
            .render(&format!("{:<width$}", "ERROR: Invalid TZ", width = width))
    }
}
