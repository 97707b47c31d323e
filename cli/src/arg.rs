// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::{Arg, ArgAction, ArgMatches, arg, value_parser};
use edudesk_core::{ALL, Facet, Month, RecordId};

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn output_format() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("table")
    }

    pub fn get_output_format(matches: &ArgMatches) -> OutputFormat {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(OutputFormat::Table)
    }

    pub fn yes() -> Arg {
        arg!(-y --yes "Skip the confirmation prompt")
    }

    pub fn get_yes(matches: &ArgMatches) -> bool {
        matches.get_flag("yes")
    }

    pub fn search() -> Arg {
        arg!(-s --search <QUERY> "Case-insensitive text to look for")
    }

    pub fn get_search(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("search")
            .cloned()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RecordArgs {
    noun: &'static str,
}

impl RecordArgs {
    pub const fn new(noun: &'static str) -> Self {
        Self { noun }
    }

    pub fn id(self) -> Arg {
        arg!(id: <ID>).help(format!("The id of the {}", self.noun))
    }

    pub fn get_id(matches: &ArgMatches) -> RecordId {
        matches
            .get_one::<String>("id")
            .map(|id| RecordId::from(id.as_str()))
            .expect("id is required")
    }

    /// A free-text field of the record.
    pub fn text(self, name: &'static str, what: &str) -> Arg {
        Arg::new(name)
            .long(name)
            .value_name(name.to_uppercase())
            .help(format!("{what} of the {}", self.noun))
    }

    pub fn get_text(matches: &ArgMatches, name: &str) -> Option<String> {
        matches.get_one::<String>(name).cloned()
    }

    /// A repeatable tag field, given once per value.
    pub fn tags<T>(self, name: &'static str, what: &str) -> Arg
    where
        T: clap::ValueEnum + Clone + Send + Sync + 'static,
    {
        Arg::new(name)
            .long(name)
            .value_name(name.to_uppercase())
            .help(format!("{what} of the {}, repeat for more", self.noun))
            .value_parser(value_parser!(T))
            .action(ArgAction::Append)
    }

    pub fn get_tags<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, name: &str) -> Option<Vec<T>> {
        matches
            .get_many::<T>(name)
            .map(|values| values.cloned().collect())
    }

    /// A repeatable free-text field.
    pub fn list(self, name: &'static str, what: &str) -> Arg {
        Arg::new(name)
            .long(name)
            .value_name(name.to_uppercase())
            .help(format!("{what} of the {}, repeat for more", self.noun))
            .action(ArgAction::Append)
    }

    pub fn date(self, name: &'static str, what: &str) -> Arg {
        Arg::new(name)
            .long(name)
            .value_name("YYYY-MM-DD")
            .help(format!("{what} of the {}", self.noun))
            .value_parser(parse_date)
    }

    pub fn get_date(matches: &ArgMatches, name: &str) -> Option<NaiveDate> {
        matches.get_one(name).copied()
    }
}

/// An exact-match filter, `All` disables it.
pub fn facet<T>(name: &'static str, help: &'static str) -> Arg
where
    T: FromStr + Clone + Send + Sync + 'static,
    T::Err: Error + Send + Sync + 'static,
{
    Arg::new(name)
        .long(name)
        .help(help)
        .default_value(ALL)
        .value_parser(|s: &str| s.parse::<Facet<T>>())
}

pub fn get_facet<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, name: &str) -> Facet<T> {
    matches
        .get_one::<Facet<T>>(name)
        .cloned()
        .unwrap_or_default()
}

pub fn month() -> Arg {
    arg!(-m --month <MONTH> "Month to show, as YYYY-MM").value_parser(value_parser!(Month))
}

pub fn get_month(matches: &ArgMatches) -> Option<Month> {
    matches.get_one("month").copied()
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date `{s}`, expected YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use clap::Command;
    use edudesk_core::EventCategory;

    use super::*;

    #[test]
    fn facets_default_to_all() {
        let cmd = Command::new("test")
            .arg(facet::<String>("subject", "Subject"))
            .arg(facet::<String>("class", "Class"));

        let matches = cmd.clone().try_get_matches_from(["test"]).unwrap();
        assert_eq!(get_facet::<String>(&matches, "subject"), Facet::All);

        let matches = cmd
            .try_get_matches_from(["test", "--subject", "Science", "--class", "All Classes"])
            .unwrap();
        assert_eq!(
            get_facet::<String>(&matches, "subject"),
            Facet::Only("Science".to_string())
        );
        assert_eq!(get_facet::<String>(&matches, "class"), Facet::All);
    }

    #[test]
    fn parses_repeated_tags_and_dates() {
        let args = RecordArgs::new("event");
        let cmd = Command::new("test")
            .arg(args.tags::<EventCategory>("type", "Category"))
            .arg(args.date("start", "Start date"));

        let matches = cmd
            .clone()
            .try_get_matches_from(["test", "--type", "sport", "--type", "cultural", "--start", "2025-03-10"])
            .unwrap();
        assert_eq!(
            RecordArgs::get_tags::<EventCategory>(&matches, "type"),
            Some(vec![EventCategory::Sport, EventCategory::Cultural])
        );
        assert_eq!(
            RecordArgs::get_date(&matches, "start"),
            NaiveDate::from_ymd_opt(2025, 3, 10)
        );

        assert!(cmd.try_get_matches_from(["test", "--start", "10/03/2025"]).is_err());
    }
}
