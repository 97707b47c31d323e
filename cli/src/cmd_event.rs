// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use chrono::{Local, NaiveDate};
use clap::{ArgMatches, Command};
use edudesk_core::{
    Audience, Event, EventCategory, EventDraft, EventFilter, EventStatus, Filter, Month, RecordId,
    days_in_month, monthly_filter, sort_by_start,
};

use crate::arg::{CommonArgs, OutputFormat, RecordArgs, facet, get_facet, get_month, month};
use crate::cli::Context;
use crate::event_formatter::{CalendarGrid, EventColumn};
use crate::prompt::confirm_delete;
use crate::table::print_records;
use crate::util::{find_record, overlay, print_success};

const NOUN: &str = "event";

#[derive(Debug, Clone)]
pub struct CmdEventList {
    pub month: Option<Month>,
    pub filter: EventFilter,
    pub output_format: OutputFormat,
}

impl CmdEventList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List events, earliest first")
            .arg(month())
            .arg(CommonArgs::search())
            .arg(facet::<EventCategory>("category", "Only events with this type"))
            .arg(facet::<EventStatus>("status", "Only events with this status"))
            .arg(facet::<Audience>("audience", "Only events for this audience"))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            month: get_month(matches),
            filter: EventFilter {
                search: CommonArgs::get_search(matches),
                category: get_facet(matches, "category"),
                status: get_facet(matches, "status"),
                audience: get_facet(matches, "audience"),
            },
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing events...");
        let events = ctx.synchronizer::<EventDraft>().list().await?;

        let mut shown = match self.month {
            Some(month) => monthly_filter(month, &events),
            None => events.iter().collect(),
        };
        shown.retain(|e| self.filter.matches(e));
        sort_by_start(&mut shown);

        print_records(&shown, &EventColumn::all(), self.output_format, NOUN)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdEventCalendar {
    pub month: Option<Month>,
}

impl CmdEventCalendar {
    pub const NAME: &str = "calendar";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("cal")
            .about("Show a month calendar with the events of each day")
            .arg(month())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            month: get_month(matches),
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing calendar...");
        let today = Local::now().date_naive();
        let month = self.month.unwrap_or_else(|| Month::containing(today));
        let events = ctx.synchronizer::<EventDraft>().list().await?;

        let cells = days_in_month(month, today, &events);
        println!("{}", CalendarGrid::new(month, &cells));

        let mut in_month = monthly_filter(month, &events);
        sort_by_start(&mut in_month);
        print_records(&in_month, &EventColumn::all(), OutputFormat::Table, NOUN)
    }
}

/// Field values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct EventFields {
    pub title: Option<String>,
    pub event_name: Option<String>,
    pub description: Option<String>,
    pub event_type: Option<Vec<EventCategory>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<EventStatus>,
    pub target_audience: Option<Vec<Audience>>,
}

impl EventFields {
    fn command(cmd: Command) -> Command {
        let args = RecordArgs::new(NOUN);
        cmd.arg(args.text("title", "Title"))
            .arg(args.text("name", "Name"))
            .arg(args.text("description", "Description"))
            .arg(args.tags::<EventCategory>("type", "Type"))
            .arg(args.date("start", "First day"))
            .arg(args.date("end", "Last day"))
            .arg(
                clap::arg!(--status <STATUS> "Status of the event")
                    .value_parser(clap::value_parser!(EventStatus)),
            )
            .arg(args.tags::<Audience>("audience", "Target audience"))
    }

    fn from(matches: &ArgMatches) -> Self {
        Self {
            title: RecordArgs::get_text(matches, "title"),
            event_name: RecordArgs::get_text(matches, "name"),
            description: RecordArgs::get_text(matches, "description"),
            event_type: RecordArgs::get_tags(matches, "type"),
            start_date: RecordArgs::get_date(matches, "start"),
            end_date: RecordArgs::get_date(matches, "end"),
            status: matches.get_one("status").copied(),
            target_audience: RecordArgs::get_tags(matches, "audience"),
        }
    }

    fn apply(self, draft: &mut EventDraft) {
        overlay(&mut draft.title, self.title);
        overlay(&mut draft.event_name, self.event_name);
        overlay(&mut draft.description, self.description);
        overlay(&mut draft.event_type, self.event_type);
        if self.start_date.is_some() {
            draft.start_date = self.start_date;
        }
        if self.end_date.is_some() {
            draft.end_date = self.end_date;
        }
        overlay(&mut draft.status, self.status);
        overlay(&mut draft.target_audience, self.target_audience);
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventNew {
    pub fields: EventFields,
}

impl CmdEventNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        EventFields::command(Command::new(Self::NAME).alias("add").about("Add a new event"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            fields: EventFields::from(matches),
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new event...");
        let mut draft = EventDraft::default();
        self.fields.apply(&mut draft);

        let sync = ctx.synchronizer::<EventDraft>();
        let events = sync.create(&draft).await?;
        print_success(&format!("Event \"{}\" created, {} in total", draft.title.trim(), events.len()));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventEdit {
    pub id: RecordId,
    pub fields: EventFields,
    pub clear_end: bool,
    pub output_format: OutputFormat,
}

impl CmdEventEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        let cmd = Command::new(Self::NAME)
            .about("Edit an event")
            .arg(RecordArgs::new(NOUN).id())
            .arg(clap::arg!(--"single-day" "Remove the end date").conflicts_with("end"))
            .arg(CommonArgs::output_format());
        EventFields::command(cmd)
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: RecordArgs::get_id(matches),
            fields: EventFields::from(matches),
            clear_end: matches.get_flag("single-day"),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing event...");
        let sync = ctx.synchronizer::<EventDraft>();
        let events = sync.list().await?;
        let mut draft = EventDraft::from(find_record(&events, &self.id, NOUN)?);
        if self.clear_end {
            draft.end_date = None;
        }
        self.fields.apply(&mut draft);

        let events = sync.update(&self.id, &draft).await?;
        print_success("Event updated");
        if let Ok(event) = find_record(&events, &self.id, NOUN) {
            print_records::<Event, _>(&[event], &EventColumn::all(), self.output_format, NOUN)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventDelete {
    pub id: RecordId,
    pub yes: bool,
}

impl CmdEventDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete an event")
            .arg(RecordArgs::new(NOUN).id())
            .arg(CommonArgs::yes())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: RecordArgs::get_id(matches),
            yes: CommonArgs::get_yes(matches),
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting event...");
        let sync = ctx.synchronizer::<EventDraft>();
        let events = sync.list().await?;
        let title = find_record(&events, &self.id, NOUN)?.title.clone();

        let deleted = sync
            .delete(&self.id, |_| self.yes || confirm_delete(NOUN, &title))
            .await?;
        if deleted {
            print_success(&format!("Event \"{title}\" deleted"));
        }
        Ok(())
    }
}
