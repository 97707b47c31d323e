// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg, value_parser};
use edudesk_core::{
    Class, Filter, LibraryResource, RecordId, ResourceDraft, ResourceFilter, ResourceType,
};

use crate::arg::{CommonArgs, OutputFormat, RecordArgs, facet, get_facet};
use crate::cli::Context;
use crate::prompt::confirm_delete;
use crate::resource_formatter::ResourceColumn;
use crate::table::print_records;
use crate::util::{find_record, overlay, print_success};

const NOUN: &str = "resource";

#[derive(Debug, Clone)]
pub struct CmdResourceList {
    pub filter: ResourceFilter,
    pub output_format: OutputFormat,
}

impl CmdResourceList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List library resources")
            .arg(CommonArgs::search())
            .arg(facet::<String>("subject", "Only resources for this subject"))
            .arg(facet::<String>("class", "Only resources for this class, e.g. 10-A"))
            .arg(facet::<ResourceType>("type", "Only resources of this type"))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            filter: ResourceFilter {
                search: CommonArgs::get_search(matches),
                subject: get_facet(matches, "subject"),
                class: get_facet(matches, "class"),
                kind: get_facet(matches, "type"),
            },
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing resources...");
        let resources = ctx.synchronizer::<ResourceDraft>().list().await?;
        let shown: Vec<_> = resources.iter().filter(|r| self.filter.matches(r)).collect();
        print_records(&shown, &ResourceColumn::all(), self.output_format, NOUN)
    }
}

/// Field values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ResourceFields {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub topic: Option<String>,
    pub classes: Option<Vec<String>>,
    pub description: Option<String>,
    pub kind: Option<ResourceType>,
    pub url: Option<String>,
}

impl ResourceFields {
    fn command(cmd: Command) -> Command {
        let args = RecordArgs::new(NOUN);
        cmd.arg(args.text("title", "Title"))
            .arg(args.text("subject", "Subject"))
            .arg(args.text("topic", "Topic"))
            .arg(args.list("class", "Class label"))
            .arg(args.text("description", "Description"))
            .arg(
                arg!(--"type" <TYPE> "Type of the resource")
                    .value_parser(value_parser!(ResourceType)),
            )
            .arg(
                args.text("url", "Link or file name")
                    .long_help("Link of the resource, or the name of a file already uploaded"),
            )
    }

    fn from(matches: &ArgMatches) -> Self {
        Self {
            title: RecordArgs::get_text(matches, "title"),
            subject: RecordArgs::get_text(matches, "subject"),
            topic: RecordArgs::get_text(matches, "topic"),
            classes: RecordArgs::get_tags(matches, "class"),
            description: RecordArgs::get_text(matches, "description"),
            kind: matches.get_one("type").copied(),
            url: RecordArgs::get_text(matches, "url"),
        }
    }

    fn apply(self, draft: &mut ResourceDraft) {
        overlay(&mut draft.title, self.title);
        overlay(&mut draft.subject, self.subject);
        overlay(&mut draft.topic, self.topic);
        overlay(&mut draft.classes, self.classes);
        overlay(&mut draft.description, self.description);
        if self.kind.is_some() {
            draft.kind = self.kind;
        }
        overlay(&mut draft.url, self.url);
    }
}

/// Rejects class labels the backend does not know.
async fn check_classes(ctx: &Context, draft: &ResourceDraft) -> Result<(), Box<dyn Error>> {
    if draft.classes.is_empty() {
        return Ok(());
    }
    let labels = Class::labels(&ctx.client().list_classes().await?);
    match draft.classes.iter().find(|c| !labels.contains(c)) {
        Some(unknown) => Err(format!("Unknown class `{unknown}`").into()),
        None => Ok(()),
    }
}

#[derive(Debug, Clone)]
pub struct CmdResourceNew {
    pub fields: ResourceFields,
}

impl CmdResourceNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        ResourceFields::command(
            Command::new(Self::NAME)
                .alias("add")
                .about("Add a library resource"),
        )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            fields: ResourceFields::from(matches),
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new resource...");
        let mut draft = ResourceDraft::default();
        self.fields.apply(&mut draft);
        check_classes(ctx, &draft).await?;

        let resources = ctx.synchronizer::<ResourceDraft>().create(&draft).await?;
        print_success(&format!(
            "Resource \"{}\" added, {} in the library",
            draft.title.trim(),
            resources.len()
        ));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdResourceEdit {
    pub id: RecordId,
    pub fields: ResourceFields,
    pub output_format: OutputFormat,
}

impl CmdResourceEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        let cmd = Command::new(Self::NAME)
            .about("Edit a library resource")
            .arg(RecordArgs::new(NOUN).id())
            .arg(CommonArgs::output_format());
        ResourceFields::command(cmd)
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: RecordArgs::get_id(matches),
            fields: ResourceFields::from(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing resource...");
        let sync = ctx.synchronizer::<ResourceDraft>();
        let resources = sync.list().await?;
        let mut draft = ResourceDraft::from(find_record(&resources, &self.id, NOUN)?);
        self.fields.apply(&mut draft);
        check_classes(ctx, &draft).await?;

        let resources = sync.update(&self.id, &draft).await?;
        print_success("Resource updated");
        if let Ok(resource) = find_record(&resources, &self.id, NOUN) {
            print_records::<LibraryResource, _>(
                &[resource],
                &ResourceColumn::all(),
                self.output_format,
                NOUN,
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdResourceDelete {
    pub id: RecordId,
    pub yes: bool,
}

impl CmdResourceDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete a library resource")
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
        tracing::debug!(?self, "deleting resource...");
        let sync = ctx.synchronizer::<ResourceDraft>();
        let resources = sync.list().await?;
        let title = find_record(&resources, &self.id, NOUN)?.title.clone();

        let deleted = sync
            .delete(&self.id, |_| self.yes || confirm_delete(NOUN, &title))
            .await?;
        if deleted {
            print_success(&format!("Resource \"{title}\" deleted"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use edudesk_core::Facet;

    use super::*;

    fn parse(cmd: Command, args: &[&str]) -> ArgMatches {
        let name = cmd.get_name().to_string();
        let matches = Command::new("test")
            .subcommand(cmd)
            .try_get_matches_from(args)
            .unwrap();
        matches.subcommand_matches(&name).unwrap().clone()
    }

    #[test]
    fn parses_list_facets() {
        let matches = parse(
            CmdResourceList::command(),
            &["test", "list", "--subject", "Science", "--type", "VIDEO"],
        );
        let cmd = CmdResourceList::from(&matches);
        assert_eq!(cmd.filter.subject, Facet::Only("Science".to_string()));
        assert_eq!(cmd.filter.kind, Facet::Only(ResourceType::Video));
        assert_eq!(cmd.filter.class, Facet::All);
        assert_eq!(cmd.filter.search, "");
    }

    #[test]
    fn new_collects_repeated_classes() {
        let matches = parse(
            CmdResourceNew::command(),
            &[
                "test", "new", "--title", "Atlas", "--subject", "Geography", "--class", "10-A",
                "--class", "9-B", "--type", "link", "--url", "https://atlas.example",
            ],
        );
        let mut draft = ResourceDraft::default();
        CmdResourceNew::from(&matches).fields.apply(&mut draft);
        assert_eq!(draft.classes, vec!["10-A", "9-B"]);
        assert_eq!(draft.kind, Some(ResourceType::Link));
        assert_eq!(draft.url, "https://atlas.example");
        assert_eq!(draft.topic, "");
    }

    #[test]
    fn edit_keeps_unset_fields() {
        let matches = parse(CmdResourceEdit::command(), &["test", "edit", "r1", "--topic", "Maps"]);
        let cmd = CmdResourceEdit::from(&matches);
        let mut draft = ResourceDraft {
            title: "Atlas".to_string(),
            classes: vec!["10-A".to_string()],
            kind: Some(ResourceType::Pdf),
            ..Default::default()
        };
        cmd.fields.apply(&mut draft);
        assert_eq!(draft.title, "Atlas");
        assert_eq!(draft.topic, "Maps");
        assert_eq!(draft.classes, vec!["10-A"]);
        assert_eq!(draft.kind, Some(ResourceType::Pdf));
    }
}
