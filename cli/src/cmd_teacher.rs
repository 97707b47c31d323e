// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use edudesk_core::{Filter, RecordId, Teacher, TeacherDraft, TeacherFilter};

use crate::arg::{CommonArgs, OutputFormat, RecordArgs, facet, get_facet};
use crate::cli::Context;
use crate::prompt::{confirm_delete, prompt_password};
use crate::table::print_records;
use crate::teacher_formatter::TeacherColumn;
use crate::util::{find_record, overlay, print_success};

const NOUN: &str = "teacher";

#[derive(Debug, Clone)]
pub struct CmdTeacherList {
    pub filter: TeacherFilter,
    pub output_format: OutputFormat,
}

impl CmdTeacherList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List teachers")
            .arg(CommonArgs::search())
            .arg(facet::<String>("class", "Only the class teacher of this class, e.g. 10-A"))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            filter: TeacherFilter {
                search: CommonArgs::get_search(matches),
                class: get_facet(matches, "class"),
            },
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing teachers...");
        let teachers = ctx.synchronizer::<TeacherDraft>().list().await?;
        let shown: Vec<_> = teachers.iter().filter(|t| self.filter.matches(t)).collect();
        print_records(&shown, &TeacherColumn::all(), self.output_format, NOUN)
    }
}

/// Field values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct TeacherFields {
    pub user_id: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub class_teacher: Option<String>,
    pub no_class: bool,
    pub profile_image: Option<String>,
    pub password: Option<String>,
}

impl TeacherFields {
    fn command(cmd: Command) -> Command {
        let args = RecordArgs::new(NOUN);
        cmd.arg(args.text("employee-id", "Employee ID"))
            .arg(args.text("name", "Full name"))
            .arg(args.text("email", "Gmail address"))
            .arg(args.text("phone", "Ten-digit phone number"))
            .arg(args.text("address", "Address"))
            .arg(args.text("class", "Class label the teacher is class teacher of"))
            .arg(arg!(--"no-class" "Not a class teacher").conflicts_with("class"))
            .arg(args.text("image", "Profile image URL"))
            .arg(args.text("password", "Login password"))
    }

    fn from(matches: &ArgMatches) -> Self {
        Self {
            user_id: RecordArgs::get_text(matches, "employee-id"),
            full_name: RecordArgs::get_text(matches, "name"),
            email: RecordArgs::get_text(matches, "email"),
            phone: RecordArgs::get_text(matches, "phone"),
            address: RecordArgs::get_text(matches, "address"),
            class_teacher: RecordArgs::get_text(matches, "class"),
            no_class: matches.get_flag("no-class"),
            profile_image: RecordArgs::get_text(matches, "image"),
            password: RecordArgs::get_text(matches, "password"),
        }
    }

    fn apply(self, draft: &mut TeacherDraft) {
        overlay(&mut draft.user_id, self.user_id);
        overlay(&mut draft.full_name, self.full_name);
        overlay(&mut draft.email, self.email);
        overlay(&mut draft.phone, self.phone);
        overlay(&mut draft.address, self.address);
        if self.no_class {
            draft.class_teacher = None;
        } else if let Some(class) = self.class_teacher {
            let class = class.trim();
            draft.class_teacher = (!class.is_empty()).then(|| class.to_string());
        }
        if self.profile_image.is_some() {
            draft.profile_image = self.profile_image;
        }
        overlay(&mut draft.password, self.password);
    }
}

/// Rejects a class-teacher assignment to a class the backend does not know.
async fn check_class(ctx: &Context, draft: &TeacherDraft) -> Result<(), Box<dyn Error>> {
    if draft.class_teacher.is_none() {
        return Ok(());
    }
    let classes = ctx.client().list_classes().await?;
    match draft.class_error(&classes) {
        Some(message) => Err(message.into()),
        None => Ok(()),
    }
}

#[derive(Debug, Clone)]
pub struct CmdTeacherNew {
    pub fields: TeacherFields,
}

impl CmdTeacherNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        TeacherFields::command(Command::new(Self::NAME).alias("add").about("Add a teacher"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            fields: TeacherFields::from(matches),
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(user_id = ?self.fields.user_id, "adding new teacher...");
        let mut draft = TeacherDraft::default();
        let ask_password = self.fields.password.is_none();
        self.fields.apply(&mut draft);
        if ask_password {
            draft.password = prompt_password()?;
        }
        check_class(ctx, &draft).await?;

        // uniqueness is checked against the current list
        let sync = ctx.synchronizer::<TeacherDraft>();
        sync.list().await?;
        let teachers = sync.create(&draft).await?;
        print_success(&format!(
            "Teacher \"{}\" added, {} in total",
            draft.full_name.trim(),
            teachers.len()
        ));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdTeacherEdit {
    pub id: RecordId,
    pub fields: TeacherFields,
    pub output_format: OutputFormat,
}

impl CmdTeacherEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        let cmd = Command::new(Self::NAME)
            .about("Edit a teacher, leave the password out to keep it")
            .arg(RecordArgs::new(NOUN).id())
            .arg(CommonArgs::output_format());
        TeacherFields::command(cmd)
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: RecordArgs::get_id(matches),
            fields: TeacherFields::from(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(id = %self.id, "editing teacher...");
        let sync = ctx.synchronizer::<TeacherDraft>();
        let teachers = sync.list().await?;
        let mut draft = TeacherDraft::from(find_record(&teachers, &self.id, NOUN)?);
        self.fields.apply(&mut draft);
        check_class(ctx, &draft).await?;

        let teachers = sync.update(&self.id, &draft).await?;
        print_success("Teacher updated");
        if let Ok(teacher) = find_record(&teachers, &self.id, NOUN) {
            print_records::<Teacher, _>(&[teacher], &TeacherColumn::all(), self.output_format, NOUN)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdTeacherDelete {
    pub id: RecordId,
    pub yes: bool,
}

impl CmdTeacherDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete a teacher")
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
        tracing::debug!(?self, "deleting teacher...");
        let sync = ctx.synchronizer::<TeacherDraft>();
        let teachers = sync.list().await?;
        let name = find_record(&teachers, &self.id, NOUN)?.full_name.clone();

        let deleted = sync
            .delete(&self.id, |_| self.yes || confirm_delete(NOUN, &name))
            .await?;
        if deleted {
            print_success(&format!("Teacher \"{name}\" deleted"));
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

    fn existing() -> TeacherDraft {
        TeacherDraft {
            user_id: "EMP1".to_string(),
            full_name: "Asha Rao".to_string(),
            class_teacher: Some("10-A".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn parses_list_class_facet() {
        let matches = parse(CmdTeacherList::command(), &["test", "list", "--class", "10-A", "-s", "rao"]);
        let cmd = CmdTeacherList::from(&matches);
        assert_eq!(cmd.filter.class, Facet::Only("10-A".to_string()));
        assert_eq!(cmd.filter.search, "rao");
    }

    #[test]
    fn edit_without_password_keeps_it_blank() {
        let matches = parse(CmdTeacherEdit::command(), &["test", "edit", "t1", "--phone", "9876543210"]);
        let mut draft = existing();
        CmdTeacherEdit::from(&matches).fields.apply(&mut draft);
        assert_eq!(draft.phone, "9876543210");
        assert_eq!(draft.password, "");
        assert_eq!(draft.class_teacher.as_deref(), Some("10-A"));
    }

    #[test]
    fn clears_class_assignment() {
        let matches = parse(CmdTeacherEdit::command(), &["test", "edit", "t1", "--no-class"]);
        let mut draft = existing();
        CmdTeacherEdit::from(&matches).fields.apply(&mut draft);
        assert_eq!(draft.class_teacher, None);

        let matches = parse(CmdTeacherEdit::command(), &["test", "edit", "t1", "--class", " "]);
        let mut draft = existing();
        CmdTeacherEdit::from(&matches).fields.apply(&mut draft);
        assert_eq!(draft.class_teacher, None);

        let conflicting = Command::new("test")
            .subcommand(CmdTeacherEdit::command())
            .try_get_matches_from(["test", "edit", "t1", "--class", "9-B", "--no-class"]);
        assert!(conflicting.is_err());
    }

    #[test]
    fn new_takes_all_fields() {
        let matches = parse(
            CmdTeacherNew::command(),
            &[
                "test", "new", "--employee-id", "EMP2", "--name", "Ravi Kumar", "--email",
                "ravi@gmail.com", "--phone", "9123456780", "--address", "12 Park Road", "--class",
                "9-B", "--password", "secret1",
            ],
        );
        let cmd = CmdTeacherNew::from(&matches);
        let mut draft = TeacherDraft::default();
        cmd.fields.apply(&mut draft);
        assert_eq!(draft.user_id, "EMP2");
        assert_eq!(draft.class_teacher.as_deref(), Some("9-B"));
        assert_eq!(draft.password, "secret1");
        assert_eq!(draft.profile_image, None);
    }
}
