// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::error::Error;

use clap::{ArgMatches, Command};
use edudesk_core::Class;

use crate::arg::{CommonArgs, OutputFormat};
use crate::cli::Context;
use crate::table::{PaddingDirection, TableColumn, print_records};

#[derive(Debug, Clone, Copy)]
pub struct CmdClassList {
    pub output_format: OutputFormat,
}

impl CmdClassList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List class sections and their labels")
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing classes...");
        let classes = ctx.client().list_classes().await?;
        let rows: Vec<_> = classes.iter().collect();
        print_records(&rows, &ClassColumn::all(), self.output_format, "class")
    }
}

#[derive(Debug, Clone, Copy)]
enum ClassColumn {
    Id,
    Label,
}

impl ClassColumn {
    const fn all() -> [Self; 2] {
        [Self::Id, Self::Label]
    }
}

impl TableColumn<Class> for ClassColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Id => "ID",
            Self::Label => "Class",
        }
        .into()
    }

    fn format<'a>(&self, class: &'a Class) -> Cow<'a, str> {
        match self {
            Self::Id => class.id.as_str().into(),
            Self::Label => class.label().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            Self::Id => PaddingDirection::Right,
            Self::Label => PaddingDirection::Left,
        }
    }
}
