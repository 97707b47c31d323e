// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;

use colored::Color;
use edudesk_core::{LibraryResource, ResourceType};

use crate::table::{PaddingDirection, TableColumn};
use crate::util::join;

#[derive(Debug, Clone, Copy)]
pub enum ResourceColumn {
    Id,
    Title,
    Subject,
    Topic,
    Classes,
    Kind,
    Url,
}

impl ResourceColumn {
    pub fn all() -> Vec<Self> {
        vec![
            Self::Id,
            Self::Title,
            Self::Subject,
            Self::Topic,
            Self::Classes,
            Self::Kind,
            Self::Url,
        ]
    }
}

impl TableColumn<LibraryResource> for ResourceColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Id => "ID",
            Self::Title => "Title",
            Self::Subject => "Subject",
            Self::Topic => "Topic",
            Self::Classes => "Classes",
            Self::Kind => "Type",
            Self::Url => "Link",
        }
        .into()
    }

    fn format<'a>(&self, resource: &'a LibraryResource) -> Cow<'a, str> {
        match self {
            Self::Id => resource.id.as_str().into(),
            Self::Title => resource.title.as_str().into(),
            Self::Subject => resource.subject.as_str().into(),
            Self::Topic => resource.topic.as_deref().unwrap_or("-").into(),
            Self::Classes if resource.classes.is_empty() => "-".into(),
            Self::Classes => join(&resource.classes).into(),
            Self::Kind => resource.kind.to_string().into(),
            Self::Url => resource.url.as_str().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            Self::Id => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn color(&self, resource: &LibraryResource) -> Option<Color> {
        match self {
            Self::Kind => Some(kind_color(resource.kind)),
            _ => None,
        }
    }
}

const fn kind_color(kind: ResourceType) -> Color {
    match kind {
        ResourceType::Pdf => Color::Red,
        ResourceType::Image => Color::Magenta,
        ResourceType::Video => Color::Yellow,
        ResourceType::Link => Color::Cyan,
    }
}
