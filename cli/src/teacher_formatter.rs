// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;

use colored::Color;
use edudesk_core::Teacher;

use crate::table::{PaddingDirection, TableColumn};

#[derive(Debug, Clone, Copy)]
pub enum TeacherColumn {
    Id,
    EmployeeId,
    Name,
    Email,
    Phone,
    ClassTeacher,
}

impl TeacherColumn {
    pub fn all() -> Vec<Self> {
        vec![
            Self::Id,
            Self::EmployeeId,
            Self::Name,
            Self::Email,
            Self::Phone,
            Self::ClassTeacher,
        ]
    }
}

impl TableColumn<Teacher> for TeacherColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Id => "ID",
            Self::EmployeeId => "Employee ID",
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::ClassTeacher => "Class",
        }
        .into()
    }

    fn format<'a>(&self, teacher: &'a Teacher) -> Cow<'a, str> {
        match self {
            Self::Id => teacher.id.as_str().into(),
            Self::EmployeeId => teacher.user_id.as_str().into(),
            Self::Name => teacher.full_name.as_str().into(),
            Self::Email => teacher.email.as_str().into(),
            Self::Phone => teacher.phone.as_str().into(),
            Self::ClassTeacher => teacher.class_teacher.as_deref().unwrap_or("-").into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            Self::Id | Self::Phone => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn color(&self, teacher: &Teacher) -> Option<Color> {
        match self {
            Self::ClassTeacher if teacher.class_teacher.is_none() => Some(Color::BrightBlack),
            _ => None,
        }
    }
}
