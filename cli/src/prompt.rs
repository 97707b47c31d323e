// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use cliclack::{confirm, intro, password};

/// Asks before deleting. A failed prompt counts as "no".
pub fn confirm_delete(noun: &str, label: &str) -> bool {
    match confirm(format!("Delete {noun} \"{label}\"? This cannot be undone."))
        .initial_value(false)
        .interact()
    {
        Ok(yes) => yes,
        Err(e) => {
            tracing::warn!(err = %e, "confirmation prompt failed, not deleting");
            false
        }
    }
}

pub fn prompt_token() -> Result<String, Box<dyn Error>> {
    intro("Edudesk login")?;
    let token: String = password("Paste your access token:")
        .mask('▪')
        .validate(|input: &String| {
            if input.trim().is_empty() {
                Err("Token cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact()?;
    Ok(token.trim().to_string())
}

pub fn prompt_password() -> Result<String, Box<dyn Error>> {
    let pass: String = password("Password for the new teacher:")
        .mask('▪')
        .interact()?;
    Ok(pass)
}
