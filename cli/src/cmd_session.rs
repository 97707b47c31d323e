// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};

use crate::cli::Context;
use crate::prompt::prompt_token;
use crate::util::print_success;

#[derive(Debug, Clone)]
pub struct CmdLogin {
    pub token: Option<String>,
    pub verify: bool,
}

impl CmdLogin {
    pub const NAME: &str = "login";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Store the access token used for every request")
            .arg(arg!(--token <TOKEN> "Access token, prompted for when omitted"))
            .arg(arg!(--"no-verify" "Store the token without checking it against the server"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            token: matches.get_one::<String>("token").cloned(),
            verify: !matches.get_flag("no-verify"),
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(verify = self.verify, "logging in...");
        let token = match self.token {
            Some(token) => token.trim().to_string(),
            None => prompt_token()?,
        };
        if token.is_empty() {
            return Err("Token cannot be empty".into());
        }

        ctx.session().login(token).await?;
        tracing::debug!("token saved");
        if self.verify {
            // a rejected token is cleared again by the client
            ctx.client().list_classes().await?;
        }
        print_success(if self.verify {
            "Logged in"
        } else {
            "Token saved"
        });
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdLogout;

impl CmdLogout {
    pub const NAME: &str = "logout";

    pub fn command() -> Command {
        Command::new(Self::NAME).about("Forget the stored access token")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        Self
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!("logging out...");
        let was_logged_in = ctx.session().is_authenticated();
        ctx.session().logout().await?;
        if was_logged_in {
            print_success("Logged out");
        } else {
            println!("Not logged in");
        }
        Ok(())
    }
}
