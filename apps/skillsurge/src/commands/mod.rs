//! Subcommand implementations. Each returns `anyhow::Result` and prints to
//! stdout; logs go to stderr.

pub mod auth;
pub mod dashboard;
pub mod graph;
pub mod interview;
pub mod onboard;
pub mod profile;
pub mod roadmap;
pub mod roles;

use anyhow::{bail, Result};
use serde::Serialize;

use skillsurge::{ApiClient, Config};

/// What every subcommand needs: configuration, the API client and the
/// output mode.
pub struct Ctx {
    pub config: Config,
    pub api: ApiClient,
    pub json: bool,
}

impl Ctx {
    pub fn new(config: Config, api: ApiClient, json: bool) -> Self {
        Self { config, api, json }
    }

    /// The stored user id. Commands scoped to a user fail without one.
    pub fn user_id(&self) -> Result<String> {
        match self.api.session().user_id() {
            Some(id) => Ok(id),
            None => bail!(
                "no user id in the session; run `skillsurge auth login` or `skillsurge onboard` first"
            ),
        }
    }

    pub fn fallback(&self) -> bool {
        self.config.demo_fallback
    }

    /// Prints `value` as pretty JSON when `--json` is set, otherwise runs
    /// the text renderer.
    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce(&T)) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            text(value);
        }
        Ok(())
    }
}

/// `[#####-----]` style bar for a 0–100 percentage.
pub fn bar(percentage: u8, width: usize) -> String {
    let filled = (usize::from(percentage.min(100)) * width + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
