// YAML roster provider
// The roster is maintained by hand next to the config file and read on
// every lookup, so edits show up without a restart.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::warn;

use backend_domain::ports::RosterProvider;
use backend_domain::value_objects::TeamId;
use backend_domain::{MemberRef, TeamRoster};

use crate::config::validate_identifier;

pub struct FileRosterProvider {
    path: PathBuf,
}

impl FileRosterProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load_rosters(&self) -> Result<Vec<TeamRoster>> {
        if !Path::new(&self.path).exists() {
            warn!("roster file {} not found", self.path.display());
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let rosters: Vec<TeamRoster> = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        for roster in &rosters {
            validate_identifier(&roster.team_id.0, "team_id")?;
            for member in &roster.members {
                validate_identifier(&member.id.0, "member id")?;
            }
        }
        Ok(rosters)
    }
}

#[async_trait]
impl RosterProvider for FileRosterProvider {
    async fn team_members(&self, team: &TeamId) -> Result<Vec<MemberRef>> {
        let rosters = self.load_rosters().await?;
        Ok(rosters
            .into_iter()
            .find(|roster| &roster.team_id == team)
            .map(|roster| roster.members)
            .unwrap_or_default())
    }
}
