// Match outcome entity
// Final score and scorer breakdown for a played match

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::value_objects::{EventId, MemberId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalEntry {
    pub player: MemberId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minute: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistEntry {
    pub player: MemberId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minute: Option<u32>,
}

/// The recorded result of one match event. At most one of these may
/// ever exist per event; the store enforces that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub event_id: EventId,
    pub team_score: u32,
    pub opponent_score: u32,
    pub opponent_name: String,
    pub goals: Vec<GoalEntry>,
    pub assists: Vec<AssistEntry>,
    pub submitted_by: MemberId,
    pub submitted_at: DateTime<Utc>,
}

impl MatchOutcome {
    /// Every player referenced by a goal or an assist, in entry order.
    pub fn referenced_players(&self) -> impl Iterator<Item = &MemberId> {
        self.goals
            .iter()
            .map(|g| &g.player)
            .chain(self.assists.iter().map(|a| &a.player))
    }
}

/// Scorer line as submitted. The player may still be unassigned in the
/// client's form state; conversion rejects that.
#[derive(Debug, Clone, Deserialize)]
pub struct ScorerDraft {
    #[serde(default)]
    pub player: Option<MemberId>,
    #[serde(default)]
    pub minute: Option<u32>,
}

/// Unvalidated result payload as it arrives over the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchOutcomeDraft {
    pub team_score: u32,
    pub opponent_score: u32,
    pub opponent_name: String,
    #[serde(default)]
    pub goals: Vec<ScorerDraft>,
    #[serde(default)]
    pub assists: Vec<ScorerDraft>,
}

impl MatchOutcomeDraft {
    /// Checks the scorer bookkeeping and produces a storable outcome.
    ///
    /// The goal list must account for every goal in the score, each
    /// entry must name a player, and assists can never outnumber goals.
    pub fn into_outcome(
        self,
        event_id: EventId,
        submitted_by: MemberId,
        now: DateTime<Utc>,
    ) -> Result<MatchOutcome, ValidationError> {
        let opponent_name = self.opponent_name.trim().to_string();
        if opponent_name.is_empty() {
            return Err(ValidationError::new("opponent_name must not be empty"));
        }

        if self.goals.len() != self.team_score as usize {
            return Err(ValidationError::new(format!(
                "team_score is {} but {} goal entries were provided",
                self.team_score,
                self.goals.len()
            )));
        }

        let mut goals = Vec::with_capacity(self.goals.len());
        for (index, entry) in self.goals.into_iter().enumerate() {
            let player = entry.player.ok_or_else(|| {
                ValidationError::new(format!("goal entry {} has no player assigned", index + 1))
            })?;
            goals.push(GoalEntry {
                player,
                minute: entry.minute,
            });
        }

        if self.assists.len() > goals.len() {
            return Err(ValidationError::new(format!(
                "{} assists exceed the {} recorded goals",
                self.assists.len(),
                goals.len()
            )));
        }

        let mut assists = Vec::with_capacity(self.assists.len());
        for (index, entry) in self.assists.into_iter().enumerate() {
            let player = entry.player.ok_or_else(|| {
                ValidationError::new(format!("assist entry {} has no player assigned", index + 1))
            })?;
            assists.push(AssistEntry {
                player,
                minute: entry.minute,
            });
        }

        Ok(MatchOutcome {
            event_id,
            team_score: self.team_score,
            opponent_score: self.opponent_score,
            opponent_name,
            goals,
            assists,
            submitted_by,
            submitted_at: now,
        })
    }
}
