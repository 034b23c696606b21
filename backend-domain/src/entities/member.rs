// Team and member entities
// Roster data as served by the roster provider

use serde::{Deserialize, Serialize};

use crate::value_objects::{MemberId, TeamId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRef {
    pub id: MemberId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

/// One team block in the roster file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRoster {
    pub team_id: TeamId,
    pub name: String,
    #[serde(default)]
    pub members: Vec<MemberRef>,
}
