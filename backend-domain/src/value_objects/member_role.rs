// Member role value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Admin,
    Trainer,
    Member,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Admin => "admin",
            MemberRole::Trainer => "trainer",
            MemberRole::Member => "member",
        }
    }

    /// Admins and trainers schedule events and file match results.
    pub fn can_manage_events(&self) -> bool {
        matches!(self, MemberRole::Admin | MemberRole::Trainer)
    }
}

impl From<&str> for MemberRole {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "admin" => MemberRole::Admin,
            "trainer" => MemberRole::Trainer,
            _ => MemberRole::Member,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_roles_case_insensitively() {
        assert_eq!(MemberRole::from("Admin"), MemberRole::Admin);
        assert_eq!(MemberRole::from("TRAINER"), MemberRole::Trainer);
        assert_eq!(MemberRole::from("member"), MemberRole::Member);
    }

    #[test]
    fn unknown_role_falls_back_to_member() {
        assert_eq!(MemberRole::from("coach"), MemberRole::Member);
        assert!(!MemberRole::from("coach").can_manage_events());
    }

    #[test]
    fn managers_can_manage_events() {
        assert!(MemberRole::Admin.can_manage_events());
        assert!(MemberRole::Trainer.can_manage_events());
        assert!(!MemberRole::Member.can_manage_events());
    }
}
