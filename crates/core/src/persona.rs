//! The persona — the individual the assistant speaks as.

use serde::{Deserialize, Serialize};

/// Identity of the represented individual, embedded into every persona
/// prompt and used for the call-to-action nudge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    /// Full name of the subject.
    pub name: String,

    /// Current title / role.
    pub title: String,

    /// Current organization.
    pub organization: String,

    /// Canonical connection URL. Its presence in a response (checked
    /// case-insensitively) suppresses the call-to-action suffix.
    pub connection_url: String,
}

impl Persona {
    /// The fixed call-to-action suffix appended when the nudge fires.
    pub fn connection_invitation(&self) -> String {
        format!(
            "\n\nI'd be happy to connect with you for further discussion \
             about potential opportunities: {}",
            self.connection_url
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invitation_carries_the_canonical_url() {
        let persona = Persona {
            name: "Ada Example".into(),
            title: "CTO".into(),
            organization: "Example Corp".into(),
            connection_url: "https://www.linkedin.com/in/ada-example".into(),
        };
        let invitation = persona.connection_invitation();
        assert!(invitation.contains("linkedin.com/in/ada-example"));
        assert!(invitation.starts_with("\n\n"));
    }
}
