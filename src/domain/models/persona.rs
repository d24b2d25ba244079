use serde::{Deserialize, Serialize};

/// A negotiation style injected into the system instruction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Diplomat,
    #[default]
    Strategist,
    Dealmaker,
}

impl Persona {
    pub fn all() -> [Persona; 3] {
        [Persona::Diplomat, Persona::Strategist, Persona::Dealmaker]
    }

    /// Accepts either the full label (`"The Diplomat"`) or the bare word
    /// (`"diplomat"`), case-insensitively.
    pub fn parse(input: &str) -> Option<Self> {
        let normalized = input.trim().to_lowercase();
        let word = normalized.strip_prefix("the ").unwrap_or(&normalized).trim();
        match word {
            "diplomat" => Some(Persona::Diplomat),
            "strategist" => Some(Persona::Strategist),
            "dealmaker" => Some(Persona::Dealmaker),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Persona::Diplomat => "The Diplomat",
            Persona::Strategist => "The Strategist",
            Persona::Dealmaker => "The Dealmaker",
        }
    }

    /// The figure the persona is modelled on.
    pub fn figure(&self) -> &'static str {
        match self {
            Persona::Diplomat => "Nelson Mandela",
            Persona::Strategist => "Sun Tzu",
            Persona::Dealmaker => "Harvey Specter",
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_parse() {
        assert_eq!(Persona::parse("The Diplomat"), Some(Persona::Diplomat));
        assert_eq!(Persona::parse("strategist"), Some(Persona::Strategist));
        assert_eq!(Persona::parse("  THE DEALMAKER "), Some(Persona::Dealmaker));
        assert_eq!(Persona::parse("The Negotiator"), None);
    }

    #[test]
    fn test_persona_default_and_labels() {
        assert_eq!(Persona::default(), Persona::Strategist);
        assert_eq!(Persona::Diplomat.to_string(), "The Diplomat");
        assert_eq!(Persona::Dealmaker.figure(), "Harvey Specter");
    }
}
