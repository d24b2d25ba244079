use serde::{Deserialize, Serialize};

/// Scenario used when the user never picked or typed one.
pub const DEFAULT_SCENARIO: &str = "General negotiation";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioPreset {
    SalaryNegotiation,
    ContractDispute,
    PartnershipTerms,
    WorkplaceConflict,
}

impl ScenarioPreset {
    pub fn all() -> [ScenarioPreset; 4] {
        [
            ScenarioPreset::SalaryNegotiation,
            ScenarioPreset::ContractDispute,
            ScenarioPreset::PartnershipTerms,
            ScenarioPreset::WorkplaceConflict,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioPreset::SalaryNegotiation => "Salary Negotiation",
            ScenarioPreset::ContractDispute => "Contract Dispute",
            ScenarioPreset::PartnershipTerms => "Partnership Terms",
            ScenarioPreset::WorkplaceConflict => "Workplace Conflict",
        }
    }

    /// Resolves a preset by its label, or by its 1-based position in [`Self::all`].
    pub fn lookup(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Ok(index) = input.parse::<usize>() {
            return index
                .checked_sub(1)
                .and_then(|i| Self::all().get(i).copied());
        }
        Self::all()
            .into_iter()
            .find(|preset| preset.as_str().eq_ignore_ascii_case(input))
    }
}

impl std::fmt::Display for ScenarioPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
