use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "CRITICAL"),
            Self::High => write!(f, "HIGH"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::Low => write!(f, "LOW"),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    PreGeneration,
    MaterialAudit,
    PostGeneration,
    Schema,
}

impl Phase {
    /// Execution order; later phases depend on property data produced by
    /// earlier ones.
    pub const ALL: [Phase; 4] = [
        Self::PreGeneration,
        Self::MaterialAudit,
        Self::PostGeneration,
        Self::Schema,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreGeneration => "pre_generation",
            Self::MaterialAudit => "material_audit",
            Self::PostGeneration => "post_generation",
            Self::Schema => "schema",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|p| p.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown validation phase: '{}'", s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ValidationIssue {
    pub id: String,
    pub phase: Phase,
    pub severity: Severity,
    pub message: String,
    #[serde(default)]
    pub field_path: Option<String>,
}

impl ValidationIssue {
    pub fn new(phase: Phase, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string()[..8].to_string(),
            phase,
            severity,
            message: message.into(),
            field_path: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }
}
