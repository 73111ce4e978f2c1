use std::collections::BTreeMap;

use async_trait::async_trait;

use matgate::domain::MaterialCategory;
use matgate::error::{GateError, Result};
use matgate::research::{ResearchOracle, ResearchRequest, ResearchedProperty};

/// Oracle with scripted answers for tests. Bulk discovery returns the whole
/// configured map; single-property research answers from the same map.
pub struct ScriptedOracle {
    answers: BTreeMap<String, ResearchedProperty>,
    fail_with: Option<String>,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self {
            answers: BTreeMap::new(),
            fail_with: None,
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            answers: BTreeMap::new(),
            fail_with: Some(reason.into()),
        }
    }

    pub fn with_answer(mut self, property: &str, answer: ResearchedProperty) -> Self {
        self.answers.insert(property.to_string(), answer);
        self
    }
}

impl Default for ScriptedOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResearchOracle for ScriptedOracle {
    async fn discover_properties(
        &self,
        material: &str,
        _category: MaterialCategory,
    ) -> Result<BTreeMap<String, ResearchedProperty>> {
        match &self.fail_with {
            Some(reason) => Err(GateError::research(material, "*", reason.clone())),
            None => Ok(self.answers.clone()),
        }
    }

    async fn research_property(&self, request: &ResearchRequest) -> Result<ResearchedProperty> {
        if let Some(reason) = &self.fail_with {
            return Err(GateError::research(
                &request.material,
                &request.property,
                reason.clone(),
            ));
        }
        self.answers
            .get(&request.property)
            .cloned()
            .ok_or_else(|| {
                GateError::research(&request.material, &request.property, "no scripted answer")
            })
    }
}
