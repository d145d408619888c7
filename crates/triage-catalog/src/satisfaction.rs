use std::collections::HashSet;

use triage_core::models::model_spec::ModelSpec;
use triage_core::models::payload::Parameters;

use crate::ModelCatalog;

/// Which of a model's required parameters are known.
///
/// Both lists follow the model's declared parameter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SatisfactionResult {
    pub missing: Vec<String>,
    pub present: Vec<String>,
}

impl SatisfactionResult {
    /// A model is eligible iff nothing is missing.
    pub fn is_eligible(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Per-model satisfaction for one parameter snapshot, in catalog order.
#[derive(Debug, Clone)]
pub struct SatisfactionReport<'a> {
    entries: Vec<(&'a ModelSpec, SatisfactionResult)>,
}

impl<'a> SatisfactionReport<'a> {
    pub fn get(&self, model: &str) -> Option<&SatisfactionResult> {
        self.entries
            .iter()
            .find(|(spec, _)| spec.name == model)
            .map(|(_, result)| result)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a ModelSpec, &SatisfactionResult)> {
        self.entries.iter().map(|(spec, result)| (*spec, result))
    }

    /// Eligible models, in catalog order.
    pub fn eligible(&self) -> Vec<&'a ModelSpec> {
        self.entries
            .iter()
            .filter(|(_, result)| result.is_eligible())
            .map(|(spec, _)| *spec)
            .collect()
    }

    /// Union of every blocked model's missing parameters.
    ///
    /// Ordered by catalog order, then each model's parameter order, with
    /// duplicates removed.
    pub fn missing_union(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .flat_map(|(_, result)| &result.missing)
            .filter(|p| seen.insert(p.as_str()))
            .cloned()
            .collect()
    }
}

/// Compute, for every model in `catalog`, which required parameters are
/// present in `parameters`.
///
/// Pure: `present = required ∩ keys(parameters)`, `missing = required −
/// present`. A `null` value counts as absent.
pub fn match_parameters<'a>(
    parameters: &Parameters,
    catalog: &'a ModelCatalog,
) -> SatisfactionReport<'a> {
    let entries = catalog
        .all()
        .iter()
        .map(|spec| {
            let (present, missing): (Vec<String>, Vec<String>) = spec
                .required_parameters
                .iter()
                .cloned()
                .partition(|p| parameters.get(p).is_some_and(|v| !v.is_null()));
            (spec, SatisfactionResult { missing, present })
        })
        .collect();

    SatisfactionReport { entries }
}
