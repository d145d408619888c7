use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::payload::Parameters;

/// A predictive model the router can dispatch to.
///
/// Immutable once loaded into the catalog. `required_parameters` keeps the
/// catalog's declared order, which drives the order of reported missing
/// parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ModelSpec {
    pub name: String,
    pub required_parameters: Vec<String>,
    /// Identifier of the backend tool that serves this model.
    pub backend_tool: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ModelSpec {
    /// The subset of `parameters` this model is allowed to see.
    ///
    /// Backends only ever receive their own required inputs, never the
    /// whole payload.
    pub fn select(&self, parameters: &Parameters) -> Parameters {
        self.required_parameters
            .iter()
            .filter_map(|name| parameters.get(name).map(|v| (name.clone(), v.clone())))
            .collect()
    }
}
