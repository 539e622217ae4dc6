//! Gate decision response model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome of evaluating the gate for a path.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GateDecisionResponse {
    #[schema(example = "/restaurant/menu")]
    pub path: String,
    /// `allow` or `redirect`
    #[schema(example = "redirect")]
    pub decision: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "/restaurant/unauthorised")]
    pub location: Option<String>,
    /// `anonymous`, `unapproved` or `approved`
    #[schema(example = "unapproved")]
    pub state: String,
}
