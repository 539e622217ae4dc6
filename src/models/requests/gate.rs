//! Gate query models.

use serde::Deserialize;
use utoipa::IntoParams;

/// Query for an on-demand gate evaluation.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GateQuery {
    /// Path the client is about to navigate to
    pub path: String,
}
