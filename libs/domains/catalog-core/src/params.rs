use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// `{id}` path parameter shared by every item route.
///
/// Any non-empty identifier is accepted; unknown ones resolve to 404 in
/// the service layer.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct IdParams {
    /// Record identifier
    #[validate(length(min = 1, message = "Id must not be empty"))]
    pub id: String,
}

/// Confirmation body returned by DELETE routes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Category deleted successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
