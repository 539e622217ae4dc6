//! Request extension trait for reading the gate's verdict in handlers.

use actix_web::HttpMessage;

use crate::routing::AccessState;

/// Access to the [`AccessState`] stored by the route gate middleware.
pub trait RequestExt {
    /// Returns `None` for requests that did not pass through the gate.
    fn access_state(&self) -> Option<AccessState>;
}

impl RequestExt for actix_web::HttpRequest {
    fn access_state(&self) -> Option<AccessState> {
        self.extensions().get::<AccessState>().copied()
    }
}
