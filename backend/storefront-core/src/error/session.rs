use crate::error::api::ApiError;
use crate::session::SessionState;

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SessionError {
    #[error("Not Authorized Error: logout requires an authorized session (state: {state}) {location}")]
    NotAuthorized {
        state: SessionState,
        location: ErrorLocation,
    },

    #[error("Logout Error: {source} {location}")]
    Logout {
        #[source]
        source: ApiError,
        location: ErrorLocation,
    },
}

impl SessionError {
    #[track_caller]
    pub fn not_authorized(state: SessionState) -> Self {
        SessionError::NotAuthorized {
            state,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn logout(source: ApiError) -> Self {
        SessionError::Logout {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
