use async_trait::async_trait;
use prep_core::model::User;
use reqwest::StatusCode;
use tracing::{debug, warn};

use super::RestStore;
use super::mapping::SessionUserRow;
use crate::repository::{RemoteError, SessionRepository};

#[async_trait]
impl SessionRepository for RestStore {
    /// Resolve the live session, if any.
    ///
    /// No access token means no session; an unauthorized response means the
    /// token expired. Both are `Ok(None)`, distinct from transport failures.
    async fn read_session(&self) -> Result<Option<User>, RemoteError> {
        let Some(token) = self.access_token() else {
            return Ok(None);
        };

        debug!("reading session profile");
        let response = self
            .client
            .get(self.auth_url())
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| RemoteError::Connection(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Ok(None);
        }
        if !status.is_success() {
            warn!(status = %status, "session lookup failed");
            return Err(RemoteError::Status(status.as_u16()));
        }

        let row: SessionUserRow = response
            .json()
            .await
            .map_err(|e| RemoteError::Serialization(e.to_string()))?;
        Ok(Some(row.into_user()))
    }
}
