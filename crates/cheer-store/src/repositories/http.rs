//! HTTP implementation of ReactionStore
//!
//! Talks to the reactions REST API. The server is the authority for the
//! one-reaction-per-voter constraint and answers races with 409/404.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use tracing::{debug, info, instrument};

use cheer_core::entities::{NewReaction, Reaction};
use cheer_core::traits::{ReactionStore, RepoResult};
use cheer_core::value_objects::{ReactionKind, SubjectId, VoterId};
use cheer_core::DomainError;

use super::error::{map_http_error, map_status};
use crate::mappers::decode_records;
use crate::models::{ReactionRequest, StoredReaction};

/// Reaction store backed by the reactions REST API
#[derive(Debug, Clone)]
pub struct HttpReactionStore {
    client: Client,
    base_url: Url,
}

impl HttpReactionStore {
    /// Create a store for the API rooted at `base_url`
    ///
    /// Every request is bounded by `timeout`; a request that exceeds it
    /// fails with a transient error.
    pub fn new(base_url: &str, timeout: Duration) -> RepoResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| DomainError::Validation(format!("invalid API url {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(DomainError::Validation(format!(
                "API url {base_url} cannot be used as a base"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Root URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, subject_id: Option<&SubjectId>) -> RepoResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| DomainError::Internal("API url cannot be a base".to_string()))?;
            segments.pop_if_empty().push("reactions");
            if let Some(subject_id) = subject_id {
                segments.push(subject_id.as_str());
            }
        }
        Ok(url)
    }

    async fn read_reaction(response: Response) -> RepoResult<Reaction> {
        let record: StoredReaction = response.json().await.map_err(map_http_error)?;
        Reaction::try_from(record)
    }

    async fn send_write(
        &self,
        request: reqwest::RequestBuilder,
        subject_id: &SubjectId,
        voter_id: &VoterId,
    ) -> RepoResult<Response> {
        let response = request.send().await.map_err(map_http_error)?;
        let status = response.status();
        if !status.is_success() {
            debug!(%status, "Reactions API rejected write");
            return Err(map_status(status, subject_id, voter_id));
        }
        Ok(response)
    }
}

#[async_trait]
impl ReactionStore for HttpReactionStore {
    #[instrument(skip(self))]
    async fn list(&self, subject_id: &SubjectId) -> RepoResult<Vec<Reaction>> {
        let response = self
            .client
            .get(self.url(Some(subject_id))?)
            .send()
            .await
            .map_err(map_http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(match status {
                s if s.is_server_error() || s == reqwest::StatusCode::TOO_MANY_REQUESTS => {
                    DomainError::transient(format!("reactions API returned {s}"))
                }
                s => DomainError::Internal(format!("unexpected reactions API status {s}")),
            });
        }

        let values: Vec<serde_json::Value> = response.json().await.map_err(map_http_error)?;
        let decoded = decode_records(values);

        // The API answers per subject; anything else in the payload is ignored
        Ok(decoded
            .reactions
            .into_iter()
            .filter(|r| &r.subject_id == subject_id)
            .collect())
    }

    #[instrument(skip(self))]
    async fn find(
        &self,
        subject_id: &SubjectId,
        voter_id: &VoterId,
    ) -> RepoResult<Option<Reaction>> {
        Ok(self
            .list(subject_id)
            .await?
            .into_iter()
            .find(|r| &r.voter_id == voter_id))
    }

    #[instrument(skip(self))]
    async fn insert(&self, reaction: NewReaction) -> RepoResult<Reaction> {
        let request = self
            .client
            .post(self.url(None)?)
            .json(&ReactionRequest::from(&reaction));
        let response = self
            .send_write(request, &reaction.subject_id, &reaction.voter_id)
            .await?;

        let created = Self::read_reaction(response).await?;
        info!(
            subject_id = %created.subject_id,
            voter_id = %created.voter_id,
            kind = %created.kind,
            "Reaction posted"
        );
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn replace(
        &self,
        subject_id: &SubjectId,
        voter_id: &VoterId,
        kind: ReactionKind,
    ) -> RepoResult<Reaction> {
        let body = ReactionRequest {
            employee_id: subject_id.as_str().to_string(),
            device_id: voter_id.as_str().to_string(),
            reaction_type: kind,
        };
        let request = self.client.put(self.url(Some(subject_id))?).json(&body);
        let response = self.send_write(request, subject_id, voter_id).await?;

        Self::read_reaction(response).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, subject_id: &SubjectId, voter_id: &VoterId) -> RepoResult<()> {
        let request = self
            .client
            .delete(self.url(Some(subject_id))?)
            .query(&[("deviceId", voter_id.as_str())]);
        self.send_write(request, subject_id, voter_id).await?;
        Ok(())
    }
}
