use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use store::error::message_from_body;
use store::normalize::{decode_polls, decode_users};
use store::{
    Ack, Endpoint, Method, NewPoll, NewUser, OptionUpdate, Poll, RemoteStore, StoreError, User,
};

/// [`RemoteStore`] backed by the poll backend's JSON API.
#[derive(Clone, Debug)]
pub struct HttpStore {
    client: Client,
    base_url: String,
}

impl HttpStore {
    /// Create a store for the backend at `base_url` (e.g. `http://localhost:8080`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a store that reuses an existing `reqwest` client.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of an endpoint.
    pub fn url(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// Perform a request and return the body of a 2xx response.
    async fn send<B: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        body: Option<&B>,
    ) -> Result<String, StoreError> {
        let url = self.url(&endpoint);
        tracing::debug!(%endpoint, %url, "sending request");

        let mut request = self
            .client
            .request(http_method(endpoint.method()), &url)
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(%endpoint, "request failed: {e}");
            StoreError::Transport(e.to_string())
        })?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = message_from_body(&text);
            tracing::warn!(%endpoint, status = status.as_u16(), ?message, "request rejected");
            return Err(StoreError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(text)
    }

    /// GET a list endpoint and parse its JSON payload.
    async fn fetch_list(&self, endpoint: Endpoint) -> Result<Value, StoreError> {
        let text = self.send::<()>(endpoint, None).await?;
        serde_json::from_str(&text).map_err(|e| StoreError::Malformed(e.to_string()))
    }

    async fn mutate<B: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        body: Option<&B>,
    ) -> Result<Ack, StoreError> {
        let text = self.send(endpoint, body).await?;
        Ok(Ack::from_body(&text))
    }
}

fn http_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

impl RemoteStore for HttpStore {
    async fn list_polls(&self) -> Result<Vec<Poll>, StoreError> {
        let payload = self.fetch_list(Endpoint::ListPolls).await?;
        Ok(decode_polls(payload))
    }

    async fn create_poll(&self, poll: &NewPoll) -> Result<Ack, StoreError> {
        self.mutate(Endpoint::CreatePoll, Some(poll)).await
    }

    async fn delete_poll(&self, id: &str) -> Result<Ack, StoreError> {
        self.mutate::<()>(Endpoint::DeletePoll(id.to_string()), None)
            .await
    }

    async fn update_option(&self, id: &str, correct: bool) -> Result<Ack, StoreError> {
        let body = OptionUpdate { correct };
        self.mutate(Endpoint::UpdateOption(id.to_string()), Some(&body))
            .await
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let payload = self.fetch_list(Endpoint::ListUsers).await?;
        Ok(decode_users(payload))
    }

    async fn create_user(&self, user: &NewUser) -> Result<Ack, StoreError> {
        self.mutate(Endpoint::CreateUser, Some(user)).await
    }

    async fn delete_user(&self, id: &str) -> Result<Ack, StoreError> {
        self.mutate::<()>(Endpoint::DeleteUser(id.to_string()), None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_and_path() {
        let store = HttpStore::new("http://localhost:8080/");
        assert_eq!(store.base_url(), "http://localhost:8080");
        assert_eq!(
            store.url(&Endpoint::DeletePoll("7".to_string())),
            "http://localhost:8080/polls/7"
        );
    }
}
