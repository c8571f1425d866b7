use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode};

use crate::config::CrackyApiConfig;
use crate::error::{parse_error_message, CrackyApiError};
use crate::headers::build_headers;
use crate::payload::{ChatReply, ChatRequest};
use crate::url::normalize_chat_url;

#[derive(Debug)]
pub struct CrackyApiClient {
    http: Client,
    config: CrackyApiConfig,
}

impl CrackyApiClient {
    pub fn new(config: CrackyApiConfig) -> Result<Self, CrackyApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(CrackyApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &CrackyApiConfig {
        &self.config
    }

    pub fn chat_endpoint(&self) -> String {
        normalize_chat_url(&self.config.base_url)
    }

    pub fn build_headers(&self, bearer_token: Option<&str>) -> Result<HeaderMap, CrackyApiError> {
        let headers = build_headers(&self.config, bearer_token);
        let mut out = HeaderMap::new();
        for (key, value) in headers {
            out.insert(
                HeaderName::from_bytes(key.as_bytes())
                    .map_err(|_| CrackyApiError::InvalidHeader(format!("header key: {key}")))?,
                HeaderValue::from_str(&value).map_err(|_| {
                    CrackyApiError::InvalidHeader(format!("header value for {key}"))
                })?,
            );
        }
        Ok(out)
    }

    pub fn build_request(
        &self,
        request: &ChatRequest,
        bearer_token: Option<&str>,
    ) -> Result<reqwest::RequestBuilder, CrackyApiError> {
        let headers = self.build_headers(bearer_token)?;
        Ok(self
            .http
            .post(self.chat_endpoint())
            .headers(headers)
            .json(request))
    }

    /// Issues the single chat round trip for one send.
    ///
    /// A `401` maps to [`CrackyApiError::Unauthorized`]; every other
    /// non-success status maps to [`CrackyApiError::Status`] with a message
    /// extracted from the response body.
    pub async fn send_message(
        &self,
        message: &str,
        bearer_token: Option<&str>,
    ) -> Result<ChatReply, CrackyApiError> {
        let request = ChatRequest::new(message);
        let response = self
            .build_request(&request, bearer_token)?
            .send()
            .await
            .map_err(CrackyApiError::from)?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<ChatReply>()
                .await
                .map_err(CrackyApiError::from);
        }

        let body = response.text().await.unwrap_or_default();
        let message = parse_error_message(status, &body);
        if status == StatusCode::UNAUTHORIZED {
            return Err(CrackyApiError::Unauthorized(message));
        }

        Err(CrackyApiError::Status(status, message))
    }
}
