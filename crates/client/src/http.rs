// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thin HTTP wrapper shared by the service clients.
//!
//! Every non-success status becomes [`ClientError::Upstream`] carrying
//! the raw body text; an empty success body decodes as JSON null,
//! matching services that reply 200 with no content.

use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;

use crate::error::ClientError;

#[derive(Debug, Clone, Default)]
pub struct Http {
    client: reqwest::Client,
}

impl Http {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, url: &str) -> Result<Value, ClientError> {
        self.send(self.client.request(Method::GET, url)).await
    }

    pub async fn post_json<B: Serialize>(&self, url: &str, body: &B) -> Result<Value, ClientError> {
        self.send(self.client.request(Method::POST, url).json(body)).await
    }

    pub async fn put_json<B: Serialize>(&self, url: &str, body: &B) -> Result<Value, ClientError> {
        self.send(self.client.request(Method::PUT, url).json(body)).await
    }

    /// DELETE, succeeding on any success status or 204.
    pub async fn delete(&self, url: &str) -> Result<(), ClientError> {
        let res = self.client.request(Method::DELETE, url).send().await?;
        let status = res.status();
        if status.is_success() || status.as_u16() == 204 {
            return Ok(());
        }
        let body = res.text().await.unwrap_or_default();
        Err(ClientError::Upstream { status: status.as_u16(), body })
    }

    /// GET returning the body plus the response ETag, when present.
    pub async fn get_with_etag(&self, url: &str) -> Result<(Value, Option<String>), ClientError> {
        let res = self.client.request(Method::GET, url).send().await?;
        let etag = etag_of(&res);
        let value = Self::decode(res).await?;
        Ok((value, etag))
    }

    /// HEAD returning only the ETag.
    pub async fn head_etag(&self, url: &str) -> Result<Option<String>, ClientError> {
        let res = self.client.request(Method::HEAD, url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(ClientError::Upstream { status: status.as_u16(), body: String::new() });
        }
        Ok(etag_of(&res))
    }

    async fn send(&self, req: RequestBuilder) -> Result<Value, ClientError> {
        Self::decode(req.send().await?).await
    }

    async fn decode(res: Response) -> Result<Value, ClientError> {
        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();
        if !(200..300).contains(&status) {
            return Err(ClientError::Upstream { status, body: text });
        }
        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|_| ClientError::Upstream { status, body: text })
    }
}

fn etag_of(res: &Response) -> Option<String> {
    res.headers()
        .get(reqwest::header::ETAG)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Query-string builder that skips absent values.
pub(crate) fn query(pairs: &[(&str, Option<String>)]) -> String {
    let mut out = String::new();
    for (k, v) in pairs {
        let Some(v) = v else { continue };
        out.push(if out.is_empty() { '?' } else { '&' });
        out.push_str(k);
        out.push('=');
        out.push_str(&urlencode(v));
    }
    out
}

/// Percent-encode a path segment or query value.
pub(crate) fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            _ => {
                out.push('%');
                out.push_str(&format!("{b:02X}"));
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
