//! HTTP 客户端实现
//!
//! 基于 `gloo-net` 的 fetch 封装，实现引擎的 [`HttpClient`] trait。

use gloo_net::http::{Method, RequestBuilder};
use stagetrack::shared::protocol::HttpMethod;
use stagetrack::{HttpClient, HttpRequest, HttpResponse, TransportError};

fn method(m: HttpMethod) -> Method {
    match m {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// 浏览器 fetch 客户端
#[derive(Clone, Copy, Default)]
pub struct FetchClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = RequestBuilder::new(&req.url).method(method(req.method));
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError::RequestBuildFailed(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::NetworkError(e.to_string()))?;

        let status = response.status();
        // 204 等无响应体的情况读到空字符串
        let body = response.text().await.unwrap_or_default();

        Ok(HttpResponse { status, body })
    }
}
