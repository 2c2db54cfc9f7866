// ==========================================
// 米厂报表客户端 - HTTP 传输层
// ==========================================
// 职责: 发出单次 HTTP/JSON 请求；非 2xx 解析 detail 字段
// 约束: 不重试,不缓存
// ==========================================

use crate::client::error::{ClientError, ClientResult};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::time::{Duration, Instant};

// ==========================================
// HttpMethod / ApiRequest
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        };
        write!(f, "{}", s)
    }
}

/// 一次请求的全部输入
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// 表单字段（application/x-www-form-urlencoded），与 body 互斥
    pub form: Option<Vec<(String, String)>>,
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            form: None,
            bearer: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self.form = None;
        self
    }

    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.form = Some(fields);
        self.body = None;
        self
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

// ==========================================
// Trait: ApiTransport
// ==========================================
// 用途: 生产环境为 HttpTransport,测试环境注入脚本化实现
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// 发出请求并返回 JSON 响应体（空响应体返回 Null）
    async fn send(&self, request: ApiRequest) -> ClientResult<Value>;
}

// ==========================================
// HttpTransport - reqwest 实现
// ==========================================
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// 创建传输层
    ///
    /// # 参数
    /// - `base_url`: 后端地址，例如 `http://localhost:8000`
    /// - `timeout`: 单次请求超时
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("rice-mill-report/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<Value> {
        let url = self.url_for(&request.path);
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        } else if let Some(fields) = &request.form {
            builder = builder.form(fields);
        }

        tracing::debug!(method = %request.method, path = %request.path, "发送请求");
        let started = Instant::now();
        let result = builder.send().await;
        crate::perf::record_http_request(
            &request.method.to_string(),
            &request.path,
            started.elapsed(),
        );

        let resp = check_response(result?).await?;
        let text = resp.text().await?;
        parse_body(&request.path, &text)
    }
}

/// 检查响应状态；非 2xx 转为 ClientError::Status
pub async fn check_response(resp: reqwest::Response) -> ClientResult<reqwest::Response> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Status {
            status: status.as_u16(),
            message: extract_error_message(status.as_u16(), &body),
        });
    }
    Ok(resp)
}

/// 解析响应体；空响应体视为 Null
pub fn parse_body(path: &str, text: &str) -> ClientResult<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| ClientError::Decode {
        path: path.to_string(),
        message: e.to_string(),
    })
}

/// 从错误响应体提取可读信息
///
/// 依次尝试: `{"detail": "..."}`、`{"detail": [{"msg": ...}]}`、`{"message": ...}`、
/// 原始文本、HTTP 状态短语
pub fn extract_error_message(status: u16, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        match json.get("detail") {
            Some(Value::String(s)) => return s.clone(),
            Some(Value::Array(items)) => {
                let msgs: Vec<String> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect();
                if !msgs.is_empty() {
                    return msgs.join("; ");
                }
            }
            Some(other) if !other.is_null() => return other.to_string(),
            _ => {}
        }
        if let Some(Value::String(s)) = json.get("message") {
            return s.clone();
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown error")
        .to_string()
}
