// ==========================================
// 脚本化传输层
// ==========================================
// 职责: 按 "METHOD path" 返回预设响应，并记录每一次请求
// ==========================================

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use rice_mill_report::client::{ApiRequest, ApiTransport, ClientError, ClientResult, HttpMethod};

/// 预设响应
#[derive(Debug, Clone)]
pub enum MockResponse {
    Json(Value),
    Status(u16, String),
    Network(String),
}

impl MockResponse {
    fn into_result(self) -> ClientResult<Value> {
        match self {
            MockResponse::Json(v) => Ok(v),
            MockResponse::Status(status, message) => Err(ClientError::Status { status, message }),
            MockResponse::Network(msg) => Err(ClientError::Transport(msg)),
        }
    }
}

/// 每个路由一个响应队列；队列只剩一个时重复返回
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<String, VecDeque<MockResponse>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

fn route_key(method: HttpMethod, path: &str) -> String {
    format!("{} {}", method, path)
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: HttpMethod, path: &str, response: MockResponse) {
        self.routes
            .lock()
            .unwrap()
            .entry(route_key(method, path))
            .or_default()
            .push_back(response);
    }

    pub fn respond_json(&self, method: HttpMethod, path: &str, body: Value) {
        self.respond(method, path, MockResponse::Json(body));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// 某个路由被请求的次数
    pub fn count(&self, method: HttpMethod, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn last_request(&self, method: HttpMethod, path: &str) -> Option<ApiRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| r.method == method && r.path == path)
            .cloned()
    }
}

#[async_trait]
impl ApiTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<Value> {
        let key = route_key(request.method, &request.path);
        self.requests.lock().unwrap().push(request);

        let mut routes = self.routes.lock().unwrap();
        let response = match routes.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        response
            .unwrap_or_else(|| MockResponse::Status(404, format!("no route for {}", key)))
            .into_result()
    }
}
