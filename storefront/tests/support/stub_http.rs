//! Canned-reply HTTP server for exercising the reqwest adapter.
//!
//! Runs a real `actix-web` server on an ephemeral port. Every request is
//! recorded and answered with the next queued reply, whatever its path.

use std::collections::VecDeque;
use std::net::TcpListener;
use std::sync::Mutex;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::http::header::{CONTENT_TYPE, SET_COOKIE};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use url::Url;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

#[derive(Debug, Clone)]
pub struct CannedReply {
    status: u16,
    body: String,
    set_cookie: Option<String>,
    delay: Option<Duration>,
}

impl CannedReply {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self::raw(status, &body.to_string())
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_owned(),
            set_cookie: None,
            delay: None,
        }
    }

    pub fn with_cookie(mut self, cookie: &str) -> Self {
        self.set_cookie = Some(cookie.to_owned());
        self
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Default)]
struct StubState {
    replies: Mutex<VecDeque<CannedReply>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

async fn answer(
    request: HttpRequest,
    body: web::Bytes,
    state: web::Data<StubState>,
) -> HttpResponse {
    state
        .requests
        .lock()
        .expect("requests lock")
        .push(RecordedRequest {
            method: request.method().to_string(),
            path: request.path().to_owned(),
            headers: request
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_owned(),
                        value.to_str().unwrap_or_default().to_owned(),
                    )
                })
                .collect(),
            body: String::from_utf8_lossy(&body).into_owned(),
        });

    let next = state.replies.lock().expect("replies lock").pop_front();
    let Some(reply) = next else {
        return HttpResponse::InternalServerError().body("no canned reply left");
    };
    if let Some(delay) = reply.delay {
        actix_web::rt::time::sleep(delay).await;
    }

    let status = StatusCode::from_u16(reply.status).expect("valid status code");
    let mut response = HttpResponse::build(status);
    response.insert_header((CONTENT_TYPE, "application/json"));
    if let Some(cookie) = reply.set_cookie {
        response.insert_header((SET_COOKIE, cookie));
    }
    response.body(reply.body)
}

pub struct StubServer {
    base_url: Url,
    state: web::Data<StubState>,
    handle: ServerHandle,
}

impl StubServer {
    /// Bind an ephemeral port and answer requests with `replies`, in order.
    ///
    /// Must run inside an actix system (`#[actix_web::test]`).
    pub fn start(replies: Vec<CannedReply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let addr = listener.local_addr().expect("stub address");
        let state = web::Data::new(StubState {
            replies: Mutex::new(replies.into()),
            requests: Mutex::default(),
        });

        let app_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .default_service(web::to(answer))
        })
        .disable_signals()
        .workers(1)
        .listen(listener)
        .expect("listen on stub listener")
        .run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: Url::parse(&format!("http://{addr}/")).expect("stub url"),
            state,
            handle,
        }
    }

    pub fn base_url(&self) -> Url {
        self.base_url.clone()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().expect("requests lock").clone()
    }

    /// Stop accepting connections, dropping requests still in flight.
    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}
