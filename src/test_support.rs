//! Loopback HTTP server that records requests, standing in for Supabase and the Bot API in tests.

use std::sync::Mutex;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub apikey: Option<String>,
    pub authorization: Option<String>,
    pub prefer: Option<String>,
    pub body: Value,
}

struct StubReply {
    status: u16,
    body: Value,
}

pub struct StubServer {
    pub url: String,
    requests: web::Data<Mutex<Vec<CapturedRequest>>>,
    handle: ServerHandle,
}

impl StubServer {
    pub async fn start(status: u16, body: Value) -> StubServer {
        let requests = web::Data::new(Mutex::new(Vec::new()));
        let reply = web::Data::new(StubReply { status, body });

        let server = HttpServer::new({
            let requests = requests.clone();
            move || {
                App::new()
                    .app_data(requests.clone())
                    .app_data(reply.clone())
                    .default_service(web::to(record))
            }
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .expect("bind stub server");

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        StubServer {
            url: format!("http://{}", addr),
            requests,
            handle,
        }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

async fn record(
    req: HttpRequest,
    body: web::Bytes,
    requests: web::Data<Mutex<Vec<CapturedRequest>>>,
    reply: web::Data<StubReply>,
) -> HttpResponse {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    requests.lock().unwrap().push(CapturedRequest {
        method: req.method().to_string(),
        path: req.path().to_string(),
        query: req.query_string().to_string(),
        apikey: header("apikey"),
        authorization: header("authorization"),
        prefer: header("prefer"),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    HttpResponse::build(StatusCode::from_u16(reply.status).unwrap()).json(&reply.body)
}
