//! Calling a test service without panicking on middleware errors.

use actix_http::Request;
use actix_web::body::{self, MessageBody};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use actix_web::web::Bytes;
use actix_web::HttpResponse;

/// A fully read response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

/// Call `app`; an `Err` is rendered through its `ResponseError` impl the way
/// actix would at the HTTP layer.
pub async fn call_service_or_error<S, B>(app: &S, req: Request) -> TestResponse
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    match app.call(req).await {
        Ok(res) => {
            let status = res.status();
            let headers = res.headers().clone();
            let body = read(res.into_body()).await;
            TestResponse {
                status,
                headers,
                body,
            }
        }
        Err(err) => {
            let res: HttpResponse = err.error_response();
            let status = res.status();
            let headers = res.headers().clone();
            let body = read(res.into_body()).await;
            TestResponse {
                status,
                headers,
                body,
            }
        }
    }
}

async fn read<B: MessageBody>(body: B) -> Bytes {
    match body::to_bytes(body).await {
        Ok(bytes) => bytes,
        Err(_) => panic!("failed to read response body"),
    }
}
