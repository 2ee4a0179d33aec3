/// HTTP client for the VisionFlow extraction service

use std::cell::Cell;
use std::rc::Rc;

use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::callback::Timeout;
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::AbortController;

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use crate::record::{
    DataResponse, ErrorEnvelope, ExtractRequest, ExtractResponse, ExtractionRecord, HealthResponse,
};

/// Operations the coordinator needs from the backend
#[allow(async_fn_in_trait)]
pub trait ExtractionApi {
    /// Read the current record collection
    async fn fetch_records(&self) -> Result<Vec<ExtractionRecord>>;

    /// Ask the backend to extract `url`; `success: false` comes back as `ApiError::Rejected`
    async fn submit_extraction(&self, url: &str) -> Result<ExtractResponse>;

    async fn health(&self) -> Result<HealthResponse>;
}

/// Client for the Flask extraction API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        ApiClient { config }
    }

    async fn exchange<T, B>(&self, builder: RequestBuilder, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let controller = AbortController::new()
            .map_err(|err| ApiError::Network(format!("{:?}", err)))?;
        let deadline = Deadline::arm(self.config.timeout_ms, controller.clone());

        let signal = controller.signal();
        let builder = builder.abort_signal(Some(&signal));
        let request = match body {
            Some(body) => builder.json(body)?,
            None => builder.build()?,
        };

        let outcome = match request.send().await {
            Ok(response) => read_body(response).await,
            Err(err) => Err(ApiError::from(err)),
        };

        outcome.map_err(|err| timed_out_as(err, deadline.expired(), self.config.timeout_ms))
    }
}

impl ExtractionApi for ApiClient {
    async fn fetch_records(&self) -> Result<Vec<ExtractionRecord>> {
        let limit = self.config.record_limit.to_string();
        let builder = Request::get(&self.config.endpoint("/data")).query([("limit", limit)]);

        let response: DataResponse = self.exchange(builder, None::<&()>).await?;
        if response.success {
            Ok(response.data)
        } else {
            Err(ApiError::Rejected(response.error))
        }
    }

    async fn submit_extraction(&self, url: &str) -> Result<ExtractResponse> {
        let builder = Request::post(&self.config.endpoint("/extract"));

        let response: ExtractResponse = self
            .exchange(builder, Some(&ExtractRequest { url }))
            .await?;
        if response.success {
            Ok(response)
        } else {
            Err(ApiError::Rejected(response.error))
        }
    }

    async fn health(&self) -> Result<HealthResponse> {
        let builder = Request::get(&self.config.endpoint("/"));
        self.exchange(builder, None::<&()>).await
    }
}

async fn read_body<T: DeserializeOwned>(response: Response) -> Result<T> {
    if !response.ok() {
        let envelope = response.json::<ErrorEnvelope>().await.unwrap_or_default();
        return Err(ApiError::Server {
            status: response.status(),
            message: envelope.error,
        });
    }

    response.json::<T>().await.map_err(ApiError::from)
}

// An aborted fetch surfaces as a generic network error
fn timed_out_as(err: ApiError, expired: bool, after_ms: u32) -> ApiError {
    if expired {
        ApiError::Timeout { after_ms }
    } else {
        err
    }
}

/// Aborts the request when the timer fires; dropping it disarms the timer
struct Deadline {
    expired: Rc<Cell<bool>>,
    _timer: Timeout,
}

impl Deadline {
    fn arm(after_ms: u32, controller: AbortController) -> Self {
        let expired = Rc::new(Cell::new(false));
        let timer = {
            let expired = expired.clone();
            Timeout::new(after_ms, move || {
                expired.set(true);
                controller.abort();
            })
        };

        Deadline {
            expired,
            _timer: timer,
        }
    }

    fn expired(&self) -> bool {
        self.expired.get()
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_expired_deadline_aborts_request() {
        let controller = AbortController::new().unwrap();
        let deadline = Deadline::arm(20, controller.clone());
        assert!(!deadline.expired());

        TimeoutFuture::new(60).await;

        assert!(deadline.expired());
        assert!(controller.signal().aborted());
    }

    #[wasm_bindgen_test]
    async fn test_dropped_deadline_never_aborts() {
        let controller = AbortController::new().unwrap();
        let deadline = Deadline::arm(20, controller.clone());
        drop(deadline);

        TimeoutFuture::new(60).await;

        assert!(!controller.signal().aborted());
    }
}
