//! Test doubles shared by the client and service tests.

use crate::error::TransportError;
use crate::transport::{HttpTransport, Request, Response};
use crate::{ApiClient, ClientConfig};
use async_trait::async_trait;
use harvest_store::Store;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Transport that replays queued responses and records every request.
pub(crate) struct ScriptedTransport {
    script: Mutex<VecDeque<Result<Response, TransportError>>>,
    seen: Mutex<Vec<Request>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Queue a response carrying a JSON body.
    pub(crate) fn push_json(&self, status: u16, body: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(Response::new(status, body.as_bytes().to_vec())));
    }

    /// Queue a transport failure.
    pub(crate) fn push_error(&self, error: TransportError) {
        self.script.lock().unwrap().push_back(Err(error));
    }

    /// Every request sent so far, in order.
    pub(crate) fn requests(&self) -> Vec<Request> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        self.seen.lock().unwrap().push(request);
        match self.script.lock().unwrap().pop_front() {
            Some(result) => result,
            None => panic!("request sent but no scripted response left"),
        }
    }
}

/// Client wired to a scripted transport and a throwaway store.
///
/// Keep the returned TempDir alive; dropping it deletes the store directory.
pub(crate) fn scripted_client() -> (ApiClient, Arc<ScriptedTransport>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(Store::open(dir.path()).unwrap());
    let transport = Arc::new(ScriptedTransport::new());
    let config = ClientConfig::new("http://api.test").unwrap();
    let client = ApiClient::new(config, transport.clone(), store);
    (client, transport, dir)
}
