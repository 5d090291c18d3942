#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use listing_scribe::error::{PersistenceError, ServiceError};
use listing_scribe::gateways::GenerationGateway;
use listing_scribe::gateways::PersistenceGateway;
use listing_scribe::prompt::GenerationRequest;
use listing_scribe::{PropertyAttributes, SavedDescription};

/// Replays canned results in order and records every request it sees
pub struct ScriptedGateway {
    responses: Mutex<Vec<Result<String, ServiceError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGateway {
    pub fn new(responses: Vec<Result<String, ServiceError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().rev().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn returning(content: &str) -> Self {
        Self::new(vec![Ok(content.to_string())])
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationGateway for ScriptedGateway {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ServiceError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop()
            .unwrap_or(Err(ServiceError::Unavailable("no scripted response".to_string())))
    }

    fn backend_name(&self) -> &'static str {
        "scripted"
    }
}

/// Store whose saves always fail
#[derive(Default)]
pub struct BrokenStore {
    pub attempts: AtomicUsize,
}

#[async_trait]
impl PersistenceGateway for BrokenStore {
    async fn list(&self) -> Result<Vec<SavedDescription>, PersistenceError> {
        Err(PersistenceError::Backend("database offline".to_string()))
    }

    async fn save(
        &self,
        _title: &str,
        _content: &str,
        _attributes: &PropertyAttributes,
    ) -> Result<SavedDescription, PersistenceError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(PersistenceError::Backend("database offline".to_string()))
    }
}

pub fn berlin_flat() -> PropertyAttributes {
    PropertyAttributes {
        property_type: Some("Wohnung".to_string()),
        rooms: Some(3.0),
        size: Some(80.0),
        location: Some("Berlin".to_string()),
        ..Default::default()
    }
}
