use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::adapter::ProviderAdapter;
use crate::error::{BookingError, CommunicationError, ResponseError};
use crate::model::{parse_instant, BookingRequest, ProviderCapability, ProviderId, Slot, VehicleType};

pub fn at(ts: &str) -> DateTime<Utc> {
    parse_instant(ts).unwrap()
}

pub fn capability(id: &str, vehicle_types: &[VehicleType]) -> ProviderCapability {
    ProviderCapability {
        id: id.into(),
        city: "test".to_string(),
        address: "test".to_string(),
        phone_number: "test".to_string(),
        email: "test".to_string(),
        vehicle_types: vehicle_types.to_vec(),
    }
}

// How the scripted adapter answers a booking call
#[derive(Debug, Clone)]
pub enum BookingScript {
    Succeed,
    Reject(u16),
    Unreachable,
}

pub struct ScriptedAdapterInner {
    pub id: ProviderId,
    pub slots: Mutex<Vec<(String, DateTime<Utc>)>>,
    pub fail_fetch: AtomicBool,
    pub fetch_delay_ms: AtomicU64,
    pub booking: Mutex<BookingScript>,
    pub calls_to_fetch: AtomicUsize,
    pub calls_to_book: AtomicUsize,
}

/// In-memory provider with call counters, standing in for a remote service.
#[derive(Clone)]
pub struct ScriptedAdapter(pub Arc<ScriptedAdapterInner>);

impl ScriptedAdapter {
    pub fn new(id: &str, slots: &[(&str, &str)]) -> Self {
        Self(Arc::new(ScriptedAdapterInner {
            id: id.into(),
            slots: Mutex::new(
                slots
                    .iter()
                    .map(|(slot_id, ts)| (slot_id.to_string(), at(ts)))
                    .collect(),
            ),
            fail_fetch: AtomicBool::new(false),
            fetch_delay_ms: AtomicU64::new(0),
            booking: Mutex::new(BookingScript::Succeed),
            calls_to_fetch: AtomicUsize::new(0),
            calls_to_book: AtomicUsize::new(0),
        }))
    }

    pub fn set_failing(&self, failing: bool) {
        self.0.fail_fetch.store(failing, Ordering::SeqCst);
    }

    pub fn set_fetch_delay(&self, delay: Duration) {
        self.0
            .fetch_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn set_booking(&self, script: BookingScript) {
        *self.0.booking.lock() = script;
    }

    pub fn set_slots(&self, slots: &[(&str, &str)]) {
        *self.0.slots.lock() = slots
            .iter()
            .map(|(slot_id, ts)| (slot_id.to_string(), at(ts)))
            .collect();
    }

    pub fn fetch_count(&self) -> usize {
        self.0.calls_to_fetch.load(Ordering::SeqCst)
    }

    pub fn book_count(&self) -> usize {
        self.0.calls_to_book.load(Ordering::SeqCst)
    }

    pub fn shared(&self) -> Arc<dyn ProviderAdapter> {
        Arc::new(self.clone())
    }

    fn unreachable(&self, context: &str) -> CommunicationError {
        CommunicationError::decode(self.0.id.clone(), context, "connection refused")
    }
}

#[async_trait]
impl ProviderAdapter for ScriptedAdapter {
    fn provider_id(&self) -> &ProviderId {
        &self.0.id
    }

    async fn fetch_available(&self) -> Result<Vec<Slot>, CommunicationError> {
        self.0.calls_to_fetch.fetch_add(1, Ordering::SeqCst);

        let delay = self.0.fetch_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        if self.0.fail_fetch.load(Ordering::SeqCst) {
            return Err(self.unreachable("listing slots"));
        }

        Ok(self
            .0
            .slots
            .lock()
            .iter()
            .map(|(slot_id, start)| Slot::new(self.0.id.clone(), slot_id.clone(), *start))
            .collect())
    }

    async fn book(&self, request: &BookingRequest) -> Result<Slot, BookingError> {
        self.0.calls_to_book.fetch_add(1, Ordering::SeqCst);

        let script = self.0.booking.lock().clone();
        match script {
            BookingScript::Succeed => {
                let start = self
                    .0
                    .slots
                    .lock()
                    .iter()
                    .find(|(slot_id, _)| slot_id == &request.slot_id)
                    .map(|(_, start)| *start)
                    .unwrap_or_else(Utc::now);
                Ok(Slot::new(self.0.id.clone(), request.slot_id.clone(), start))
            }
            BookingScript::Reject(status) => Err(BookingError::Rejected {
                provider: self.0.id.clone(),
                source: ResponseError::new(status, None, Some("rejected".to_string())),
            }),
            BookingScript::Unreachable => Err(self.unreachable("booking slot").into()),
        }
    }
}

// Serve a mock provider on an ephemeral local port and return its base address
pub async fn serve(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api", addr)
}

// An address nothing is listening on
pub async fn closed_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}
