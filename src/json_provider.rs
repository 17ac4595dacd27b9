// Adapter for providers exposing a JSON REST API

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::adapter::ProviderAdapter;
use crate::config::ProviderConfig;
use crate::error::{BookingError, CommunicationError, ConfigError, ResponseError};
use crate::http::{self, ProviderResponse};
use crate::model::{parse_instant, BookingRequest, ProviderId, Slot};

const LIST_CONTEXT: &str = "listing available slots";
const BOOK_CONTEXT: &str = "booking slot";

// Data structures for the provider's JSON payloads
#[derive(Debug, Deserialize, Serialize)]
pub struct JsonSlot {
    pub id: u64,
    pub time: String,
    pub available: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonBookingBody<'a> {
    pub contact_information: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct JsonErrorBody {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl JsonSlot {
    fn into_slot(self, provider: &ProviderId, context: &str) -> Result<Slot, CommunicationError> {
        let start = parse_instant(&self.time).map_err(|e| {
            CommunicationError::decode(
                provider.clone(),
                context,
                format!("invalid time '{}' for slot {}: {}", self.time, self.id, e),
            )
        })?;
        Ok(Slot::new(provider.clone(), self.id.to_string(), start))
    }
}

pub struct JsonProviderAdapter {
    id: ProviderId,
    base: Url,
    client: Client,
}

impl JsonProviderAdapter {
    pub fn new(config: &ProviderConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            id: config.id.clone(),
            base: http::parse_base_url(config)?,
            client: http::build_client(&config.id, config.timeout())?,
        })
    }

    fn response_error(response: &ProviderResponse) -> ResponseError {
        // An unreadable error body still leaves the status to classify on
        let body: JsonErrorBody = serde_json::from_slice(&response.body).unwrap_or_default();
        ResponseError::new(response.status.as_u16(), body.code, body.message)
    }
}

#[async_trait]
impl ProviderAdapter for JsonProviderAdapter {
    fn provider_id(&self) -> &ProviderId {
        &self.id
    }

    async fn fetch_available(&self) -> Result<Vec<Slot>, CommunicationError> {
        let url = http::endpoint(&self.base, &["tire-change-times"]);
        let response = http::execute(&self.id, self.client.get(url), LIST_CONTEXT).await?;

        if !response.is_success() {
            return Err(CommunicationError::new(
                self.id.clone(),
                "provider responded with error status when listing available slots",
                Self::response_error(&response),
            ));
        }

        let listed: Vec<JsonSlot> = serde_json::from_slice(&response.body)
            .map_err(|e| CommunicationError::decode(self.id.clone(), LIST_CONTEXT, e))?;

        listed
            .into_iter()
            .filter(|slot| slot.available)
            .map(|slot| slot.into_slot(&self.id, LIST_CONTEXT))
            .collect()
    }

    async fn book(&self, request: &BookingRequest) -> Result<Slot, BookingError> {
        let url = http::endpoint(
            &self.base,
            &["tire-change-times", request.slot_id.as_str(), "booking"],
        );
        let body = JsonBookingBody {
            contact_information: &request.contact_information,
        };
        let response =
            http::execute(&self.id, self.client.post(url).json(&body), BOOK_CONTEXT).await?;

        if !response.is_success() {
            let error = Self::response_error(&response);
            tracing::info!(
                provider = %self.id,
                slot_id = %request.slot_id,
                status = error.status,
                "provider could not book slot"
            );
            return Err(BookingError::Rejected {
                provider: self.id.clone(),
                source: error,
            });
        }

        let booked: JsonSlot = serde_json::from_slice(&response.body)
            .map_err(|e| CommunicationError::decode(self.id.clone(), BOOK_CONTEXT, e))?;
        Ok(booked.into_slot(&self.id, BOOK_CONTEXT)?)
    }
}
