// Adapter for providers exposing an XML REST API
use async_trait::async_trait;
use chrono::{Months, NaiveDate, Utc};
use quick_xml::de::from_str;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::adapter::ProviderAdapter;
use crate::config::ProviderConfig;
use crate::error::{BookingError, CommunicationError, ConfigError, ResponseError};
use crate::http::{self, ProviderResponse};
use crate::model::{parse_instant, BookingRequest, ProviderId, Slot};

const LIST_CONTEXT: &str = "listing available slots";
const BOOK_CONTEXT: &str = "booking slot";
const DATE_FORMAT: &str = "%Y-%m-%d";

// Structures for XML deserialization. Root element names are not checked.
#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct XmlAvailableTimes {
    #[serde(rename = "availableTime")]
    pub available_times: Vec<XmlAvailableTime>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct XmlAvailableTime {
    pub uuid: String,
    pub time: String,
}

#[derive(Debug, Serialize)]
#[serde(rename = "london.tireChangeBookingRequest")]
pub struct XmlBookingRequest<'a> {
    #[serde(rename = "contactInformation")]
    pub contact_information: &'a str,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct XmlErrorBody {
    pub error: Option<String>,
    #[serde(rename = "statusCode")]
    pub status_code: Option<String>,
}

impl XmlAvailableTime {
    fn into_slot(self, provider: &ProviderId, context: &str) -> Result<Slot, CommunicationError> {
        if self.uuid.trim().is_empty() {
            return Err(CommunicationError::decode(
                provider.clone(),
                context,
                "slot without uuid",
            ));
        }
        let start = parse_instant(&self.time).map_err(|e| {
            CommunicationError::decode(
                provider.clone(),
                context,
                format!("invalid time '{}' for slot {}: {}", self.time, self.uuid, e),
            )
        })?;
        Ok(Slot::new(provider.clone(), self.uuid, start))
    }
}

// The provider only lists slots inside an explicit window: today until a year from now
fn listing_window(today: NaiveDate) -> (String, String) {
    let until = today.checked_add_months(Months::new(12)).unwrap_or(NaiveDate::MAX);
    (
        today.format(DATE_FORMAT).to_string(),
        until.format(DATE_FORMAT).to_string(),
    )
}

fn decode_body<T: for<'de> Deserialize<'de>>(
    provider: &ProviderId,
    response: &ProviderResponse,
    context: &str,
) -> Result<T, CommunicationError> {
    let text = std::str::from_utf8(&response.body)
        .map_err(|e| CommunicationError::decode(provider.clone(), context, e))?;
    from_str(text).map_err(|e| CommunicationError::decode(provider.clone(), context, e))
}

pub struct XmlProviderAdapter {
    id: ProviderId,
    base: Url,
    client: Client,
}

impl XmlProviderAdapter {
    pub fn new(config: &ProviderConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            id: config.id.clone(),
            base: http::parse_base_url(config)?,
            client: http::build_client(&config.id, config.timeout())?,
        })
    }

    fn response_error(&self, response: &ProviderResponse) -> ResponseError {
        let body: XmlErrorBody =
            decode_body(&self.id, response, "reading error response").unwrap_or_default();
        ResponseError::new(response.status.as_u16(), body.status_code, body.error)
    }
}

#[async_trait]
impl ProviderAdapter for XmlProviderAdapter {
    fn provider_id(&self) -> &ProviderId {
        &self.id
    }

    async fn fetch_available(&self) -> Result<Vec<Slot>, CommunicationError> {
        let (from, until) = listing_window(Utc::now().date_naive());
        let url = http::endpoint(&self.base, &["tire-change-times", "available"]);
        let request = self
            .client
            .get(url)
            .query(&[("from", from.as_str()), ("until", until.as_str())]);
        let response = http::execute(&self.id, request, LIST_CONTEXT).await?;

        if !response.is_success() {
            return Err(CommunicationError::new(
                self.id.clone(),
                "provider responded with error status when listing available slots",
                self.response_error(&response),
            ));
        }

        let listed: XmlAvailableTimes = decode_body(&self.id, &response, LIST_CONTEXT)?;
        listed
            .available_times
            .into_iter()
            .map(|time| time.into_slot(&self.id, LIST_CONTEXT))
            .collect()
    }

    async fn book(&self, request: &BookingRequest) -> Result<Slot, BookingError> {
        let url = http::endpoint(
            &self.base,
            &["tire-change-times", request.slot_id.as_str(), "booking"],
        );
        let body = quick_xml::se::to_string(&XmlBookingRequest {
            contact_information: &request.contact_information,
        })
        .map_err(|e| CommunicationError::decode(self.id.clone(), "encoding booking request", e))?;

        let outbound = self
            .client
            .put(url)
            .header(reqwest::header::CONTENT_TYPE, "application/xml")
            .body(body);
        let response = http::execute(&self.id, outbound, BOOK_CONTEXT).await?;

        if !response.is_success() {
            let error = self.response_error(&response);
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

        let booked: XmlAvailableTime = decode_body(&self.id, &response, BOOK_CONTEXT)?;
        Ok(booked.into_slot(&self.id, BOOK_CONTEXT)?)
    }
}
