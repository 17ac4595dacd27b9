// Provider adapter capability interface and the factory selecting its variants

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{ProviderConfig, ProviderKind};
use crate::error::{BookingError, CommunicationError, ConfigError};
use crate::json_provider::JsonProviderAdapter;
use crate::model::{BookingRequest, ProviderId, Slot};
use crate::xml_provider::XmlProviderAdapter;

/// One backend provider, normalized to the canonical slot model.
///
/// Implementations own their HTTP client and configuration and keep no other state.
#[async_trait]
pub trait ProviderAdapter: Send + Sync + 'static {
    fn provider_id(&self) -> &ProviderId;

    // All currently available slots of this provider
    async fn fetch_available(&self) -> Result<Vec<Slot>, CommunicationError>;

    // Reserve one slot; the returned slot is the provider's own view of it
    async fn book(&self, request: &BookingRequest) -> Result<Slot, BookingError>;
}

pub fn build_adapter(config: &ProviderConfig) -> Result<Arc<dyn ProviderAdapter>, ConfigError> {
    config.validate()?;
    let adapter: Arc<dyn ProviderAdapter> = match config.kind {
        ProviderKind::Json => Arc::new(JsonProviderAdapter::new(config)?),
        ProviderKind::Xml => Arc::new(XmlProviderAdapter::new(config)?),
    };
    Ok(adapter)
}
