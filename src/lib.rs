// Slot availability aggregator: provider adapters, aggregation cache and query/booking coordinator

pub mod adapter;
pub mod cache;
pub mod config;
pub mod coordinator;
pub mod error;
mod http;
pub mod json_provider;
pub mod model;
pub mod xml_provider;

#[cfg(test)]
pub mod testutils;

// Re-export key types for convenience
pub use adapter::{build_adapter, ProviderAdapter};
pub use cache::{AggregationCache, CacheStatsReport, ProviderRecord, Snapshot};
pub use config::{AppConfig, CacheConfig, ProviderConfig, ProviderKind};
pub use coordinator::Coordinator;
pub use error::{
    BookingError, CommunicationError, ConfigError, ErrorKind, ResponseClass, ResponseError,
    ServiceError, ValidationError,
};
pub use model::{
    Availability, BookingRequest, Filter, FilterRequest, ProviderCapability, ProviderId, Slot,
    SlotKey, VehicleType,
};
