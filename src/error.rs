// Error taxonomy shared by the adapters, the cache and the coordinator

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{ProviderId, VehicleType};

// How a non-success provider status is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    ClientError,
    // 422, the slot is already booked
    Conflict,
    ServerError,
}

impl ResponseClass {
    pub fn from_status(status: u16) -> Self {
        match status {
            422 => ResponseClass::Conflict,
            400..=499 => ResponseClass::ClientError,
            _ => ResponseClass::ServerError,
        }
    }
}

/// A provider answered, but with a non-success status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "provider responded with status {status} (code '{}', message '{}')",
    .code.as_deref().unwrap_or("-"),
    .message.as_deref().unwrap_or("-")
)]
pub struct ResponseError {
    pub status: u16,
    pub class: ResponseClass,
    pub code: Option<String>,
    pub message: Option<String>,
}

impl ResponseError {
    pub fn new(status: u16, code: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            class: ResponseClass::from_status(status),
            code,
            message,
        }
    }

    pub fn is_conflict(&self) -> bool {
        self.class == ResponseClass::Conflict
    }
}

#[derive(Error, Debug)]
pub enum CommunicationCause {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Response(#[from] ResponseError),

    #[error("malformed response body: {0}")]
    Decode(String),

    // The fetch never produced an outcome, e.g. the adapter panicked
    #[error("request aborted: {0}")]
    Aborted(String),
}

/// Reaching a provider failed. Always tagged with the provider that failed.
#[derive(Error, Debug)]
#[error("communication with provider '{provider}' failed: {context}")]
pub struct CommunicationError {
    pub provider: ProviderId,
    pub context: String,
    #[source]
    pub cause: CommunicationCause,
}

impl CommunicationError {
    pub fn new(
        provider: ProviderId,
        context: impl Into<String>,
        cause: impl Into<CommunicationCause>,
    ) -> Self {
        Self {
            provider,
            context: context.into(),
            cause: cause.into(),
        }
    }

    pub fn decode(provider: ProviderId, context: impl Into<String>, reason: impl ToString) -> Self {
        Self::new(provider, context, CommunicationCause::Decode(reason.to_string()))
    }

    // The provider's own error report, when it responded at all
    pub fn response(&self) -> Option<&ResponseError> {
        match &self.cause {
            CommunicationCause::Response(response) => Some(response),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(&self.cause, CommunicationCause::Transport(e) if e.is_timeout())
    }
}

// Outcome of a failed adapter booking call
#[derive(Error, Debug)]
pub enum BookingError {
    #[error(transparent)]
    Communication(#[from] CommunicationError),

    #[error("provider '{provider}' rejected the booking: {source}")]
    Rejected {
        provider: ProviderId,
        #[source]
        source: ResponseError,
    },
}

impl BookingError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, BookingError::Rejected { source, .. } if source.is_conflict())
    }
}

// Rejected locally, before any provider is contacted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Expected 'to' value '{to}' to be after 'from' value '{from}'")]
    InvalidRange {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },

    #[error(
        "The combination of selected providers {providers:?} and vehicle types {vehicle_types:?} doesn't allow for any slots to be queried"
    )]
    NoProvidersAllowed {
        providers: Vec<ProviderId>,
        vehicle_types: Vec<VehicleType>,
    },

    #[error("Unknown provider: {0}")]
    UnknownProvider(ProviderId),

    #[error("Field '{0}' must not be blank")]
    BlankField(&'static str),
}

// User-visible failure categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    Conflict,
    UpstreamFailure,
}

/// Errors returned by the coordinator to the request layer.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Communication(#[from] CommunicationError),

    #[error("provider '{provider}' rejected the booking: {source}")]
    Rejected {
        provider: ProviderId,
        #[source]
        source: ResponseError,
    },
}

impl From<BookingError> for ServiceError {
    fn from(error: BookingError) -> Self {
        match error {
            BookingError::Communication(e) => ServiceError::Communication(e),
            BookingError::Rejected { provider, source } => {
                ServiceError::Rejected { provider, source }
            }
        }
    }
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Validation(_) => ErrorKind::InvalidInput,
            ServiceError::Communication(_) => ErrorKind::UpstreamFailure,
            ServiceError::Rejected { source, .. } => match source.class {
                ResponseClass::ClientError => ErrorKind::InvalidInput,
                ResponseClass::Conflict => ErrorKind::Conflict,
                ResponseClass::ServerError => ErrorKind::UpstreamFailure,
            },
        }
    }

    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No providers configured")]
    NoProviders,

    #[error("Multiple providers configured with id '{0}'")]
    DuplicateProvider(ProviderId),

    #[error("Invalid configuration for provider '{provider}': {reason}")]
    InvalidProvider { provider: ProviderId, reason: String },

    #[error("Invalid cache configuration: {0}")]
    InvalidCache(String),

    #[error("Failed to build HTTP client for provider '{provider}': {source}")]
    Client {
        provider: ProviderId,
        #[source]
        source: reqwest::Error,
    },
}
