// Canonical slot model shared by adapters, the aggregation cache and the coordinator

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::ValidationError;

// Provider identifier, one per configured provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(String);

impl ProviderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProviderId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// Vehicle types a provider can service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum VehicleType {
    Car,
    Truck,
}

impl FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CAR" => Ok(VehicleType::Car),
            "TRUCK" => Ok(VehicleType::Truck),
            other => Err(format!("Invalid vehicle type: {}", other)),
        }
    }
}

impl TryFrom<String> for VehicleType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Identity of a slot. Slot ids are only unique within one provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub provider: ProviderId,
    pub slot_id: String,
}

impl SlotKey {
    pub fn new(provider: ProviderId, slot_id: impl Into<String>) -> Self {
        Self {
            provider,
            slot_id: slot_id.into(),
        }
    }
}

/// A bookable appointment offered by one provider.
///
/// Equality and hashing only look at `(provider, slot_id)`. The `reserved` flag is the only
/// field that changes after a slot has been published in a snapshot, and it only ever goes
/// from `false` to `true`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    #[serde(rename = "providerId")]
    pub provider: ProviderId,
    pub slot_id: String,
    #[serde(rename = "startInstant")]
    pub start: DateTime<Utc>,
    #[serde(skip)]
    reserved: AtomicBool,
}

impl Slot {
    pub fn new(provider: ProviderId, slot_id: impl Into<String>, start: DateTime<Utc>) -> Self {
        Self {
            provider,
            slot_id: slot_id.into(),
            start,
            reserved: AtomicBool::new(false),
        }
    }

    pub fn key(&self) -> SlotKey {
        SlotKey::new(self.provider.clone(), self.slot_id.clone())
    }

    pub fn matches(&self, key: &SlotKey) -> bool {
        self.provider == key.provider && self.slot_id == key.slot_id
    }

    pub fn is_reserved(&self) -> bool {
        self.reserved.load(Ordering::Acquire)
    }

    pub fn mark_reserved(&self) {
        self.reserved.store(true, Ordering::Release);
    }
}

impl Clone for Slot {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            slot_id: self.slot_id.clone(),
            start: self.start,
            reserved: AtomicBool::new(self.is_reserved()),
        }
    }
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.provider == other.provider && self.slot_id == other.slot_id
    }
}

impl Eq for Slot {}

impl Hash for Slot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.provider.hash(state);
        self.slot_id.hash(state);
    }
}

// Parse an ISO-8601 timestamp with offset into a UTC instant
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value.trim()).map(|dt| dt.with_timezone(&Utc))
}

// Static per-provider metadata exposed in the provider directory
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCapability {
    #[serde(rename = "providerId")]
    pub id: ProviderId,
    pub city: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub vehicle_types: Vec<VehicleType>,
}

impl ProviderCapability {
    pub fn serves_any(&self, wanted: &HashSet<VehicleType>) -> bool {
        self.vehicle_types.iter().any(|v| wanted.contains(v))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub contact_information: String,
    #[serde(rename = "id")]
    pub slot_id: String,
    #[serde(rename = "providerId")]
    pub provider: ProviderId,
}

impl BookingRequest {
    pub fn new(
        provider: impl Into<ProviderId>,
        slot_id: impl Into<String>,
        contact_information: impl Into<String>,
    ) -> Self {
        Self {
            contact_information: contact_information.into(),
            slot_id: slot_id.into(),
            provider: provider.into(),
        }
    }

    pub fn key(&self) -> SlotKey {
        SlotKey::new(self.provider.clone(), self.slot_id.clone())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.contact_information.trim().is_empty() {
            return Err(ValidationError::BlankField("contactInformation"));
        }
        if self.slot_id.trim().is_empty() {
            return Err(ValidationError::BlankField("id"));
        }
        Ok(())
    }
}

/// Availability query parameters.
///
/// Empty `providers` or `vehicle_types` sets mean no restriction. Both instant bounds are
/// inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub providers: HashSet<ProviderId>,
    pub from: DateTime<Utc>,
    pub to: Option<DateTime<Utc>>,
    pub vehicle_types: HashSet<VehicleType>,
}

impl Filter {
    pub fn starting(from: DateTime<Utc>) -> Self {
        Self {
            providers: HashSet::new(),
            from,
            to: None,
            vehicle_types: HashSet::new(),
        }
    }

    pub fn until(mut self, to: DateTime<Utc>) -> Self {
        self.to = Some(to);
        self
    }

    pub fn with_providers<I, P>(mut self, providers: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ProviderId>,
    {
        self.providers = providers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_vehicle_types(mut self, types: impl IntoIterator<Item = VehicleType>) -> Self {
        self.vehicle_types = types.into_iter().collect();
        self
    }

    pub fn validate_range(&self) -> Result<(), ValidationError> {
        match self.to {
            Some(to) if to <= self.from => Err(ValidationError::InvalidRange {
                from: self.from,
                to,
            }),
            _ => Ok(()),
        }
    }

    pub fn matches(&self, slot: &Slot) -> bool {
        !slot.is_reserved()
            && slot.start >= self.from
            && self.to.map_or(true, |to| slot.start <= to)
    }
}

// Date based filter as sent by the request layer; dates are read as UTC midnight
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    #[serde(default)]
    pub selected_providers: Option<Vec<ProviderId>>,
    pub from_date: NaiveDate,
    #[serde(default)]
    pub to_date: Option<NaiveDate>,
    #[serde(default)]
    pub vehicle_types: Option<Vec<VehicleType>>,
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

impl From<FilterRequest> for Filter {
    fn from(request: FilterRequest) -> Self {
        Filter {
            providers: request
                .selected_providers
                .unwrap_or_default()
                .into_iter()
                .collect(),
            from: start_of_day(request.from_date),
            to: request.to_date.map(start_of_day),
            vehicle_types: request.vehicle_types.unwrap_or_default().into_iter().collect(),
        }
    }
}

// Result of an availability query
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub slots: Vec<Slot>,
    #[serde(rename = "failedProviderIds")]
    pub failed_providers: Vec<ProviderId>,
}

impl Availability {
    // Slots ordered by start instant, the order the request layer presents them in
    pub fn sorted(mut self) -> Self {
        self.slots
            .sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.slot_id.cmp(&b.slot_id)));
        self
    }
}
