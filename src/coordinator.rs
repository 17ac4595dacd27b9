// Query/booking coordinator: provider directory, filtered availability and booking
// reconciliation on top of the aggregation cache

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::adapter::{build_adapter, ProviderAdapter};
use crate::cache::{AggregationCache, ProviderRecord};
use crate::config::{AppConfig, CacheConfig};
use crate::error::{ConfigError, ServiceError, ValidationError};
use crate::model::{Availability, BookingRequest, Filter, ProviderCapability, ProviderId, Slot, SlotKey};

pub struct Coordinator {
    providers: Vec<ProviderCapability>,
    adapters: HashMap<ProviderId, Arc<dyn ProviderAdapter>>,
    cache: AggregationCache,
}

impl Coordinator {
    pub fn new(
        entries: Vec<(ProviderCapability, Arc<dyn ProviderAdapter>)>,
        cache_config: CacheConfig,
    ) -> Result<Self, ConfigError> {
        cache_config.validate()?;
        if entries.is_empty() {
            return Err(ConfigError::NoProviders);
        }

        let mut providers = Vec::with_capacity(entries.len());
        let mut adapters = HashMap::with_capacity(entries.len());
        let mut fan_out = Vec::with_capacity(entries.len());

        for (capability, adapter) in entries {
            if adapter.provider_id() != &capability.id {
                return Err(ConfigError::InvalidProvider {
                    provider: capability.id.clone(),
                    reason: format!("adapter serves provider '{}'", adapter.provider_id()),
                });
            }
            if adapters
                .insert(capability.id.clone(), Arc::clone(&adapter))
                .is_some()
            {
                return Err(ConfigError::DuplicateProvider(capability.id));
            }
            fan_out.push(adapter);
            providers.push(capability);
        }

        tracing::info!(
            providers = ?providers.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
            "coordinator ready"
        );

        Ok(Self {
            providers,
            adapters,
            cache: AggregationCache::new(fan_out, cache_config),
        })
    }

    /// Build adapters for every configured provider and wire them to a fresh cache.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let entries = config
            .providers
            .iter()
            .map(|provider| Ok((provider.capability(), build_adapter(provider)?)))
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Self::new(entries, config.cache.clone())
    }

    pub fn list_providers(&self) -> &[ProviderCapability] {
        &self.providers
    }

    pub fn cache(&self) -> &AggregationCache {
        &self.cache
    }

    /// Unreserved slots matching the filter, plus the allowed providers whose last fetch failed.
    ///
    /// Slots come back in no particular order; see `Availability::sorted`.
    pub async fn query_availability(&self, filter: &Filter) -> Result<Availability, ServiceError> {
        filter.validate_range()?;
        let allowed = self.allowed_providers(filter)?;

        let snapshot = self.cache.get().await;

        let failed_providers = snapshot
            .failed_providers()
            .filter(|provider| allowed.contains(provider))
            .cloned()
            .collect();
        let slots = snapshot
            .records()
            .iter()
            .filter(|record| allowed.contains(&record.provider))
            .filter_map(ProviderRecord::slots)
            .flatten()
            .filter(|slot| filter.matches(slot))
            .cloned()
            .collect();

        Ok(Availability {
            slots,
            failed_providers,
        })
    }

    // Configured providers narrowed by the filter's provider and vehicle type selections
    fn allowed_providers(&self, filter: &Filter) -> Result<HashSet<&ProviderId>, ValidationError> {
        let allowed: HashSet<&ProviderId> = self
            .providers
            .iter()
            .filter(|p| filter.providers.is_empty() || filter.providers.contains(&p.id))
            .filter(|p| filter.vehicle_types.is_empty() || p.serves_any(&filter.vehicle_types))
            .map(|p| &p.id)
            .collect();

        if allowed.is_empty() {
            let mut providers: Vec<ProviderId> = filter.providers.iter().cloned().collect();
            providers.sort();
            return Err(ValidationError::NoProvidersAllowed {
                providers,
                vehicle_types: filter.vehicle_types.iter().copied().collect(),
            });
        }
        Ok(allowed)
    }

    /// Book one slot with its provider.
    ///
    /// A successful booking, or a conflict reported by the provider, marks the slot reserved in
    /// the current snapshot so later queries stop offering it. The cache is never reloaded here.
    pub async fn book(&self, request: &BookingRequest) -> Result<Slot, ServiceError> {
        request.validate()?;
        let adapter = self
            .adapters
            .get(&request.provider)
            .ok_or_else(|| ValidationError::UnknownProvider(request.provider.clone()))?;

        match adapter.book(request).await {
            Ok(booked) => {
                tracing::info!(provider = %booked.provider, slot_id = %booked.slot_id, "booked slot");
                self.mark_reserved(&booked.key());
                Ok(booked)
            }
            Err(error) if error.is_conflict() => {
                tracing::info!(
                    provider = %request.provider,
                    slot_id = %request.slot_id,
                    "slot already taken at provider"
                );
                // Identity only: a provider reusing slot ids across times would hide the wrong slot
                self.mark_reserved(&request.key());
                Err(error.into())
            }
            Err(error) => {
                tracing::warn!(
                    provider = %request.provider,
                    slot_id = %request.slot_id,
                    error = %error,
                    "booking failed"
                );
                Err(error.into())
            }
        }
    }

    fn mark_reserved(&self, key: &SlotKey) {
        let marked = self
            .cache
            .current()
            .map_or(false, |snapshot| snapshot.mark_reserved(key));
        if !marked {
            tracing::debug!(
                provider = %key.provider,
                slot_id = %key.slot_id,
                "booked slot not present in current snapshot"
            );
        }
    }
}
