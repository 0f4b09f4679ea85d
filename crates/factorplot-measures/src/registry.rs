//! Measure Registry
//!
//! Lookup table of plottable measures keyed by entity type and query type, so
//! a host application can find the function serving a given query.

use crate::error::{MeasureError, Result};
use crate::extractor::{factor_exposure, factor_pnl, factor_proportion_of_risk};
use crate::series::FactorSeries;
use factorplot_api::{EntityType, FetchOptions, QueryType, ReportService};
use std::collections::HashMap;

/// Signature shared by every registered measure.
///
/// Arguments are the service, the entity id, the factor name and the fetch options.
pub type MeasureFn =
    fn(&dyn ReportService, &str, &str, &FetchOptions) -> Result<FactorSeries>;

/// Registry of measures keyed by `(EntityType, QueryType)`.
#[derive(Debug, Clone)]
pub struct MeasureRegistry {
    measures: HashMap<(EntityType, QueryType), MeasureFn>,
}

impl MeasureRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            measures: HashMap::new(),
        }
    }

    /// Register `measure`, returning the one it replaced, if any.
    pub fn register(
        &mut self,
        entity: EntityType,
        query: QueryType,
        measure: MeasureFn,
    ) -> Option<MeasureFn> {
        self.measures.insert((entity, query), measure)
    }

    /// Measure registered for the pair, if any.
    pub fn get(&self, entity: EntityType, query: QueryType) -> Option<MeasureFn> {
        self.measures.get(&(entity, query)).copied()
    }

    /// Whether a measure is registered for the pair.
    pub fn contains(&self, entity: EntityType, query: QueryType) -> bool {
        self.measures.contains_key(&(entity, query))
    }

    /// Queries registered for `entity`, in declaration order of [`QueryType::ALL`].
    pub fn queries_for(&self, entity: EntityType) -> Vec<QueryType> {
        QueryType::ALL
            .into_iter()
            .filter(|query| self.contains(entity, *query))
            .collect()
    }

    /// Number of registered measures.
    pub fn len(&self) -> usize {
        self.measures.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }

    /// Run the measure registered for `(entity, query)`.
    ///
    /// # Errors
    /// Returns `MeasureError::UnregisteredMeasure` if nothing is registered,
    /// otherwise whatever the measure returns.
    pub fn evaluate(
        &self,
        entity: EntityType,
        query: QueryType,
        service: &dyn ReportService,
        entity_id: &str,
        factor_name: &str,
        options: &FetchOptions,
    ) -> Result<FactorSeries> {
        let measure = self
            .get(entity, query)
            .ok_or(MeasureError::UnregisteredMeasure { entity, query })?;
        measure(service, entity_id, factor_name, options)
    }
}

impl Default for MeasureRegistry {
    /// The factor measures of factor risk reports.
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(
            EntityType::Report,
            QueryType::FactorExposure,
            factor_exposure,
        );
        registry.register(EntityType::Report, QueryType::FactorPnl, factor_pnl);
        registry.register(
            EntityType::Report,
            QueryType::FactorProportionOfRisk,
            factor_proportion_of_risk,
        );
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_data(
        _service: &dyn ReportService,
        _entity_id: &str,
        _factor_name: &str,
        _options: &FetchOptions,
    ) -> Result<FactorSeries> {
        Ok(FactorSeries::empty(QueryType::FactorPnl))
    }

    #[test]
    fn test_default_registers_report_measures() {
        let registry = MeasureRegistry::default();

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.queries_for(EntityType::Report), QueryType::ALL.to_vec());
        assert!(registry.queries_for(EntityType::Portfolio).is_empty());
    }

    #[test]
    fn test_new_is_empty() {
        let registry = MeasureRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get(EntityType::Report, QueryType::FactorPnl).is_none());
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = MeasureRegistry::default();
        let previous = registry.register(EntityType::Report, QueryType::FactorPnl, no_data);

        assert!(previous.is_some());
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_register_other_entity() {
        let mut registry = MeasureRegistry::new();
        registry.register(EntityType::Portfolio, QueryType::FactorPnl, no_data);

        assert!(registry.contains(EntityType::Portfolio, QueryType::FactorPnl));
        assert!(!registry.contains(EntityType::Report, QueryType::FactorPnl));
    }
}
