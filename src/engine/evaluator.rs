//! Two-pass tri-state evaluation.
//!
//! The header pass walks the tree with header-tier values only. Leaves that
//! need the detail record are pending; a pending leaf does not stop an `And`
//! from being `False` or an `Or` from being `True`. The detail record is
//! fetched only when the header pass leaves the root pending.
//!
//! Deferred default exclusions never cause a fetch themselves. They apply
//! when the header carries the flag, or once the record is fetched anyway.

use crate::filter::{Expr, Truth};
use crate::models::ModelHeader;
use crate::store::{DetailStore, TransportError};

use super::defaults::EffectiveFilter;
use super::resolver::{HeaderResolver, Resolution};

/// Evaluates filters for entries of one region within one query.
pub struct Evaluator<'a> {
    resolver: &'a HeaderResolver,
    details: &'a DetailStore,
    region: &'a str,
}

impl<'a> Evaluator<'a> {
    pub fn new(resolver: &'a HeaderResolver, details: &'a DetailStore, region: &'a str) -> Self {
        Self { resolver, details, region }
    }

    /// Evaluate `expr` for one entry, fetching its detail record only if
    /// the header tier cannot decide.
    pub async fn evaluate(&self, expr: &Expr, header: &ModelHeader) -> Result<Truth, TransportError> {
        if let Some(truth) = self.header_pass(expr, header) {
            return Ok(truth);
        }
        let specs = self
            .details
            .detail(&header.model_id, &header.version, self.region)
            .await?;
        Ok(expr.evaluate(&|attribute: &str| {
            self.resolver.resolve_with_detail(header, &specs, attribute)
        }))
    }

    /// Evaluate a query filter for one entry.
    ///
    /// The gate decides whether the detail record is needed. Pending
    /// deferred defaults count as satisfied when no fetch happens.
    pub async fn evaluate_filter(
        &self,
        filter: &EffectiveFilter,
        header: &ModelHeader,
    ) -> Result<Truth, TransportError> {
        match self.header_pass(&filter.gate, header) {
            Some(Truth::True) => Ok(filter
                .deferred
                .as_ref()
                .and_then(|deferred| self.header_pass(deferred, header))
                .unwrap_or(Truth::True)),
            Some(truth) => Ok(truth),
            None => {
                let specs = self
                    .details
                    .detail(&header.model_id, &header.version, self.region)
                    .await?;
                Ok(filter.combined().evaluate(&|attribute: &str| {
                    self.resolver.resolve_with_detail(header, &specs, attribute)
                }))
            }
        }
    }

    /// Header-only evaluation; `None` means the outcome depends on the
    /// detail record.
    pub fn header_pass(&self, expr: &Expr, header: &ModelHeader) -> Option<Truth> {
        match expr {
            Expr::Constant(truth) => Some(*truth),
            Expr::Predicate(p) => {
                if p.is_indeterminate() {
                    return Some(Truth::Unknown);
                }
                match self.resolver.resolve(header, p.attribute()) {
                    Resolution::Cheap(value) => Some(p.test(Some(&value))),
                    Resolution::Unresolved => Some(Truth::Unknown),
                    Resolution::NeedsDetail => None,
                }
            }
            Expr::And(children) => {
                let mut acc = Truth::True;
                let mut pending = false;
                for child in children {
                    match self.header_pass(child, header) {
                        Some(Truth::False) => return Some(Truth::False),
                        Some(truth) => acc = acc.and(truth),
                        None => pending = true,
                    }
                }
                (!pending).then_some(acc)
            }
            Expr::Or(children) => {
                let mut acc = Truth::False;
                let mut pending = false;
                for child in children {
                    match self.header_pass(child, header) {
                        Some(Truth::True) => return Some(Truth::True),
                        Some(truth) => acc = acc.or(truth),
                        None => pending = true,
                    }
                }
                (!pending).then_some(acc)
            }
            Expr::Not(child) => self.header_pass(child, header).map(|t| !t),
            Expr::Identity(child) => self.header_pass(child, header),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ModelSpecs, ModelVersion};
    use crate::store::StaticCatalog;
    use std::sync::Arc;

    const REGION: &str = "us-west-2";

    fn expr(text: &str) -> Expr {
        Expr::parse(text).unwrap()
    }

    fn setup() -> (Arc<StaticCatalog>, HeaderResolver, ModelHeader) {
        let catalog = StaticCatalog::new();
        let header = ModelHeader::new("A", "1.0.0");
        let mut specs = ModelSpecs::new("A", "1.0.0");
        specs.framework = "pytorch".into();
        specs.training_supported = true;
        catalog.insert_entry(REGION, header.clone(), specs);
        (Arc::new(catalog), HeaderResolver::new(ModelVersion::lenient("1.0.0")), header)
    }

    #[tokio::test]
    async fn test_and_false_never_fetches() {
        let (catalog, resolver, header) = setup();
        let store = DetailStore::new(catalog.clone());
        let ev = Evaluator::new(&resolver, &store, REGION);

        let tree = Expr::And(vec![expr("framework == pytorch"), expr("false")]);
        assert_eq!(ev.evaluate(&tree, &header).await.unwrap(), Truth::False);
        assert_eq!(catalog.detail_calls(), 0);
    }

    #[tokio::test]
    async fn test_or_true_never_fetches() {
        let (catalog, resolver, header) = setup();
        let store = DetailStore::new(catalog.clone());
        let ev = Evaluator::new(&resolver, &store, REGION);

        let tree = Expr::Or(vec![expr("training_supported == true"), expr("version == 1.0.0")]);
        assert_eq!(ev.evaluate(&tree, &header).await.unwrap(), Truth::True);
        assert_eq!(catalog.detail_calls(), 0);
    }

    #[tokio::test]
    async fn test_detail_fetched_when_needed() {
        let (catalog, resolver, header) = setup();
        let store = DetailStore::new(catalog.clone());
        let ev = Evaluator::new(&resolver, &store, REGION);

        let tree = Expr::And(vec![expr("version == 1.0.0"), expr("framework == pytorch")]);
        assert_eq!(ev.evaluate(&tree, &header).await.unwrap(), Truth::True);
        assert_eq!(catalog.detail_calls(), 1);

        let tree = expr("training_supported is false");
        assert_eq!(ev.evaluate(&tree, &header).await.unwrap(), Truth::False);
        assert_eq!(catalog.detail_calls(), 1, "second lookup must hit the cache");
    }

    #[tokio::test]
    async fn test_or_unknown_literal() {
        let (catalog, resolver, header) = setup();
        let store = DetailStore::new(catalog.clone());
        let ev = Evaluator::new(&resolver, &store, REGION);

        let t = Expr::Or(vec![expr("framework == pytorch"), expr("unknown")]);
        assert_eq!(ev.evaluate(&t, &header).await.unwrap(), Truth::True);

        let f = Expr::Or(vec![expr("framework == tensorflow"), expr("unknown")]);
        assert_eq!(ev.evaluate(&f, &header).await.unwrap(), Truth::Unknown);

        let u = Expr::Or(vec![expr("nonexistent == 1"), expr("unknown")]);
        assert_eq!(ev.evaluate(&u, &header).await.unwrap(), Truth::Unknown);
    }

    #[tokio::test]
    async fn test_unknown_literal_skips_fetch() {
        let (catalog, resolver, header) = setup();
        let store = DetailStore::new(catalog.clone());
        let ev = Evaluator::new(&resolver, &store, REGION);

        let tree = Expr::not(expr("framework == unknown"));
        assert_eq!(ev.evaluate(&tree, &header).await.unwrap(), Truth::Unknown);
        assert_eq!(catalog.detail_calls(), 0);
    }

    #[tokio::test]
    async fn test_fetch_error_propagates() {
        let (catalog, resolver, header) = setup();
        catalog.fail_detail("A", "1.0.0", TransportError::Unavailable("down".into()));
        let store = DetailStore::new(catalog.clone());
        let ev = Evaluator::new(&resolver, &store, REGION);

        let result = ev.evaluate(&expr("framework == pytorch"), &header).await;
        assert_eq!(result, Err(TransportError::Unavailable("down".into())));
    }

    #[tokio::test]
    async fn test_deferred_defaults_do_not_fetch() {
        let (catalog, resolver, header) = setup();
        catalog.update_specs(|specs| specs.deprecated = true);
        let store = DetailStore::new(catalog.clone());
        let ev = Evaluator::new(&resolver, &store, REGION);

        let filter = EffectiveFilter::new(expr("version == 1.0.0"));
        assert_eq!(ev.evaluate_filter(&filter, &header).await.unwrap(), Truth::True);
        assert_eq!(catalog.detail_calls(), 0);
    }

    #[tokio::test]
    async fn test_deferred_defaults_apply_after_fetch() {
        let (catalog, resolver, header) = setup();
        catalog.update_specs(|specs| specs.deprecated = true);
        let store = DetailStore::new(catalog.clone());
        let ev = Evaluator::new(&resolver, &store, REGION);

        let filter = EffectiveFilter::new(expr("framework == pytorch"));
        assert_eq!(ev.evaluate_filter(&filter, &header).await.unwrap(), Truth::False);
        assert_eq!(catalog.detail_calls(), 1);
    }

    #[tokio::test]
    async fn test_deferred_defaults_use_header_flags() {
        let (catalog, resolver, mut header) = setup();
        header.inference_vulnerable = Some(true);
        let store = DetailStore::new(catalog.clone());
        let ev = Evaluator::new(&resolver, &store, REGION);

        let filter = EffectiveFilter::new(Expr::always());
        assert_eq!(ev.evaluate_filter(&filter, &header).await.unwrap(), Truth::False);
        assert_eq!(catalog.detail_calls(), 0);
    }

    #[test]
    fn test_header_pass_pending_states() {
        let (catalog, resolver, header) = setup();
        let store = DetailStore::new(catalog);
        let ev = Evaluator::new(&resolver, &store, REGION);

        assert_eq!(ev.header_pass(&expr("framework == pytorch"), &header), None);
        assert_eq!(
            ev.header_pass(&Expr::not(Expr::identity(expr("version == 2.0.0"))), &header),
            Some(Truth::True)
        );
        assert_eq!(
            ev.header_pass(
                &Expr::And(vec![expr("unknown"), expr("framework == pytorch")]),
                &header
            ),
            None
        );
        assert_eq!(
            ev.header_pass(&Expr::And(vec![expr("unknown"), expr("true")]), &header),
            Some(Truth::Unknown)
        );
    }
}
