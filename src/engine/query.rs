//! Catalog query pipeline.
//!
//! A query moves through `Init → FetchHeaders → EvaluateEach →
//! SelectVersions → Sort → Done`. Each phase transition is logged at debug
//! level inside the query span.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info, warn, Instrument};

use super::config::EngineConfig;
use super::defaults::EffectiveFilter;
use super::error::CatalogError;
use super::evaluator::Evaluator;
use super::resolver::HeaderResolver;
use super::selection::{bare_ids, select_versions};
use crate::filter::{Expr, FilterInput, Truth};
use crate::models::ModelHeader;
use crate::store::{DetailSource, DetailStore, HeaderStore, ManifestSource};
use crate::telemetry::{self, QuerySpan, SpanExt};

/// Options for one catalog query.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Region to query. None = the engine's default region.
    pub region: Option<String>,
    /// User filter, ANDed with the default exclusions.
    pub filter: FilterInput,
    /// Keep every accepted version instead of the newest per identifier.
    pub list_old_models: bool,
    /// Return `(id, version)` pairs instead of bare identifiers.
    pub list_versions: bool,
    /// Keep entries whose evaluation is `Unknown`.
    pub list_incomplete_models: bool,
    /// Per-query deadline. None = the engine's configured deadline.
    pub deadline: Option<Duration>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn filter(mut self, filter: impl Into<FilterInput>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn list_old_models(mut self, yes: bool) -> Self {
        self.list_old_models = yes;
        self
    }

    pub fn list_versions(mut self, yes: bool) -> Self {
        self.list_versions = yes;
        self
    }

    pub fn list_incomplete_models(mut self, yes: bool) -> Self {
        self.list_incomplete_models = yes;
        self
    }

    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Ordered query output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryResult {
    Ids(Vec<String>),
    Versions(Vec<(String, String)>),
}

impl QueryResult {
    pub fn len(&self) -> usize {
        match self {
            Self::Ids(ids) => ids.len(),
            Self::Versions(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Identifiers in result order (repeated per version in pair mode).
    pub fn ids(&self) -> Vec<&str> {
        match self {
            Self::Ids(ids) => ids.iter().map(String::as_str).collect(),
            Self::Versions(pairs) => pairs.iter().map(|(id, _)| id.as_str()).collect(),
        }
    }
}

/// Query pipeline phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPhase {
    Init,
    FetchHeaders,
    EvaluateEach,
    SelectVersions,
    Sort,
    Done,
}

impl fmt::Display for QueryPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::FetchHeaders => "fetch_headers",
            Self::EvaluateEach => "evaluate_each",
            Self::SelectVersions => "select_versions",
            Self::Sort => "sort",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

fn enter(phase: QueryPhase) {
    debug!(phase = %phase, "query phase");
}

/// What happened to one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Accepted,
    Rejected,
    Incomplete,
    TimedOut,
}

/// Accepted entries of one query, before output shaping.
pub(crate) struct Matched {
    pub region: String,
    /// `(id, version)` after version selection, in final order.
    pub pairs: Vec<(String, String)>,
    /// Detail cache of the query, reusable by follow-up lookups.
    pub details: DetailStore,
}

/// Filters and orders catalog entries.
pub struct CatalogQueryEngine {
    headers: HeaderStore,
    detail_source: Arc<dyn DetailSource>,
    resolver: HeaderResolver,
    config: EngineConfig,
}

impl CatalogQueryEngine {
    pub fn new(
        manifest: Arc<dyn ManifestSource>,
        details: Arc<dyn DetailSource>,
        config: EngineConfig,
    ) -> Self {
        Self {
            headers: HeaderStore::new(manifest),
            detail_source: details,
            resolver: HeaderResolver::new(config.sdk_version.clone()),
            config,
        }
    }

    /// Engine over one source serving both tiers.
    pub fn from_source<S>(source: Arc<S>, config: EngineConfig) -> Self
    where
        S: ManifestSource + DetailSource + 'static,
    {
        Self::new(source.clone(), source, config)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub(crate) fn detail_source(&self) -> Arc<dyn DetailSource> {
        Arc::clone(&self.detail_source)
    }

    /// Run a query and return identifiers or `(id, version)` pairs.
    pub async fn query(&self, options: QueryOptions) -> Result<QueryResult, CatalogError> {
        let list_versions = options.list_versions;
        let matched = self.matching_entries(options).await?;
        let result = if list_versions {
            QueryResult::Versions(matched.pairs)
        } else {
            QueryResult::Ids(bare_ids(matched.pairs))
        };
        enter(QueryPhase::Done);
        Ok(result)
    }

    /// Shared pipeline up to version selection and sorting.
    pub(crate) async fn matching_entries(
        &self,
        options: QueryOptions,
    ) -> Result<Matched, CatalogError> {
        let start = Instant::now();
        if let Err(e) = self.config.validate() {
            telemetry::record_query_failure(e.reason());
            return Err(e);
        }
        let region = options
            .region
            .clone()
            .unwrap_or_else(|| self.config.default_region.clone());
        if region.trim().is_empty() {
            telemetry::record_query_failure("evaluation");
            return Err(CatalogError::Evaluation("region must not be empty".into()));
        }

        let user = match options.filter.clone().into_expr() {
            Ok(expr) => expr,
            Err(e) => {
                let err = CatalogError::from(e);
                telemetry::record_query_failure(err.reason());
                return Err(err);
            }
        };

        let span = QuerySpan::new(&region, &user.to_string());
        let details = DetailStore::new(Arc::clone(&self.detail_source));
        let result = self
            .run(&region, user, &options, &details)
            .instrument(span.clone())
            .await;

        span.record_result(&result);
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
        match result {
            Ok((pairs, evaluated)) => {
                span.record("matched", pairs.len());
                span.record("detail_fetches", details.fetch_count());
                span.record("latency_ms", latency_ms);
                telemetry::record_query_success(pairs.len(), evaluated, latency_ms);
                Ok(Matched { region, pairs, details })
            }
            Err(e) => {
                telemetry::record_query_failure(e.reason());
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        region: &str,
        user: Expr,
        options: &QueryOptions,
        details: &DetailStore,
    ) -> Result<(Vec<(String, String)>, usize), CatalogError> {
        enter(QueryPhase::Init);
        let effective = EffectiveFilter::new(user);
        let deadline = options
            .deadline
            .or(self.config.deadline)
            .map(|d| tokio::time::Instant::now() + d);

        enter(QueryPhase::FetchHeaders);
        let headers = self.headers.headers(region).await?;

        enter(QueryPhase::EvaluateEach);
        let evaluator = Evaluator::new(&self.resolver, details, region);
        let evaluated = headers.len();
        let outcomes: Vec<(ModelHeader, Outcome)> = stream::iter(headers)
            .map(|header| {
                let evaluator = &evaluator;
                let effective = &effective;
                async move {
                    let outcome = evaluate_entry(evaluator, effective, &header, deadline).await?;
                    Ok::<_, CatalogError>((header, outcome))
                }
            })
            .buffered(self.config.max_concurrent_fetches.max(1))
            .try_collect()
            .await?;

        let timed_out = outcomes.iter().filter(|(_, o)| *o == Outcome::TimedOut).count();
        if timed_out > 0 {
            warn!(timed_out, "query deadline elapsed, remaining entries excluded");
        }

        let accepted: Vec<ModelHeader> = outcomes
            .into_iter()
            .filter_map(|(header, outcome)| match outcome {
                Outcome::Accepted => Some(header),
                Outcome::Incomplete if options.list_incomplete_models => Some(header),
                _ => None,
            })
            .collect();

        enter(QueryPhase::SelectVersions);
        enter(QueryPhase::Sort);
        let pairs = select_versions(&accepted, options.list_old_models);
        info!(
            region,
            evaluated,
            accepted = accepted.len(),
            selected = pairs.len(),
            detail_fetches = details.fetch_count(),
            "catalog query complete"
        );
        Ok((pairs, evaluated))
    }
}

async fn evaluate_entry(
    evaluator: &Evaluator<'_>,
    filter: &EffectiveFilter,
    header: &ModelHeader,
    deadline: Option<tokio::time::Instant>,
) -> Result<Outcome, CatalogError> {
    let evaluation = evaluator.evaluate_filter(filter, header);
    let result = match deadline {
        Some(at) => match tokio::time::timeout_at(at, evaluation).await {
            Ok(result) => result,
            Err(_) => {
                telemetry::record_entry_excluded("deadline");
                return Ok(Outcome::TimedOut);
            }
        },
        None => evaluation.await,
    };

    let truth = match result {
        Ok(truth) => truth,
        Err(e) if e.is_fatal() => return Err(e.into()),
        Err(e) => {
            warn!(
                model_id = %header.model_id,
                version = %header.version,
                error = %e,
                "detail record unavailable, entry is incomplete"
            );
            telemetry::record_entry_excluded("transport");
            return Ok(Outcome::Incomplete);
        }
    };

    Ok(match truth {
        Truth::True => Outcome::Accepted,
        Truth::False => {
            telemetry::record_entry_excluded("false");
            Outcome::Rejected
        }
        Truth::Unknown => {
            telemetry::record_entry_excluded("unknown");
            Outcome::Incomplete
        }
    })
}
