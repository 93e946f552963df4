//! Built-in exclusions applied to every query.
//!
//! `supported_model` is derived from the manifest entry and gates every
//! query. The deprecation and vulnerability flags usually live only in the
//! detail record, so they are deferred: checked when the header carries
//! the flag, or when the user filter already forced the detail fetch.

use crate::filter::{Expr, Predicate};

/// `(attribute, required value)` pairs ANDed in front of the user filter.
pub const DEFAULT_EXCLUSIONS: [(&str, bool); 4] = [
    ("deprecated", false),
    ("inference_vulnerable", false),
    ("training_vulnerable", false),
    ("supported_model", true),
];

/// Defaults that never trigger a detail fetch on their own.
pub const DEFERRED_EXCLUSIONS: [&str; 3] =
    ["deprecated", "inference_vulnerable", "training_vulnerable"];

/// The user filter combined with the defaults it does not override.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveFilter {
    /// Header-tier defaults and the user filter.
    pub gate: Expr,
    /// Detail-tier defaults, `None` when the user filter mentions them all.
    pub deferred: Option<Expr>,
}

impl EffectiveFilter {
    /// Split the defaults not mentioned by `user` into gating and deferred.
    ///
    /// A default is dropped when `user` mentions its attribute anywhere, so
    /// `deprecated == true` lists deprecated models while still hiding
    /// vulnerable ones.
    pub fn new(user: Expr) -> Self {
        let (deferred, gating): (Vec<_>, Vec<_>) = DEFAULT_EXCLUSIONS
            .iter()
            .filter(|(attribute, _)| !user.mentions(attribute))
            .map(|(attribute, value)| {
                (*attribute, Expr::Predicate(Predicate::flag(attribute, *value)))
            })
            .partition(|(attribute, _)| DEFERRED_EXCLUSIONS.contains(attribute));

        let mut gate: Vec<Expr> = gating.into_iter().map(|(_, e)| e).collect();
        if !user.is_always_true() || gate.is_empty() {
            gate.push(user);
        }
        let gate = if gate.len() == 1 {
            gate.remove(0)
        } else {
            Expr::And(gate)
        };

        let deferred: Vec<Expr> = deferred.into_iter().map(|(_, e)| e).collect();
        let deferred = (!deferred.is_empty()).then(|| Expr::And(deferred));
        Self { gate, deferred }
    }

    /// Every check as one conjunction, deferred defaults first.
    pub fn combined(&self) -> Expr {
        match &self.deferred {
            Some(Expr::And(defaults)) => {
                let mut children = defaults.clone();
                children.push(self.gate.clone());
                Expr::And(children)
            }
            Some(other) => Expr::And(vec![other.clone(), self.gate.clone()]),
            None => self.gate.clone(),
        }
    }
}

/// Combine the default exclusions with `user` into a single expression.
pub fn with_default_exclusions(user: Expr) -> Expr {
    EffectiveFilter::new(user).combined()
}
