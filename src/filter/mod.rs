//! Profile admission filter.
//!
//! A [`Filter`] owns an optional [`RuleSet`]. Without one, every profile is
//! admitted. With one, the configured predicates run in a fixed order and the
//! first failure rejects the profile. Attributes are pulled from the
//! [`ProfileAttributes`] accessor only when a configured rule needs them, and
//! at most once per evaluation.

mod decision;
mod fetch;
mod predicate;
mod rules;

#[cfg(test)]
mod tests;

pub use decision::{Admission, Rejection};
pub use rules::{RuleSet, RuleSetError, RULES_FILE_NAME};

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::activation::ActivationGate;
use crate::notice::{Notice, NoticeSink, TracingNotices};
use crate::profile::ProfileAttributes;
use fetch::AttributeCache;
use predicate::Predicate;

/// Stateless screener applying the configured rules to one profile at a time.
pub struct Filter {
    rules: Option<RuleSet>,
    predicates: Vec<Predicate>,
    notices: Arc<dyn NoticeSink>,
}

impl Filter {
    /// A filter that admits everything.
    pub fn disabled() -> Self {
        Self {
            rules: None,
            predicates: Vec::new(),
            notices: Arc::new(TracingNotices),
        }
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            predicates: Predicate::compile(&rules),
            rules: Some(rules),
            notices: Arc::new(TracingNotices),
        }
    }

    /// Route rejection and fallback notices to `notices` instead of `tracing`.
    pub fn with_sink(mut self, notices: Arc<dyn NoticeSink>) -> Self {
        self.notices = notices;
        self
    }

    /// Build the filter from a pre-supplied rule set or the rule file at `rules_path`.
    ///
    /// Filtering requires activation: when rules are available but the gate
    /// is closed, an activation notice is emitted and the filter is returned
    /// disabled. A missing rule file simply disables filtering. A rule file
    /// that exists but cannot be read or validated is an error.
    pub fn load<G>(
        gate: &G,
        preloaded: Option<RuleSet>,
        rules_path: impl AsRef<Path>,
        notices: Arc<dyn NoticeSink>,
    ) -> Result<Self, RuleSetError>
    where
        G: ActivationGate + ?Sized,
    {
        // An empty mapping counts as "nothing supplied".
        let preloaded = preloaded.filter(|rules| *rules != RuleSet::default());
        let rules_path = rules_path.as_ref();
        let file_present = rules_path.exists();

        if (preloaded.is_some() || file_present) && !gate.is_activated() {
            notices.emit(Notice::warning(None, "Activation required to use filters"));
            return Ok(Self::disabled().with_sink(notices));
        }

        let filter = match preloaded {
            Some(rules) => {
                debug!("using pre-supplied filter rules");
                Self::with_rules(rules)
            }
            None if file_present => {
                let rules = RuleSet::from_path(rules_path)?;
                debug!(path = %rules_path.display(), "loaded filter rules");
                Self::with_rules(rules)
            }
            None => {
                debug!(path = %rules_path.display(), "no filter rules found, filtering disabled");
                Self::disabled()
            }
        };

        Ok(filter.with_sink(notices))
    }

    pub fn rules(&self) -> Option<&RuleSet> {
        self.rules.as_ref()
    }

    pub fn is_enabled(&self) -> bool {
        self.rules.is_some()
    }

    /// Screen the profile the accessor is bound to.
    pub fn evaluate<A>(&self, profile: &A, username: &str) -> Admission
    where
        A: ProfileAttributes + ?Sized,
    {
        if self.rules.is_none() {
            return Admission::Admitted;
        }

        let mut cache = AttributeCache::new(profile, username, self.notices.as_ref());
        for predicate in &self.predicates {
            if let Some(group) = predicate.group() {
                cache.resolve(group);
            }

            if let Err(rejection) = predicate.check(username, cache.values()) {
                self.notices
                    .emit(Notice::info(Some(username), rejection.summary(username)));
                return Admission::Rejected(rejection);
            }
        }

        Admission::Admitted
    }

    /// `true` when the profile passes every configured rule.
    pub fn check_profile<A>(&self, profile: &A, username: &str) -> bool
    where
        A: ProfileAttributes + ?Sized,
    {
        self.evaluate(profile, username).is_admitted()
    }

    /// Whether callers may treat private or empty profiles as admissible.
    /// The filter reports this policy but never enforces it.
    pub fn can_follow_private_or_empty(&self) -> bool {
        self.rules
            .as_ref()
            .and_then(|rules| rules.follow_private_or_empty)
            .unwrap_or(false)
    }

    pub fn max_numbers_in_profile_name(&self) -> Option<u32> {
        self.rules
            .as_ref()
            .and_then(|rules| rules.max_numbers_in_profile_name)
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self::disabled()
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("rules", &self.rules)
            .field("predicates", &self.predicates)
            .finish_non_exhaustive()
    }
}
