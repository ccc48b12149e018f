use super::decision::Rejection;
use super::fetch::{AttributeGroup, ResolvedAttributes};
use super::rules::RuleSet;

/// One configured admission condition.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Predicate {
    MaxNumbersInName(u32),
    BusinessAccount {
        skip_business: bool,
        skip_non_business: bool,
    },
    MinPosts(u64),
    MinFollowers(u64),
    MaxFollowers(u64),
    MinFollowings(u64),
    MaxFollowings(u64),
    MinPotencyRatio(f64),
}

impl Predicate {
    /// Compile the configured rules into evaluation order.
    ///
    /// The name check needs no fetch and runs first; the remaining predicates
    /// are grouped so that each attribute group is requested in one place.
    pub fn compile(rules: &RuleSet) -> Vec<Predicate> {
        let mut predicates = Vec::new();

        if let Some(max) = rules.max_numbers_in_profile_name {
            predicates.push(Predicate::MaxNumbersInName(max));
        }

        if rules.skip_business.is_some() || rules.skip_non_business.is_some() {
            predicates.push(Predicate::BusinessAccount {
                skip_business: rules.skip_business.unwrap_or(false),
                skip_non_business: rules.skip_non_business.unwrap_or(false),
            });
        }

        if let Some(min) = rules.min_posts {
            predicates.push(Predicate::MinPosts(min));
        }

        predicates.extend(rules.min_followers.map(Predicate::MinFollowers));
        predicates.extend(rules.max_followers.map(Predicate::MaxFollowers));
        predicates.extend(rules.min_followings.map(Predicate::MinFollowings));
        predicates.extend(rules.max_followings.map(Predicate::MaxFollowings));
        predicates.extend(rules.min_potency_ratio.map(Predicate::MinPotencyRatio));

        predicates
    }

    pub fn group(&self) -> Option<AttributeGroup> {
        match self {
            Predicate::MaxNumbersInName(_) => None,
            Predicate::BusinessAccount { .. } => Some(AttributeGroup::BusinessFlag),
            Predicate::MinPosts(_) => Some(AttributeGroup::Posts),
            Predicate::MinFollowers(_)
            | Predicate::MaxFollowers(_)
            | Predicate::MinFollowings(_)
            | Predicate::MaxFollowings(_)
            | Predicate::MinPotencyRatio(_) => Some(AttributeGroup::FollowCounts),
        }
    }

    /// Test the predicate against the name and the attributes resolved so far.
    pub fn check(&self, username: &str, values: &ResolvedAttributes) -> Result<(), Rejection> {
        let followers = values.followers.unwrap_or(0);
        let followings = values.followings.unwrap_or(0);

        match *self {
            Predicate::MaxNumbersInName(max) => {
                let actual = count_digits(username);
                if actual > max {
                    return Err(Rejection::TooManyNumbersInName { max, actual });
                }
            }
            Predicate::BusinessAccount {
                skip_business,
                skip_non_business,
            } => {
                let business = values.business.unwrap_or(false);
                if skip_business && business {
                    return Err(Rejection::BusinessAccount);
                }
                if skip_non_business && !business {
                    return Err(Rejection::NonBusinessAccount);
                }
            }
            Predicate::MinPosts(min) => {
                let actual = values.posts.unwrap_or(0);
                if actual < min {
                    return Err(Rejection::TooFewPosts { min, actual });
                }
            }
            Predicate::MinFollowers(min) if followers < min => {
                return Err(Rejection::TooFewFollowers {
                    min,
                    actual: followers,
                });
            }
            Predicate::MaxFollowers(max) if followers > max => {
                return Err(Rejection::TooManyFollowers {
                    max,
                    actual: followers,
                });
            }
            Predicate::MinFollowings(min) if followings < min => {
                return Err(Rejection::TooFewFollowings {
                    min,
                    actual: followings,
                });
            }
            Predicate::MaxFollowings(max) if followings > max => {
                return Err(Rejection::TooManyFollowings {
                    max,
                    actual: followings,
                });
            }
            Predicate::MinPotencyRatio(min) => {
                if followings == 0 {
                    return Err(Rejection::LowPotencyRatio { min, actual: None });
                }
                let ratio = followers as f64 / followings as f64;
                if ratio < min {
                    return Err(Rejection::LowPotencyRatio {
                        min,
                        actual: Some(ratio),
                    });
                }
            }
            _ => {}
        }

        Ok(())
    }
}

/// Number of ASCII decimal digits in a profile name.
pub(crate) fn count_digits(name: &str) -> u32 {
    let digits = name.chars().filter(char::is_ascii_digit).count();
    u32::try_from(digits).unwrap_or(u32::MAX)
}
