use std::fmt;

use serde::{Deserialize, Serialize};

/// Profile header attributes the filter knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Followers,
    Followings,
    Posts,
    BusinessCategory,
}

impl Attribute {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Followers => "followers count",
            Self::Followings => "followings count",
            Self::Posts => "posts count",
            Self::BusinessCategory => "business category",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reasons an attribute read can come back empty-handed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttributeError {
    #[error("Cannot find {0} view")]
    ViewMissing(Attribute),
    #[error("Cannot get {0} text")]
    EmptyText(Attribute),
    #[error("Cannot parse {attribute} text '{raw}'")]
    Unparseable { attribute: Attribute, raw: String },
    #[error("No {0} captured")]
    Missing(Attribute),
}

impl AttributeError {
    pub fn attribute(&self) -> Attribute {
        match self {
            Self::ViewMissing(attribute)
            | Self::EmptyText(attribute)
            | Self::Missing(attribute) => *attribute,
            Self::Unparseable { attribute, .. } => *attribute,
        }
    }
}

/// Result of the combined followers/followings read. Each side fails on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowCounts {
    pub followers: Result<u64, AttributeError>,
    pub followings: Result<u64, AttributeError>,
}

/// Read-only, on-demand view of a single entity's profile.
///
/// Every call may be expensive (it usually drives a UI query), so callers
/// are expected to invoke each method at most once per evaluation.
pub trait ProfileAttributes {
    fn follow_counts(&self) -> FollowCounts;
    fn posts_count(&self) -> Result<u64, AttributeError>;
    fn has_business_category(&self) -> Result<bool, AttributeError>;
}

impl<T: ProfileAttributes + ?Sized> ProfileAttributes for &T {
    fn follow_counts(&self) -> FollowCounts {
        (**self).follow_counts()
    }

    fn posts_count(&self) -> Result<u64, AttributeError> {
        (**self).posts_count()
    }

    fn has_business_category(&self) -> Result<bool, AttributeError> {
        (**self).has_business_category()
    }
}
