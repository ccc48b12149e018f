use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::attributes::{Attribute, AttributeError, FollowCounts, ProfileAttributes};

/// Profile header captured ahead of time, e.g. exported from a device session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub username: String,
    #[serde(default)]
    pub followers: Option<u64>,
    #[serde(default)]
    pub followings: Option<u64>,
    #[serde(default)]
    pub posts: Option<u64>,
    #[serde(default)]
    pub business: Option<bool>,
}

impl ProfileSnapshot {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let file = File::open(path.as_ref())?;
        Ok(Self::from_reader(BufReader::new(file))?)
    }
}

impl ProfileAttributes for ProfileSnapshot {
    fn follow_counts(&self) -> FollowCounts {
        FollowCounts {
            followers: self
                .followers
                .ok_or(AttributeError::Missing(Attribute::Followers)),
            followings: self
                .followings
                .ok_or(AttributeError::Missing(Attribute::Followings)),
        }
    }

    fn posts_count(&self) -> Result<u64, AttributeError> {
        self.posts.ok_or(AttributeError::Missing(Attribute::Posts))
    }

    fn has_business_category(&self) -> Result<bool, AttributeError> {
        self.business
            .ok_or(AttributeError::Missing(Attribute::BusinessCategory))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to open profile snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid profile snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_surface_as_missing() {
        let snapshot =
            ProfileSnapshot::from_reader(r#"{"username": "ana", "followers": 12}"#.as_bytes())
                .expect("snapshot parses");

        let counts = snapshot.follow_counts();
        assert_eq!(counts.followers, Ok(12));
        assert_eq!(
            counts.followings,
            Err(AttributeError::Missing(Attribute::Followings))
        );
        assert_eq!(
            snapshot.has_business_category(),
            Err(AttributeError::Missing(Attribute::BusinessCategory))
        );
    }
}
