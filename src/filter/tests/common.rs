use std::cell::Cell;
use std::sync::{Arc, Mutex};

use crate::filter::{Filter, RuleSet};
use crate::notice::{Notice, NoticeSink, Severity};
use crate::profile::{Attribute, AttributeError, FollowCounts, ProfileAttributes};

/// Accessor double that counts how often each attribute group is fetched.
pub(super) struct RecordingProfile {
    pub followers: Result<u64, AttributeError>,
    pub followings: Result<u64, AttributeError>,
    pub posts: Result<u64, AttributeError>,
    pub business: Result<bool, AttributeError>,
    pub follow_fetches: Cell<usize>,
    pub posts_fetches: Cell<usize>,
    pub business_fetches: Cell<usize>,
}

impl RecordingProfile {
    pub fn total_fetches(&self) -> usize {
        self.follow_fetches.get() + self.posts_fetches.get() + self.business_fetches.get()
    }
}

impl ProfileAttributes for RecordingProfile {
    fn follow_counts(&self) -> FollowCounts {
        self.follow_fetches.set(self.follow_fetches.get() + 1);
        FollowCounts {
            followers: self.followers.clone(),
            followings: self.followings.clone(),
        }
    }

    fn posts_count(&self) -> Result<u64, AttributeError> {
        self.posts_fetches.set(self.posts_fetches.get() + 1);
        self.posts.clone()
    }

    fn has_business_category(&self) -> Result<bool, AttributeError> {
        self.business_fetches.set(self.business_fetches.get() + 1);
        self.business.clone()
    }
}

pub(super) fn profile(followers: u64, followings: u64, posts: u64) -> RecordingProfile {
    RecordingProfile {
        followers: Ok(followers),
        followings: Ok(followings),
        posts: Ok(posts),
        business: Ok(false),
        follow_fetches: Cell::new(0),
        posts_fetches: Cell::new(0),
        business_fetches: Cell::new(0),
    }
}

pub(super) fn unreadable_profile() -> RecordingProfile {
    RecordingProfile {
        followers: Err(AttributeError::ViewMissing(Attribute::Followers)),
        followings: Err(AttributeError::EmptyText(Attribute::Followings)),
        posts: Err(AttributeError::ViewMissing(Attribute::Posts)),
        business: Err(AttributeError::ViewMissing(Attribute::BusinessCategory)),
        follow_fetches: Cell::new(0),
        posts_fetches: Cell::new(0),
        business_fetches: Cell::new(0),
    }
}

/// Sink keeping every notice for later assertions.
#[derive(Default)]
pub(super) struct RecordingNotices {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotices {
    pub fn all(&self) -> Vec<Notice> {
        self.notices.lock().expect("notice mutex poisoned").clone()
    }

    pub fn with_severity(&self, severity: Severity) -> Vec<Notice> {
        self.all()
            .into_iter()
            .filter(|notice| notice.severity == severity)
            .collect()
    }
}

impl NoticeSink for RecordingNotices {
    fn emit(&self, notice: Notice) {
        self.notices
            .lock()
            .expect("notice mutex poisoned")
            .push(notice);
    }
}

pub(super) fn recording_filter(rules: RuleSet) -> (Filter, Arc<RecordingNotices>) {
    let notices = Arc::new(RecordingNotices::default());
    let filter = Filter::with_rules(rules).with_sink(notices.clone());
    (filter, notices)
}
