use crate::notice::{Notice, NoticeSink};
use crate::profile::{AttributeError, ProfileAttributes};

/// Attribute reads that are performed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum AttributeGroup {
    BusinessFlag,
    Posts,
    FollowCounts,
}

/// Values read so far during one evaluation. Unread fields stay `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct ResolvedAttributes {
    pub business: Option<bool>,
    pub posts: Option<u64>,
    pub followers: Option<u64>,
    pub followings: Option<u64>,
}

/// Per-call memo over a [`ProfileAttributes`] accessor.
///
/// Each group is fetched at most once. A failed read is replaced by its
/// default (zero, or "not business") and reported as a warning.
pub(crate) struct AttributeCache<'a, A: ?Sized> {
    profile: &'a A,
    username: &'a str,
    notices: &'a dyn NoticeSink,
    values: ResolvedAttributes,
}

impl<'a, A> AttributeCache<'a, A>
where
    A: ProfileAttributes + ?Sized,
{
    pub fn new(profile: &'a A, username: &'a str, notices: &'a dyn NoticeSink) -> Self {
        Self {
            profile,
            username,
            notices,
            values: ResolvedAttributes::default(),
        }
    }

    pub fn values(&self) -> &ResolvedAttributes {
        &self.values
    }

    pub fn resolve(&mut self, group: AttributeGroup) {
        match group {
            AttributeGroup::BusinessFlag if self.values.business.is_none() => {
                let business = self.or_default(self.profile.has_business_category(), false);
                self.values.business = Some(business);
            }
            AttributeGroup::Posts if self.values.posts.is_none() => {
                let posts = self.or_default(self.profile.posts_count(), 0);
                self.values.posts = Some(posts);
            }
            AttributeGroup::FollowCounts if self.values.followers.is_none() => {
                let counts = self.profile.follow_counts();
                let followers = self.or_default(counts.followers, 0);
                let followings = self.or_default(counts.followings, 0);
                self.values.followers = Some(followers);
                self.values.followings = Some(followings);
            }
            _ => {}
        }
    }

    fn or_default<T>(&self, read: Result<T, AttributeError>, default: T) -> T
    where
        T: std::fmt::Display,
    {
        read.unwrap_or_else(|err| {
            self.notices.emit(Notice::warning(
                Some(self.username),
                format!("{err}, default is {default}"),
            ));
            default
        })
    }
}
