use super::attributes::{Attribute, AttributeError, FollowCounts, ProfileAttributes};

const TEXT_VIEW: &str = "android.widget.TextView";

/// Identifies an on-screen element by platform resource id and widget class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selector {
    pub resource_id: &'static str,
    pub class_name: &'static str,
}

impl Selector {
    pub const FOLLOWERS_COUNT: Self = Self {
        resource_id: "com.instagram.android:id/row_profile_header_textview_followers_count",
        class_name: TEXT_VIEW,
    };
    pub const FOLLOWINGS_COUNT: Self = Self {
        resource_id: "com.instagram.android:id/row_profile_header_textview_following_count",
        class_name: TEXT_VIEW,
    };
    pub const POSTS_COUNT: Self = Self {
        resource_id: "com.instagram.android:id/row_profile_header_textview_post_count",
        class_name: TEXT_VIEW,
    };
    pub const BUSINESS_CATEGORY: Self = Self {
        resource_id: "com.instagram.android:id/profile_header_business_category",
        class_name: TEXT_VIEW,
    };

    pub const fn for_attribute(attribute: Attribute) -> Self {
        match attribute {
            Attribute::Followers => Self::FOLLOWERS_COUNT,
            Attribute::Followings => Self::FOLLOWINGS_COUNT,
            Attribute::Posts => Self::POSTS_COUNT,
            Attribute::BusinessCategory => Self::BUSINESS_CATEGORY,
        }
    }
}

/// Handle to a possibly absent element on the current screen.
pub trait ScreenElement {
    fn exists(&self) -> bool;
    /// Visible text, `None` when the element has none.
    fn text(&self) -> Option<String>;
}

/// UI automation surface positioned on the target profile.
pub trait ProfileScreen {
    type Element: ScreenElement;

    fn find(&self, selector: &Selector) -> Self::Element;
}

/// Turns localized or abbreviated counter text ("12.3K", "1,204") into a number.
pub trait CountParser {
    fn parse(&self, raw: &str) -> Option<u64>;
}

impl<F> CountParser for F
where
    F: Fn(&str) -> Option<u64>,
{
    fn parse(&self, raw: &str) -> Option<u64> {
        self(raw)
    }
}

/// Reads profile attributes off the screen the caller has navigated to.
pub struct ScreenProfile<'a, S, P> {
    screen: &'a S,
    parser: &'a P,
}

impl<'a, S, P> ScreenProfile<'a, S, P>
where
    S: ProfileScreen,
    P: CountParser,
{
    pub fn new(screen: &'a S, parser: &'a P) -> Self {
        Self { screen, parser }
    }

    fn read_count(&self, attribute: Attribute) -> Result<u64, AttributeError> {
        let element = self.screen.find(&Selector::for_attribute(attribute));
        if !element.exists() {
            return Err(AttributeError::ViewMissing(attribute));
        }

        let raw = element
            .text()
            .filter(|text| !text.trim().is_empty())
            .ok_or(AttributeError::EmptyText(attribute))?;

        self.parser
            .parse(&raw)
            .ok_or(AttributeError::Unparseable { attribute, raw })
    }
}

impl<S, P> ProfileAttributes for ScreenProfile<'_, S, P>
where
    S: ProfileScreen,
    P: CountParser,
{
    fn follow_counts(&self) -> FollowCounts {
        FollowCounts {
            followers: self.read_count(Attribute::Followers),
            followings: self.read_count(Attribute::Followings),
        }
    }

    fn posts_count(&self) -> Result<u64, AttributeError> {
        self.read_count(Attribute::Posts)
    }

    fn has_business_category(&self) -> Result<bool, AttributeError> {
        Ok(self.screen.find(&Selector::BUSINESS_CATEGORY).exists())
    }
}
