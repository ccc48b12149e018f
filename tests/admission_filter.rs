use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, Mutex};
use std::thread;

use profile_filter::profile::{ProfileScreen, ScreenElement, ScreenProfile, Selector};
use profile_filter::{
    Admission, Filter, Notice, NoticeSink, ProfileSnapshot, Rejection, RuleSet, Severity,
};
use serde_json::json;

#[derive(Default)]
struct DeviceScreen {
    views: HashMap<&'static str, String>,
}

impl DeviceScreen {
    fn header(followers: &str, followings: &str, posts: &str) -> Self {
        let mut views = HashMap::new();
        views.insert(Selector::FOLLOWERS_COUNT.resource_id, followers.to_string());
        views.insert(Selector::FOLLOWINGS_COUNT.resource_id, followings.to_string());
        views.insert(Selector::POSTS_COUNT.resource_id, posts.to_string());
        Self { views }
    }

    fn business(mut self) -> Self {
        self.views.insert(
            Selector::BUSINESS_CATEGORY.resource_id,
            "Coffee shop".to_string(),
        );
        self
    }
}

struct View(Option<String>);

impl ScreenElement for View {
    fn exists(&self) -> bool {
        self.0.is_some()
    }

    fn text(&self) -> Option<String> {
        self.0.clone()
    }
}

impl ProfileScreen for DeviceScreen {
    type Element = View;

    fn find(&self, selector: &Selector) -> View {
        View(self.views.get(selector.resource_id).cloned())
    }
}

/// Accepts "1,234", "12.3K" and "4M" style counters.
fn counter(raw: &str) -> Option<u64> {
    let cleaned = raw.trim().replace(',', "");
    let (digits, multiplier) = match cleaned.chars().last()? {
        'K' | 'k' => (&cleaned[..cleaned.len() - 1], 1_000.0),
        'M' | 'm' => (&cleaned[..cleaned.len() - 1], 1_000_000.0),
        _ => (cleaned.as_str(), 1.0),
    };
    let value: f64 = digits.parse().ok()?;
    Some((value * multiplier).round() as u64)
}

#[derive(Default)]
struct CollectedNotices(Mutex<Vec<Notice>>);

impl NoticeSink for CollectedNotices {
    fn emit(&self, notice: Notice) {
        self.0.lock().expect("notice mutex poisoned").push(notice);
    }
}

fn filter(rules: serde_json::Value) -> Filter {
    Filter::with_rules(RuleSet::from_value(rules).expect("valid rules"))
}

#[test]
fn screens_profiles_read_off_the_device() {
    let filter = filter(json!({
        "min_followers": 100,
        "max_followers": 5000,
        "min_posts": 3,
        "min_potency_ratio": 1.0,
    }));

    let creator = DeviceScreen::header("1.2K", "310", "48");
    assert!(filter.check_profile(&ScreenProfile::new(&creator, &counter), "creator"));

    let whale = DeviceScreen::header("12.3K", "310", "48");
    assert_eq!(
        filter.evaluate(&ScreenProfile::new(&whale, &counter), "whale"),
        Admission::Rejected(Rejection::TooManyFollowers {
            max: 5000,
            actual: 12_300
        })
    );

    let follower = DeviceScreen::header("150", "1,204", "48");
    assert!(!filter.check_profile(&ScreenProfile::new(&follower, &counter), "follower"));
}

#[test]
fn business_profiles_are_skipped_on_request() {
    let filter = filter(json!({ "skip_business": true }));

    let shop = DeviceScreen::header("10", "10", "10").business();
    let person = DeviceScreen::header("10", "10", "10");

    assert!(!filter.check_profile(&ScreenProfile::new(&shop, &counter), "shop"));
    assert!(filter.check_profile(&ScreenProfile::new(&person, &counter), "person"));
}

#[test]
fn blank_header_degrades_to_zero_counts() {
    let notices = Arc::new(CollectedNotices::default());
    let filter = filter(json!({ "max_followers": 10, "max_followings": 10 }))
        .with_sink(notices.clone());

    let blank = DeviceScreen::default();
    assert!(filter.check_profile(&ScreenProfile::new(&blank, &counter), "blank"));

    let collected = notices.0.lock().expect("notice mutex poisoned");
    assert_eq!(collected.len(), 2);
    assert!(collected
        .iter()
        .all(|notice| notice.severity == Severity::Warning
            && notice.entity.as_deref() == Some("blank")));
}

#[test]
fn digit_heavy_names_are_rejected_by_name_alone() {
    let filter = filter(json!({ "max_numbers_in_profile_name": 2 }));
    let snapshot = ProfileSnapshot {
        username: "user123".to_string(),
        ..ProfileSnapshot::default()
    };

    assert!(!filter.check_profile(&snapshot, &snapshot.username));
    assert!(filter.check_profile(&snapshot, "user12"));
    assert_eq!(filter.max_numbers_in_profile_name(), Some(2));
}

#[test]
fn private_or_empty_policy_is_reported() {
    assert!(filter(json!({ "follow_private_or_empty": true })).can_follow_private_or_empty());
    assert!(!filter(json!({ "follow_private_or_empty": false })).can_follow_private_or_empty());
    assert!(!Filter::disabled().can_follow_private_or_empty());
}

#[test]
fn one_filter_serves_many_threads() {
    let filter = Arc::new(filter(json!({ "min_followers": 50 })));

    let handles: Vec<_> = (0..8u64)
        .map(|index| {
            let filter = Arc::clone(&filter);
            thread::spawn(move || {
                let snapshot = ProfileSnapshot {
                    username: format!("worker{index}"),
                    followers: Some(index * 10),
                    followings: Some(1),
                    ..ProfileSnapshot::default()
                };
                filter.check_profile(&snapshot, &snapshot.username)
            })
        })
        .collect();

    let admitted: Vec<bool> = handles
        .into_iter()
        .map(|handle| handle.join().expect("worker finished"))
        .collect();
    assert_eq!(
        admitted,
        vec![false, false, false, false, false, true, true, true]
    );
}

#[test]
fn snapshot_files_round_into_decisions() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("profile.json");
    fs::write(
        &path,
        r#"{"username": "baker", "followers": 800, "followings": 400, "posts": 30, "business": true}"#,
    )
    .expect("write snapshot");

    let snapshot = ProfileSnapshot::from_path(&path).expect("snapshot loads");
    let filter = filter(json!({ "skip_non_business": true, "min_potency_ratio": 2.0 }));

    assert!(filter.check_profile(&snapshot, &snapshot.username));
}
