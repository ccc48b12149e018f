use serde::Serialize;

/// Outcome of screening one profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum Admission {
    Admitted,
    Rejected(Rejection),
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted)
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Admission::Admitted => None,
            Admission::Rejected(reason) => Some(reason),
        }
    }
}

/// The threshold a profile failed, with the values that were compared.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    TooManyNumbersInName { max: u32, actual: u32 },
    BusinessAccount,
    NonBusinessAccount,
    TooFewPosts { min: u64, actual: u64 },
    TooFewFollowers { min: u64, actual: u64 },
    TooManyFollowers { max: u64, actual: u64 },
    TooFewFollowings { min: u64, actual: u64 },
    TooManyFollowings { max: u64, actual: u64 },
    /// `actual` is `None` when the profile follows nobody.
    LowPotencyRatio { min: f64, actual: Option<f64> },
}

impl Rejection {
    /// Operator-facing explanation, prefixed with the profile handle.
    pub fn summary(&self, username: &str) -> String {
        match self {
            Rejection::TooManyNumbersInName { max, .. } => {
                format!("@{username} has more than {max} numbers in profile-name, skip.")
            }
            Rejection::BusinessAccount => format!("@{username} has business account, skip."),
            Rejection::NonBusinessAccount => {
                format!("@{username} has non business account, skip.")
            }
            Rejection::TooFewPosts { min, .. } => {
                format!("@{username} has less than {min} posts, skip.")
            }
            Rejection::TooFewFollowers { min, .. } => {
                format!("@{username} has less than {min} followers, skip.")
            }
            Rejection::TooManyFollowers { max, .. } => {
                format!("@{username} has more than {max} followers, skip.")
            }
            Rejection::TooFewFollowings { min, .. } => {
                format!("@{username} has less than {min} followings, skip.")
            }
            Rejection::TooManyFollowings { max, .. } => {
                format!("@{username} has more than {max} followings, skip.")
            }
            Rejection::LowPotencyRatio { min, .. } => {
                format!("@{username}'s potency ratio is less than {min:?}, skip.")
            }
        }
    }
}
