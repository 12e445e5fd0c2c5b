use serde::{Deserialize, Serialize};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// A star rating with its free-text review, written once per party per job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub rating: u8,
    pub review: String,
}

impl Feedback {
    pub fn new(rating: u8, review: impl Into<String>) -> Self {
        Self {
            rating,
            review: review.into(),
        }
    }

    pub fn is_valid_rating(rating: u8) -> bool {
        (MIN_RATING..=MAX_RATING).contains(&rating)
    }
}

/// Ratings a user has received across their jobs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RatingSummary {
    pub average: Option<f64>,
    pub count: usize,
    pub reviews: Vec<Feedback>,
}

impl RatingSummary {
    pub fn from_feedback(reviews: Vec<Feedback>) -> Self {
        let count = reviews.len();
        let average = if count == 0 {
            None
        } else {
            let total: u32 = reviews.iter().map(|f| u32::from(f.rating)).sum();
            Some(f64::from(total) / count as f64)
        };
        Self {
            average,
            count,
            reviews,
        }
    }
}
