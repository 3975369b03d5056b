//! Page data loaders
//!
//! Content pages never fail hard: a transport or decoding error degrades to
//! an empty list (logged at warn) so the page still renders.

use crate::{ClientResult, PortalClient};
use shared::PortalSession;
use shared::models::{Building, FoodPlan, GalleryImage, Review, Rule, UserProfile};

/// Aggregate shown above the review list
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSummary {
    /// Mean rating; 0 when there are no reviews
    pub average: f64,
    pub total: usize,
    /// Review counts for 5, 4, 3, 2 and 1 stars, in that order
    pub star_counts: [usize; 5],
}

impl ReviewSummary {
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let total = reviews.len();
        let sum: f64 = reviews.iter().map(|r| r.rating).sum();
        let average = if total == 0 { 0.0 } else { sum / total as f64 };

        let mut star_counts = [0usize; 5];
        for review in reviews {
            let stars = review.rating.round() as i64;
            if (1..=5).contains(&stars) {
                star_counts[(5 - stars) as usize] += 1;
            }
        }
        Self {
            average,
            total,
            star_counts,
        }
    }

    /// Share of reviews with `stars` stars, in percent
    pub fn percentage(&self, stars: usize) -> f64 {
        if !(1..=5).contains(&stars) || self.total == 0 {
            return 0.0;
        }
        self.star_counts[5 - stars] as f64 * 100.0 / self.total as f64
    }
}

/// Published reviews and their summary
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewsPage {
    pub reviews: Vec<Review>,
    pub summary: ReviewSummary,
}

fn or_empty<T>(page: &str, result: ClientResult<Vec<T>>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        tracing::warn!(page, error = %e, "Failed to load page data");
        Vec::new()
    })
}

/// Read-only page content for one session
#[derive(Debug, Clone)]
pub struct Pages {
    client: PortalClient,
    session: PortalSession,
}

impl Pages {
    pub fn new(client: PortalClient, session: PortalSession) -> Self {
        Self { client, session }
    }

    pub fn session(&self) -> &PortalSession {
        &self.session
    }

    pub async fn rules(&self) -> Vec<Rule> {
        or_empty("rules", self.client.rules(&self.session).await)
    }

    pub async fn food_plan(&self) -> Vec<FoodPlan> {
        or_empty("food", self.client.food_plan(&self.session).await)
    }

    /// Published gallery images only
    pub async fn gallery(&self) -> Vec<GalleryImage> {
        let mut images = or_empty("gallery", self.client.gallery(&self.session).await);
        images.retain(GalleryImage::is_published);
        images
    }

    /// Published reviews only
    pub async fn reviews(&self) -> ReviewsPage {
        let mut reviews = or_empty("reviews", self.client.reviews(&self.session).await);
        reviews.retain(Review::is_published);
        let summary = ReviewSummary::from_reviews(&reviews);
        ReviewsPage { reviews, summary }
    }

    /// Building for the session; `None` without a building id or on failure
    pub async fn building(&self) -> Option<Building> {
        let id = self.session.building_id.as_deref()?;
        self.client
            .building(id)
            .await
            .inspect_err(|e| {
                tracing::warn!(building_id = id, error = %e, "Failed to load building");
            })
            .ok()
    }

    /// Owner profile for the session
    pub async fn owner(&self) -> Option<UserProfile> {
        self.client
            .user(&self.session.user_id)
            .await
            .inspect_err(|e| {
                tracing::warn!(user_id = %self.session.user_id, error = %e, "Failed to load user");
            })
            .ok()
    }
}
