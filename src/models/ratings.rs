use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::users::RatingBreakdown;

/// SeaORM entity for the `ratings` table.
///
/// One rating per order, enforced by the order's `is_rated` flag and a unique
/// index on `order_id`. Rows are immutable after creation; the freelancer's
/// aggregate is always recomputed by re-scanning all of their rows.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ratings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub freelancer_id: Uuid,
    pub client_id: Uuid,
    #[sea_orm(unique)]
    pub order_id: Uuid,
    pub job_id: Uuid,
    pub stars: i16,
    #[sea_orm(column_type = "Text", nullable)]
    pub review: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::orders::Entity",
        from = "Column::OrderId",
        to = "super::orders::Column::Id"
    )]
    Order,
    #[sea_orm(
        belongs_to = "super::jobs::Entity",
        from = "Column::JobId",
        to = "super::jobs::Column::Id"
    )]
    Job,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A freelancer's aggregate rating, recomputed from scratch on every
/// submission: the mean over all stars plus the 5-bucket breakdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub average: f64,
    pub total: i32,
    pub breakdown: RatingBreakdown,
}

impl RatingSummary {
    pub fn from_stars(stars: &[i16]) -> Self {
        let mut breakdown = RatingBreakdown::default();
        let mut sum = 0i64;
        for &s in stars {
            sum += i64::from(s);
            match s {
                5 => breakdown.five_star += 1,
                4 => breakdown.four_star += 1,
                3 => breakdown.three_star += 1,
                2 => breakdown.two_star += 1,
                1 => breakdown.one_star += 1,
                _ => {}
            }
        }
        let total = stars.len() as i32;
        let average = if stars.is_empty() {
            0.0
        } else {
            sum as f64 / stars.len() as f64
        };
        Self {
            average,
            total,
            breakdown,
        }
    }
}

// ── DTOs ──

/// Request body for `POST /api/ratings/rate`. The freelancer and job are
/// derived from the order, never trusted from the client.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRating {
    pub order_id: Uuid,
    pub rating: i16,
    pub review: Option<String>,
}

/// A rating with client and job display fields joined on.
#[derive(Debug, Clone, Serialize)]
pub struct RatingView {
    pub id: Uuid,
    pub stars: i16,
    pub review: Option<String>,
    pub created_at: DateTimeUtc,
    pub client_name: Option<String>,
    pub client_picture: Option<String>,
    pub job_title: Option<String>,
}

/// A rating submitted by the calling client, with freelancer display fields.
#[derive(Debug, Clone, Serialize)]
pub struct ClientRatingView {
    pub id: Uuid,
    pub stars: i16,
    pub review: Option<String>,
    pub created_at: DateTimeUtc,
    pub freelancer_name: Option<String>,
    pub freelancer_rating: Option<f64>,
    pub job_title: Option<String>,
}

/// Paginated envelope for `GET /api/ratings/freelancer/{id}`. Serialized in
/// camelCase per the public API contract.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreelancerRatingsPage {
    pub ratings: Vec<RatingView>,
    pub total_pages: u64,
    pub current_page: u64,
    pub total_ratings: u64,
    pub average_rating: f64,
    pub rating_breakdown: RatingBreakdown,
}

/// Response for `GET /api/ratings/check/{order_id}`.
#[derive(Debug, Clone, Serialize)]
pub struct RatingEligibility {
    pub can_rate: bool,
    pub is_rated: bool,
    pub status: super::orders::Status,
}

#[cfg(test)]
mod tests {
    use super::RatingSummary;

    #[test]
    fn empty_history_yields_zeroes() {
        let summary = RatingSummary::from_stars(&[]);
        assert_eq!(summary.average, 0.0);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.breakdown.total(), 0);
    }

    #[test]
    fn single_rating_sets_its_bucket_and_mean() {
        let summary = RatingSummary::from_stars(&[4]);
        assert_eq!(summary.average, 4.0);
        assert_eq!(summary.total, 1);
        assert_eq!(summary.breakdown.four_star, 1);
        assert_eq!(summary.breakdown.five_star, 0);
    }

    #[test]
    fn mean_over_mixed_ratings() {
        let summary = RatingSummary::from_stars(&[5, 3, 4, 4]);
        assert!((summary.average - 4.0).abs() < f64::EPSILON);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.breakdown.five_star, 1);
        assert_eq!(summary.breakdown.four_star, 2);
        assert_eq!(summary.breakdown.three_star, 1);
    }

    #[test]
    fn buckets_sum_to_total() {
        let stars = [1, 1, 2, 3, 3, 3, 4, 5, 5, 5, 5];
        let summary = RatingSummary::from_stars(&stars);
        assert_eq!(summary.breakdown.total(), summary.total);
        assert_eq!(summary.total, stars.len() as i32);
    }

    #[test]
    fn mean_tracks_any_submission_sequence() {
        let mut history: Vec<i16> = Vec::new();
        for s in [5, 2, 4, 1, 3, 5, 5] {
            history.push(s);
            let summary = RatingSummary::from_stars(&history);
            let expected =
                history.iter().map(|&v| f64::from(v)).sum::<f64>() / history.len() as f64;
            assert!((summary.average - expected).abs() < 1e-9);
            assert_eq!(summary.breakdown.total(), history.len() as i32);
        }
    }
}
