use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order status stored as a lowercase string in the database.
///
/// Transitions follow a fixed lifecycle; see [`Status::can_transition_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "delivered")]
    Delivered,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl Status {
    /// The lifecycle only moves forward: pending → in_progress → delivered →
    /// completed, with cancellation allowed from any non-terminal state.
    pub fn can_transition_to(self, next: Status) -> bool {
        use Status::*;
        matches!(
            (self, next),
            (Pending, InProgress)
                | (InProgress, Delivered)
                | (Delivered, Completed)
                | (Pending, Cancelled)
                | (InProgress, Cancelled)
                | (Delivered, Cancelled)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Completed | Status::Cancelled)
    }

    /// The lowercase wire form, for error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::InProgress => "in_progress",
            Status::Delivered => "delivered",
            Status::Completed => "completed",
            Status::Cancelled => "cancelled",
        }
    }
}

/// SeaORM entity for the `orders` table.
///
/// `price` is snapshotted from the job at creation and never changes after,
/// so later job price edits cannot affect existing orders. Orders are never
/// deleted. The review columns mirror the rating written by `db::ratings`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub job_id: Uuid,
    pub client_id: Uuid,
    pub freelancer_id: Uuid,
    pub status: Status,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub requirements: Option<String>,
    pub delivery_date: DateTimeUtc,
    pub is_rated: bool,
    pub payment_approved: bool,
    pub payment_approved_at: Option<DateTimeUtc>,
    pub review_rating: Option<i16>,
    #[sea_orm(column_type = "Text", nullable)]
    pub review_comment: Option<String>,
    pub review_created_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::jobs::Entity",
        from = "Column::JobId",
        to = "super::jobs::Column::Id"
    )]
    Job,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ClientId",
        to = "super::users::Column::Id"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::FreelancerId",
        to = "super::users::Column::Id"
    )]
    Freelancer,
}

impl Related<super::jobs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Job.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether the given user is the client or freelancer on this order.
    pub fn is_participant(&self, user_id: Uuid) -> bool {
        self.client_id == user_id || self.freelancer_id == user_id
    }
}

// ── DTOs ──

/// Request body for `POST /api/orders`. Everything else is derived from the
/// job and the authenticated client.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrder {
    pub job_id: Uuid,
    pub requirements: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderStatus {
    pub status: Status,
}

/// Request body for `POST /api/orders/{id}/review`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRequest {
    pub rating: i16,
    pub comment: Option<String>,
}

/// A single order with its full message thread, for the detail endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithMessages {
    #[serde(flatten)]
    pub order: Model,
    pub messages: Vec<super::order_messages::Model>,
}

/// Admin listing row: an order plus joined display fields.
#[derive(Debug, Clone, Serialize)]
pub struct AdminOrderView {
    #[serde(flatten)]
    pub order: Model,
    pub job_title: Option<String>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub freelancer_name: Option<String>,
    pub freelancer_email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::Status;
    use super::Status::*;

    #[test]
    fn forward_transitions_are_allowed() {
        assert!(Pending.can_transition_to(InProgress));
        assert!(InProgress.can_transition_to(Delivered));
        assert!(Delivered.can_transition_to(Completed));
    }

    #[test]
    fn cancellation_from_any_non_terminal_state() {
        assert!(Pending.can_transition_to(Cancelled));
        assert!(InProgress.can_transition_to(Cancelled));
        assert!(Delivered.can_transition_to(Cancelled));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Cancelled));
    }

    #[test]
    fn skipping_and_backward_transitions_are_rejected() {
        assert!(!Pending.can_transition_to(Delivered));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!InProgress.can_transition_to(Pending));
        assert!(!Delivered.can_transition_to(InProgress));
        assert!(!InProgress.can_transition_to(Completed));
    }

    #[test]
    fn terminal_states_admit_nothing() {
        for next in [Pending, InProgress, Delivered, Completed, Cancelled] {
            assert!(!Completed.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
        assert!(Completed.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(!Delivered.is_terminal());
    }

    #[test]
    fn no_self_transitions() {
        for s in [Pending, InProgress, Delivered, Completed, Cancelled] {
            assert!(!s.can_transition_to(s));
        }
    }

    #[test]
    fn wire_form_matches_storage() {
        assert_eq!(Status::InProgress.as_str(), "in_progress");
        assert_eq!(Status::Pending.as_str(), "pending");
    }
}
