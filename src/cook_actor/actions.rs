use crate::domain::RatingScore;

/// Custom actions for Cook entities. Every action returns the updated cook.
///
/// The two aggregate updates are the only way the counters change.
#[derive(Debug, Clone)]
pub enum CookAction {
    RecordCompletedOrder,
    RecordRating(RatingScore),
    SetApproved(bool),
    SetActive(bool),
}
