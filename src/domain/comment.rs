use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::recommendation::RecommendationRef;
use crate::domain::types::{CommentId, CommentText, UserId, Username};

/// A comment on a recommendation of any kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub recommendation: RecommendationRef,
    pub author_id: UserId,
    /// Denormalized for display; joined from the users table on read.
    pub author_username: Username,
    pub text: CommentText,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`Comment`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewComment {
    pub recommendation: RecommendationRef,
    pub author_id: UserId,
    pub text: CommentText,
    pub created_at: NaiveDateTime,
}

impl NewComment {
    /// Builds an insertable comment stamped with the current time.
    pub fn new(recommendation: RecommendationRef, author_id: UserId, text: CommentText) -> Self {
        Self {
            recommendation,
            author_id,
            text,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
