use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{TypeConstraintError, VideoUrl, VideoUrlError, YoutubeId};

#[derive(Clone, Deserialize, Serialize, Validate)]
pub struct NewVideoForm {
    #[validate(length(min = 1, max = 200))]
    pub video_url: String,
}

/// Submitted URL plus the video id extracted from it. The URL is kept as
/// entered; the id is the natural key.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVideoFormPayload {
    pub url: VideoUrl,
    pub youtube_id: YoutubeId,
}

#[derive(Debug, Error)]
pub enum NewVideoFormError {
    #[error("Video form validation failed: {0}")]
    Validation(String),
    #[error("Video form contains invalid data: {0}")]
    TypeConstraint(String),
    /// Carries the user-facing host/id extraction message.
    #[error("{0}")]
    VideoUrl(#[from] VideoUrlError),
}

impl From<ValidationErrors> for NewVideoFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for NewVideoFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<NewVideoForm> for NewVideoFormPayload {
    type Error = NewVideoFormError;

    fn try_from(value: NewVideoForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let video_url = super::assume_http(&value.video_url);
        let youtube_id = YoutubeId::from_url(&video_url)?;
        Ok(Self {
            url: VideoUrl::new(video_url)?,
            youtube_id,
        })
    }
}
