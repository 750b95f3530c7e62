//! Submission assembly and in-flight tracking.
//!
//! The builder validates and assembles a multimodal request locally, before
//! any network call. The tracker gates repeat activation while a submission
//! is pending and drops stale responses.

mod tracker;

pub use tracker::{DisplaySlot, RequestToken, SubmissionTracker};

use crate::errors::{ClientError, ClientResult};

/// Which input widgets the detection screen shows.
///
/// A pure presentation selector: it never restricts which fields may be
/// sent. Validation depends only on actual field contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum InputMode {
    Text,
    Image,
    #[default]
    Multimodal,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Text => "text",
            InputMode::Image => "image",
            InputMode::Multimodal => "multimodal",
        }
    }
}

/// Binary image attachment for a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageAttachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// A well-formed multimodal request ready for the transport layer.
///
/// `text` is always present as a string field, possibly empty; `image` is an
/// optional binary attachment. At least one of the two carries content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    pub mode: InputMode,
    pub text: String,
    pub image: Option<ImageAttachment>,
}

/// Assembles a submission from user-entered fields.
#[derive(Debug, Clone, Default)]
pub struct SubmissionBuilder {
    mode: InputMode,
    text: String,
    image: Option<ImageAttachment>,
}

impl SubmissionBuilder {
    pub fn new(mode: InputMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn image(mut self, image: ImageAttachment) -> Self {
        self.image = Some(image);
        self
    }

    /// Produce the payload, or reject locally.
    ///
    /// Fails with `EmptyInput` when the text is blank and no image is
    /// attached, regardless of mode. Any non-empty combination is accepted.
    pub fn build(self) -> ClientResult<SubmissionPayload> {
        if self.text.trim().is_empty() && self.image.is_none() {
            return Err(ClientError::EmptyInput);
        }

        Ok(SubmissionPayload {
            mode: self.mode,
            text: self.text,
            image: self.image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_and_no_image_is_rejected() {
        let err = SubmissionBuilder::new(InputMode::Text)
            .text("")
            .build()
            .unwrap_err();
        assert!(matches!(err, ClientError::EmptyInput));
    }

    #[test]
    fn test_whitespace_only_text_is_rejected() {
        let err = SubmissionBuilder::new(InputMode::Multimodal)
            .text("   \n\t ")
            .build()
            .unwrap_err();
        assert!(matches!(err, ClientError::EmptyInput));
    }

    #[test]
    fn test_image_alone_is_accepted_even_in_text_mode() {
        // Mode is a UI affordance, not a network-level constraint.
        let payload = SubmissionBuilder::new(InputMode::Text)
            .text("")
            .image(ImageAttachment::new("photo.jpg", vec![0xFF, 0xD8]))
            .build()
            .unwrap();
        assert_eq!(payload.text, "");
        assert!(payload.image.is_some());
    }

    #[test]
    fn test_text_alone_is_accepted_in_image_mode() {
        let payload = SubmissionBuilder::new(InputMode::Image)
            .text("Flood warning issued for the valley")
            .build()
            .unwrap();
        assert!(payload.image.is_none());
        assert_eq!(payload.mode, InputMode::Image);
    }

    #[test]
    fn test_both_fields_pass_through_unchanged() {
        let payload = SubmissionBuilder::new(InputMode::Multimodal)
            .text("Dam burst upstream")
            .image(ImageAttachment::new("dam.png", vec![1, 2, 3]))
            .build()
            .unwrap();
        assert_eq!(payload.text, "Dam burst upstream");
        assert_eq!(payload.image.as_ref().unwrap().file_name, "dam.png");
        assert_eq!(payload.image.as_ref().unwrap().bytes, vec![1, 2, 3]);
    }
}
