use serde::{Deserialize, Serialize};

/// Raw bytes of an attached image, in whatever format the user supplied.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageBlob {
    bytes: Vec<u8>,
}

impl ImageBlob {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for ImageBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ImageBlob({} bytes)", self.bytes.len())
    }
}

impl From<Vec<u8>> for ImageBlob {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

/// Everything needed to ask for negotiation advice once.
///
/// `prompt_text` must be non-empty after trimming; the completion client
/// does not check this, callers reject blank prompts before building a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NegotiationRequest {
    persona: String,
    scenario: String,
    prompt_text: String,
    images: Vec<ImageBlob>,
}

impl NegotiationRequest {
    pub fn new(
        persona: impl Into<String>,
        scenario: impl Into<String>,
        prompt_text: impl Into<String>,
    ) -> Self {
        Self {
            persona: persona.into(),
            scenario: scenario.into(),
            prompt_text: prompt_text.into(),
            images: Vec::new(),
        }
    }

    pub fn with_images(mut self, images: Vec<ImageBlob>) -> Self {
        self.images = images;
        self
    }

    pub fn with_image(mut self, image: ImageBlob) -> Self {
        self.images.push(image);
        self
    }

    pub fn persona(&self) -> &str {
        &self.persona
    }

    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    pub fn prompt_text(&self) -> &str {
        &self.prompt_text
    }

    pub fn images(&self) -> &[ImageBlob] {
        &self.images
    }

    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder_keeps_image_order() {
        let request = NegotiationRequest::new("The Diplomat", "Contract Dispute", "Help")
            .with_image(ImageBlob::new(vec![1]))
            .with_image(ImageBlob::new(vec![2, 2]));

        assert_eq!(request.persona(), "The Diplomat");
        assert_eq!(request.scenario(), "Contract Dispute");
        assert_eq!(request.prompt_text(), "Help");
        assert_eq!(request.images().len(), 2);
        assert_eq!(request.images()[1].bytes(), &[2, 2]);
    }

    #[test]
    fn test_image_blob_debug_hides_bytes() {
        let blob = ImageBlob::new(vec![0xff; 42]);
        assert_eq!(format!("{:?}", blob), "ImageBlob(42 bytes)");
    }
}
