mod chat_completion_client;
mod jpeg_image_encoder;
mod mock_completion;
mod retry;

pub use chat_completion_client::*;
pub use jpeg_image_encoder::*;
pub use mock_completion::*;
pub use retry::*;
