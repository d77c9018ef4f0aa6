mod traits;
mod huggingface;
mod openai;
pub mod provider;
pub mod gateway;

pub use traits::*;
pub use huggingface::{GenerationParameters, HuggingFaceClient};
pub use openai::OpenAIClient;
pub use provider::ProviderId;
pub use gateway::{normalize_reply, BackendConnector, GatewayStatus, HttpConnector, ModelGateway};
