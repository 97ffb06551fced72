pub mod client;
pub mod normalize;
pub mod service;
pub mod types;

pub use client::ChatClient;
pub use normalize::{Answer, normalize_answer};
pub use service::{AnswerService, ServiceError};
pub use types::{ChatRequest, Intent, RemoteAnswer};
