pub mod ai_service; // AI capability trait
pub mod camera; // Scoped camera access
pub mod matcher; // Pantry / recipe ingredient matching
pub mod openrouter; // OpenRouter AI service
pub mod storage; // Persisted user + favorites

pub use ai_service::AIService;
pub use camera::{CameraDevice, SnapshotCamera};
pub use openrouter::OpenRouterService;
pub use storage::{JsonFileStore, StateStore};
