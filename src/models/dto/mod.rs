pub mod request;
pub use request::{CreateOptionRequest, CreateQuestionRequest, CreateQuizRequest};
