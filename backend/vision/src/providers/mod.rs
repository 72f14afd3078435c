pub mod mock;
pub mod openai;
