pub mod loaders;
pub mod question;

pub use loaders::load_questions_from_json;
pub use question::{BenchmarkEntry, BenchmarkReport, Question, Summary};
