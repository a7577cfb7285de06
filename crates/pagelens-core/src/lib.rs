pub mod analysis;
pub mod audit;
pub mod error;
pub mod pairing;
pub mod priority;
pub mod recommend;
pub mod report;
pub mod request;
pub mod screenshot;
pub mod snapshot;

pub use analysis::{AnalysisResult, Analyzer, Impact, Section, SectionResult, Status};
pub use error::{Error, Result};
pub use report::AnalysisReport;
pub use request::AnalysisRequest;
