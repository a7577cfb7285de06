//! The six dimension analyzers.
//!
//! Each one is a pure function from a collected snapshot (or, for speed,
//! an audit report) to a `SectionResult`.

pub mod cta;
pub mod fonts;
pub mod images;
pub mod social_proof;
pub mod speed;
pub mod whitespace;

pub use cta::CtaAnalyzer;
pub use fonts::FontAnalyzer;
pub use images::ImageAnalyzer;
pub use social_proof::SocialProofAnalyzer;
pub use speed::SpeedAnalyzer;
pub use whitespace::WhitespaceAnalyzer;
