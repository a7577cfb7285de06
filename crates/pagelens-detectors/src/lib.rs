pub mod analyzers;
pub mod dictionaries;
pub mod error;

pub use analyzers::{
    CtaAnalyzer, FontAnalyzer, ImageAnalyzer, SocialProofAnalyzer, SpeedAnalyzer,
    WhitespaceAnalyzer,
};
pub use error::{Error, Result};
