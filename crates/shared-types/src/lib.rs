pub mod types;

pub use types::{
    BrandKitDocument, ColourPalette, ComplianceRecord, EvaluationReport, FontStyles,
    LogoColours, LogoSafeZone,
};
