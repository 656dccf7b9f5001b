//! Report discovery - walking a base directory for files matching an include
//! pattern.

pub mod error;
pub mod finder;
pub mod traits;

pub use error::DiscoveryError;
pub use finder::ReportFinder;
pub use traits::ReportPatternFinder;
