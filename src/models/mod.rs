//! Data structures for match detail: raw extraction contract, canonical
//! semantic model, and validation/quality reports.

mod player;
mod raw;
mod report;
mod semantic;

pub use player::PlayerIdentity;
pub use raw::{RawGameBlock, RawMatchInput, RawPoint, ResolveError, SetHeader};
pub use report::{
    Finding, FindingCode, Location, PointRow, QualityReport, QualityTag, ResolutionCounters,
    ResolvedRecord, ValidationResult,
};
pub use semantic::{SemanticGame, SemanticMatch, SemanticPoint, SemanticSet, Side, SideCount};
