// Member domain module
// Entity, pre-persistence value, and read-side projections

#![allow(clippy::module_inception)]

pub mod member;
pub mod projections;

// Re-export main types for convenience
pub use member::{Member, NewMember};
pub use projections::{MemberDto, MemberProbe, MemberSummary, MemberWithTeam};
