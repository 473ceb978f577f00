//! Public JSON contract of the gateway.
//!
//! Integers are platform-width (`i64`) here; the RPC schema in
//! [`crate::proto`] uses fixed-width `i32`. Conversion lives in
//! [`crate::mapping`].

pub mod health;
pub mod preference;
pub mod rag;
pub mod schedule;

pub use health::ReadinessReport;
pub use preference::{SaveAck, UserPreference};
pub use rag::{
    CourseInfoQuery, CourseInfoResult, MeetingTime, RagAnswer, RagQuery, RecommendQuery,
    RecommendResult, RecommendedCourse, SourceDoc,
};
pub use schedule::{ScheduledCourse, SolveResult};
