//! Meeting notice record types
//!
//! This crate defines the record graph a meeting notice is built from
//! (community, meeting, agenda points, votes, documents) and the typed
//! parse step that turns an untyped JSON payload into that graph:
//! - Nested records (`community` + `meeting` objects)
//! - Legacy flat meeting records
//! - Field-path error reporting

pub mod error;
pub mod fields;
pub mod models;
pub mod parse;

pub use error::InputError;
pub use models::{
    Admin, Community, Coordinates, Document, EpochMillis, Meeting, MeetingNoticeRequest,
    MeetingPoint, MeetingType, VoteType, Voting, VotingOption,
};
pub use parse::{FlatMeetingRecord, NoticePayload, SchemaKind};
