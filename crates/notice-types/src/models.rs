//! Meeting notice record graph
//!
//! All records are plain values: built once by [`crate::parse`], read by the
//! renderer, then dropped.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Complete input of one notice: the community and the meeting it convenes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeetingNoticeRequest {
    pub community: Community,
    pub meeting: Meeting,
}

/// Owners' community the meeting belongs to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Community {
    pub id: String,
    pub legal_name: String,
    /// Display name
    pub name: String,
    /// Tax id
    pub cif: String,
    pub address: String,
    pub coordinates: Coordinates,
    pub admin: Option<Admin>,
}

impl Community {
    /// Community known only by its id, as referenced by legacy flat records
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            legal_name: String::new(),
            name: String::new(),
            cif: String::new(),
            address: String::new(),
            coordinates: Coordinates::default(),
            admin: None,
        }
    }
}

/// Geographic position; values are carried through without range checks
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub long: f64,
}

/// Administrator contact of a community
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Admin {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub cif: Option<String>,
    pub phone: Option<String>,
    /// Internal administrator (member of the community) or external firm
    pub is_internal: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meeting {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub meeting_type: MeetingType,
    pub status: i64,
    pub date_time: EpochMillis,
    pub documents: Vec<Document>,
    pub meeting_points: Vec<MeetingPoint>,
}

/// Agenda point of a meeting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeetingPoint {
    pub id: String,
    pub meeting_id: String,
    pub title: String,
    pub description: String,
    pub documents: Vec<Document>,
    pub voting: Voting,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Voting {
    #[serde(rename = "voteType")]
    pub vote_type: VoteType,
    /// Kept in input order; `order` values are never used to re-sort
    pub options: Vec<VotingOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VotingOption {
    pub id: String,
    pub option: String,
    pub order: i64,
}

/// Attached file, referenced through a pre-signed URL that is never fetched
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub signed_url: String,
    pub content_type: String,
    pub size: u64,
}

/// Meeting classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeetingType {
    Ordinary,
    Extraordinary,
    /// Tag outside the known set, kept verbatim
    Unrecognized(String),
}

impl MeetingType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "ORDINARY" => MeetingType::Ordinary,
            "EXTRAORDINARY" => MeetingType::Extraordinary,
            other => MeetingType::Unrecognized(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            MeetingType::Ordinary => "ORDINARY",
            MeetingType::Extraordinary => "EXTRAORDINARY",
            MeetingType::Unrecognized(tag) => tag,
        }
    }
}

impl Serialize for MeetingType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

/// Decision mechanism of an agenda point
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteType {
    Approval,
    MultipleChoice,
    Discussion,
    Simple,
    /// Tag outside the known set, kept verbatim
    Unrecognized(String),
}

impl VoteType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "approval" => VoteType::Approval,
            "multiple_choice" => VoteType::MultipleChoice,
            "discussion" => VoteType::Discussion,
            "simple" => VoteType::Simple,
            other => VoteType::Unrecognized(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            VoteType::Approval => "approval",
            VoteType::MultipleChoice => "multiple_choice",
            VoteType::Discussion => "discussion",
            VoteType::Simple => "simple",
            VoteType::Unrecognized(tag) => tag,
        }
    }
}

impl Serialize for VoteType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

/// Milliseconds since the Unix epoch, bounded so that every calendar
/// conversion stays inside four-digit years
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EpochMillis(u64);

impl EpochMillis {
    /// 9999-12-31T23:59:59.999Z
    pub const MAX: u64 = 253_402_300_799_999;

    pub fn new(millis: u64) -> Option<Self> {
        (millis <= Self::MAX).then_some(Self(millis))
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Whole seconds, truncating the millisecond part
    pub fn as_secs(self) -> i64 {
        // MAX / 1000 fits comfortably in i64
        (self.0 / 1000) as i64
    }

    /// The instant in UTC, at second precision
    pub fn to_utc(self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.as_secs(), 0).unwrap_or(DateTime::UNIX_EPOCH)
    }
}
