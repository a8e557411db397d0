//! Typed parse of meeting notice payloads
//!
//! Two record layouts exist. The nested layout (`community` + `meeting`) is
//! canonical; the flat layout puts the meeting fields at the top level and
//! references the community by `community_id`. [`NoticePayload::detect`]
//! tells them apart by the presence of a `meeting` key.

use serde::Serialize;
use serde_json::Value;

use crate::error::InputError;
use crate::fields::Fields;
use crate::models::{
    Admin, Community, Coordinates, Document, EpochMillis, Meeting, MeetingNoticeRequest,
    MeetingPoint, MeetingType, VoteType, Voting, VotingOption,
};

impl MeetingNoticeRequest {
    /// Parse a nested record, stopping at the first failing field
    pub fn from_value(value: &Value) -> Result<Self, InputError> {
        let root = Fields::of(value, "")?;
        let community = parse_community(root.required("community")?, "community")?;
        let meeting = parse_meeting(Fields::of(root.required("meeting")?, "meeting")?)?;
        Ok(Self { community, meeting })
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, InputError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(&value)
    }
}

/// Legacy flat meeting record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatMeetingRecord {
    pub community_id: String,
    pub meeting: Meeting,
}

impl FlatMeetingRecord {
    /// Top-level fields checked for presence, in reporting order
    pub const REQUIRED_FIELDS: [&'static str; 8] = [
        "id",
        "community_id",
        "title",
        "meeting_type",
        "date_time",
        "location",
        "description",
        "status",
    ];

    pub fn from_value(value: &Value) -> Result<Self, InputError> {
        let root = Fields::of(value, "")?;

        // Presence first, so the first missing name is reported even when a
        // later field is also malformed
        if let Some(missing) = Self::REQUIRED_FIELDS
            .iter()
            .find(|key| root.get(key).is_none())
        {
            return Err(InputError::MissingField(missing.to_string()));
        }

        let community_id = root.identifier("community_id")?;
        let meeting = parse_meeting(root)?;
        Ok(Self {
            community_id,
            meeting,
        })
    }

    /// Nested record whose community carries only its id
    pub fn into_request(self) -> MeetingNoticeRequest {
        MeetingNoticeRequest {
            community: Community::from_id(self.community_id),
            meeting: self.meeting,
        }
    }
}

/// Record layout of a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Nested,
    Flat,
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaKind::Nested => write!(f, "nested"),
            SchemaKind::Flat => write!(f, "flat"),
        }
    }
}

/// A payload in either record layout
#[derive(Debug, Clone, PartialEq)]
pub enum NoticePayload {
    Nested(MeetingNoticeRequest),
    Flat(FlatMeetingRecord),
}

impl NoticePayload {
    /// An object with a `meeting` key is nested; anything else is flat
    pub fn detect(value: &Value) -> SchemaKind {
        match value {
            Value::Object(map) if map.contains_key("meeting") => SchemaKind::Nested,
            _ => SchemaKind::Flat,
        }
    }

    pub fn parse(value: &Value) -> Result<Self, InputError> {
        match Self::detect(value) {
            SchemaKind::Nested => MeetingNoticeRequest::from_value(value).map(Self::Nested),
            SchemaKind::Flat => FlatMeetingRecord::from_value(value).map(Self::Flat),
        }
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, InputError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::parse(&value)
    }

    pub fn kind(&self) -> SchemaKind {
        match self {
            NoticePayload::Nested(_) => SchemaKind::Nested,
            NoticePayload::Flat(_) => SchemaKind::Flat,
        }
    }

    pub fn meeting_id(&self) -> &str {
        match self {
            NoticePayload::Nested(request) => &request.meeting.id,
            NoticePayload::Flat(record) => &record.meeting.id,
        }
    }

    pub fn into_request(self) -> MeetingNoticeRequest {
        match self {
            NoticePayload::Nested(request) => request,
            NoticePayload::Flat(record) => record.into_request(),
        }
    }
}

fn parse_community(value: &Value, path: &str) -> Result<Community, InputError> {
    let fields = Fields::of(value, path)?;

    let id = fields.identifier("id")?;
    let legal_name = fields.string("legal_name")?;
    let name = fields.string("name")?;
    let cif = fields.string("cif")?;
    let address = fields.string("address")?;

    let coordinates_path = fields.child("coordinates");
    let coordinates = parse_coordinates(fields.required("coordinates")?, &coordinates_path)?;

    let admin_path = fields.child("admin");
    let admin = fields
        .get("admin")
        .map(|admin| parse_admin(admin, &admin_path))
        .transpose()?;

    Ok(Community {
        id,
        legal_name,
        name,
        cif,
        address,
        coordinates,
        admin,
    })
}

fn parse_coordinates(value: &Value, path: &str) -> Result<Coordinates, InputError> {
    let fields = Fields::of(value, path)?;
    Ok(Coordinates {
        lat: fields.float_any(&["Lat", "lat"])?,
        long: fields.float_any(&["Long", "long"])?,
    })
}

fn parse_admin(value: &Value, path: &str) -> Result<Admin, InputError> {
    let fields = Fields::of(value, path)?;
    Ok(Admin {
        name: fields.string("name")?,
        email: fields.string("email")?,
        company: fields.optional_string("company")?,
        cif: fields.optional_string("cif")?,
        phone: fields.optional_string("phone")?,
        is_internal: fields.bool_or("is_internal", false)?,
    })
}

fn parse_meeting(fields: Fields<'_>) -> Result<Meeting, InputError> {
    let id = fields.identifier("id")?;
    let title = fields.string("title")?;
    let description = fields.string("description")?;
    let location = fields.string("location")?;
    let meeting_type = MeetingType::from_tag(&fields.string("meeting_type")?);
    let status = fields.integer("status")?;
    let date_time = parse_epoch_millis(&fields, "date_time")?;

    let documents = fields
        .array("documents")?
        .into_iter()
        .map(|(path, item)| parse_document(item, &path))
        .collect::<Result<Vec<_>, _>>()?;

    let meeting_points = fields
        .array("meeting_points")?
        .into_iter()
        .map(|(path, item)| parse_point(item, &path))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Meeting {
        id,
        title,
        description,
        location,
        meeting_type,
        status,
        date_time,
        documents,
        meeting_points,
    })
}

fn parse_epoch_millis(fields: &Fields<'_>, key: &str) -> Result<EpochMillis, InputError> {
    let millis = fields.unsigned(key)?;
    EpochMillis::new(millis).ok_or_else(|| InputError::InvalidValue {
        field: fields.child(key),
        reason: format!("timestamp {} is past year 9999", millis),
    })
}

fn parse_point(value: &Value, path: &str) -> Result<MeetingPoint, InputError> {
    let fields = Fields::of(value, path)?;

    let id = fields.identifier("id")?;
    let meeting_id = fields.identifier("meeting_id")?;
    let title = fields.string("title")?;
    let description = fields.string("description")?;

    let documents = fields
        .array("documents")?
        .into_iter()
        .map(|(path, item)| parse_document(item, &path))
        .collect::<Result<Vec<_>, _>>()?;

    let voting_path = fields.child("voting");
    let voting = parse_voting(fields.required("voting")?, &voting_path)?;

    let created_at = fields.instant("created_at")?;
    let updated_at = fields.instant("updated_at")?;

    Ok(MeetingPoint {
        id,
        meeting_id,
        title,
        description,
        documents,
        voting,
        created_at,
        updated_at,
    })
}

fn parse_voting(value: &Value, path: &str) -> Result<Voting, InputError> {
    let fields = Fields::of(value, path)?;

    let vote_type = VoteType::from_tag(&fields.string("voteType")?);
    let options = fields
        .array("options")?
        .into_iter()
        .map(|(path, item)| parse_option(item, &path))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Voting { vote_type, options })
}

fn parse_option(value: &Value, path: &str) -> Result<VotingOption, InputError> {
    let fields = Fields::of(value, path)?;
    Ok(VotingOption {
        id: fields.identifier("id")?,
        option: fields.string("option")?,
        order: fields.integer("order")?,
    })
}

fn parse_document(value: &Value, path: &str) -> Result<Document, InputError> {
    let fields = Fields::of(value, path)?;
    Ok(Document {
        id: fields.identifier("id")?,
        name: fields.string("name")?,
        signed_url: fields.string("signed_url")?,
        content_type: fields.string("content_type")?,
        size: fields.unsigned("size")?,
    })
}
