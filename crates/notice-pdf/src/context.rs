//! Template context assembly
//!
//! [`build_context`] maps a validated record to display-ready values. It is
//! deterministic: the generation instant and the display zone are inputs.

use chrono::{DateTime, Utc};
use notice_types::{Admin, Community, Document, Meeting, MeetingNoticeRequest, MeetingPoint};
use serde::Serialize;

use crate::format::{
    format_date, format_dual_call_time, format_file_size, format_generated_at, format_time,
    meeting_type_label, vote_type_label,
};
use crate::zone::DisplayZone;

/// Longest link target Typst accepts, in bytes
const MAX_LINK_LEN: usize = 8000;

/// Everything the notice template can reference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoticeContext {
    pub community: CommunityContext,
    pub meeting: MeetingContext,
    /// Footer stamp, `dd/mm/YYYY a las HH:MM horas`
    pub generated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommunityContext {
    pub id: String,
    pub name: String,
    pub legal_name: String,
    pub cif: String,
    pub address: String,
    pub coordinates: CoordinatesContext,
    pub admin: Option<AdminContext>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoordinatesContext {
    pub lat: f64,
    pub long: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminContext {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub cif: Option<String>,
    pub phone: Option<String>,
    pub is_internal: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeetingContext {
    pub id: String,
    pub title: String,
    /// Localized label, e.g. `ORDINARIA`
    pub meeting_type: String,
    /// Tag as received, e.g. `ORDINARY`
    pub meeting_type_code: String,
    pub date: String,
    pub time: String,
    pub location_time: String,
    pub location: String,
    pub description: String,
    pub status: i64,
    pub documents: Vec<DocumentContext>,
    pub meeting_points: Vec<PointContext>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentContext {
    pub id: String,
    pub name: String,
    pub signed_url: String,
    /// `signed_url` when it can be printed as a link
    pub link: Option<String>,
    pub content_type: String,
    pub size: u64,
    pub size_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointContext {
    /// 1-based position in the agenda
    pub number: usize,
    pub id: String,
    pub title: String,
    pub description: String,
    pub vote_type: String,
    pub vote_type_label: String,
    pub options: Vec<OptionContext>,
    pub documents: Vec<DocumentContext>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionContext {
    pub id: String,
    pub option: String,
    pub order: i64,
}

/// Build the template context for one notice
pub fn build_context(
    request: &MeetingNoticeRequest,
    generated_at: DateTime<Utc>,
    zone: DisplayZone,
) -> NoticeContext {
    NoticeContext {
        community: community_context(&request.community),
        meeting: meeting_context(&request.meeting, zone),
        generated_at: format_generated_at(generated_at, zone),
    }
}

fn community_context(community: &Community) -> CommunityContext {
    CommunityContext {
        id: community.id.clone(),
        name: community.name.clone(),
        legal_name: community.legal_name.clone(),
        cif: community.cif.clone(),
        address: community.address.clone(),
        coordinates: CoordinatesContext {
            lat: community.coordinates.lat,
            long: community.coordinates.long,
        },
        admin: community.admin.as_ref().map(admin_context),
    }
}

fn admin_context(admin: &Admin) -> AdminContext {
    AdminContext {
        name: admin.name.clone(),
        email: admin.email.clone(),
        company: admin.company.clone(),
        cif: admin.cif.clone(),
        phone: admin.phone.clone(),
        is_internal: admin.is_internal,
    }
}

fn meeting_context(meeting: &Meeting, zone: DisplayZone) -> MeetingContext {
    let tag = meeting.meeting_type.as_tag();
    MeetingContext {
        id: meeting.id.clone(),
        title: meeting.title.clone(),
        meeting_type: meeting_type_label(tag).to_string(),
        meeting_type_code: tag.to_string(),
        date: format_date(meeting.date_time, zone),
        time: format_time(meeting.date_time, zone),
        location_time: format_dual_call_time(meeting.date_time, zone),
        location: meeting.location.clone(),
        description: meeting.description.clone(),
        status: meeting.status,
        documents: meeting.documents.iter().map(document_context).collect(),
        meeting_points: meeting
            .meeting_points
            .iter()
            .enumerate()
            .map(|(index, point)| point_context(index + 1, point))
            .collect(),
    }
}

fn point_context(number: usize, point: &MeetingPoint) -> PointContext {
    let tag = point.voting.vote_type.as_tag();
    PointContext {
        number,
        id: point.id.clone(),
        title: point.title.clone(),
        description: point.description.clone(),
        vote_type: tag.to_string(),
        vote_type_label: vote_type_label(tag).to_string(),
        // Input order is the display order
        options: point
            .voting
            .options
            .iter()
            .map(|option| OptionContext {
                id: option.id.clone(),
                option: option.option.clone(),
                order: option.order,
            })
            .collect(),
        documents: point.documents.iter().map(document_context).collect(),
    }
}

fn document_context(document: &Document) -> DocumentContext {
    DocumentContext {
        id: document.id.clone(),
        name: document.name.clone(),
        signed_url: document.signed_url.clone(),
        link: link_target(&document.signed_url),
        content_type: document.content_type.clone(),
        size: document.size,
        size_label: format_file_size(document.size),
    }
}

fn link_target(url: &str) -> Option<String> {
    if url.is_empty() || url.len() > MAX_LINK_LEN {
        None
    } else {
        Some(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notice_types::{
        Coordinates, EpochMillis, MeetingType, VoteType, Voting, VotingOption,
    };
    use pretty_assertions::assert_eq;

    fn option(id: &str, order: i64) -> VotingOption {
        VotingOption {
            id: id.to_string(),
            option: format!("Opción {}", id),
            order,
        }
    }

    fn request(vote_type: VoteType, options: Vec<VotingOption>) -> MeetingNoticeRequest {
        let instant = DateTime::from_timestamp(1_705_276_800, 0).unwrap();
        MeetingNoticeRequest {
            community: Community {
                id: "c1".to_string(),
                legal_name: "Comunidad de Propietarios Albarracín 33".to_string(),
                name: "Albarracín 33".to_string(),
                cif: "H12345678".to_string(),
                address: "Calle de Albarracín, 33, Madrid".to_string(),
                coordinates: Coordinates {
                    lat: 40.432658,
                    long: -3.6310267,
                },
                admin: None,
            },
            meeting: Meeting {
                id: "m1".to_string(),
                title: "Junta anual".to_string(),
                description: "Revisión de cuentas".to_string(),
                location: "Sala común".to_string(),
                meeting_type: MeetingType::Extraordinary,
                status: 1,
                // 2024-01-15 23:45 UTC
                date_time: EpochMillis::new(1_705_362_300_000).unwrap(),
                documents: vec![Document {
                    id: "d1".to_string(),
                    name: "cuentas.pdf".to_string(),
                    signed_url: "https://files.example/cuentas.pdf?sig=abc".to_string(),
                    content_type: "application/pdf".to_string(),
                    size: 2048,
                }],
                meeting_points: vec![MeetingPoint {
                    id: "p1".to_string(),
                    meeting_id: "m1".to_string(),
                    title: "Presupuesto".to_string(),
                    description: "Aprobación del presupuesto".to_string(),
                    documents: vec![],
                    voting: Voting { vote_type, options },
                    created_at: instant,
                    updated_at: instant,
                }],
            },
        }
    }

    fn generated_at() -> DateTime<Utc> {
        DateTime::from_timestamp(1_705_312_200, 0).unwrap()
    }

    #[test]
    fn test_meeting_fields_are_formatted() {
        let ctx = build_context(
            &request(VoteType::Approval, vec![]),
            generated_at(),
            DisplayZone::utc(),
        );

        assert_eq!(ctx.meeting.meeting_type, "EXTRAORDINARIA");
        assert_eq!(ctx.meeting.meeting_type_code, "EXTRAORDINARY");
        assert_eq!(ctx.meeting.date, "15 de enero de 2024");
        assert_eq!(ctx.meeting.time, "23:45");
        assert_eq!(
            ctx.meeting.location_time,
            "23:45 horas en primera convocatoria, y a las 00:15 horas en segunda convocatoria"
        );
        assert_eq!(ctx.meeting.documents[0].size_label, "2.0 KB");
        assert_eq!(ctx.generated_at, "15/01/2024 a las 09:50 horas");
    }

    #[test]
    fn test_document_links() {
        let mut request = request(VoteType::Approval, vec![]);
        let document = request.meeting.documents[0].clone();
        let long_url = format!("https://x.example/{}", "a".repeat(9000));
        request.meeting.documents = vec![
            document.clone(),
            Document {
                signed_url: String::new(),
                ..document.clone()
            },
            Document {
                signed_url: long_url.clone(),
                ..document
            },
        ];

        let ctx = build_context(&request, generated_at(), DisplayZone::utc());
        let documents = &ctx.meeting.documents;
        assert_eq!(
            documents[0].link.as_deref(),
            Some("https://files.example/cuentas.pdf?sig=abc")
        );
        assert_eq!(documents[1].link, None);
        assert_eq!(documents[2].link, None);
        assert_eq!(documents[2].signed_url, long_url);
    }

    #[test]
    fn test_link_length_limit_is_inclusive() {
        assert!(link_target(&"a".repeat(MAX_LINK_LEN)).is_some());
        assert!(link_target(&"a".repeat(MAX_LINK_LEN + 1)).is_none());
    }

    #[test]
    fn test_option_order_is_preserved() {
        let options = vec![option("a", 3), option("b", 1), option("c", 2)];
        let ctx = build_context(
            &request(VoteType::MultipleChoice, options),
            generated_at(),
            DisplayZone::utc(),
        );

        let orders: Vec<i64> = ctx.meeting.meeting_points[0]
            .options
            .iter()
            .map(|o| o.order)
            .collect();
        assert_eq!(orders, vec![3, 1, 2]);
        let ids: Vec<&str> = ctx.meeting.meeting_points[0]
            .options
            .iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unknown_vote_type_label_passes_through() {
        let ctx = build_context(
            &request(VoteType::Unrecognized("unknown_type".to_string()), vec![]),
            generated_at(),
            DisplayZone::utc(),
        );

        let point = &ctx.meeting.meeting_points[0];
        assert_eq!(point.vote_type, "unknown_type");
        assert_eq!(point.vote_type_label, "unknown_type");
        assert_eq!(point.number, 1);
    }

    #[test]
    fn test_context_is_deterministic() {
        let req = request(VoteType::Simple, vec![option("yes", 1)]);
        let a = build_context(&req, generated_at(), DisplayZone::utc());
        let b = build_context(&req, generated_at(), DisplayZone::utc());
        assert_eq!(a, b);
    }

    #[test]
    fn test_context_serializes_admin_as_null() {
        let ctx = build_context(
            &request(VoteType::Simple, vec![]),
            generated_at(),
            DisplayZone::utc(),
        );
        let value = serde_json::to_value(&ctx).unwrap();
        assert!(value["community"]["admin"].is_null());
        assert_eq!(value["meeting"]["meeting_points"][0]["vote_type_label"], "Simple");
    }
}
