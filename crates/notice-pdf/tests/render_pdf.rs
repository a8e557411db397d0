//! End-to-end rendering with the bundled template and the Typst engine

use chrono::DateTime;
use notice_pdf::{DisplayZone, NoticeRenderer, RenderError, RendererConfig};
use notice_types::{MeetingNoticeRequest, NoticePayload, SchemaKind};
use serde_json::json;

const FULL: &str = include_str!("fixtures/full_notice.json");
const MINIMAL: &str = include_str!("fixtures/minimal_notice.json");
const FLAT: &str = include_str!("fixtures/flat_meeting.json");

fn renderer() -> NoticeRenderer {
    NoticeRenderer::new(RendererConfig::default().with_zone(DisplayZone::fixed(3600).unwrap()))
}

fn render(json: &str) -> Result<Vec<u8>, RenderError> {
    let request = MeetingNoticeRequest::from_json_slice(json.as_bytes()).unwrap();
    let generated_at = DateTime::from_timestamp(1_705_312_200, 0).unwrap();
    renderer().render_at(&request, generated_at)
}

#[test]
fn test_minimal_notice_renders_pdf() {
    let pdf = render(MINIMAL).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn test_full_notice_renders_pdf() {
    let pdf = render(FULL).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
    assert!(pdf.len() > 1000);
}

#[test]
fn test_flat_record_renders_pdf() {
    let payload = NoticePayload::from_json_slice(FLAT.as_bytes()).unwrap();
    assert_eq!(payload.kind(), SchemaKind::Flat);

    let pdf = renderer().render(&payload.into_request()).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn test_markup_characters_in_text_render_as_text() {
    let mut value: serde_json::Value = serde_json::from_str(FULL).unwrap();
    value["meeting"]["title"] = json!("#panic(\"boom\") *bold* _x_ $x^2$ <label> @ref");
    value["meeting"]["description"] = json!("\"] ) } // /* \\ \n segunda línea");
    value["community"]["name"] = json!("= Heading\n- list");
    value["meeting"]["meeting_points"][0]["voting"]["options"][0]["option"] = json!("[#x]");
    value["meeting"]["documents"][0]["signed_url"] = json!("");

    let request = MeetingNoticeRequest::from_value(&value).unwrap();
    let pdf = renderer().render(&request).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn test_overlong_document_url_renders_as_plain_name() {
    let mut value: serde_json::Value = serde_json::from_str(FULL).unwrap();
    let url = format!("https://x.example/{}", "a".repeat(9000));
    value["meeting"]["documents"][0]["signed_url"] = json!(url);

    let request = MeetingNoticeRequest::from_value(&value).unwrap();
    let pdf = renderer().render(&request).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn test_unknown_tags_render() {
    let mut value: serde_json::Value = serde_json::from_str(FULL).unwrap();
    value["meeting"]["meeting_type"] = json!("ASAMBLEA");
    value["meeting"]["meeting_points"][0]["voting"]["voteType"] = json!("unknown_type");

    let request = MeetingNoticeRequest::from_value(&value).unwrap();
    let pdf = renderer().render(&request).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn test_broken_stylesheet_is_compile_error() {
    let dir = tempfile::tempdir().unwrap();
    let bundled = RendererConfig::bundled_template_dir();
    std::fs::copy(
        bundled.join("meeting_notice.typ.tera"),
        dir.path().join("meeting_notice.typ.tera"),
    )
    .unwrap();
    std::fs::write(dir.path().join("styles.typ"), "#let notice-style(body) = {").unwrap();

    let request = MeetingNoticeRequest::from_json_slice(MINIMAL.as_bytes()).unwrap();
    let err = NoticeRenderer::new(RendererConfig::from_template_dir(dir.path()))
        .render(&request)
        .unwrap_err();

    match err {
        RenderError::Compile(diagnostics) => assert!(!diagnostics.is_empty()),
        other => panic!("expected compile error, got {:?}", other),
    }
}
