use sesg_portal::models::{
    CreateNewsRequest, CreateProjectRequest, SiteSettings, TokenResponse, UpdateProjectRequest,
};

#[test]
fn test_update_project_request_optionality() {
    // This confirms the structure supports partial updates (all fields are Option<T>)
    let partial_update = UpdateProjectRequest {
        title: Some("New Title Only".to_string()),
        ..UpdateProjectRequest::default()
    };

    let json_output = serde_json::to_string(&partial_update).unwrap();
    assert!(json_output.contains(r#""title":"New Title Only""#));
    // None fields are omitted entirely, so merging never clobbers stored values.
    assert!(!json_output.contains("description"));
    assert!(!json_output.contains("status"));
}

#[test]
fn test_token_response_wire_shape() {
    let token = TokenResponse {
        access_token: "abc".to_string(),
        token_type: "bearer".to_string(),
        user_role: "admin".to_string(),
    };

    let json_output = serde_json::to_string(&token).unwrap();
    assert!(json_output.contains(r#""access_token":"abc""#));
    assert!(json_output.contains(r#""token_type":"bearer""#));
    assert!(json_output.contains(r#""user_role":"admin""#));
}

#[test]
fn test_project_status_defaults_to_ongoing() {
    let request: CreateProjectRequest = serde_json::from_str(
        r#"{ "title": "Grid Study", "description": "A study of the grid." }"#,
    )
    .unwrap();

    assert_eq!(request.status, "ongoing");
    assert!(request.team_members.is_empty());
}

#[test]
fn test_news_status_defaults_to_published() {
    let request: CreateNewsRequest =
        serde_json::from_str(r#"{ "title": "Launch", "content": "We launched." }"#).unwrap();

    assert_eq!(request.status, "published");
    assert!(!request.is_featured);
}

#[test]
fn test_site_settings_serializes_as_plain_map() {
    let settings: SiteSettings =
        serde_json::from_str(r#"{ "site_name": "SESG", "max_news": 5 }"#).unwrap();

    assert_eq!(settings.0.get("site_name").unwrap(), "SESG");

    // The newtype must be transparent on the wire: an object, not a wrapper.
    let json_output = serde_json::to_string(&settings).unwrap();
    assert!(json_output.starts_with('{'));
    assert!(json_output.contains(r#""max_news":5"#));
}
