//! GraphqlStore against a mock GraphQL endpoint.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use populator_client::{
    ClientConfig, ClientError, Credentials, GraphqlStore, RemoteStore, RoleCategory, VisualSlot,
};
use populator_core::NameId;

// =============================================================================
// Helpers
// =============================================================================

fn store_for(server: &MockServer) -> GraphqlStore {
    GraphqlStore::with_token(format!("{}/graphql", server.uri()), Some("tok".into()))
        .expect("build store")
}

fn credentials() -> Credentials {
    Credentials {
        email: "admin@example.org".into(),
        password: "secret".into(),
    }
}

// =============================================================================
// Lookups
// =============================================================================

#[tokio::test]
async fn lookup_sends_bearer_token_and_maps_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("authorization", "Bearer tok"))
        .and(body_partial_json(json!({ "variables": { "ID": "hub" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "space": {
                "id": "s1",
                "nameID": "hub",
                "displayName": "Hub",
                "profile": { "id": "p1", "visuals": [
                    { "id": "v1", "name": "banner", "uri": "" }
                ] },
                "community": { "id": "com1", "leadUsers": [{ "nameID": "jdoe" }] }
            } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let space = store_for(&server)
        .space(&NameId::from("hub"))
        .await
        .expect("lookup")
        .expect("space exists");

    assert_eq!(space.id, "s1");
    assert_eq!(space.display_name, "Hub");
    assert_eq!(space.profile_id.as_deref(), Some("p1"));
    assert_eq!(space.visual(VisualSlot::Banner).map(|v| v.id.as_str()), Some("v1"));
    let community = space.community.expect("community");
    assert_eq!(community.holders(RoleCategory::LeadUser), Some(&[NameId::from("jdoe")][..]));
}

#[tokio::test]
async fn not_found_error_is_an_absent_entity() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{
                "message": "Unable to find Challenge with ID: grid",
                "extensions": { "code": "ENTITY_NOT_FOUND" }
            }]
        })))
        .mount(&server)
        .await;

    let found = store_for(&server)
        .challenge(&NameId::from("hub"), &NameId::from("grid"))
        .await
        .expect("not-found is not an error");
    assert!(found.is_none());
}

#[tokio::test]
async fn null_lookup_result_is_an_absent_entity() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "user": null } })),
        )
        .mount(&server)
        .await;

    let found = store_for(&server).user(&NameId::from("nobody")).await.expect("lookup");
    assert!(found.is_none());
}

#[tokio::test]
async fn group_lookup_matches_exact_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "space": { "community": { "groups": [
                { "id": "g0", "name": "Builders Guild" },
                { "id": "g1", "name": "Builders", "members": [{ "nameID": "jdoe" }] }
            ] } } }
        })))
        .mount(&server)
        .await;

    let group = store_for(&server)
        .group(&NameId::from("hub"), "Builders")
        .await
        .expect("lookup")
        .expect("group exists");
    assert_eq!(group.id, "g1");
    assert_eq!(group.members, vec![NameId::from("jdoe")]);
}

#[tokio::test]
async fn flow_template_picks_challenge_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "space": { "templates": { "innovationFlowTemplates": [
                { "id": "t-opp", "type": "OPPORTUNITY" },
                { "id": "t-chl", "type": "CHALLENGE" }
            ] } } }
        })))
        .mount(&server)
        .await;

    let template = store_for(&server)
        .challenge_flow_template(&NameId::from("hub"))
        .await
        .expect("lookup");
    assert_eq!(template.as_deref(), Some("t-chl"));
}

// =============================================================================
// Errors
// =============================================================================

#[tokio::test]
async fn graphql_error_surfaces_first_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [
                { "message": "nameID already in use", "extensions": { "code": "BAD_USER_INPUT" } },
                { "message": "second" }
            ]
        })))
        .mount(&server)
        .await;

    let err = store_for(&server)
        .update_visual("v1", "https://example.org/banner.png")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "nameID already in use");
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn non_json_error_response_is_a_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = store_for(&server).space(&NameId::from("hub")).await.unwrap_err();
    match err {
        ClientError::Status { status, body, .. } => {
            assert_eq!(status, 502);
            assert_eq!(body, "Bad Gateway");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

// =============================================================================
// Mutations
// =============================================================================

#[tokio::test]
async fn assign_role_sends_community_and_contributor() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({ "variables": { "leadershipData": {
            "communityID": "com1",
            "organizationID": "acme"
        } } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "assignOrganizationAsCommunityLead": { "id": "com1" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    store_for(&server)
        .assign_role("com1", RoleCategory::LeadOrganization, &NameId::from("acme"))
        .await
        .expect("assign");
}

#[tokio::test]
async fn mutation_without_result_reports_missing_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "createUser": null } })),
        )
        .mount(&server)
        .await;

    let input = populator_client::input::CreateUserInput {
        name_id: NameId::from("jdoe"),
        display_name: "Jane Doe".into(),
        first_name: "Jane".into(),
        last_name: "Doe".into(),
        gender: String::new(),
        email: "jane@example.org".into(),
        phone: String::new(),
        city: String::new(),
        country: String::new(),
        profile_data: Default::default(),
    };
    let err = store_for(&server).create_user(&input).await.unwrap_err();
    assert!(matches!(err, ClientError::MissingData(ref field) if field == "createUser"));
}

#[tokio::test]
async fn create_post_targets_callout_and_maps_visuals() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({ "variables": { "postData": {
            "calloutID": "callout-1",
            "nameID": "first",
            "type": "knowledge"
        } } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "createPostOnCallout": {
                "id": "post-1",
                "nameID": "first",
                "profile": { "id": "pp1", "visuals": [
                    { "id": "v1", "name": "banner", "uri": "" },
                    { "id": "v2", "name": "bannerNarrow", "uri": "" }
                ] }
            } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let input = populator_client::input::CreatePostInput {
        callout_id: "callout-1".into(),
        name_id: NameId::from("first"),
        post_type: "knowledge".into(),
        profile_data: populator_client::input::PostProfileInput {
            display_name: "First".into(),
            description: String::new(),
        },
        tags: Vec::new(),
    };
    let post = store_for(&server).create_post(&input).await.expect("create post");
    assert_eq!(post.id, "post-1");
    assert_eq!(post.visual(VisualSlot::BannerNarrow).map(|v| v.id.as_str()), Some("v2"));
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn connect_logs_in_and_uses_session_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/kratos/self-service/login/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "flow-1" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/kratos/self-service/login"))
        .and(query_param("flow", "flow-1"))
        .and(body_partial_json(json!({
            "method": "password",
            "identifier": "admin@example.org"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "session_token": "sess-42" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("authorization", "Bearer sess-42"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "organization": null } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::new(format!("{}/graphql", server.uri()), credentials())
        .with_kratos_public_url(format!("{}/kratos/", server.uri()));
    let store = GraphqlStore::connect(&config).await.expect("login");
    let found = store.organization(&NameId::from("acme")).await.expect("lookup");
    assert!(found.is_none());
}

#[tokio::test]
async fn rejected_login_is_an_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/kratos/self-service/login/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "flow-1" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/kratos/self-service/login"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "bad creds" })))
        .mount(&server)
        .await;

    let config = ClientConfig::new(format!("{}/graphql", server.uri()), credentials())
        .with_kratos_public_url(format!("{}/kratos", server.uri()));
    let err = GraphqlStore::connect(&config).await.unwrap_err();
    assert!(matches!(err, ClientError::Auth(_)), "{err:?}");
}
