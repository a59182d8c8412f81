//! Tests for the Muse client library.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a real API.

use muse_client::{ClientConfig, ClientError, MuseClient, ResourceApi, Session};
use muse_core::{
    ArtDraft, ArtType, ArtTypeDraft, Entity, EntityId, LoginCredentials, Registration,
    ValidationError,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, session: Session) -> MuseClient {
    MuseClient::new(ClientConfig::new(server.uri()), Arc::new(session)).expect("valid url")
}

fn art_type_json(id: i64, name: &str, active: bool) -> serde_json::Value {
    json!({
        "id_arttype": id,
        "arttypetname": name,
        "typedescription": format!("Descripción de {name}"),
        "active": active,
    })
}

// =============================================================================
// Listing
// =============================================================================

mod listing {
    use super::*;

    #[tokio::test]
    async fn test_list_sends_bearer_and_content_type() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/art_type"))
            .and(header("authorization", "Bearer tok-123"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                art_type_json(1, "Pintura", true),
                art_type_json(2, "Escultura", false),
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Session::with_credential("tok-123"));
        let types = client.art_types().list_all().await.unwrap();

        assert_eq!(types.len(), 2);
        assert_eq!(types[0].id, EntityId::from(1));
        assert_eq!(types[0].name, "Pintura");
        assert!(!types[1].active);
    }

    #[tokio::test]
    async fn test_list_without_credential_sends_no_auth_header() {
        let server = MockServer::start().await;

        Mock::given(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(401))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/art"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Session::new());
        assert!(client.arts().list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_single_object_body_is_wrapped() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/art_type"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(art_type_json(7, "Grabado", true)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, Session::with_credential("t"));
        let types = client.art_types().list_all().await.unwrap();
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].name, "Grabado");
    }

    #[tokio::test]
    async fn test_null_and_empty_bodies_are_empty_lists() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/art_type"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/art"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = client_for(&server, Session::with_credential("t"));
        assert!(client.art_types().list_all().await.unwrap().is_empty());
        assert!(client.arts().list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_art_rows_decode_joined_category() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/art"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id_art": 10,
                "title": "La ola",
                "description": "Grabado en madera",
                "creation_date": "1831-01-01T00:00:00Z",
                "id_art_type": 7,
                "image_url": "https://img.muse.pe/ola.jpg",
                "active": true,
                "arttypetname": "Grabado"
            }])))
            .mount(&server)
            .await;

        let client = client_for(&server, Session::with_credential("t"));
        let arts = client.arts().list_all().await.unwrap();
        assert_eq!(arts[0].creation_date(), "1831-01-01");
        assert_eq!(arts[0].category_label(&[]), "Grabado");
    }
}

// =============================================================================
// Error Mapping
// =============================================================================

mod errors {
    use super::*;

    #[tokio::test]
    async fn test_server_message_is_surfaced_verbatim() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/art_type"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(json!({ "message": "Base de datos no disponible" })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, Session::with_credential("t"));
        let err = client.art_types().list_all().await.unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "Base de datos no disponible");
    }

    #[tokio::test]
    async fn test_generic_message_names_the_kind() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/art/3"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;

        let client = client_for(&server, Session::with_credential("t"));
        let err = client.arts().fetch_one(&EntityId::from(3)).await.unwrap_err();

        assert_eq!(err.to_string(), "Error al obtener obra de arte");
    }

    #[tokio::test]
    async fn test_unauthorized_is_distinguished() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/art_type"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "detail": "Token expirado" })))
            .mount(&server)
            .await;

        let client = client_for(&server, Session::with_credential("t"));
        match client.art_types().list_all().await.unwrap_err() {
            ClientError::Unauthorized { message } => assert_eq!(message, "Token expirado"),
            other => panic!("Expected Unauthorized, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_deactivate_conflict() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/art_type/1"))
            .respond_with(ResponseTemplate::new(409))
            .mount(&server)
            .await;

        let client = client_for(&server, Session::with_credential("t"));
        let err = client
            .art_types()
            .deactivate(&EntityId::from(1))
            .await
            .unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(err.to_string(), ArtType::KIND.messages.in_use);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Port 1 is reserved and refuses connections
        let client = MuseClient::new(
            ClientConfig::new("http://127.0.0.1:1").with_timeouts(2, 1),
            Arc::new(Session::new()),
        )
        .unwrap();

        let err = client.art_types().list_all().await.unwrap_err();
        assert!(matches!(err, ClientError::Network { .. }));
        assert_eq!(err.to_string(), "No se pudo conectar con el servidor");
    }
}

// =============================================================================
// Mutations
// =============================================================================

mod mutations {
    use super::*;

    #[tokio::test]
    async fn test_create_sends_trimmed_fields_and_default_active() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/art_type"))
            .and(body_json(json!({
                "arttypetname": "Escultura",
                "typedescription": "Obras en volumen",
                "active": true
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(art_type_json(9, "Escultura", true)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Session::with_credential("t"));
        let draft = ArtTypeDraft {
            name: "  Escultura ".into(),
            description: "Obras en volumen  ".into(),
            active: None,
        };
        let created = client.art_types().create(&draft).await.unwrap();

        assert_eq!(created.map(|c| c.id), Some(EntityId::from(9)));
    }

    #[tokio::test]
    async fn test_update_omits_unset_active() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/art_type/4"))
            .and(body_json(json!({
                "arttypetname": "Pintura",
                "typedescription": "Sobre lienzo"
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Session::with_credential("t"));
        let draft = ArtTypeDraft {
            name: "Pintura".into(),
            description: "Sobre lienzo".into(),
            active: None,
        };
        let updated = client
            .art_types()
            .update(&EntityId::from(4), &draft)
            .await
            .unwrap();

        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_art_payload_shape() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/art"))
            .and(body_json(json!({
                "id_art_type": "7",
                "title": "La ola",
                "description": "Grabado",
                "image_url": null,
                "creation_date": "1831-01-01",
                "active": true
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Session::with_credential("t"));
        let draft = ArtDraft {
            title: "La ola ".into(),
            description: "Grabado".into(),
            creation_date: "1831-01-01".into(),
            type_id: Some(EntityId::from("7")),
            image_url: "   ".into(),
            active: None,
            stored_type_id: None,
        };

        // A body that is not a record counts as no record
        assert!(client.arts().create(&draft).await.unwrap().is_none());
    }
}

// =============================================================================
// Authentication
// =============================================================================

mod auth {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn live_token() -> String {
        let exp = chrono::Utc::now().timestamp() + 3600;
        encode(
            &Header::default(),
            &json!({ "sub": "ana@muse.pe", "exp": exp }),
            &EncodingKey::from_secret(b"server"),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_login_stores_credential() {
        let server = MockServer::start().await;
        let token = live_token();

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(json!({ "email": "ana@muse.pe", "password": "secreto" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": token,
                "token_type": "bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Session::new());
        client
            .login(&LoginCredentials::new(" ana@muse.pe ", "secreto"))
            .await
            .unwrap();

        assert_eq!(client.session().bearer().await, Some(token));
        assert!(client.session().is_valid().await);
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "detail": "Credenciales inválidas" })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, Session::new());
        let err = client
            .login(&LoginCredentials::new("ana@muse.pe", "mal"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Credenciales inválidas");
        assert_eq!(client.session().bearer().await, None);
    }

    #[tokio::test]
    async fn test_invalid_credentials_never_reach_the_server() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server, Session::new());
        let err = client
            .login(&LoginCredentials::new("sin-arroba", "x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(ValidationError::EmailInvalid)));

        let registration = Registration {
            name: "Ana".into(),
            lastname: "Torres".into(),
            email: "ana@muse.pe".into(),
            password: "uno".into(),
            confirm_password: "dos".into(),
        };
        let err = client.register(&registration).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(ValidationError::PasswordMismatch)));
    }

    #[tokio::test]
    async fn test_register_conflict() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .and(body_json(json!({
                "name": "Ana",
                "lastname": "Torres",
                "email": "ana@muse.pe",
                "password": "secreto"
            })))
            .respond_with(
                ResponseTemplate::new(409).set_body_json(json!({ "message": "El correo ya existe" })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, Session::new());
        let registration = Registration {
            name: "Ana".into(),
            lastname: "Torres".into(),
            email: "ana@muse.pe".into(),
            password: "secreto".into(),
            confirm_password: "secreto".into(),
        };
        let err = client.register(&registration).await.unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(err.to_string(), "El correo ya existe");
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let server = MockServer::start().await;
        let client = client_for(&server, Session::with_credential(live_token()));

        assert!(client.session().is_valid().await);
        client.logout().await.unwrap();
        assert!(!client.session().is_valid().await);
    }
}
