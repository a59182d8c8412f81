//! End-to-end command tests against a mock API.

use clap::Parser;
use jsonwebtoken::{encode, EncodingKey, Header};
use muse_console::cli::Cli;
use muse_console::commands::{self, Console};
use muse_console::config::ConsoleConfig;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn live_token() -> String {
    let exp = chrono::Utc::now().timestamp() + 3600;
    encode(
        &Header::default(),
        &json!({ "sub": "ana@muse.pe", "exp": exp }),
        &EncodingKey::from_secret(b"server"),
    )
    .unwrap()
}

async fn console(server: &MockServer, dir: &TempDir) -> Console {
    let mut config = ConsoleConfig::default();
    config.api.base_url = server.uri();
    config.session.credential_path = dir.path().join("credential");
    Console::connect(config).await.unwrap()
}

async fn exec(console: &Console, args: &[&str]) -> anyhow::Result<()> {
    let cli = Cli::parse_from(std::iter::once("muse").chain(args.iter().copied()));
    commands::run(console, cli.command).await
}

#[tokio::test]
async fn test_protected_command_requires_login() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let console = console(&server, &dir).await;

    let err = exec(&console, &["art-types", "list"]).await.unwrap_err();

    assert!(err.to_string().contains("Token inválido o expirado"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_login_persists_credential_for_next_run() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let token = live_token();

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": token })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/art_type"))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id_arttype": 1, "arttypetname": "Pintura", "typedescription": "Óleo", "active": true }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let first = console(&server, &dir).await;
    exec(&first, &["login", "-e", "ana@muse.pe", "-p", "secreto"])
        .await
        .unwrap();
    drop(first);

    let second = console(&server, &dir).await;
    exec(&second, &["art-types", "list"]).await.unwrap();
}

#[tokio::test]
async fn test_create_art_type_sends_payload() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("credential"), live_token()).unwrap();

    Mock::given(method("GET"))
        .and(path("/art_type"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/art_type"))
        .and(body_json(json!({
            "arttypetname": "Escultura",
            "typedescription": "Obras en volumen",
            "active": true
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let console = console(&server, &dir).await;
    exec(
        &console,
        &[
            "art-types",
            "create",
            "--name",
            " Escultura",
            "--description",
            "Obras en volumen",
        ],
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_invalid_form_is_reported_without_request() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("credential"), live_token()).unwrap();

    Mock::given(method("GET"))
        .and(path("/art_type"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id_arttype": 1, "arttypetname": "Pintura", "typedescription": "Óleo", "active": true }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/art"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let console = console(&server, &dir).await;
    let err = exec(
        &console,
        &[
            "arts",
            "create",
            "--title",
            "La ola",
            "--description",
            "Grabado",
            "--creation-date",
            "1831-01-01",
        ],
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "Ingrese una URL de imagen.");
}

#[tokio::test]
async fn test_referenced_art_type_cannot_be_deactivated() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("credential"), live_token()).unwrap();

    let pintura =
        json!({ "id_arttype": 1, "arttypetname": "Pintura", "typedescription": "Óleo", "active": true });
    Mock::given(method("GET"))
        .and(path("/art_type"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([pintura.clone()])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/art_type/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pintura))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/art_type/1"))
        .respond_with(ResponseTemplate::new(409))
        .expect(1)
        .mount(&server)
        .await;

    let console = console(&server, &dir).await;
    let err = exec(&console, &["art-types", "deactivate", "1", "--yes"])
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Este tipo de arte tiene asignado obras de arte. No es posible borrarlo."
    );
}

#[tokio::test]
async fn test_logout_removes_credential() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("credential");
    std::fs::write(&path, live_token()).unwrap();

    let console = console(&server, &dir).await;
    exec(&console, &["logout"]).await.unwrap();

    assert!(!path.exists());
    assert!(exec(&console, &["arts", "list"]).await.is_err());
}
