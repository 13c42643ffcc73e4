//! Session lifecycle against a stub API: login, logout, expiry and the
//! guard's reaction to each.

mod common;

use exogena_admin_lib::gateway::ApiError;
use exogena_admin_lib::guard::{GuardState, Navigation, Route};
use exogena_admin_lib::models::VendedorInput;
use exogena_admin_lib::pages::{ClientesPage, DashboardPage, LoginPage, VendedoresPage};
use exogena_admin_lib::storage::SecureStorage;
use exogena_admin_lib::AppState;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{logged_in, logged_out, TOKEN};

#[tokio::test]
async fn login_persists_session_and_opens_dashboard() {
    let h = logged_out().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "a@b.com", "password": "x"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "usuario": {"id": 1, "email": "a@b.com"},
            "token": "T1"
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let page = LoginPage::new(&h.state);
    assert_eq!(page.open(), Navigation::Render(Route::Login));

    let user = page.submit("a@b.com", "x").await.unwrap();

    assert_eq!(user.id, 1);
    assert_eq!(h.state.sessions.token().as_deref(), Some(TOKEN));
    assert_eq!(h.state.navigator.current(), Route::Dashboard);

    let storage = h.storage();
    let stored: Value = storage.load("user").unwrap().unwrap();
    assert_eq!(stored["id"], 1);
    assert_eq!(storage.load::<String>("token").unwrap().as_deref(), Some(TOKEN));
    assert_eq!(LoginPage::welcome(&user).detail, "Hola, Usuario");
}

#[tokio::test]
async fn login_without_token_leaves_session_empty() {
    let h = logged_out().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"usuario": {"id": 1}})))
        .mount(&h.server)
        .await;

    let err = LoginPage::new(&h.state).submit("a@b.com", "x").await.unwrap_err();
    let notification = LoginPage::error_notification(&err);

    assert!(matches!(err, ApiError::Parse(_)));
    assert!(notification.is_error());
    assert_eq!(notification.detail, "Credenciales incorrectas");
    assert!(!h.state.sessions.is_authenticated());
    assert!(!h.storage().exists("token"));
    assert!(!h.storage().exists("user"));
    assert_eq!(h.state.navigator.current(), Route::Login);
}

#[tokio::test]
async fn rejected_credentials_stay_on_login_screen() {
    let h = logged_out().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Credenciales inválidas"})),
        )
        .mount(&h.server)
        .await;

    let err = LoginPage::new(&h.state).submit("a@b.com", "mal").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(LoginPage::error_notification(&err).detail, "Credenciales inválidas");
    // Already on the login screen: no second redirect is issued
    assert_eq!(h.state.navigator.history(), vec![Route::Login]);
}

#[tokio::test]
async fn logout_after_login_leaves_storage_as_before() {
    let h = logged_out().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "usuario": {"id": 1, "email": "a@b.com"},
            "token": "T1"
        })))
        .mount(&h.server)
        .await;

    LoginPage::new(&h.state).submit("a@b.com", "x").await.unwrap();
    h.state.sessions.logout();
    h.state.sessions.logout();

    let storage = h.storage();
    assert!(!storage.exists("user"));
    assert!(!storage.exists("token"));
    assert_eq!(h.state.guard.state(), GuardState::Unauthenticated);
}

#[tokio::test]
async fn rejected_token_clears_session_and_redirects_to_login() {
    for status in [401, 403] {
        let h = logged_in().await;
        Mock::given(method("GET"))
            .and(path("/dashboard/stats"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&h.server)
            .await;

        assert_eq!(h.state.visit(Route::Dashboard), Navigation::Render(Route::Dashboard));
        let err = DashboardPage::new(&h.state.api).load().await.unwrap_err();

        assert_eq!(
            err,
            ApiError::Unauthorized {
                status,
                message: None
            }
        );
        assert_eq!(h.state.guard.state(), GuardState::Unauthenticated);
        assert_eq!(h.state.navigator.current(), Route::Login);
        assert!(!h.storage().exists("token"));
        assert!(!h.storage().exists("user"));
    }
}

#[tokio::test]
async fn rejected_write_requests_also_end_the_session() {
    let h = logged_in().await;
    Mock::given(method("DELETE"))
        .and(path("/clientes/4"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "Token inválido"})))
        .expect(1)
        .mount(&h.server)
        .await;

    h.state.visit(Route::Clientes);
    let err = ClientesPage::new(&h.state.api).delete(4).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.server_message(), Some("Token inválido"));
    assert_eq!(h.state.guard.state(), GuardState::Unauthenticated);
    assert_eq!(h.state.navigator.current(), Route::Login);
    assert!(!h.storage().exists("token"));

    // An update rejected with 401 ends the session the same way
    let again = logged_in().await;
    Mock::given(method("PUT"))
        .and(path("/vendedores/2"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&again.server)
        .await;

    again.state.visit(Route::Vendedores);
    let form = VendedorInput {
        id: Some(2),
        nombre: "Laura".into(),
        ..Default::default()
    };
    let err = VendedoresPage::new(&again.state.api).save(&form).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(!again.state.sessions.is_authenticated());
    assert_eq!(again.state.navigator.current(), Route::Login);
    assert!(!again.storage().exists("user"));
}

#[tokio::test]
async fn network_failure_keeps_session() {
    // Bind a server only to learn a free port, then shut it down
    let uri = {
        let server = MockServer::builder().start().await;
        server.uri()
    };
    let dir = tempfile::tempdir().unwrap();
    common::store_session(&dir);
    let state = AppState::new(&uri, SecureStorage::open(dir.path()).unwrap()).unwrap();

    let err = VendedoresPage::new(&state.api).load().await.unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
    assert!(state.sessions.is_authenticated());
    assert_eq!(state.sessions.token().as_deref(), Some(TOKEN));
    assert_eq!(state.navigator.current(), Route::Dashboard);
    assert!(SecureStorage::open(dir.path()).unwrap().exists("token"));
}

#[tokio::test]
async fn bearer_token_sent_only_with_a_session() {
    let h = logged_in().await;
    Mock::given(method("GET"))
        .and(path("/vendedores"))
        .and(header("authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&h.server)
        .await;
    VendedoresPage::new(&h.state.api).load().await.unwrap();

    let anon = logged_out().await;
    Mock::given(method("GET"))
        .and(path("/vendedores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&anon.server)
        .await;
    VendedoresPage::new(&anon.state.api).load().await.unwrap();

    let requests = anon.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn stored_session_skips_login_screen() {
    let h = logged_in().await;

    assert_eq!(h.state.navigator.current(), Route::Dashboard);
    assert_eq!(
        LoginPage::new(&h.state).open(),
        Navigation::Redirect(Route::Dashboard)
    );
    assert_eq!(
        h.state.sessions.current().unwrap().user.display_name(),
        "Ana"
    );
}

#[tokio::test]
async fn protected_paths_need_a_session() {
    let h = logged_out().await;

    assert_eq!(
        h.state.guard.resolve_path("/ventas/detalle/3"),
        Navigation::Redirect(Route::Login)
    );
    assert_eq!(h.state.visit(Route::Clientes), Navigation::Redirect(Route::Login));
    assert_eq!(h.state.navigator.current(), Route::Login);
}
