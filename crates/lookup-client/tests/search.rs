//! End-to-end searches against a local persons API stand-in.

mod common;

use std::sync::Arc;

use lookup_auth::{AuthBroadcaster, AuthEvent, AuthObserver, AuthToken};
use lookup_client::{LookupError, PersonsEndpoint, PersonsLookup};
use lookup_core::PersonPage;
use pretty_assertions::assert_eq;

const ONE_PERSON: &str = r#"{
    "values": [
        {
            "basic": {
                "byu_id": { "value": "123456789" },
                "net_id": { "value": "cosmo" },
                "name_fnf": { "value": "Cosmo Cougar" }
            }
        }
    ],
    "links": {
        "persons__next": { "href": "http://127.0.0.1:1/next-page" }
    },
    "metadata": { "collection_size": 51, "page_size": 50 }
}"#;

fn authenticated_lookup(base_url: String) -> (Arc<AuthBroadcaster>, PersonsLookup) {
    let auth = Arc::new(AuthBroadcaster::new());
    let observer: Arc<dyn AuthObserver> = auth.clone();
    let lookup = PersonsLookup::new(PersonsEndpoint::with_base_url(base_url), observer)
        .expect("client builds");
    lookup.connect();
    auth.publish(AuthEvent::authenticated(AuthToken::new("test-token"), None));
    (auth, lookup)
}

#[tokio::test]
async fn success_is_parsed_into_people() {
    let (base, server) = common::serve_once(200, ONE_PERSON);
    let (_auth, lookup) = authenticated_lookup(base);

    let page = lookup.search("123456789", None).await.expect("search succeeds");
    let captured = server.join().expect("server thread");

    assert_eq!(page.len(), 1);
    assert_eq!(page.people[0].name, "Cosmo Cougar");
    assert_eq!(page.next.as_deref(), Some("http://127.0.0.1:1/next-page"));
    assert_eq!(
        captured.url,
        "/byuapi/persons/v4/?byu_ids=123456789\
         &field_sets=basic,addresses,email_addresses,phones,employee_summary&page_size=50"
    );
    assert_eq!(captured.authorization.as_deref(), Some("Bearer test-token"));
}

#[tokio::test]
async fn name_search_sends_surname_and_rest_of_name() {
    let (base, server) = common::serve_once(200, r#"{"values":[]}"#);
    let (_auth, lookup) = authenticated_lookup(base);

    let page = lookup
        .search("John Middle Smith", None)
        .await
        .expect("search succeeds");
    let captured = server.join().expect("server thread");

    assert!(page.is_empty());
    assert!(
        captured
            .url
            .starts_with("/byuapi/persons/v4/?surname=Smith&rest_of_name=John%20Middle&")
    );
}

#[tokio::test]
async fn not_found_is_empty_page() {
    let (base, server) = common::serve_once(404, r#"{"metadata":{"validation_response":{"code":404}}}"#);
    let (_auth, lookup) = authenticated_lookup(base);

    let page = lookup.search("nobody", None).await.expect("404 is not an error");
    server.join().expect("server thread");

    assert_eq!(page, PersonPage::default());
}

#[tokio::test]
async fn server_error_reports_status() {
    let (base, server) = common::serve_once(500, "internal error");
    let (_auth, lookup) = authenticated_lookup(base);

    let err = lookup.search("cosmo", None).await.unwrap_err();
    server.join().expect("server thread");

    assert!(matches!(err, LookupError::Api { status: 500, .. }));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn page_link_is_requested_verbatim() {
    let (base, server) = common::serve_once(200, r#"{"values":[]}"#);
    let (_auth, lookup) = authenticated_lookup(base.clone());
    let link = format!("{base}?surname=Smith&page_start=51&page_size=50");

    lookup
        .search("ignored text", Some(&link))
        .await
        .expect("search succeeds");
    let captured = server.join().expect("server thread");

    assert_eq!(
        captured.url,
        "/byuapi/persons/v4/?surname=Smith&page_start=51&page_size=50"
    );
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let (base, server) = common::serve_once(200, "not json");
    let (_auth, lookup) = authenticated_lookup(base);

    let err = lookup.search("cosmo", None).await.unwrap_err();
    server.join().expect("server thread");

    assert!(matches!(err, LookupError::Parse(_)));
}

#[tokio::test]
async fn signing_out_blocks_further_searches() {
    let auth = Arc::new(AuthBroadcaster::new());
    let observer: Arc<dyn AuthObserver> = auth.clone();
    let lookup = PersonsLookup::new(
        PersonsEndpoint::with_base_url("http://127.0.0.1:1/persons/v4/"),
        observer,
    )
    .expect("client builds");
    lookup.connect();
    auth.publish(AuthEvent::authenticated(AuthToken::new("t"), None));
    auth.publish(AuthEvent::unauthenticated());

    let err = lookup.search("cosmo", None).await.unwrap_err();
    assert!(matches!(err, LookupError::NotAuthenticated));
}
