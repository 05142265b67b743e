use crate::RealtimeClient;

use url::Url;

#[test]
fn given_https_project_when_socket_url_then_wss_with_key_and_version() {
    // Given
    let base = Url::parse("https://abcd.supabase.co/").unwrap();

    // When
    let url = RealtimeClient::socket_url(&base, "anon").unwrap();

    // Then
    assert_eq!(
        url.as_str(),
        "wss://abcd.supabase.co/realtime/v1/websocket?apikey=anon&vsn=1.0.0"
    );
}

#[test]
fn given_http_project_when_socket_url_then_ws() {
    // Given
    let base = Url::parse("http://127.0.0.1:54321/").unwrap();

    // When
    let url = RealtimeClient::socket_url(&base, "anon").unwrap();

    // Then
    assert_eq!(url.scheme(), "ws");
    assert_eq!(url.port(), Some(54321));
}
