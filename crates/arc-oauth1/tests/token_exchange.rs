//! Token exchange against scripted and local HTTP providers.

use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::Mutex;
use std::time::Duration;

use arc_oauth1::{
    AuthParamsLocation, HttpResponse, HttpTransport, RequestDescriptor, SignOptions,
    SignatureMethod, TokenEndpoints, TokenError, TokenExchange, TokenFlow, TokenMethod,
    TokenPhase, TransportError, UreqTransport, parse_form_pairs, sign_request,
};
use pretty_assertions::assert_eq;

/// Replays canned responses and keeps the requests it was given.
struct ScriptedTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    sent: Mutex<Vec<RequestDescriptor>>,
}

impl ScriptedTransport {
    fn new(responses: &[(u16, &str)]) -> Self {
        Self {
            responses: Mutex::new(
                responses
                    .iter()
                    .map(|(status, body)| HttpResponse::new(*status, *body))
                    .collect(),
            ),
            sent: Mutex::default(),
        }
    }

    fn sent(&self) -> Vec<RequestDescriptor> {
        self.sent.lock().unwrap().clone()
    }
}

impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: RequestDescriptor) -> Result<HttpResponse, TransportError> {
        self.sent.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| TransportError::Other("script exhausted".to_owned()))
    }
}

/// Never answers.
struct SilentTransport;

impl HttpTransport for SilentTransport {
    async fn send(&self, _request: RequestDescriptor) -> Result<HttpResponse, TransportError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Err(TransportError::Other("unreachable".to_owned()))
    }
}

fn term_ie_endpoints() -> TokenEndpoints {
    TokenEndpoints::new(
        "http://term.ie/oauth/example/request_token.php",
        "http://term.ie/oauth/example/authorize.php",
        "http://term.ie/oauth/example/access_token.php",
    )
}

/// Serve one request with the given status and body, then close.
fn one_shot_server(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        while reader.read_line(&mut line).unwrap() > 0 {
            if line == "\r\n" {
                break;
            }
            line.clear();
        }
        let mut stream = reader.into_inner();
        write!(
            stream,
            "HTTP/1.1 {status_line}\r\n\
             Content-Type: text/plain\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        stream.flush().unwrap();
    });
    format!("http://{address}")
}

#[tokio::test]
async fn test_term_ie_scenario() {
    let transport = ScriptedTransport::new(&[
        (200, "oauth_token=requestkey&oauth_token_secret=requestsecret"),
        (200, "oauth_token=accesskey&oauth_token_secret=accesssecret"),
    ]);
    let exchange = TokenExchange::new(transport, term_ie_endpoints(), "key", "secret");
    let mut flow = TokenFlow::new();

    let authorize = flow.request_token(&exchange, &[]).await.unwrap();
    assert_eq!(
        authorize,
        "http://term.ie/oauth/example/authorize.php?oauth_token=requestkey"
    );
    let credentials = flow.access_token(&exchange, "verifier").await.unwrap();

    let request = RequestDescriptor::new(
        "GET",
        "http://term.ie/oauth/example/echo_api.php?method=foo%20bar&bar=baz",
    );
    let options = SignOptions::new(SignatureMethod::HmacSha1)
        .with_location(AuthParamsLocation::QueryString);
    let signed = sign_request(&request, &credentials, &options).unwrap();

    let (_, query) = signed.url.split_once('?').unwrap();
    let params = parse_form_pairs(query);
    let value = |name: &str| {
        params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    };
    assert_eq!(value("oauth_consumer_key").as_deref(), Some("key"));
    assert_eq!(value("oauth_token").as_deref(), Some("accesskey"));
    assert_eq!(value("method").as_deref(), Some("foo bar"));

    let sent = exchange.transport().sent();
    assert_eq!(sent.len(), 2);
    assert!(sent[1].header("Authorization").unwrap().contains("oauth_token=\"requestkey\""));
}

#[tokio::test]
async fn test_request_token_http_400_from_server() {
    let base = one_shot_server("400 Bad Request", "oauth_problem=parameter_absent");
    let endpoints = TokenEndpoints::new(
        format!("{base}/request_token"),
        format!("{base}/authorize"),
        format!("{base}/access_token"),
    );
    let exchange = TokenExchange::new(UreqTransport::default(), endpoints, "key", "secret")
        .with_token_method(TokenMethod::Get);

    let err = exchange.get_request_token(&[]).await.unwrap_err();

    match err {
        TokenError::RequestToken { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, "oauth_problem=parameter_absent");
        }
        other => panic!("expected RequestToken error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_request_token_from_server() {
    let base = one_shot_server(
        "200 OK",
        "oauth_token=t1&oauth_token_secret=s1&oauth_callback_confirmed=true",
    );
    let endpoints = TokenEndpoints::new(
        format!("{base}/request_token"),
        format!("{base}/authorize"),
        format!("{base}/access_token"),
    );
    let exchange = TokenExchange::new(UreqTransport::default(), endpoints, "key", "secret")
        .with_token_method(TokenMethod::Get);

    let token = exchange.get_request_token(&[]).await.unwrap();

    assert_eq!(token.token, "t1");
    assert_eq!(token.token_secret, "s1");
    assert!(token.callback_confirmed);
}

#[tokio::test]
async fn test_timeout_is_reported_with_phase() {
    let exchange = TokenExchange::new(SilentTransport, term_ie_endpoints(), "key", "secret")
        .with_timeout(Duration::from_millis(20));

    let err = exchange.get_access_token("t", "s", "v").await.unwrap_err();

    assert!(matches!(
        err,
        TokenError::Timeout {
            phase: TokenPhase::AccessToken,
            ..
        }
    ));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    let endpoints = TokenEndpoints::new(
        format!("http://{address}/request_token"),
        format!("http://{address}/authorize"),
        format!("http://{address}/access_token"),
    );
    let exchange = TokenExchange::new(UreqTransport::default(), endpoints, "key", "secret");

    let err = exchange.get_request_token(&[]).await.unwrap_err();

    assert!(matches!(
        err,
        TokenError::Transport {
            phase: TokenPhase::RequestToken,
            ..
        }
    ));
}
