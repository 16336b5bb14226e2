use axum::{
    Router,
    extract::{OptionalFromRequestParts, Request, State},
    http::{HeaderName, HeaderValue, request::Parts},
    middleware::{self, Next},
    response::Response,
};
use core::{convert::Infallible, fmt};
use std::sync::Arc;
use tracing::{Instrument, field};
use txid::TxidSource;

/// Response header the txid is echoed in unless configured otherwise.
pub const DEFAULT_HEADER: &str = "x-txid";

/// The txid assigned to the current request.
///
/// Inserted as a request extension by [`tag_request`]. Handlers take it as
/// `Option<RequestTxid>`; it is `None` when the request could not be tagged
/// or the middleware is not installed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RequestTxid(Arc<str>);

impl RequestTxid {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RequestTxid {
    fn from(txid: String) -> Self {
        Self(txid.into())
    }
}

impl fmt::Display for RequestTxid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S: Send + Sync> OptionalFromRequestParts<S> for RequestTxid {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<Self>().cloned())
    }
}

/// Middleware state: where txids come from and how they are echoed.
#[derive(Clone)]
pub struct TxidTagger {
    source: Arc<dyn TxidSource + Send + Sync>,
    header: HeaderName,
    echo: bool,
}

impl TxidTagger {
    /// Tags requests with txids from `source`, echoing them in
    /// [`DEFAULT_HEADER`].
    pub fn new(source: Arc<dyn TxidSource + Send + Sync>) -> Self {
        Self {
            source,
            header: HeaderName::from_static(DEFAULT_HEADER),
            echo: true,
        }
    }

    #[must_use]
    pub fn with_header(mut self, header: HeaderName) -> Self {
        self.header = header;
        self
    }

    /// Whether the txid is copied into the response headers.
    #[must_use]
    pub fn echo_header(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn header(&self) -> &HeaderName {
        &self.header
    }
}

impl fmt::Debug for TxidTagger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TxidTagger")
            .field("header", &self.header)
            .field("echo", &self.echo)
            .finish_non_exhaustive()
    }
}

/// Axum middleware tagging one request with one txid.
///
/// Install it with [`with_txid`] or
/// `axum::middleware::from_fn_with_state(tagger, tag_request)`.
pub async fn tag_request(
    State(tagger): State<TxidTagger>,
    mut request: Request,
    next: Next,
) -> Response {
    let txid = match tagger.source.generate() {
        Ok(txid) => Some(RequestTxid::from(txid)),
        Err(err) => {
            tracing::warn!(error = %err, "txid unavailable, serving request untagged");
            None
        }
    };

    let span = tracing::info_span!(
        "request",
        txid = field::Empty,
        method = %request.method(),
        path = %request.uri().path(),
    );
    if let Some(txid) = &txid {
        span.record("txid", txid.as_str());
        request.extensions_mut().insert(txid.clone());
    }

    let mut response = async move {
        let response = next.run(request).await;
        tracing::info!(status = response.status().as_u16(), "request completed");
        response
    }
    .instrument(span)
    .await;

    let echoed = txid
        .filter(|_| tagger.echo)
        .and_then(|txid| HeaderValue::from_str(txid.as_str()).ok());
    if let Some(value) = echoed {
        response.headers_mut().insert(tagger.header, value);
    }

    response
}

/// Wraps every route of `router` in [`tag_request`].
pub fn with_txid<S>(router: Router<S>, tagger: TxidTagger) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(tagger, tag_request))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request as HttpRequest, StatusCode},
        routing::get,
    };
    use tower::ServiceExt;
    use txid::{
        AtomicTicker, DefaultTxidGenerator, Error, RandSource, TXID_LEN, TimeSource, Txid,
        TxidGenerator,
    };

    struct FixedTime;
    impl TimeSource for FixedTime {
        fn current_millis(&self) -> u64 {
            1000
        }
    }

    struct ZeroRand;
    impl RandSource for ZeroRand {
        fn fill_bytes(&self, dest: &mut [u8]) {
            dest.fill(0);
        }
    }

    struct Exhausted;
    impl TxidSource for Exhausted {
        fn next_txid(&self) -> Txid {
            Txid::ZERO
        }

        fn generate(&self) -> txid::Result<String> {
            Err(Error::ResourceExhausted)
        }
    }

    fn golden() -> Arc<TxidGenerator<AtomicTicker<FixedTime>, ZeroRand>> {
        Arc::new(TxidGenerator::new(AtomicTicker::new(FixedTime), ZeroRand))
    }

    async fn echo_txid(txid: Option<RequestTxid>) -> String {
        txid.map(|t| t.to_string()).unwrap_or_default()
    }

    fn app(tagger: TxidTagger) -> Router {
        with_txid(Router::new().route("/", get(echo_txid)), tagger)
    }

    async fn call(app: Router) -> (StatusCode, Option<String>, String) {
        let response = app
            .oneshot(HttpRequest::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let header = response
            .headers()
            .get(DEFAULT_HEADER)
            .map(|v| v.to_str().unwrap().to_owned());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, header, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn handler_and_header_see_the_same_txid() {
        let tagger = TxidTagger::new(Arc::new(DefaultTxidGenerator::default()));
        let (status, header, body) = call(app(tagger)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.len(), TXID_LEN);
        assert_eq!(header.as_deref(), Some(body.as_str()));
        assert!(body.parse::<Txid>().is_ok());
    }

    #[tokio::test]
    async fn every_request_gets_a_fresh_txid() {
        let tagger = TxidTagger::new(Arc::new(DefaultTxidGenerator::default()));
        let router = app(tagger);
        let (_, _, first) = call(router.clone()).await;
        let (_, _, second) = call(router).await;
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn txid_comes_from_the_configured_source() {
        let (_, header, body) = call(app(TxidTagger::new(golden()))).await;
        assert_eq!(body, "0000007q000000000000");
        assert_eq!(header.as_deref(), Some("0000007q000000000000"));
    }

    #[tokio::test]
    async fn custom_header_name_is_used() {
        let tagger = TxidTagger::new(golden())
            .with_header(HeaderName::from_static("x-request-id"));
        let response = app(tagger)
            .oneshot(HttpRequest::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.headers().get(DEFAULT_HEADER).is_none());
        assert_eq!(
            response.headers().get("x-request-id").unwrap(),
            "0000007q000000000000"
        );
    }

    #[tokio::test]
    async fn echo_can_be_disabled() {
        let tagger = TxidTagger::new(golden()).echo_header(false);
        let (status, header, body) = call(app(tagger)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(header, None);
        assert_eq!(body, "0000007q000000000000");
    }

    #[tokio::test]
    async fn exhausted_source_serves_request_untagged() {
        let (status, header, body) = call(app(TxidTagger::new(Arc::new(Exhausted)))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(header, None);
        assert_eq!(body, "");
    }

    #[tokio::test]
    async fn untagged_router_yields_no_extension() {
        let router = Router::new().route("/", get(echo_txid));
        let (status, header, body) = call(router).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(header, None);
        assert_eq!(body, "");
    }

    #[test]
    fn tagger_debug_hides_the_source() {
        let tagger = TxidTagger::new(golden());
        assert_eq!(tagger.header(), DEFAULT_HEADER);
        let debug = format!("{tagger:?}");
        assert!(debug.contains("x-txid"));
        assert!(debug.contains(".."));
    }
}
