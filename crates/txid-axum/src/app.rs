use crate::{RequestTxid, TxidTagger, with_txid};
use axum::{Router, http::StatusCode, routing::get};

/// The service router: every route is wrapped in the txid middleware.
///
/// - `GET /` returns the request's own txid as plain text.
/// - `GET /healthz` returns `ok`.
pub fn router(tagger: TxidTagger) -> Router {
    let routes = Router::new()
        .route("/", get(current_txid))
        .route("/healthz", get(healthz));
    with_txid(routes, tagger)
}

async fn current_txid(txid: Option<RequestTxid>) -> Result<String, StatusCode> {
    match txid {
        Some(txid) => {
            tracing::debug!("handing out txid");
            Ok(txid.to_string())
        }
        None => Err(StatusCode::SERVICE_UNAVAILABLE),
    }
}

async fn healthz() -> &'static str {
    "ok"
}
