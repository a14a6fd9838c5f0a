//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - Wallet routes (`/account/add`, `/account/invoice`, `/account/{wallet}`)
//! - The JSON response envelope
//! - Request validation
//! - Request id and tracing middleware

pub mod middleware;
pub mod response;
pub mod routes;
pub mod validation;

use std::{sync::Arc, time::Duration};

use axum::{Router, body::Body};
use invoicer_core::ledger::{AccountRepository, CurrencyPolicy, LedgerTransactor, WalletStore};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::middleware::{REQUEST_ID_HEADER, request_span};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Opens and reads wallets.
    pub wallets: WalletStore<dyn AccountRepository>,
    /// Applies credits.
    pub ledger: LedgerTransactor<dyn AccountRepository>,
}

impl AppState {
    /// Builds the services over one shared repository.
    pub fn new(repo: Arc<dyn AccountRepository>, policy: CurrencyPolicy) -> Self {
        Self {
            wallets: WalletStore::with_policy(Arc::clone(&repo), policy),
            ledger: LedgerTransactor::new(repo),
        }
    }
}

/// Creates the main application router.
///
/// Requests slower than `request_timeout` are answered with 408 and a
/// panicking handler with 500.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(request_span::<Body>))
                .layer(CatchPanicLayer::new())
                .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(state)
}
