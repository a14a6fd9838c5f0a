//! Wallet routes: open a wallet, credit it, read it back.

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    response::{IntoResponse, Response},
    routing::{get, post},
};
use invoicer_core::ledger::LedgerError;
use invoicer_shared::{CreditAmount, CurrencyCode, WalletId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};
use uuid::Uuid;
use validator::Validate;

use crate::{
    AppState,
    response::{Envelope, reply},
    validation::{self, DECODE_FAILED},
};

/// Creates the wallet routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/account/add", post(add_account))
        .route("/account/invoice", post(invoice))
        .route("/account/{wallet}", get(get_account))
}

/// Request body for opening a wallet.
#[derive(Debug, Deserialize, Validate)]
pub struct AddAccountRequest {
    /// ISO 4217 currency the wallet will hold.
    #[serde(default)]
    #[validate(
        length(min = 1, code = "required"),
        custom(function = "validation::iso4217")
    )]
    pub currency: String,
}

impl AddAccountRequest {
    fn into_currency(self) -> Result<CurrencyCode, String> {
        self.validate().map_err(|e| validation::describe(&e))?;
        CurrencyCode::parse(self.currency).map_err(|_| validation::invalid_field("currency"))
    }
}

/// Response for a newly opened wallet.
#[derive(Debug, Serialize, Deserialize)]
pub struct AddAccountResponse {
    #[serde(flatten)]
    envelope: Envelope,
    /// Id of the new wallet.
    pub wallet: WalletId,
}

/// Request body for crediting a wallet.
#[derive(Debug, Deserialize, Validate)]
pub struct InvoiceRequest {
    /// Currency of the credit; must match the wallet's.
    #[serde(default)]
    #[validate(
        length(min = 1, code = "required"),
        custom(function = "validation::iso4217")
    )]
    pub currency: String,
    /// Wallet to credit.
    #[validate(required, custom(function = "validation::not_nil"))]
    pub wallet: Option<Uuid>,
    /// Amount to add. Zero is accepted and changes nothing.
    #[validate(required, custom(function = "validation::credit_amount"))]
    pub amount: Option<Decimal>,
}

/// A validated credit.
struct Credit {
    wallet: WalletId,
    currency: CurrencyCode,
    amount: CreditAmount,
}

impl InvoiceRequest {
    fn into_credit(self) -> Result<Credit, String> {
        self.validate().map_err(|e| validation::describe(&e))?;

        let wallet = self
            .wallet
            .ok_or_else(|| validation::required_field("wallet"))?;
        let amount = self
            .amount
            .ok_or_else(|| validation::required_field("amount"))?;

        Ok(Credit {
            wallet: WalletId::from_uuid(wallet),
            currency: CurrencyCode::parse(self.currency)
                .map_err(|_| validation::invalid_field("currency"))?,
            amount: CreditAmount::new(amount).map_err(|_| validation::invalid_field("amount"))?,
        })
    }
}

/// Response for a wallet lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccountResponse {
    #[serde(flatten)]
    envelope: Envelope,
    /// Wallet id.
    pub wallet: WalletId,
    /// Currency the wallet holds.
    pub currency: CurrencyCode,
    /// Current balance.
    pub balance: Decimal,
}

/// Unwraps a JSON body or answers with the decode failure envelope.
fn decoded<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            error!(error = %rejection, "Failed to decode request body");
            Err(Envelope::error(DECODE_FAILED).into_response())
        }
    }
}

/// Logs a ledger failure at a level matching who caused it.
fn log_ledger_error(err: &LedgerError, message: &str) {
    if err.http_status_code() >= 500 {
        error!(error = %err, code = err.error_code(), "{message}");
    } else {
        info!(error = %err, code = err.error_code(), "{message}");
    }
}

/// POST /account/add - Open a wallet in the given currency.
async fn add_account(
    State(state): State<AppState>,
    payload: Result<Json<AddAccountRequest>, JsonRejection>,
) -> Response {
    let request = match decoded(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    debug!(request = ?request, "Request body decoded");

    let currency = match request.into_currency() {
        Ok(currency) => currency,
        Err(message) => {
            info!(error = %message, "Invalid request");
            return Envelope::error(message).into_response();
        }
    };

    match state.wallets.create_wallet(currency).await {
        Ok(wallet) => {
            info!(wallet_id = %wallet, "Account added");
            reply(AddAccountResponse {
                envelope: Envelope::ok(),
                wallet,
            })
        }
        Err(e) => {
            log_ledger_error(&e, "Failed to add account");
            let message = match e {
                LedgerError::CurrencyNotSupported(_) => "currency not supported",
                _ => "failed to add account",
            };
            Envelope::error(message).into_response()
        }
    }
}

/// POST /account/invoice - Credit a wallet.
async fn invoice(
    State(state): State<AppState>,
    payload: Result<Json<InvoiceRequest>, JsonRejection>,
) -> Response {
    let request = match decoded(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    debug!(request = ?request, "Request body decoded");

    let credit = match request.into_credit() {
        Ok(credit) => credit,
        Err(message) => {
            info!(error = %message, "Invalid request");
            return Envelope::error(message).into_response();
        }
    };

    match state
        .ledger
        .credit(credit.wallet, &credit.currency, credit.amount)
        .await
    {
        Ok(()) => {
            info!(
                wallet_id = %credit.wallet,
                amount = %credit.amount,
                "Invoice applied"
            );
            Envelope::ok().into_response()
        }
        Err(e) => {
            log_ledger_error(&e, "Failed to apply invoice");
            let message = match e {
                LedgerError::WalletNotFound(_) => "wallet not found",
                LedgerError::CurrencyMismatch { .. } => "currency mismatch",
                LedgerError::BalanceLimitExceeded(_) => "balance limit exceeded",
                _ => "failed to get invoice",
            };
            Envelope::error(message).into_response()
        }
    }
}

/// GET /account/{wallet} - Read a wallet's currency and balance.
async fn get_account(
    State(state): State<AppState>,
    path: Result<Path<WalletId>, PathRejection>,
) -> Response {
    let wallet = match path {
        Ok(Path(wallet)) => wallet,
        Err(rejection) => {
            info!(error = %rejection, "Invalid wallet id in path");
            return Envelope::error(validation::invalid_field("wallet")).into_response();
        }
    };

    match state.wallets.get_wallet(wallet).await {
        Ok(account) => reply(AccountResponse {
            envelope: Envelope::ok(),
            wallet: account.wallet_id,
            currency: account.currency,
            balance: account.balance,
        }),
        Err(e) => {
            log_ledger_error(&e, "Failed to get account");
            let message = match e {
                LedgerError::WalletNotFound(_) => "wallet not found",
                _ => "failed to get account",
            };
            Envelope::error(message).into_response()
        }
    }
}
