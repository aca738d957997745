//! Mercado Pago API client for checkout preferences.
//!
//! Checkout packages the session cart into a preference request; Mercado Pago
//! answers with a preference ID and an `init_point` URL the browser is
//! redirected to. Requests are fire-and-await: no retry, no timeout policy,
//! a failed call surfaces an error and nothing is re-sent.
//!
//! Webhook notifications carry an `x-signature` header signed with a shared
//! secret; [`verify_webhook_signature`] checks it before a notification is
//! trusted.

use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderValue};
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use crate::config::MercadoPagoConfig;

/// Mercado Pago REST API base URL.
const BASE_URL: &str = "https://api.mercadopago.com";

type HmacSha256 = Hmac<Sha256>;

/// Errors that can occur when interacting with the Mercado Pago API.
#[derive(Debug, Error)]
pub enum MercadoPagoError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Errors verifying a webhook signature.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The `x-signature` header is missing a `ts=` or `v1=` part.
    #[error("malformed x-signature header")]
    Malformed,
    /// The signature does not match the payload.
    #[error("signature mismatch")]
    Mismatch,
}

// =============================================================================
// Preference wire types
// =============================================================================

/// One line item of a payment preference.
#[derive(Debug, Clone, Serialize)]
pub struct PreferenceItem {
    /// Product identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Units purchased.
    pub quantity: u32,
    /// Unit price in the preference currency.
    pub unit_price: Decimal,
    /// ISO 4217 currency code.
    pub currency_id: String,
}

/// The paying customer.
#[derive(Debug, Clone, Serialize)]
pub struct PreferencePayer {
    /// First name.
    pub name: String,
    /// Last name.
    pub surname: String,
    /// Email address.
    pub email: String,
}

/// Redirect targets for the hosted checkout.
#[derive(Debug, Clone, Serialize)]
pub struct BackUrls {
    pub success: String,
    pub failure: String,
    pub pending: String,
}

impl BackUrls {
    /// Standard confirmation URLs under the storefront base URL.
    #[must_use]
    pub fn for_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            success: format!("{base}/order-confirmation?status=success"),
            failure: format!("{base}/order-confirmation?status=failure"),
            pending: format!("{base}/order-confirmation?status=pending"),
        }
    }
}

/// A preference creation request.
#[derive(Debug, Clone, Serialize)]
pub struct PreferenceRequest {
    pub items: Vec<PreferenceItem>,
    pub payer: PreferencePayer,
    pub back_urls: BackUrls,
    /// Return to the success URL automatically once approved.
    pub auto_return: String,
    /// Webhook endpoint notified of payment events.
    pub notification_url: String,
    /// Local order ID, echoed back in notifications.
    pub external_reference: String,
}

/// The subset of the preference response the storefront consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct PreferenceResponse {
    /// Preference identifier.
    pub id: String,
    /// Hosted checkout URL to redirect the browser to.
    pub init_point: String,
}

/// Split a full name into the payer's first and last name.
///
/// Mercado Pago wants them separately; a single-word name is used for both,
/// mirroring how the checkout form treats it.
#[must_use]
pub fn split_payer_name(full_name: &str) -> (String, String) {
    let trimmed = full_name.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
        None => (trimmed.to_string(), trimmed.to_string()),
    }
}

// =============================================================================
// Client
// =============================================================================

/// Client for the Mercado Pago preference API.
#[derive(Clone)]
pub struct MercadoPagoClient {
    client: reqwest::Client,
    base_url: String,
}

impl MercadoPagoClient {
    /// Create a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &MercadoPagoConfig) -> Result<Self, MercadoPagoError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.access_token.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| MercadoPagoError::Parse(format!("Invalid access token format: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert("Authorization", auth_header);

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Create a checkout preference.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the gateway rejects it.
    pub async fn create_preference(
        &self,
        request: &PreferenceRequest,
    ) -> Result<PreferenceResponse, MercadoPagoError> {
        let url = format!("{}/checkout/preferences", self.base_url);

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MercadoPagoError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<PreferenceResponse>()
            .await
            .map_err(|e| MercadoPagoError::Parse(e.to_string()))
    }
}

// =============================================================================
// Webhook signatures
// =============================================================================

/// Verify a Mercado Pago webhook `x-signature` header.
///
/// The header carries `ts=<unix>,v1=<hex hmac>`; the HMAC-SHA256 is computed
/// over the manifest `id:<data.id>;request-id:<x-request-id>;ts:<ts>;` with
/// the shared webhook secret.
///
/// # Errors
///
/// Returns [`SignatureError::Malformed`] when the header cannot be parsed and
/// [`SignatureError::Mismatch`] when the signature does not match.
pub fn verify_webhook_signature(
    secret: &str,
    signature_header: &str,
    request_id: &str,
    data_id: &str,
) -> Result<(), SignatureError> {
    let mut ts = None;
    let mut v1 = None;

    for part in signature_header.split(',') {
        match part.trim().split_once('=') {
            Some(("ts", value)) => ts = Some(value.trim()),
            Some(("v1", value)) => v1 = Some(value.trim()),
            _ => {}
        }
    }

    let (Some(ts), Some(v1)) = (ts, v1) else {
        return Err(SignatureError::Malformed);
    };

    let expected = hex::decode(v1).map_err(|_| SignatureError::Malformed)?;

    let manifest = format!("id:{data_id};request-id:{request_id};ts:{ts};");
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| SignatureError::Malformed)?;
    mac.update(manifest.as_bytes());

    mac.verify_slice(&expected)
        .map_err(|_| SignatureError::Mismatch)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sign(secret: &str, manifest: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(manifest.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn test_preference_request_wire_format() {
        let request = PreferenceRequest {
            items: vec![PreferenceItem {
                id: "9b2a7e3f".to_string(),
                title: "Yerba Mate 1kg".to_string(),
                quantity: 2,
                unit_price: "4500.00".parse().unwrap(),
                currency_id: "ARS".to_string(),
            }],
            payer: PreferencePayer {
                name: "Ana".to_string(),
                surname: "García".to_string(),
                email: "ana@example.com".to_string(),
            },
            back_urls: BackUrls::for_base_url("https://tienda.example.com/"),
            auto_return: "approved".to_string(),
            notification_url: "https://tienda.example.com/webhooks/mercadopago".to_string(),
            external_reference: "order-123".to_string(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["items"][0]["title"], "Yerba Mate 1kg");
        assert_eq!(value["items"][0]["quantity"], 2);
        assert_eq!(value["items"][0]["unit_price"], "4500.00");
        assert_eq!(value["items"][0]["currency_id"], "ARS");
        assert_eq!(value["payer"]["surname"], "García");
        assert_eq!(value["auto_return"], "approved");
        assert_eq!(
            value["back_urls"]["success"],
            "https://tienda.example.com/order-confirmation?status=success"
        );
        assert_eq!(value["external_reference"], "order-123");
    }

    #[test]
    fn test_split_payer_name() {
        assert_eq!(
            split_payer_name("Ana García"),
            ("Ana".to_string(), "García".to_string())
        );
        assert_eq!(
            split_payer_name("Ana María García"),
            ("Ana".to_string(), "María García".to_string())
        );
        // Single-word names double as the surname.
        assert_eq!(
            split_payer_name("Ana"),
            ("Ana".to_string(), "Ana".to_string())
        );
    }

    #[test]
    fn test_verify_webhook_signature_accepts_valid() {
        let secret = "whsec-test";
        let manifest = "id:12345;request-id:req-abc;ts:1704908010;";
        let header = format!("ts=1704908010,v1={}", sign(secret, manifest));

        assert_eq!(
            verify_webhook_signature(secret, &header, "req-abc", "12345"),
            Ok(())
        );
    }

    #[test]
    fn test_verify_webhook_signature_rejects_tampered_payload() {
        let secret = "whsec-test";
        let manifest = "id:12345;request-id:req-abc;ts:1704908010;";
        let header = format!("ts=1704908010,v1={}", sign(secret, manifest));

        assert_eq!(
            verify_webhook_signature(secret, &header, "req-abc", "99999"),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn test_verify_webhook_signature_rejects_wrong_secret() {
        let manifest = "id:12345;request-id:req-abc;ts:1704908010;";
        let header = format!("ts=1704908010,v1={}", sign("whsec-other", manifest));

        assert_eq!(
            verify_webhook_signature("whsec-test", &header, "req-abc", "12345"),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn test_verify_webhook_signature_rejects_malformed_header() {
        assert_eq!(
            verify_webhook_signature("whsec-test", "v1=abcd", "req-abc", "12345"),
            Err(SignatureError::Malformed)
        );
        assert_eq!(
            verify_webhook_signature("whsec-test", "ts=1,v1=zz-not-hex", "req-abc", "12345"),
            Err(SignatureError::Malformed)
        );
    }
}
