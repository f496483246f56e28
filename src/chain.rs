//! Read-only Ethereum chain access over JSON-RPC.
//!
//! One configured endpoint, one operation: fetch the balance of an account
//! and render it as an exact decimal ETH string.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::time::Duration;

use crate::error::{AgoraError, Result};

/// Wei per ETH (the chain's base unit scale).
pub const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;

/// Default timeout for RPC requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// A balance denominated in wei.
///
/// Conversion to ETH is integer divide/modulo by 10^18, so the rendered
/// decimal string is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Wei(pub u128);

impl Wei {
    /// Parse a JSON-RPC hex quantity (e.g. `"0xde0b6b3a7640000"`) into a
    /// wei amount.
    pub fn from_hex_quantity(quantity: &str) -> Result<Self> {
        let digits = quantity
            .strip_prefix("0x")
            .or_else(|| quantity.strip_prefix("0X"))
            .ok_or_else(|| {
                AgoraError::MalformedResponse(format!(
                    "balance quantity missing 0x prefix: {:?}",
                    quantity
                ))
            })?;
        if digits.is_empty() {
            return Err(AgoraError::MalformedResponse(
                "balance quantity has no digits".to_string(),
            ));
        }
        let raw = u128::from_str_radix(digits, 16).map_err(|e| {
            AgoraError::MalformedResponse(format!("invalid balance quantity {:?}: {}", quantity, e))
        })?;
        Ok(Wei(raw))
    }

    /// Render as a decimal ETH string with trailing zeros trimmed.
    /// `1000000000000000000` wei -> `"1"`, `500000000000000000` -> `"0.5"`.
    pub fn to_eth_string(&self) -> String {
        let whole = self.0 / WEI_PER_ETH;
        let frac = self.0 % WEI_PER_ETH;
        if frac == 0 {
            return whole.to_string();
        }
        let frac = format!("{:018}", frac);
        format!("{}.{}", whole, frac.trim_end_matches('0'))
    }
}

impl fmt::Display for Wei {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_eth_string())
    }
}

/// Check an address for the canonical format: `0x` followed by 40 hex
/// digits. The RPC provider remains the authority on address validity; this
/// is only used at CLI boundaries to fail fast on obvious typos.
pub fn is_valid_address(address: &str) -> bool {
    address.len() == 42
        && address.starts_with("0x")
        && address[2..].chars().all(|c| c.is_ascii_hexdigit())
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: Value,
    id: u64,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// Read-only client for one Ethereum JSON-RPC endpoint.
///
/// No fallback, no pool, no retry: a failed request surfaces as an `Err`
/// and the caller decides what to do with it.
pub struct ChainReader {
    rpc_url: String,
    http_client: reqwest::Client,
}

impl ChainReader {
    /// Create a reader for the given endpoint with default timeouts.
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self::with_timeout(rpc_url, DEFAULT_TIMEOUT)
    }

    /// Create a reader with a custom request timeout.
    pub fn with_timeout(rpc_url: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            rpc_url: rpc_url.into(),
            http_client,
        }
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Issue a single JSON-RPC 2.0 call and return its `result` field.
    async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: 1,
        };

        let response = self
            .http_client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AgoraError::RpcTransport(format!("request timed out: {e}"))
                } else if e.is_connect() {
                    AgoraError::RpcTransport(format!("connection failed: {e}"))
                } else {
                    AgoraError::RpcTransport(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(AgoraError::RpcTransport(format!(
                "HTTP status {}",
                response.status()
            )));
        }

        let rpc_response: RpcResponse = response.json().await.map_err(|e| {
            AgoraError::MalformedResponse(format!("failed to parse RPC response: {e}"))
        })?;

        if let Some(err) = rpc_response.error {
            return Err(AgoraError::RpcResponse {
                code: err.code,
                message: err.message,
            });
        }

        rpc_response.result.ok_or_else(|| {
            AgoraError::MalformedResponse("RPC response carried neither result nor error".to_string())
        })
    }

    /// Fetch the latest balance of `address` in wei.
    ///
    /// The address is passed through as-is; the endpoint is the sole
    /// validator and rejects malformed input with a JSON-RPC error.
    pub async fn get_balance(&self, address: &str) -> Result<Wei> {
        let result = self
            .call("eth_getBalance", json!([address, "latest"]))
            .await?;
        let quantity = result.as_str().ok_or_else(|| {
            AgoraError::MalformedResponse(format!("balance result is not a string: {}", result))
        })?;
        Wei::from_hex_quantity(quantity)
    }

    /// Fetch the balance of `address` and print it in ETH to stdout.
    pub async fn check_balance(&self, address: &str) -> Result<()> {
        let balance = self.get_balance(address).await?;
        println!("Balance of {}: {} ETH", address, balance.to_eth_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_eth() {
        assert_eq!(Wei(1_000_000_000_000_000_000).to_eth_string(), "1");
    }

    #[test]
    fn test_half_eth() {
        assert_eq!(Wei(500_000_000_000_000_000).to_eth_string(), "0.5");
    }

    #[test]
    fn test_zero() {
        assert_eq!(Wei(0).to_eth_string(), "0");
    }

    #[test]
    fn test_one_wei() {
        assert_eq!(Wei(1).to_eth_string(), "0.000000000000000001");
    }

    #[test]
    fn test_mixed_amount_trims_trailing_zeros() {
        // 2.5 ETH plus 1 gwei
        assert_eq!(
            Wei(2_500_000_001_000_000_000).to_eth_string(),
            "2.500000001"
        );
    }

    #[test]
    fn test_large_balance() {
        // 120 million ETH, larger than any single account will ever hold
        let wei = 120_000_000u128 * WEI_PER_ETH;
        assert_eq!(Wei(wei).to_eth_string(), "120000000");
    }

    #[test]
    fn test_parse_hex_quantity() {
        assert_eq!(
            Wei::from_hex_quantity("0xde0b6b3a7640000").unwrap(),
            Wei(1_000_000_000_000_000_000)
        );
        assert_eq!(Wei::from_hex_quantity("0x0").unwrap(), Wei(0));
    }

    #[test]
    fn test_parse_rejects_missing_prefix() {
        assert!(Wei::from_hex_quantity("de0b6b3a7640000").is_err());
        assert!(Wei::from_hex_quantity("").is_err());
    }

    #[test]
    fn test_parse_rejects_bad_digits() {
        assert!(Wei::from_hex_quantity("0x").is_err());
        assert!(Wei::from_hex_quantity("0xzz").is_err());
    }

    #[test]
    fn test_address_format() {
        assert!(is_valid_address(
            "0x742d35Cc6634C0532925a3b844Bc454e4438f44e"
        ));
        assert!(!is_valid_address("742d35Cc6634C0532925a3b844Bc454e4438f44e"));
        assert!(!is_valid_address("0x742d35"));
        assert!(!is_valid_address(
            "0xg42d35Cc6634C0532925a3b844Bc454e4438f44e"
        ));
    }

    #[test]
    fn test_display_matches_eth_string() {
        let wei = Wei(500_000_000_000_000_000);
        assert_eq!(format!("{}", wei), wei.to_eth_string());
    }
}
