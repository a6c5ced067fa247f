use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `POST /auth` and `POST /faucet/claim`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddressRequest {
    pub address: String,
}

/// Body of `POST /swap`. Built fresh for every attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub address: String,
    pub amount: String,
    pub token_from: String,
    pub token_to: String,
    pub tx_hash: String,
}

/// Acknowledgement of `POST /auth`. The service returns more than this; the
/// rest is ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AuthResult {
    #[serde(default)]
    pub user: Option<UserStats>,
}

/// Result of a faucet claim that did not fail outright.
#[derive(Debug, Clone, PartialEq)]
pub enum FaucetClaim {
    Claimed,
    /// The wallet claimed within the last 24 hours
    Cooldown { time_remaining: Option<String> },
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SwapResult {
    pub transaction: SwapTransaction,
    #[serde(default)]
    pub points_earned: f64,
    pub user: UserStats,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SwapTransaction {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(deserialize_with = "string_or_number")]
    pub amount: String,
    pub token_from: String,
    pub token_to: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<Value>,
    #[serde(default)]
    pub tx_hash: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub address: String,
    #[serde(default)]
    pub total_points: f64,
    #[serde(default)]
    pub daily_points: f64,
    #[serde(default)]
    pub last_faucet_claim: Option<Value>,
}

/// Error body the service sends with non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub time_remaining: Option<Value>,
    #[serde(default)]
    pub retry_after: Option<Value>,
    /// False when the body was not JSON and `message` is the raw text
    #[serde(skip)]
    pub from_json: bool,
}

impl ErrorBody {
    /// Lenient parse: a non-JSON body becomes the message itself.
    pub fn parse(body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => ErrorBody {
                from_json: true,
                ..parsed
            },
            Err(_) => ErrorBody {
                message: Some(body.trim().to_string()).filter(|m| !m.is_empty()),
                ..Default::default()
            },
        }
    }

    pub fn text(&self) -> String {
        self.message
            .clone()
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| "no error message".to_string())
    }

    /// Faucet refusal because the wallet already claimed today. Only a JSON
    /// body from the service counts; proxy pages do not.
    pub fn is_faucet_cooldown(&self) -> bool {
        self.from_json
            && self
                .message
                .as_deref()
                .is_some_and(|m| m.contains("24 hours"))
    }

    pub fn time_remaining_text(&self) -> Option<String> {
        self.time_remaining.as_ref().and_then(value_text)
    }

    /// `retryAfter` in seconds; accepts numbers and numeric strings. Zero
    /// counts as absent.
    pub fn retry_after_secs(&self) -> Option<f64> {
        let secs = match self.retry_after.as_ref()? {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        (secs.is_finite() && secs > 0.0).then_some(secs)
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SWAP_RESPONSE: &str = r#"{
        "success": true,
        "transaction": {
            "id": 4821,
            "type": "swap",
            "amount": "0.05",
            "tokenFrom": "PRIOR",
            "tokenTo": "USDC",
            "status": "completed",
            "timestamp": "2025-04-20T10:15:00.000Z",
            "txHash": "0xabc"
        },
        "pointsEarned": 10,
        "user": {
            "id": "u-17",
            "address": "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
            "totalPoints": 120,
            "dailyPoints": 30,
            "lastFaucetClaim": null
        }
    }"#;

    #[test]
    fn test_swap_result_parsing() {
        let result: SwapResult = serde_json::from_str(SWAP_RESPONSE).unwrap();
        assert_eq!(result.transaction.id, "4821");
        assert_eq!(result.transaction.kind, "swap");
        assert_eq!(result.transaction.token_to, "USDC");
        assert_eq!(result.points_earned, 10.0);
        assert_eq!(result.user.id, "u-17");
        assert_eq!(result.user.total_points, 120.0);
        assert!(result.user.last_faucet_claim.is_none());
    }

    #[test]
    fn test_swap_request_uses_camel_case() {
        let request = SwapRequest {
            address: "0xaaa".into(),
            amount: "0.05".into(),
            token_from: "PRIOR".into(),
            token_to: "USDC".into(),
            tx_hash: "0x01".into(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["tokenFrom"], "PRIOR");
        assert_eq!(json["txHash"], "0x01");
        assert_eq!(json["amount"], "0.05");
    }

    #[test]
    fn test_faucet_cooldown_detection() {
        let body = ErrorBody::parse(
            r#"{"message":"You can only claim once every 24 hours","timeRemaining":"13.5"}"#,
        );
        assert!(body.is_faucet_cooldown());
        assert_eq!(body.time_remaining_text().as_deref(), Some("13.5"));

        let body = ErrorBody::parse(r#"{"message":"Invalid address"}"#);
        assert!(!body.is_faucet_cooldown());

        let body = ErrorBody::parse("proxy: upstream said try again in 24 hours");
        assert!(!body.is_faucet_cooldown());
    }

    #[test]
    fn test_retry_after_parsing() {
        assert_eq!(ErrorBody::parse(r#"{"retryAfter":3}"#).retry_after_secs(), Some(3.0));
        assert_eq!(ErrorBody::parse(r#"{"retryAfter":"1.5"}"#).retry_after_secs(), Some(1.5));
        assert_eq!(ErrorBody::parse(r#"{"message":"slow down"}"#).retry_after_secs(), None);
        assert_eq!(ErrorBody::parse(r#"{"retryAfter":-4}"#).retry_after_secs(), None);
        assert_eq!(ErrorBody::parse(r#"{"retryAfter":0}"#).retry_after_secs(), None);
    }

    #[test]
    fn test_non_json_error_body_becomes_message() {
        let body = ErrorBody::parse("Bad Gateway");
        assert_eq!(body.text(), "Bad Gateway");
        assert!(ErrorBody::parse("").message.is_none());
    }
}
