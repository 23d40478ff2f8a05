use clap::Parser;

#[derive(Debug, Parser)]
#[clap(name="bintrade")]
#[clap(about="bintrade places a spot order on Binance, now or at a scheduled time, and shows account balances", long_about=None)]
pub struct CommandlineArgs {
    /// Trading pair symbol, e.g. BTCUSDT
    #[clap(short='s', long)]
    pub symbol: Option<String>,

    /// Order side, either BUY or SELL
    #[clap(long)]
    pub side: Option<String>,

    /// Base-asset quantity of the order
    #[clap(short='q', long)]
    pub quantity: Option<f64>,

    /// Limit price. Omit it to send a market order.
    #[clap(short='p', long)]
    pub price: Option<f64>,

    /// Local wall-clock time to submit the order at, format HH:MM.
    /// A time already past today rolls over to tomorrow.
    #[clap(long="schedule_time")]
    pub schedule_time: Option<String>,

    /// Whether or not to execute against testnet
    // We dont need to explicitly specify value for bool here, so just --testnet
    // is fine to make it true. Otherwise, see
    // https://github.com/clap-rs/clap/blob/master/examples/derive_ref/custom-bool.rs
    // as 'bool' type needs special care here.
    #[clap(long="testnet", multiple_values=false, default_missing_value="true", takes_value=false)]
    pub testnet: bool,

    /// Show account balances instead of placing an order.
    /// All order related flags are ignored when this is set.
    #[clap(long="show_balance", multiple_values=false, default_missing_value="true", takes_value=false)]
    pub show_balance: bool,
}

/// Error of API related calls & the internal operations around them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Credentials for the selected network are missing or unreadable.
    /// Fatal before any network call.
    #[error("config error: {0}")]
    Config(String),

    /// Commandline or interactive input didn't validate.
    /// Fatal before any network call.
    #[error("validation error: {0}")]
    Validation(String),

    /// Binance rejected the request; code and message are surfaced verbatim.
    #[error("api error (code {code}): {msg}")]
    Api { code: i64, msg: String },

    #[error("internal error creating http request: {0}")]
    CreatingHttpRequest(#[from] isahc::http::Error),

    #[error("internal error parsing raw url: {0}")]
    ParsingRawUrl(#[from] url::ParseError),

    #[error("http error: {0}")]
    Http(#[from] isahc::Error),

    #[error("error parsing json response: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which of Binance's venues to execute against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
}

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

/// A single spot order about to be sent. Built once per invocation from
/// either commandline flags or the interactive prompt, then handed to the
/// exchange client unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: Side,
    pub quantity: f64,

    /// Limit price; `None` means a market order.
    pub price: Option<f64>,

    pub network: Network,
}

/// What a single invocation resolved to after flag validation.
#[derive(Debug, PartialEq)]
pub enum ResolvedCommand {
    /// Fetch and print balances; order flags are not consulted.
    ShowBalance,

    /// Place `order`, either immediately or at `schedule_at` (local time).
    PlaceOrder {
        order: OrderRequest,
        schedule_at: Option<chrono::NaiveTime>,
    },
}

/// `TradingContext` carries the credentials and venue selection used for
/// every signed request. Constructed explicitly at startup and passed down,
/// never held as a module-level singleton.
pub struct TradingContext {
    pub api_key: String,
    pub api_secret: String,
    pub network: Network,
}

/// Error payload Binance returns on a rejected request.
// https://binance-docs.github.io/apidocs/spot/en/#error-codes
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct BinanceApiError {
    pub code: i64,
    pub msg: String,
}

/// Response of POST /api/v3/order.
/// Optional fields cover the ACK/RESULT/FULL response-type variants.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct BinanceOrderResponse {
    pub symbol: String,
    #[serde(rename = "orderId")]
    pub order_id: u64,
    #[serde(rename = "clientOrderId")]
    pub client_order_id: Option<String>,
    #[serde(rename = "transactTime")]
    pub transact_time: Option<u64>,
    pub price: Option<String>,
    #[serde(rename = "origQty")]
    pub orig_qty: Option<String>,
    #[serde(rename = "executedQty")]
    pub executed_qty: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "timeInForce")]
    pub time_in_force: Option<String>,
    #[serde(rename = "type")]
    pub order_type: Option<String>,
    pub side: Option<String>,
}

/// One asset row of the account response.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct BinanceBalance {
    pub asset: String,
    pub free: String,
    pub locked: String,
}

/// Response of GET /api/v3/account, trimmed to what we present.
/// Taken fresh on every call; never cached or diffed against a prior one.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct BinanceAccountResponse {
    pub balances: Vec<BinanceBalance>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_order_response() {
        let raw = r#"{
            "symbol": "BTCUSDT",
            "orderId": 28,
            "orderListId": -1,
            "clientOrderId": "6gCrw2kRUAF9CvJDGP16IP",
            "transactTime": 1507725176595,
            "price": "50000.00000000",
            "origQty": "0.01000000",
            "executedQty": "0.00000000",
            "cummulativeQuoteQty": "0.00000000",
            "status": "NEW",
            "timeInForce": "GTC",
            "type": "LIMIT",
            "side": "BUY"
        }"#;

        let resp: BinanceOrderResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.symbol, "BTCUSDT");
        assert_eq!(resp.order_id, 28);
        assert_eq!(resp.status.as_deref(), Some("NEW"));
        assert_eq!(resp.side.as_deref(), Some("BUY"));
    }

    #[test]
    fn deserialize_ack_order_response() {
        // ACK response type carries only the identifying fields
        let raw = r#"{
            "symbol": "BTCUSDT",
            "orderId": 28,
            "orderListId": -1,
            "clientOrderId": "6gCrw2kRUAF9CvJDGP16IP",
            "transactTime": 1507725176595
        }"#;

        let resp: BinanceOrderResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.order_id, 28);
        assert!(resp.status.is_none());
    }

    #[test]
    fn deserialize_account_response() {
        let raw = r#"{
            "makerCommission": 15,
            "canTrade": true,
            "balances": [
                {"asset": "BTC", "free": "4723846.89208129", "locked": "0.00000000"},
                {"asset": "LTC", "free": "0.00000000", "locked": "10.50000000"}
            ]
        }"#;

        let resp: BinanceAccountResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.balances.len(), 2);
        assert_eq!(resp.balances[0].asset, "BTC");
        assert_eq!(resp.balances[1].locked, "10.50000000");
    }

    #[test]
    fn deserialize_api_error_payload() {
        let raw = r#"{"code": -1121, "msg": "Invalid symbol."}"#;
        let err: BinanceApiError = serde_json::from_str(raw).unwrap();
        assert_eq!(err.code, -1121);
        assert_eq!(err.msg, "Invalid symbol.");
    }
}
