use crate::defines::*;
use crate::types::*;

use regex::Regex;
use std::fmt;
use std::str::FromStr;

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for Side {
    type Err = Error;

    fn from_str(s: &str) -> Result<Side, Error> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            other => Err(Error::Validation(format!(
                "side must be BUY or SELL, got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

impl Network {
    pub fn base_url(&self) -> &'static str {
        match self {
            Network::Mainnet => MAINNET_BASE_URL,
            Network::Testnet => TESTNET_BASE_URL,
        }
    }
}

impl TradingContext {
    /// Read the key/secret pair of the selected network from the process
    /// environment (a local .env file has been loaded into it at startup).
    /// Only the selected network's pair needs to be present.
    pub fn from_env(use_testnet: bool) -> Result<TradingContext, Error> {
        let (network, key_var, secret_var) = if use_testnet {
            (Network::Testnet, TESTNET_API_KEY_ENVVAR, TESTNET_SECRET_KEY_ENVVAR)
        } else {
            (Network::Mainnet, MAINNET_API_KEY_ENVVAR, MAINNET_SECRET_KEY_ENVVAR)
        };

        let api_key = std::env::var(key_var)
            .map_err(|_| Error::Config(format!("required env variable {} to be set", key_var)))?;
        let api_secret = std::env::var(secret_var)
            .map_err(|_| Error::Config(format!("required env variable {} to be set", secret_var)))?;

        Ok(TradingContext {
            api_key,
            api_secret,
            network,
        })
    }
}

/// Validate and uppercase a symbol as typed by the user.
pub fn validate_symbol(raw: &str) -> Result<String, Error> {
    let symbol = raw.trim().to_uppercase();
    let pattern = Regex::new(SYMBOL_PATTERN).expect("symbol pattern is a valid regex");
    if !pattern.is_match(&symbol) {
        return Err(Error::Validation(format!(
            "symbol must be alphanumeric like BTCUSDT, got '{}'",
            raw.trim()
        )));
    }
    Ok(symbol)
}

/// Parse an HH:MM schedule time.
pub fn parse_schedule_time(raw: &str) -> Result<chrono::NaiveTime, Error> {
    chrono::NaiveTime::parse_from_str(raw.trim(), "%H:%M").map_err(|_| {
        Error::Validation(format!(
            "schedule time must be in HH:MM format, got '{}'",
            raw.trim()
        ))
    })
}

fn validate_positive(value: f64, what: &str) -> Result<f64, Error> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::Validation(format!(
            "{} must be a positive number, got {}",
            what, value
        )))
    }
}

impl OrderRequest {
    /// Build a validated order from raw user input. Shared by the
    /// commandline and interactive input paths.
    pub fn build(
        symbol: &str,
        side: &str,
        quantity: f64,
        price: Option<f64>,
        network: Network,
    ) -> Result<OrderRequest, Error> {
        Ok(OrderRequest {
            symbol: validate_symbol(symbol)?,
            side: Side::from_str(side)?,
            quantity: validate_positive(quantity, "quantity")?,
            price: match price {
                Some(p) => Some(validate_positive(p, "price")?),
                None => None,
            },
            network,
        })
    }
}

impl ResolvedCommand {
    /// Turn parsed flags into the single thing this invocation does.
    /// --show_balance wins outright; nothing order related is looked at.
    pub fn resolve(args: &CommandlineArgs) -> Result<ResolvedCommand, Error> {
        if args.show_balance {
            return Ok(ResolvedCommand::ShowBalance);
        }

        let symbol = args
            .symbol
            .as_deref()
            .ok_or_else(|| Error::Validation("missing --symbol".to_string()))?;
        let side = args
            .side
            .as_deref()
            .ok_or_else(|| Error::Validation("missing --side".to_string()))?;
        let quantity = args
            .quantity
            .ok_or_else(|| Error::Validation("missing --quantity".to_string()))?;

        let network = if args.testnet {
            Network::Testnet
        } else {
            Network::Mainnet
        };

        let order = OrderRequest::build(symbol, side, quantity, args.price, network)?;
        let schedule_at = match args.schedule_time.as_deref() {
            Some(raw) => Some(parse_schedule_time(raw)?),
            None => None,
        };

        Ok(ResolvedCommand::PlaceOrder { order, schedule_at })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CommandlineArgs {
        CommandlineArgs {
            symbol: Some("BTCUSDT".to_string()),
            side: Some("BUY".to_string()),
            quantity: Some(0.01),
            price: Some(50000.0),
            schedule_time: None,
            testnet: true,
            show_balance: false,
        }
    }

    #[test]
    fn resolve_valid_order_flags() {
        let resolved = ResolvedCommand::resolve(&args()).unwrap();
        match resolved {
            ResolvedCommand::PlaceOrder { order, schedule_at } => {
                assert_eq!(order.symbol, "BTCUSDT");
                assert_eq!(order.side, Side::Buy);
                assert_eq!(order.quantity, 0.01);
                assert_eq!(order.price, Some(50000.0));
                assert_eq!(order.network, Network::Testnet);
                assert!(schedule_at.is_none());
            }
            other => panic!("expected PlaceOrder, got {:?}", other),
        }
    }

    #[test]
    fn malformed_side_is_a_validation_error() {
        let mut a = args();
        a.side = Some("BUYY".to_string());
        match ResolvedCommand::resolve(&a) {
            Err(Error::Validation(msg)) => assert!(msg.contains("BUYY")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn show_balance_ignores_malformed_order_flags() {
        let mut a = args();
        a.show_balance = true;
        a.side = Some("BUYY".to_string());
        a.quantity = Some(-5.0);
        assert_eq!(
            ResolvedCommand::resolve(&a).unwrap(),
            ResolvedCommand::ShowBalance
        );
    }

    #[test]
    fn missing_required_flag_is_a_validation_error() {
        let mut a = args();
        a.quantity = None;
        assert!(matches!(
            ResolvedCommand::resolve(&a),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn non_positive_quantity_rejected() {
        for bad in [0.0, -0.01, f64::NAN] {
            let mut a = args();
            a.quantity = Some(bad);
            assert!(matches!(
                ResolvedCommand::resolve(&a),
                Err(Error::Validation(_))
            ));
        }
    }

    #[test]
    fn omitted_price_means_market_order() {
        let mut a = args();
        a.price = None;
        match ResolvedCommand::resolve(&a).unwrap() {
            ResolvedCommand::PlaceOrder { order, .. } => assert!(order.price.is_none()),
            other => panic!("expected PlaceOrder, got {:?}", other),
        }
    }

    #[test]
    fn symbol_is_uppercased_and_shape_checked() {
        assert_eq!(validate_symbol(" btcusdt ").unwrap(), "BTCUSDT");
        assert!(matches!(
            validate_symbol("BTC/USDT"),
            Err(Error::Validation(_))
        ));
        assert!(matches!(validate_symbol("BTC"), Err(Error::Validation(_))));
    }

    #[test]
    fn schedule_time_parsing() {
        assert_eq!(
            parse_schedule_time("18:00").unwrap(),
            chrono::NaiveTime::from_hms_opt(18, 0, 0).unwrap()
        );
        assert!(matches!(
            parse_schedule_time("25:00"),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            parse_schedule_time("tea time"),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn from_env_selects_the_requested_network_pair() {
        // single test touching these env vars so it can't race another one
        std::env::set_var(TESTNET_API_KEY_ENVVAR, "k");
        std::env::set_var(TESTNET_SECRET_KEY_ENVVAR, "s");
        let ctx = TradingContext::from_env(true).unwrap();
        assert_eq!(ctx.api_key, "k");
        assert_eq!(ctx.network, Network::Testnet);

        std::env::remove_var(TESTNET_SECRET_KEY_ENVVAR);
        assert!(matches!(
            TradingContext::from_env(true),
            Err(Error::Config(_))
        ));
        std::env::remove_var(TESTNET_API_KEY_ENVVAR);
    }
}
