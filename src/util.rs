use crate::defines::*;
use crate::types::*;

use isahc::prelude::*;
use isahc::{Body, Request, Response};
use ring::hmac;
use url::Url;

/// Sign a query string the way Binance requires: HMAC-SHA256 keyed with the
/// API secret over the exact bytes sent, hex-encoded.
// https://binance-docs.github.io/apidocs/spot/en/#signed-trade-and-user_data-endpoint-security
pub fn generate_signature(api_secret: &str, query_string: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, api_secret.as_bytes());
    let tag = hmac::sign(&key, query_string.as_bytes());
    hex::encode(tag.as_ref())
}

/// Current epoch time in milliseconds, taken fresh per request.
pub fn get_timestamp_millis() -> u64 {
    chrono::Utc::now().timestamp_millis() as u64
}

/// Join params in the given order and append the signature as the last
/// parameter. Order matters: the signature covers exactly this string.
pub fn signed_query(api_secret: &str, params: &[(&str, String)]) -> String {
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<String>>()
        .join("&");
    let signature = generate_signature(api_secret, &query);
    format!("{}&signature={}", query, signature)
}

fn build_signed_url(
    ctx: &TradingContext,
    path: &str,
    params: &[(&str, String)],
) -> Result<Url, Error> {
    let raw_url = format!(
        "{}{}?{}",
        ctx.network.base_url(),
        path,
        signed_query(&ctx.api_secret, params)
    );
    Url::parse(&raw_url).map_err(Error::from)
}

fn parse_response<T: serde::de::DeserializeOwned>(
    response: &mut Response<Body>,
) -> Result<T, Error> {
    let status = response.status();
    let text = response.text()?;

    if status.is_success() {
        Ok(serde_json::from_str::<T>(&text)?)
    } else {
        // surface Binance's own code/msg verbatim when the body carries one
        match serde_json::from_str::<BinanceApiError>(&text) {
            Ok(api_error) => Err(Error::Api {
                code: api_error.code,
                msg: api_error.msg,
            }),
            Err(_) => Err(Error::Api {
                code: status.as_u16() as i64,
                msg: text,
            }),
        }
    }
}

/// Place a spot order. Price present means LIMIT GTC, absent means MARKET.
/// Exactly one network call; a rejection surfaces as `Error::Api`.
pub fn api_place_order(
    ctx: &TradingContext,
    order: &OrderRequest,
) -> Result<BinanceOrderResponse, Error> {
    let mut params: Vec<(&str, String)> = vec![
        ("symbol", order.symbol.clone()),
        ("side", order.side.to_string()),
    ];
    match order.price {
        Some(price) => {
            params.push(("type", "LIMIT".to_string()));
            params.push(("timeInForce", "GTC".to_string()));
            params.push(("quantity", order.quantity.to_string()));
            params.push(("price", price.to_string()));
        }
        None => {
            params.push(("type", "MARKET".to_string()));
            params.push(("quantity", order.quantity.to_string()));
        }
    }
    params.push(("timestamp", get_timestamp_millis().to_string()));

    let url = build_signed_url(ctx, ORDER_API_PATH, &params)?;
    let mut response = Request::post(url.as_str())
        .header(APIKEY_HEADER, ctx.api_key.as_str())
        .body(())?
        .send()?;
    parse_response(&mut response)
}

/// Fetch the account snapshot (balances) for the context's network.
pub fn api_get_account_info(ctx: &TradingContext) -> Result<BinanceAccountResponse, Error> {
    let params: Vec<(&str, String)> = vec![("timestamp", get_timestamp_millis().to_string())];

    let url = build_signed_url(ctx, ACCOUNT_API_PATH, &params)?;
    let mut response = Request::get(url.as_str())
        .header(APIKEY_HEADER, ctx.api_key.as_str())
        .body(())?
        .send()?;
    parse_response(&mut response)
}

/// Place the order, present the outcome, and report the round-trip time.
pub fn submit_order(ctx: &TradingContext, order: &OrderRequest) -> Result<(), Error> {
    let kind = if order.price.is_some() { "limit" } else { "market" };
    print_header(&format!("submitting {} order ({})", kind, order.network));

    let mut start = std::time::Instant::now();
    measure_start(&mut start);
    let response = api_place_order(ctx, order)?;
    print_order_result(&response);
    measure_end(&start, true);
    Ok(())
}

/// Cyan banner line, 40 columns wide.
pub fn print_header(text: &str) {
    println!("\n{}{}", COLOR_CYAN, "=".repeat(40));
    println!("{:^40}", text);
    println!("{}{}", "=".repeat(40), COLOR_RESET);
}

/// Render the balance table; assets with nothing in them are skipped.
pub fn print_balance(account: &BinanceAccountResponse) {
    println!("\n{}[account balance overview]{}", COLOR_GREEN, COLOR_RESET);
    println!("{}", "-".repeat(30));
    for balance in &account.balances {
        let free: f64 = balance.free.parse().unwrap_or(0.0);
        let locked: f64 = balance.locked.parse().unwrap_or(0.0);
        if free <= 0.0 && locked <= 0.0 {
            continue;
        }
        if locked > 0.0 {
            println!(
                "{:>6}: {}{:<15.8}{} (locked {:.8})",
                balance.asset, COLOR_YELLOW, free, COLOR_RESET, locked
            );
        } else {
            println!(
                "{:>6}: {}{:<15.8}{}",
                balance.asset, COLOR_YELLOW, free, COLOR_RESET
            );
        }
    }
    println!("{}", "-".repeat(30));
}

/// Render the order confirmation: full response dump plus a short summary.
pub fn print_order_result(response: &BinanceOrderResponse) {
    println!("\n{}order created!{}", COLOR_GREEN, COLOR_RESET);
    if let Ok(pretty) = serde_json::to_string_pretty(response) {
        println!("{}", pretty);
    }
    println!(
        "{}order id: {}, status: {}{}",
        COLOR_GREEN,
        response.order_id,
        response.status.as_deref().unwrap_or("UNKNOWN"),
        COLOR_RESET
    );
}

pub fn print_error(e: &Error) {
    eprintln!("{}{}{}", COLOR_RED, e, COLOR_RESET);
}

pub fn measure_start(start: &mut std::time::Instant) {
    *start = std::time::Instant::now();
}

pub fn measure_end(start: &std::time::Instant, also_print: bool) -> std::time::Duration {
    let elapsed = start.elapsed();
    if also_print {
        println!("(took {} ms)", elapsed.as_millis());
    }
    elapsed
}
