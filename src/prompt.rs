use crate::defines::*;
use crate::impls::parse_schedule_time;
use crate::schedule::OneShotSchedule;
use crate::types::*;
use crate::util::*;

use chrono::Local;
use std::io::{self, Write};

fn read_line(prompt_text: &str) -> Result<String, Error> {
    print!("{}{}{}", COLOR_CYAN, prompt_text, COLOR_RESET);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn confirm(prompt_text: &str) -> Result<bool, Error> {
    Ok(read_line(prompt_text)?.eq_ignore_ascii_case("y"))
}

/// Sequential prompt session covering the same fields as the commandline
/// flags, entered when the program is run with no arguments at all. Builds
/// the same validated `OrderRequest` the flag path builds.
pub fn run_interactive() -> Result<(), Error> {
    println!(
        "\n{}=== Binance spot trading terminal ==={}",
        COLOR_YELLOW, COLOR_RESET
    );

    let choice = read_line("select network (1-mainnet 2-testnet): ")?;
    let ctx = TradingContext::from_env(choice == "2")?;

    // balance preview up front; a failed fetch is reported but doesn't
    // abort the session
    match api_get_account_info(&ctx) {
        Ok(account) => print_balance(&account),
        Err(e) => print_error(&e),
    }

    print_header("order parameters");
    let symbol = read_line("trading pair (e.g. BTCUSDT): ")?;
    let side = read_line("side (BUY/SELL): ")?;
    let quantity: f64 = read_line("quantity: ")?
        .parse()
        .map_err(|_| Error::Validation("quantity must be a positive number".to_string()))?;
    let price: f64 = read_line("limit price: ")?
        .parse()
        .map_err(|_| Error::Validation("price must be a positive number".to_string()))?;

    let order = OrderRequest::build(&symbol, &side, quantity, Some(price), ctx.network)?;

    if confirm("schedule this order for later? (Y/N): ")? {
        // a badly formatted time just re-asks, it shouldn't throw away the
        // parameters typed so far
        let at = loop {
            let raw = read_line("submit time (local, format HH:MM, e.g. 18:00): ")?;
            match parse_schedule_time(&raw) {
                Ok(time) => break time,
                Err(e) => print_error(&e),
            }
        };

        let mut schedule = OneShotSchedule::new(at, Local::now().naive_local());
        let stamp = schedule.fire_at().format("%Y-%m-%d %H:%M:%S");
        if !confirm(&format!("confirm submitting at {} local time? (Y/N): ", stamp))? {
            println!("{}scheduled order cancelled{}", COLOR_YELLOW, COLOR_RESET);
            return Ok(());
        }

        println!(
            "{}schedule set, submitting at {} local time{}",
            COLOR_GREEN, stamp, COLOR_RESET
        );
        schedule.wait();
        print_header("scheduled order triggered");
        submit_order(&ctx, &order)
    } else {
        if !confirm("confirm submitting now? (Y/N): ")? {
            println!("{}order submission cancelled{}", COLOR_YELLOW, COLOR_RESET);
            return Ok(());
        }
        submit_order(&ctx, &order)
    }
}
