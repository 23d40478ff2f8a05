mod defines;
mod impls;
mod prompt;
mod schedule;
mod types;
mod util;

use clap::Parser;
use defines::*;
use types::*;
use util::*;

fn main() {
    // pull a local .env file (if any) into the process environment before
    // anything reads credentials
    dotenv::dotenv().ok();

    // running with no arguments at all drops into the interactive prompt
    // sequence; any flag selects the plain commandline path
    let outcome = if std::env::args_os().len() <= 1 {
        prompt::run_interactive()
    } else {
        run(CommandlineArgs::parse())
    };

    if let Err(e) = outcome {
        print_error(&e);
        std::process::exit(1);
    }
}

fn run(cmd_args: CommandlineArgs) -> Result<(), Error> {
    // credentials for the selected network must exist before anything else;
    // no network call has been made at this point
    let ctx = TradingContext::from_env(cmd_args.testnet)?;

    match ResolvedCommand::resolve(&cmd_args)? {
        ResolvedCommand::ShowBalance => {
            let account = api_get_account_info(&ctx)?;
            print_balance(&account);
            Ok(())
        }
        ResolvedCommand::PlaceOrder {
            order,
            schedule_at: None,
        } => submit_order(&ctx, &order),
        ResolvedCommand::PlaceOrder {
            order,
            schedule_at: Some(at),
        } => {
            let mut one_shot =
                schedule::OneShotSchedule::new(at, chrono::Local::now().naive_local());
            println!(
                "{}schedule set, submitting at {} local time{}",
                COLOR_YELLOW,
                one_shot.fire_at().format("%Y-%m-%d %H:%M:%S"),
                COLOR_RESET
            );
            one_shot.wait();
            print_header("scheduled order triggered");
            submit_order(&ctx, &order)
        }
    }
}
