/// Base URL of Binance's spot REST API (mainnet).
pub const MAINNET_BASE_URL: &str = "https://api.binance.com";

/// Base URL of Binance's spot testnet REST API.
pub const TESTNET_BASE_URL: &str = "https://testnet.binance.vision";

pub const ORDER_API_PATH: &str = "/api/v3/order";
pub const ACCOUNT_API_PATH: &str = "/api/v3/account";

/// Header carrying the API key on every signed request.
pub const APIKEY_HEADER: &str = "X-MBX-APIKEY";

pub const MAINNET_API_KEY_ENVVAR: &str = "BINANCE_API_KEY";
pub const MAINNET_SECRET_KEY_ENVVAR: &str = "BINANCE_SECRET_KEY";
pub const TESTNET_API_KEY_ENVVAR: &str = "TESTNET_API_KEY";
pub const TESTNET_SECRET_KEY_ENVVAR: &str = "TESTNET_SECRET_KEY";

/// Accepted shape of a spot symbol after uppercasing, e.g. BTCUSDT.
pub const SYMBOL_PATTERN: &str = r"^[A-Z0-9]{5,20}$";

// ANSI escape sequences for console coloring
pub const COLOR_RED: &str = "\x1b[31m";
pub const COLOR_GREEN: &str = "\x1b[32m";
pub const COLOR_YELLOW: &str = "\x1b[33m";
pub const COLOR_MAGENTA: &str = "\x1b[35m";
pub const COLOR_CYAN: &str = "\x1b[36m";
pub const COLOR_RESET: &str = "\x1b[0m";
