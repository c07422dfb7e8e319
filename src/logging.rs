//! tracing の初期化
//!
//! 表は標準出力、ログは標準エラーへ。

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "pedimento_console=debug,pedimento_console_common=debug"
    } else {
        "pedimento_console=info,pedimento_console_common=warn"
    };

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
