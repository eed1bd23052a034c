use clap::Parser;
use tracing::info;

use snaplink::config::{CliArgs, LogFormat, StaticConfig};
use snaplink::runtime::modes::run_server;
use snaplink::system::{PanicStyle, init_logging, install_panic_hook};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = CliArgs::parse();

    let mut config = match StaticConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };
    args.apply_overrides(&mut config);

    if args.print_config {
        println!("{}", config.to_toml()?);
        return Ok(());
    }

    // 必须持有 guard，否则非阻塞日志在退出前不会刷新
    let _log_guard = init_logging(&config.logging)?;

    install_panic_hook(match config.logging.format {
        LogFormat::Text => PanicStyle::Development,
        LogFormat::Json => PanicStyle::Structured,
    });

    info!("Starting URL Shortener service");
    run_server(config).await
}
