use clap::Parser;
use dialoguer::Confirm;
use pedimento_console::{api, cli, config, console, credentials, error, logging, render};
use pedimento_console_common::DispatchGateway;
use cli::{Cli, Commands};
use config::Config;
use credentials::{CredentialSource, EnvOrConfigToken};
use error::{ConsoleError, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let stored = Config::load()?;
    let config = stored.clone().with_env_overrides();

    match cli.command {
        Commands::List { filter, page, json } => {
            let http = api::http_client(&config)?;
            let source = api::ListingClient::new(
                http,
                &config.api_base_url,
                &config.resource,
                EnvOrConfigToken::new(config.token.clone()),
            );

            let listing = console::load_page(&source, filter.to_filter(config.page_size, page)).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(listing.items())?);
            } else {
                print!("{}", render::render_table(&listing));
            }
        }

        Commands::Dispatch { id, filter, yes } => {
            let http = api::http_client(&config)?;
            let token = EnvOrConfigToken::new(config.token.clone());
            let source = api::ListingClient::new(
                http.clone(),
                &config.api_base_url,
                &config.resource,
                token.clone(),
            );
            let gateway = DispatchGateway::new(api::ServiceClient::new(
                http,
                &config.microservice_base_url,
                token,
            ));

            let filter = filter.to_filter(config.page_size, 1);
            let item = console::find_item(&source, &filter, id).await?;

            println!(
                "処理 {}: {} / {} / {}",
                item.id,
                item.subject.display_code(),
                item.service.label(),
                item.state.label()
            );

            if !item.is_dispatchable() {
                return Err(pedimento_console_common::Error::UnsupportedService(
                    item.service.label().to_string(),
                )
                .into());
            }

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("{} を実行しますか?", item.service.label()))
                    .default(false)
                    .interact()
                    .map_err(|e| ConsoleError::Io(std::io::Error::other(e.to_string())))?;
                if !confirmed {
                    return Err(ConsoleError::Cancelled);
                }
            }

            let (outcome, refreshed) = console::dispatch_item(&source, &gateway, &item, filter).await?;
            println!("{}", render::outcome_message(&item, &outcome));

            match refreshed {
                Some(listing) => {
                    println!();
                    print!("{}", render::render_table(&listing));
                }
                None if outcome.refresh_recommended => {
                    eprintln!("⚠ 実行は受け付けられましたが、一覧の再取得に失敗しました");
                }
                None => {}
            }
        }

        Commands::Config { set_token, clear_token, api_url, service_url, show } => {
            let mut config = stored;

            if let Some(token) = set_token {
                config.set_token(Some(token))?;
                println!("✔ トークンを設定しました");
            }

            if clear_token {
                config.set_token(None)?;
                println!("✔ トークンを削除しました");
            }

            if api_url.is_some() || service_url.is_some() {
                if let Some(url) = api_url {
                    config.api_base_url = url;
                }
                if let Some(url) = service_url {
                    config.microservice_base_url = url;
                }
                config.validate()?;
                config.save()?;
                println!("✔ URLを保存しました");
            }

            if show {
                let config = config.with_env_overrides();
                let token = EnvOrConfigToken::new(config.token.clone());
                println!("設定: {}", Config::config_path()?.display());
                println!("  一覧API: {}", api::join_url(&config.api_base_url, &config.resource));
                println!("  実行サービス: {}", config.microservice_base_url);
                println!("  ページサイズ: {}", config.page_size);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  トークン: {}", if token.bearer_token().is_some() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}
