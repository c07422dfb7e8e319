use clap::{Args, Parser, Subcommand};
use pedimento_console_common::{FilterState, ProcessState, ServiceKind};

#[derive(Parser)]
#[command(name = "pedimento-console")]
#[command(about = "Procesos de pedimentos: listado y ejecución manual", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 処理一覧を表示
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// 表示ページ（1始まり）
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 処理のサービスを手動実行
    Dispatch {
        /// 処理ID
        #[arg(required = true)]
        id: i64,

        /// 探索に使う絞り込み条件
        #[command(flatten)]
        filter: FilterArgs,

        /// 確認なしで実行
        #[arg(short, long)]
        yes: bool,
    },

    /// 設定を表示/編集
    Config {
        /// APIトークンを設定
        #[arg(long)]
        set_token: Option<String>,

        /// APIトークンを削除
        #[arg(long)]
        clear_token: bool,

        /// 一覧APIのベースURL
        #[arg(long)]
        api_url: Option<String>,

        /// 実行マイクロサービスのベースURL
        #[arg(long)]
        service_url: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// 一覧の絞り込み条件
#[derive(Args, Clone, Debug, Default)]
pub struct FilterArgs {
    /// pedimento の部分一致
    #[arg(long)]
    pub pedimento: Option<String>,

    /// 状態 (1-4 / waiting / processing / finished / error)
    #[arg(long)]
    pub estado: Option<ProcessState>,

    /// サービス (1-8 / partidas / remesas / acuse / acuse-cove ...)
    #[arg(long)]
    pub servicio: Option<ServiceKind>,

    /// 1ページの件数（省略時は設定値）
    #[arg(long)]
    pub page_size: Option<u32>,
}

impl FilterArgs {
    /// 条件を組み立てる（ページは呼び出し側で指定）
    pub fn to_filter(&self, default_page_size: u32, page: u32) -> FilterState {
        FilterState {
            subject: self.pedimento.clone().unwrap_or_default(),
            state: self.estado,
            service: self.servicio,
            page: page.max(1),
            page_size: self.page_size.unwrap_or(default_page_size).max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_filters() {
        let cli = Cli::parse_from([
            "pedimento-console",
            "list",
            "--estado",
            "processing",
            "--servicio",
            "5",
            "--page-size",
            "12",
            "-p",
            "3",
        ]);
        match cli.command {
            Commands::List { filter, page, json } => {
                let state = filter.to_filter(10, page);
                assert_eq!(state.state, Some(ProcessState::Processing));
                assert_eq!(state.service, Some(ServiceKind::Shipments));
                assert_eq!(state.page_size, 12);
                assert_eq!(state.page, 3);
                assert!(!json);
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_invalid_estado_rejected() {
        let result = Cli::try_parse_from(["pedimento-console", "list", "--estado", "7"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_page_size_from_config() {
        let state = FilterArgs::default().to_filter(10, 0);
        assert_eq!(state.page, 1);
        assert_eq!(state.page_size, 10);
        assert!(state.subject.is_empty());
    }
}
