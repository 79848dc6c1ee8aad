mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use fabricflow_config::ControllerSettings;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fabric")]
#[command(about = "宣言した状態へ、ファブリックを揃える。", long_about = None)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// 変更内容を計算するだけで、書き込み・削除は行わない
    #[arg(long, global = true)]
    check: bool,

    /// デバッグログを表示
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// APIC への接続設定（タスクファイルの controller ブロックより優先）
#[derive(Args)]
struct ConnectionArgs {
    /// APIC のホスト名またはIPアドレス
    #[arg(long, env = "ACI_HOST", global = true)]
    host: Option<String>,
    /// ポート番号
    #[arg(long, env = "ACI_PORT", global = true)]
    port: Option<u16>,
    /// ユーザー名（デフォルト: admin）
    #[arg(short = 'u', long, env = "ACI_USERNAME", global = true)]
    username: Option<String>,
    /// パスワード
    #[arg(short = 'p', long, env = "ACI_PASSWORD", global = true, hide_env_values = true)]
    password: Option<String>,
    /// http または https（デフォルト: https）
    #[arg(long, env = "ACI_PROTOCOL", global = true, value_parser = ["http", "https"])]
    protocol: Option<String>,
    /// TLS証明書を検証しない
    #[arg(long, global = true)]
    insecure: bool,
    /// リクエストのタイムアウト秒数（デフォルト: 30）
    #[arg(long, env = "ACI_TIMEOUT", global = true)]
    timeout: Option<u64>,
}

impl ConnectionArgs {
    fn settings(&self) -> ControllerSettings {
        ControllerSettings {
            host: self.host.clone(),
            port: self.port,
            username: self.username.clone(),
            password: self.password.clone(),
            protocol: self.protocol.clone(),
            validate_certs: self.insecure.then_some(false),
            timeout_secs: self.timeout,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// EPG とコントラクトの関連付けを管理
    #[command(name = "epg-contract-binding")]
    EpgContractBinding {
        /// テナント名
        #[arg(long, alias = "tenant-name")]
        tenant: Option<String>,
        /// アプリケーションプロファイル名
        #[arg(long, alias = "app-profile-name")]
        app_profile: Option<String>,
        /// EPG名
        #[arg(long, alias = "epg-name")]
        epg: Option<String>,
        /// コントラクト名
        #[arg(long, alias = "contract-name")]
        contract: Option<String>,
        /// EPG がコントラクトを提供するか利用するか
        #[arg(long, value_parser = ["consumer", "provider"])]
        contract_type: String,
        /// QoSクラス
        #[arg(long, value_parser = ["level1", "level2", "level3", "unspecified"])]
        priority: Option<String>,
        /// 提供コントラクトのマッチングアルゴリズム（provider のみ）
        #[arg(long, value_parser = ["all", "at_least_one", "at_most_one", "none"])]
        provider_match: Option<String>,
        /// present / absent / query
        #[arg(long, default_value = "present", value_parser = ["present", "absent", "query"])]
        state: String,
    },
    /// Fibre Channel インターフェースポリシーを管理
    #[command(name = "fc-policy")]
    FcPolicy {
        /// ポリシー名（query では省略可能）
        name: Option<String>,
        /// 説明
        #[arg(long, alias = "descr")]
        description: Option<String>,
        /// ポートモード
        #[arg(long, value_parser = ["f", "np"])]
        port_mode: Option<String>,
        /// present / absent / query
        #[arg(long, default_value = "present", value_parser = ["present", "absent", "query"])]
        state: String,
    },
    /// タスクファイルの内容を順番に適用
    Apply {
        /// タスクファイル（省略時は fabric.kdl を探索）
        file: Option<PathBuf>,
    },
    /// タスクファイルを検証（APIC には接続しない）
    Validate {
        /// タスクファイル（省略時は fabric.kdl を探索）
        file: Option<PathBuf>,
    },
    /// バージョン情報を表示
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout はレポート(JSON)専用、ログは stderr へ
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let settings = cli.connection.settings();

    match cli.command {
        Commands::EpgContractBinding {
            tenant,
            app_profile,
            epg,
            contract,
            contract_type,
            priority,
            provider_match,
            state,
        } => {
            let task = commands::resource::epg_contract_binding(
                commands::resource::BindingArgs {
                    tenant,
                    app_profile,
                    epg,
                    contract,
                    contract_type,
                    priority,
                    provider_match,
                },
                &state,
            )?;
            commands::resource::handle(task, settings, cli.check).await?;
        }
        Commands::FcPolicy {
            name,
            description,
            port_mode,
            state,
        } => {
            let task = commands::resource::fc_policy(name, description, port_mode, &state)?;
            commands::resource::handle(task, settings, cli.check).await?;
        }
        Commands::Apply { file } => {
            commands::apply::handle(file, settings, cli.check).await?;
        }
        Commands::Validate { file } => {
            commands::validate::handle(file)?;
        }
        Commands::Version => {
            println!("fabricflow {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
