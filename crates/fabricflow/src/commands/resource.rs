use crate::output;
use fabricflow_aci::{DesiredState, EpgContractBinding, FcPolicy, Reconciler, Task};
use fabricflow_config::ControllerSettings;

/// epg-contract-binding サブコマンドの引数
pub struct BindingArgs {
    pub tenant: Option<String>,
    pub app_profile: Option<String>,
    pub epg: Option<String>,
    pub contract: Option<String>,
    pub contract_type: String,
    pub priority: Option<String>,
    pub provider_match: Option<String>,
}

pub fn epg_contract_binding(args: BindingArgs, state: &str) -> anyhow::Result<Task> {
    let mut builder = EpgContractBinding::builder(args.contract_type);
    if let Some(tenant) = args.tenant {
        builder = builder.tenant(tenant);
    }
    if let Some(app_profile) = args.app_profile {
        builder = builder.app_profile(app_profile);
    }
    if let Some(epg) = args.epg {
        builder = builder.epg(epg);
    }
    if let Some(contract) = args.contract {
        builder = builder.contract(contract);
    }
    if let Some(priority) = args.priority {
        builder = builder.priority(priority);
    }
    if let Some(provider_match) = args.provider_match {
        builder = builder.provider_match(provider_match);
    }

    let state: DesiredState = state.parse()?;
    Ok(Task::new(builder.build()?, state))
}

pub fn fc_policy(
    name: Option<String>,
    description: Option<String>,
    port_mode: Option<String>,
    state: &str,
) -> anyhow::Result<Task> {
    let mut builder = FcPolicy::builder();
    if let Some(name) = name {
        builder = builder.name(name);
    }
    if let Some(description) = description {
        builder = builder.description(description);
    }
    if let Some(port_mode) = port_mode {
        builder = builder.port_mode(port_mode);
    }

    let state: DesiredState = state.parse()?;
    Ok(Task::new(builder.build()?, state))
}

/// 単一リソースを調整してレポートを出力
pub async fn handle(task: Task, settings: ControllerSettings, check: bool) -> anyhow::Result<()> {
    // 接続前にローカルで検証（キー不足はここで失敗）
    task.resolve()?;

    let client = super::connect(&settings.into_config()).await?;
    let result = Reconciler::new(&client)
        .check_mode(check)
        .run(&task)
        .await?;

    output::print_status(&task.label(), &result);
    output::print_json(&result)?;
    Ok(())
}
