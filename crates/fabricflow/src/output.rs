use colored::Colorize;
use fabricflow_aci::{ActionType, FabricError, InvocationResult};
use serde::Serialize;

/// 1件分の結果を stderr に表示
pub fn print_status(label: &str, result: &InvocationResult) {
    let action = match result.action {
        ActionType::Create => "create".green(),
        ActionType::Update => "update".yellow(),
        ActionType::Delete => "delete".red(),
        ActionType::NoOp => "ok".normal(),
        ActionType::Query => "query".blue(),
    };
    let prefix = if result.check_mode && result.changed {
        "[check] "
    } else {
        ""
    };
    eprintln!("  {}{} {} {}", prefix, action.bold(), label.cyan(), result.url);
}

/// 失敗したタスクを stderr に表示
pub fn print_failure(label: &str, error: &FabricError) {
    eprintln!("  {} {} {}", "failed".red().bold(), label.cyan(), error);
}

/// レポートを JSON で stdout に出力
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
