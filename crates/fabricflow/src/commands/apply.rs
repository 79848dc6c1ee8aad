use crate::output;
use colored::Colorize;
use fabricflow_aci::Reconciler;
use fabricflow_config::ControllerSettings;
use std::path::PathBuf;

pub async fn handle(
    file: Option<PathBuf>,
    settings: ControllerSettings,
    check: bool,
) -> anyhow::Result<()> {
    let path = match file {
        Some(path) => path,
        None => fabricflow_config::find_task_file()?,
    };
    let task_file = fabricflow_config::load_task_file(&path)?;
    eprintln!(
        "📄 タスクファイル: {} ({}件)",
        path.display().to_string().cyan(),
        task_file.tasks.len()
    );

    // 全タスクを先に検証してから接続する
    for task in &task_file.tasks {
        task.resolve()?;
    }

    if task_file.tasks.is_empty() {
        eprintln!("{}", "適用するタスクがありません".yellow());
        output::print_json(&Vec::<()>::new())?;
        return Ok(());
    }

    let config = settings.or(task_file.controller).into_config();
    let client = super::connect(&config).await?;

    if check {
        eprintln!("{}", "checkモード: 変更は適用されません".yellow());
    }

    let report = Reconciler::new(&client)
        .check_mode(check)
        .run_all(&task_file.tasks)
        .await?;

    for (task, result) in task_file.tasks.iter().zip(&report.results) {
        output::print_status(&task.label(), result);
    }

    let summary = report.summary();
    eprintln!();
    match &report.failure {
        Some((index, error)) => {
            output::print_failure(&task_file.tasks[*index].label(), error);
            eprintln!(
                "{} {}件目で中断しました（適用済み: {}）",
                "✗".red().bold(),
                index + 1,
                summary
            );
        }
        None if summary.has_changes() => eprintln!("{} {}", "✓".green().bold(), summary),
        None => eprintln!("{} {}", "✓".green().bold(), "変更はありません".green()),
    }

    // 中断した場合も、適用済みのタスクのレポートは出力する
    output::print_json(&report.results)?;

    if let Some((index, error)) = report.failure {
        let label = task_file.tasks[index].label();
        return Err(
            anyhow::Error::new(error).context(format!("タスク '{label}' の適用に失敗しました"))
        );
    }
    Ok(())
}
