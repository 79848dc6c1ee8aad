use colored::Colorize;
use std::path::PathBuf;

pub fn handle(file: Option<PathBuf>) -> anyhow::Result<()> {
    println!("{}", "タスクファイルを検証中...".blue());

    let path = match file {
        Some(path) => path,
        None => fabricflow_config::find_task_file()?,
    };
    println!("タスクファイル: {}", path.display().to_string().cyan());

    let task_file = fabricflow_config::load_task_file(&path)?;

    let mut failed = 0;
    for task in &task_file.tasks {
        match task.resolve() {
            Ok(target) => {
                println!(
                    "  {} {} [{}] → {}",
                    "✓".green(),
                    task.label().cyan(),
                    task.state,
                    target.path
                );
            }
            Err(e) => {
                failed += 1;
                println!("  {} {} [{}]: {}", "✗".red(), task.label(), task.state, e);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{}件のタスクにエラーがあります", failed);
    }

    println!();
    println!("{}", "✓ タスクファイルは正常です！".green().bold());
    if let Some(host) = task_file.controller.host.as_deref() {
        println!("  コントローラ: {}", host.cyan());
    }
    println!("  タスク: {}件", task_file.tasks.len());
    Ok(())
}
