use anyhow::Context;
use clap::Parser;
use futian_common::extract_person_info;
use futian_filler::{cli, config, error, interactive, io, preview, session, store};
use cli::{Cli, Commands};
use config::Config;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::New { path, force } => {
            let path = io::new_file_path(path, &config.new_file_name);
            store::create_workbook_file(&path, force)
                .with_context(|| format!("新建失败: {}", path.display()))?;
            println!("✔ 新文件创建成功: {}", path.display());
            println!("  表头已按指定格式生成");
        }

        Commands::Extract { input, compact } => {
            let text = io::read_input_text(input.as_deref())?;
            let info = extract_person_info(&text);
            println!("{}", info.to_json(!compact)?);
        }

        Commands::Append { input, workbook, output, create } => {
            let path = config.require_workbook(workbook)?;
            let text = io::read_input_text(input.as_deref())?;
            if text.trim().is_empty() {
                return Err(error::FillerError::EmptyInput.into());
            }

            if create && !path.exists() {
                store::create_workbook_file(&path, false)?;
                println!("✔ 已用模板新建: {}", path.display());
            }

            let info = store::append_text_to_file(&path, &text, output.as_deref())
                .with_context(|| format!("追加失败: {}", path.display()))?;
            let saved = output.as_deref().unwrap_or(&path);
            println!("✔ 已添加：{}", info.display_name());
            println!("  保存到: {}", saved.display());
        }

        Commands::Preview { workbook, rows } => {
            let path = config.require_workbook(workbook)?;
            let workbook = store::load_workbook(&path)?;
            let rows = rows.unwrap_or(config.preview_rows);
            print!("{}", preview::Preview::from_workbook(&workbook, rows));
        }

        Commands::Interactive { workbook } => {
            let mut session = session::Session::new(&config);
            if let Some(path) = config.resolve_workbook(workbook) {
                if path.exists() {
                    session.open_path(&path)?;
                } else {
                    store::create_workbook_file(&path, false)?;
                    println!("✔ 文件不存在，已用模板新建: {}", path.display());
                    session.open_path(&path)?;
                }
            }
            interactive::run_interactive(&mut session, &config)?;
        }

        Commands::Config { set_default_workbook, set_preview_rows, show } => {
            let mut config = config;
            let changed = set_default_workbook.is_some() || set_preview_rows.is_some();

            if let Some(path) = set_default_workbook {
                config.default_workbook = Some(path);
            }
            if let Some(rows) = set_preview_rows {
                config.preview_rows = rows;
            }
            if changed {
                config.save()?;
                println!("✔ 配置已保存");
            }

            if show || !changed {
                println!("配置:");
                println!(
                    "  默认文件: {}",
                    config
                        .default_workbook
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "未设置".into())
                );
                println!("  新建文件名: {}", config.new_file_name);
                println!("  预览条数: {}", config.preview_rows);
                println!("  历史上限: {}", config.history_limit);
            }
        }
    }

    Ok(())
}
