// ==========================================
// 车间生产跟踪系统 - 命令行主入口
// ==========================================
// 输出约定: 结果 JSON 写 stdout，错误 JSON 写 stderr，日志写 stderr
// ==========================================

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use production_tracker::app::{commands, get_default_db_path, AppState, DB_PATH_ENV};
use production_tracker::{i18n, logging};

#[derive(Parser)]
#[command(name = "production-tracker")]
#[command(version, about = "车间生产录入与周完成率报表")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
struct GlobalOpts {
    /// SQLite 数据库文件路径
    #[arg(long, global = true, env = DB_PATH_ENV)]
    db: Option<String>,

    /// 覆盖界面语言 (zh-CN / en)
    #[arg(long, global = true)]
    locale: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// 项目管理
    #[command(subcommand)]
    Project(ProjectCommands),

    /// 材料管理
    #[command(subcommand)]
    Material(MaterialCommands),

    /// 生产录入
    #[command(subcommand)]
    Entry(EntryCommands),

    /// 周报
    #[command(subcommand)]
    Report(ReportCommands),

    /// 系统配置
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// 新增项目
    Add { name: String },
    /// 列出全部项目
    List,
    /// 删除项目及其材料（生产录入保留）
    Delete { name: String },
}

#[derive(Subcommand)]
enum MaterialCommands {
    /// 向项目新增材料
    Add {
        project: String,
        material: String,
        /// 需求数量
        required_quantity: i64,
    },
    /// 列出材料（不指定项目时列出全部）
    List {
        #[arg(long)]
        project: Option<String>,
    },
    /// 删除材料
    Delete { project: String, material: String },
}

#[derive(Subcommand)]
enum EntryCommands {
    /// 录入生产数据（日期取系统当天）
    Record {
        #[arg(long)]
        project: String,
        #[arg(long)]
        material: String,
        /// 生产数量
        #[arg(long)]
        quantity: i64,
        /// 工序标签，例如 "Press-brake"
        #[arg(long)]
        process: String,
    },
    /// 列出全部录入
    List,
    /// 按 ID 删除录入
    Delete { id: i64 },
    /// 清空全部录入
    Reset {
        /// 确认清空
        #[arg(long)]
        yes: bool,
    },
    /// 录入表单选项
    Form {
        #[arg(long)]
        project: Option<String>,
    },
}

#[derive(Subcommand)]
enum ReportCommands {
    /// 输出周报 JSON
    Show {
        /// 报表截止日期 (YYYY-MM-DD)，默认今天
        #[arg(long)]
        today: Option<String>,
    },
    /// 导出周报 xlsx
    Export {
        #[arg(long, default_value = ".")]
        out_dir: String,
        #[arg(long)]
        today: Option<String>,
    },
    /// 导出单个视图的 CSV (detail / process)
    Csv {
        #[arg(long, default_value = "detail")]
        view: String,
        #[arg(long, default_value = ".")]
        out_dir: String,
        #[arg(long)]
        today: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// 列出已设置的配置
    List,
    /// 查询配置生效值
    Get { key: String },
    /// 更新配置
    Set { key: String, value: String },
}

fn main() -> ExitCode {
    logging::init();

    let cli = Cli::parse();
    let db_path = cli.global.db.clone().unwrap_or_else(get_default_db_path);
    tracing::debug!("使用数据库: {}", db_path);

    let state = match AppState::new(db_path) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(locale) = cli.global.locale.as_deref() {
        i18n::set_locale(locale);
    }

    match run(&state, cli.command) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(state: &AppState, command: Commands) -> Result<String, String> {
    match command {
        Commands::Project(cmd) => match cmd {
            ProjectCommands::Add { name } => commands::add_project(state, &name),
            ProjectCommands::List => commands::list_projects(state),
            ProjectCommands::Delete { name } => commands::delete_project(state, &name),
        },
        Commands::Material(cmd) => match cmd {
            MaterialCommands::Add {
                project,
                material,
                required_quantity,
            } => commands::add_material(state, &project, &material, required_quantity),
            MaterialCommands::List { project } => {
                commands::list_materials(state, project.as_deref())
            }
            MaterialCommands::Delete { project, material } => {
                commands::delete_material(state, &project, &material)
            }
        },
        Commands::Entry(cmd) => match cmd {
            EntryCommands::Record {
                project,
                material,
                quantity,
                process,
            } => commands::record_entry(state, &project, &material, quantity, &process, None),
            EntryCommands::List => commands::list_entries(state),
            EntryCommands::Delete { id } => commands::delete_entry(state, id),
            EntryCommands::Reset { yes } => {
                if !yes {
                    return Err("清空全部录入需要加 --yes 确认".to_string());
                }
                commands::reset_entries(state)
            }
            EntryCommands::Form { project } => {
                commands::get_entry_form_options(state, project.as_deref())
            }
        },
        Commands::Report(cmd) => match cmd {
            ReportCommands::Show { today } => commands::get_weekly_report(state, today.as_deref()),
            ReportCommands::Export { out_dir, today } => {
                commands::export_weekly_report(state, &out_dir, today.as_deref())
            }
            ReportCommands::Csv {
                view,
                out_dir,
                today,
            } => commands::export_report_csv(state, &view, &out_dir, today.as_deref()),
        },
        Commands::Config(cmd) => match cmd {
            ConfigCommands::List => commands::list_configs(state),
            ConfigCommands::Get { key } => commands::get_config(state, &key),
            ConfigCommands::Set { key, value } => commands::update_config(state, &key, &value),
        },
    }
}
