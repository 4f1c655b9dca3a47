use chrono::{Duration, Local, NaiveDate};
use rusqlite::{params, Connection};
use std::error::Error;
use std::fs;
use std::path::Path;

use production_tracker::app::get_default_db_path;
use production_tracker::db::open_and_migrate;
use production_tracker::engine::completion_percentage;
use production_tracker::ProcessStep;

const DEFAULT_HISTORY_DAYS: i64 = 14;

// (项目, [(材料, 需求数量)])
const DEMO_PROJECTS: &[(&str, &[(&str, i64)])] = &[
    (
        "Warehouse A",
        &[("Column C200", 120), ("Purlin Z150", 400), ("Base Plate", 240)],
    ),
    (
        "Bridge B",
        &[("Deck Panel", 60), ("Girder Web", 36), ("Stiffener", 500)],
    ),
    ("Canopy C", &[("Roof Sheet", 300), ("Gutter", 80)]),
];

fn main() -> Result<(), Box<dyn Error>> {
    let db_path = std::env::args().nth(1).unwrap_or_else(get_default_db_path);

    let history_days = std::env::args()
        .nth(2)
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(DEFAULT_HISTORY_DAYS)
        .max(1);

    backup_and_reset_db(&db_path)?;

    let conn = open_and_migrate(&db_path)?;
    seed_demo_scenario(&conn, Local::now().date_naive(), history_days)?;
    print_quick_counts(&conn)?;

    Ok(())
}

fn backup_and_reset_db(db_path: &str) -> Result<(), Box<dyn Error>> {
    let path = Path::new(db_path);
    if !path.exists() {
        return Ok(());
    }

    let ts = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let backup_path = format!("{}.bak.{}", db_path, ts);
    fs::copy(path, &backup_path)?;
    fs::remove_file(path)?;

    eprintln!("Backed up {} -> {}", db_path, backup_path);
    Ok(())
}

fn seed_demo_scenario(
    conn: &Connection,
    today: NaiveDate,
    history_days: i64,
) -> Result<(), Box<dyn Error>> {
    let tx = conn.unchecked_transaction()?;

    for (project, materials) in DEMO_PROJECTS {
        tx.execute(
            "INSERT INTO projects (project_name) VALUES (?1)",
            params![project],
        )?;
        for (material, required) in materials.iter() {
            tx.execute(
                "INSERT INTO materials (project_name, material_name, required_quantity) VALUES (?1, ?2, ?3)",
                params![project, material, required],
            )?;
        }
    }

    // 每天每个材料落在一个工序上，数量按序号确定性变化，重复执行结果一致
    let mut seq: usize = 0;
    for offset in (0..history_days).rev() {
        let entry_date = today - Duration::days(offset);
        for (project, materials) in DEMO_PROJECTS {
            for (material, required) in materials.iter() {
                seq += 1;
                let process = ProcessStep::ALL[seq % ProcessStep::ALL.len()];
                let produced = (*required / 10).max(1) * ((seq % 4) as i64 + 1);
                let pct = completion_percentage(produced, *required);

                tx.execute(
                    r#"
                    INSERT INTO entries (
                        entry_date, material_name, produced_quantity, required_quantity,
                        completion_percentage, process, project_name
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                    "#,
                    params![entry_date, material, produced, required, pct, process.label(), project],
                )?;
            }
        }
    }

    tx.commit()?;
    Ok(())
}

fn print_quick_counts(conn: &Connection) -> Result<(), Box<dyn Error>> {
    for table in ["projects", "materials", "entries"] {
        let count: i64 =
            conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
        eprintln!("{}: {}", table, count);
    }
    Ok(())
}
