// ==========================================
// 命令层集成测试
// ==========================================
// 测试范围:
// 1. 成功响应: JSON 结构 { message, data }
// 2. 错误响应: ErrorResponse 稳定错误代码
// 3. 导出写盘、配置校验
// ==========================================


use production_tracker::app::commands::{self, ErrorResponse};
use serde_json::Value;
use test_helpers::*;

fn error_code(err: &str) -> String {
    let resp: ErrorResponse = serde_json::from_str(err).expect("错误应为 ErrorResponse JSON");
    resp.code
}

#[test]
fn test_record_entry_command_flow() {
    let (_tmp, state) = create_test_state().unwrap();

    commands::add_project(&state, "P1").unwrap();
    commands::add_material(&state, "P1", "M1", 100).unwrap();

    let out = commands::record_entry(&state, "P1", "M1", 50, "Press-brake", Some("2024-03-08"))
        .unwrap();
    let json: Value = serde_json::from_str(&out).unwrap();
    assert!(json["message"].as_str().unwrap().contains("M1"));
    assert_eq!(json["data"]["entry_date"], "2024-03-08");
    assert_eq!(json["data"]["process"], "Press-brake");
    assert_eq!(json["data"]["required_quantity"], 100);
    assert_eq!(json["data"]["completion_percentage"], 50.0);

    let out = commands::get_weekly_report(&state, Some("2024-03-08")).unwrap();
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["window"]["start"], "2024-03-01");
    assert_eq!(json["detail"][0]["material_name"], "M1");
    assert_eq!(json["by_process"][0]["completion_percentage"], 50.0);
}

#[test]
fn test_record_entry_command_errors() {
    let (_tmp, state) = create_test_state().unwrap();

    // 无参考数据
    let err = commands::record_entry(&state, "P1", "M1", 1, "Painting", None).unwrap_err();
    assert_eq!(error_code(&err), "MISSING_REFERENCE_DATA");

    commands::add_project(&state, "P1").unwrap();
    let err = commands::record_entry(&state, "P1", "M1", 1, "Painting", None).unwrap_err();
    assert_eq!(error_code(&err), "MISSING_REFERENCE_DATA");

    commands::add_material(&state, "P1", "M1", 10).unwrap();

    // 工序标签必须完全一致
    let err = commands::record_entry(&state, "P1", "M1", 1, "painting", None).unwrap_err();
    assert_eq!(error_code(&err), "INVALID_INPUT");

    let err = commands::record_entry(&state, "P1", "M1", -1, "Painting", None).unwrap_err();
    assert_eq!(error_code(&err), "INVALID_INPUT");

    let err =
        commands::record_entry(&state, "P1", "M1", 1, "Painting", Some("2024/03/08")).unwrap_err();
    assert_eq!(error_code(&err), "INVALID_INPUT");

    let out = commands::list_entries(&state).unwrap();
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 0);
}

#[test]
fn test_maintenance_command_errors() {
    let (_tmp, state) = create_test_state().unwrap();

    commands::add_project(&state, "P1").unwrap();
    let err = commands::add_project(&state, "P1").unwrap_err();
    assert_eq!(error_code(&err), "ALREADY_EXISTS");

    let err = commands::delete_entry(&state, 42).unwrap_err();
    assert_eq!(error_code(&err), "NOT_FOUND");

    let err = commands::delete_project(&state, "Nope").unwrap_err();
    assert_eq!(error_code(&err), "NOT_FOUND");

    let out = commands::delete_project(&state, "P1").unwrap();
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["data"]["materials_deleted"], 0);

    let out = commands::reset_entries(&state).unwrap();
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["data"]["deleted"], 0);
}

#[test]
fn test_entry_form_options_command() {
    let (_tmp, state) = create_test_state().unwrap();

    let out = commands::get_entry_form_options(&state, None).unwrap();
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["form_enabled"], false);
    assert!(json["warning"].is_string());
    assert_eq!(json["processes"].as_array().unwrap().len(), 10);

    commands::add_project(&state, "P1").unwrap();
    commands::add_material(&state, "P1", "M1", 10).unwrap();

    let out = commands::get_entry_form_options(&state, Some("P1")).unwrap();
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["form_enabled"], true);
    assert!(json["warning"].is_null());
    assert_eq!(json["materials"][0]["material_name"], "M1");
}

#[test]
fn test_export_commands_write_files() {
    let (_tmp, state) = create_test_state().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let out_dir_str = out_dir.path().to_str().unwrap();

    commands::add_project(&state, "P1").unwrap();
    commands::add_material(&state, "P1", "M1", 100).unwrap();
    commands::record_entry(&state, "P1", "M1", 50, "Guillotine", Some("2024-03-08")).unwrap();

    let out = commands::export_weekly_report(&state, out_dir_str, Some("2024-03-08")).unwrap();
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["data"]["file_name"], "weekly_production_report.xlsx");
    assert_eq!(
        json["data"]["mime_type"],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    let path = out_dir.path().join("weekly_production_report.xlsx");
    let size = std::fs::metadata(&path).unwrap().len();
    assert!(size > 0);
    assert_eq!(json["data"]["size_bytes"], size);

    let out = commands::export_report_csv(&state, "detail", out_dir_str, Some("2024-03-08"))
        .unwrap();
    let json: Value = serde_json::from_str(&out).unwrap();
    let csv_path = out_dir.path().join("weekly_production_report_detail.csv");
    assert_eq!(json["data"]["path"], csv_path.to_str().unwrap());
    let content = std::fs::read_to_string(csv_path).unwrap();
    assert!(content.starts_with("Project,Process,Material"));
    assert!(content.contains("P1,Guillotine,M1,100,50,50"));

    let err = commands::export_report_csv(&state, "weekly", out_dir_str, None).unwrap_err();
    assert_eq!(error_code(&err), "INVALID_INPUT");
}

#[test]
fn test_config_commands() {
    let (_tmp, state) = create_test_state().unwrap();

    let out = commands::get_config(&state, "report_window_days").unwrap();
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["value"], "7");

    commands::update_config(&state, "report_window_days", "14").unwrap();
    let out = commands::get_config(&state, "report_window_days").unwrap();
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["value"], "14");

    let err = commands::update_config(&state, "report_window_days", "-1").unwrap_err();
    assert_eq!(error_code(&err), "VALIDATION_ERROR");

    let err = commands::update_config(&state, "export_file_name", "../x.xlsx").unwrap_err();
    assert_eq!(error_code(&err), "VALIDATION_ERROR");

    let err = commands::update_config(&state, "locale", "fr").unwrap_err();
    assert_eq!(error_code(&err), "VALIDATION_ERROR");

    let err = commands::get_config(&state, "unknown").unwrap_err();
    assert_eq!(error_code(&err), "INVALID_INPUT");

    let out = commands::list_configs(&state).unwrap();
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["report_window_days"], "14");
}

#[test]
fn test_window_days_upper_bound() {
    let (_tmp, state) = create_test_state().unwrap();

    commands::add_project(&state, "P1").unwrap();
    commands::add_material(&state, "P1", "M1", 10).unwrap();
    commands::record_entry(&state, "P1", "M1", 5, "Painting", Some("2024-03-08")).unwrap();

    // 超大窗口在写入前被拒绝，原值保持不变
    let err = commands::update_config(&state, "report_window_days", "4294967295").unwrap_err();
    assert_eq!(error_code(&err), "VALIDATION_ERROR");
    let err = commands::update_config(&state, "report_window_days", "3651").unwrap_err();
    assert_eq!(error_code(&err), "VALIDATION_ERROR");
    let out = commands::get_config(&state, "report_window_days").unwrap();
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["value"], "7");

    commands::update_config(&state, "report_window_days", "3650").unwrap();
    let out = commands::get_weekly_report(&state, Some("2024-03-08")).unwrap();
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["window"]["start"], "2014-03-11");
    assert_eq!(json["detail"][0]["produced_quantity"], 5);

    // 绕过命令层直接写入的越界值: 读取时回退默认窗口，报表照常生成
    state
        .config_manager
        .set_config_value("report_window_days", "4294967295")
        .unwrap();
    let out = commands::get_weekly_report(&state, Some("2024-03-08")).unwrap();
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["window"]["start"], "2024-03-01");

    let out_dir = tempfile::tempdir().unwrap();
    commands::export_weekly_report(&state, out_dir.path().to_str().unwrap(), Some("2024-03-08"))
        .unwrap();
}
