// ==========================================
// ProjectApi 集成测试
// ==========================================
// 测试范围:
// 1. 项目/材料增删查与唯一性
// 2. 删除项目: 级联删除材料，保留生产录入
// 3. 录入表单选项与参考数据检查
// ==========================================


use production_tracker::api::ApiError;
use production_tracker::ProcessStep;
use test_helpers::*;

// ==========================================
// 项目
// ==========================================

#[test]
fn test_add_and_list_projects() {
    let (_tmp, state) = create_test_state().unwrap();

    let p = state.project_api.add_project("  Bridge B ").unwrap();
    assert_eq!(p.project_name, "Bridge B");
    state.project_api.add_project("Alpha").unwrap();

    let names: Vec<String> = state
        .project_api
        .list_projects()
        .unwrap()
        .into_iter()
        .map(|p| p.project_name)
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Bridge B".to_string()));
    assert!(names.contains(&"Alpha".to_string()));
}

#[test]
fn test_add_duplicate_project_already_exists() {
    let (_tmp, state) = create_test_state().unwrap();
    state.project_api.add_project("P1").unwrap();

    let result = state.project_api.add_project("P1");
    assert!(matches!(result, Err(ApiError::AlreadyExists(_))));
    assert_eq!(state.project_api.list_projects().unwrap().len(), 1);
}

#[test]
fn test_add_blank_project_rejected() {
    let (_tmp, state) = create_test_state().unwrap();

    let result = state.project_api.add_project("   ");
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    assert!(state.project_api.list_projects().unwrap().is_empty());
}

#[test]
fn test_delete_project_cascades_materials_not_entries() {
    let (_tmp, state) = create_test_state().unwrap();
    seed_project(&state, "P1", &[("M1", 100), ("M2", 10)]);
    seed_project(&state, "P2", &[("M1", 5)]);
    record(&state, "P1", "M1", 50, ProcessStep::Guillotine, date(2024, 3, 8));

    let materials_deleted = state.project_api.delete_project("P1").unwrap();
    assert_eq!(materials_deleted, 2);

    let projects = state.project_api.list_projects().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].project_name, "P2");
    assert!(state.project_api.list_materials("P1").unwrap().is_empty());
    assert_eq!(state.project_api.list_materials("P2").unwrap().len(), 1);

    // 历史录入保留原项目名
    let entries = state.entry_api.list_entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].project_name, "P1");
}

#[test]
fn test_delete_missing_project_not_found() {
    let (_tmp, state) = create_test_state().unwrap();

    let result = state.project_api.delete_project("Nope");
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

// ==========================================
// 材料
// ==========================================

#[test]
fn test_add_material_validation() {
    let (_tmp, state) = create_test_state().unwrap();
    state.project_api.add_project("P1").unwrap();

    assert!(matches!(
        state.project_api.add_material("Nope", "M1", 10),
        Err(ApiError::NotFound(_))
    ));
    assert!(matches!(
        state.project_api.add_material("P1", " ", 10),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(matches!(
        state.project_api.add_material("P1", "M1", -1),
        Err(ApiError::InvalidInput(_))
    ));

    let m = state.project_api.add_material("P1", "M1", 0).unwrap();
    assert_eq!(m.required_quantity, 0);

    assert!(matches!(
        state.project_api.add_material("P1", "M1", 20),
        Err(ApiError::AlreadyExists(_))
    ));
}

#[test]
fn test_same_material_name_in_different_projects() {
    let (_tmp, state) = create_test_state().unwrap();
    seed_project(&state, "P1", &[("Plate", 10)]);
    seed_project(&state, "P2", &[("Plate", 20)]);

    let all = state.project_api.list_all_materials().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(state.project_api.list_materials("P2").unwrap()[0].required_quantity, 20);
}

#[test]
fn test_delete_material() {
    let (_tmp, state) = create_test_state().unwrap();
    seed_project(&state, "P1", &[("M1", 10), ("M2", 20)]);

    state.project_api.delete_material("P1", "M1").unwrap();
    let remaining = state.project_api.list_materials("P1").unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].material_name, "M2");

    assert!(matches!(
        state.project_api.delete_material("P1", "M1"),
        Err(ApiError::NotFound(_))
    ));
}

// ==========================================
// 录入表单选项
// ==========================================

#[test]
fn test_form_options_without_projects() {
    let (_tmp, state) = create_test_state().unwrap();

    let options = state.project_api.entry_form_options(None).unwrap();
    assert!(options.projects.is_empty());
    assert!(options.selected_project.is_none());
    assert!(!options.form_enabled);
    assert!(options.warning.is_some());
    assert_eq!(options.processes.len(), 10);

    assert!(matches!(
        state.project_api.ensure_reference_data("P1"),
        Err(ApiError::MissingReferenceData(_))
    ));
}

#[test]
fn test_form_options_project_without_materials() {
    let (_tmp, state) = create_test_state().unwrap();
    state.project_api.add_project("Empty").unwrap();

    let options = state.project_api.entry_form_options(Some("Empty")).unwrap();
    assert_eq!(options.selected_project.as_deref(), Some("Empty"));
    assert!(options.materials.is_empty());
    assert!(!options.form_enabled);
    let warning = options.warning.unwrap();
    assert!(warning.contains("Empty"));

    assert!(matches!(
        state.project_api.ensure_reference_data("Empty"),
        Err(ApiError::MissingReferenceData(_))
    ));
}

#[test]
fn test_form_options_with_materials() {
    let (_tmp, state) = create_test_state().unwrap();
    seed_project(&state, "P1", &[("M1", 100), ("M2", 5)]);
    seed_project(&state, "P2", &[("X", 1)]);

    let options = state.project_api.entry_form_options(Some("P2")).unwrap();
    assert!(options.form_enabled);
    assert!(options.warning.is_none());
    assert_eq!(options.selected_project.as_deref(), Some("P2"));
    assert_eq!(options.materials.len(), 1);
    assert_eq!(options.materials[0].material_name, "X");
    assert_eq!(options.processes[0], "Guillotine");
    assert_eq!(options.processes[9], "Shipping");

    // 未知项目回退到第一个项目
    let options = state.project_api.entry_form_options(Some("Nope")).unwrap();
    assert!(options.selected_project.is_some());
    assert!(matches!(
        state.project_api.ensure_reference_data("Nope"),
        Err(ApiError::NotFound(_))
    ));

    state.project_api.ensure_reference_data("P1").unwrap();
}
