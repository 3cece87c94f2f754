use apigen_core::transform::name_normalizer::{normalize_name, sanitize_param_name, to_function_name};

#[test]
fn test_camel_case_input() {
    let n = normalize_name("createPlayer");
    assert_eq!(n.original, "createPlayer");
    assert_eq!(n.pascal_case, "CreatePlayer");
    assert_eq!(to_function_name(&n.original), "createPlayer");
}

#[test]
fn test_pascal_case_input() {
    let n = normalize_name("PlayerStats");
    assert_eq!(n.pascal_case, "PlayerStats");
    assert_eq!(to_function_name(&n.original), "playerStats");
}

#[test]
fn test_snake_case_input() {
    let n = normalize_name("player_stats");
    assert_eq!(n.pascal_case, "PlayerStats");
    assert_eq!(to_function_name(&n.original), "playerStats");
}

#[test]
fn test_kebab_case_input() {
    let n = normalize_name("pet-store-api");
    assert_eq!(n.pascal_case, "PetStoreApi");
    assert_eq!(to_function_name(&n.original), "petStoreApi");
}

#[test]
fn test_route_input() {
    let n = normalize_name("delete_/teams/{teamId}/roster");
    assert_eq!(n.pascal_case, "DeleteTeamsTeamIdRoster");
    assert_eq!(to_function_name(&n.original), "deleteTeamsTeamIdRoster");
}

#[test]
fn test_display_is_original() {
    assert_eq!(normalize_name("player_stats").to_string(), "player_stats");
}

#[test]
fn test_query_style_param_names() {
    assert_eq!(sanitize_param_name("sort[by]"), "sortBy");
    assert_eq!(sanitize_param_name("page_size"), "pageSize");
    assert_eq!(sanitize_param_name("class"), "_class");
}
