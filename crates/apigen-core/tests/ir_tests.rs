use apigen_core::ir::{IrParameterLocation, IrSchema, TypeExpr};
use apigen_core::parse;
use apigen_core::transform;
use apigen_core::transform::usage::expand_transitive;

const PLAYERS: &str = include_str!("fixtures/players-swagger2.json");
const PETSTORE: &str = include_str!("fixtures/petstore-openapi3.yaml");

fn kind(schema: &IrSchema) -> &'static str {
    match schema {
        IrSchema::Interface(_) => "interface",
        IrSchema::Open(_) => "open",
    }
}

#[test]
fn transform_swagger2_schemas() {
    let doc = parse::from_json(PLAYERS).unwrap();
    let ir = transform::transform(&doc, "players.json");

    assert_eq!(ir.info.title, "Players API");
    assert_eq!(ir.info.version, "1.4.0");
    assert_eq!(ir.source, "players.json");

    let declared: Vec<(&str, &str)> = ir
        .schemas
        .iter()
        .map(|s| (s.name().pascal_case.as_str(), kind(s)))
        .collect();
    assert_eq!(
        declared,
        vec![
            ("Player", "interface"),
            ("NewPlayer", "open"),
            ("PlayerStats", "interface"),
            ("Team", "interface"),
            ("Coach", "open"),
            ("Position", "open"),
        ]
    );

    let IrSchema::Interface(ref player) = ir.schemas[0] else {
        panic!("Player should be an interface");
    };
    assert_eq!(player.description.as_deref(), Some("A registered player"));
    let fields: Vec<(&str, bool)> = player
        .fields
        .iter()
        .map(|f| (f.name.as_str(), f.required))
        .collect();
    assert_eq!(fields, vec![("id", true), ("name", false), ("stats", false)]);
    assert_eq!(player.fields[2].field_type, TypeExpr::Ref("PlayerStats".into()));
}

#[test]
fn transform_swagger2_operations() {
    let doc = parse::from_json(PLAYERS).unwrap();
    let ir = transform::transform(&doc, "players.json");

    let names: Vec<&str> = ir.operations.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "listPlayers",
            "createPlayer",
            "getPlayersId",
            "deletePlayer",
            "updateRoster"
        ]
    );

    let list = &ir.operations[0];
    assert_eq!(list.summary.as_deref(), Some("List players"));
    let params: Vec<(&str, &str, bool)> = list
        .parameters
        .iter()
        .map(|p| (p.name.as_str(), p.original_name.as_str(), p.is_array))
        .collect();
    assert_eq!(
        params,
        vec![
            ("limit", "limit", false),
            ("position", "position", false),
            ("tags", "tags[]", true)
        ]
    );
    assert_eq!(
        list.return_type,
        TypeExpr::Array(Box::new(TypeExpr::Ref("Player".into())))
    );

    let create = &ir.operations[1];
    assert_eq!(
        create.request_body.as_ref().unwrap().body_type,
        TypeExpr::Ref("NewPlayer".into())
    );
    assert_eq!(create.return_type, TypeExpr::Ref("Player".into()));

    // Path-item level `id` reaches both operations on the path.
    for op in &ir.operations[2..4] {
        assert_eq!(op.parameters.len(), 1);
        assert_eq!(op.parameters[0].location, IrParameterLocation::Path);
        assert_eq!(op.parameters[0].param_type, TypeExpr::String);
    }
    assert_eq!(ir.operations[3].return_type, TypeExpr::Any);

    let roster = &ir.operations[4];
    assert_eq!(roster.parameters[0].param_type, TypeExpr::Number);
    assert_eq!(
        roster.request_body.as_ref().unwrap().body_type,
        TypeExpr::Array(Box::new(TypeExpr::Ref("Player".into())))
    );
}

#[test]
fn swagger2_used_types() {
    let doc = parse::from_json(PLAYERS).unwrap();
    let ir = transform::transform(&doc, "players.json");

    let used: Vec<&str> = ir.used_types.iter().collect();
    assert_eq!(used, vec!["Player", "NewPlayer", "Team"]);
    let (valid, skipped) = ir.used_types.partition(&ir.definitions);
    assert_eq!(valid.len(), 3);
    assert!(skipped.is_empty());

    let mut reachable: Vec<&str> = Vec::new();
    let closure = expand_transitive(&ir.used_types, &ir.definitions);
    reachable.extend(closure.iter());
    reachable.sort();
    assert_eq!(
        reachable,
        vec!["Coach", "NewPlayer", "Player", "PlayerStats", "Team"]
    );
}

#[test]
fn transform_openapi3() {
    let doc = parse::from_yaml(PETSTORE).unwrap();
    let ir = transform::transform(&doc, "petstore.yaml");

    let declared: Vec<&str> = ir.schemas.iter().map(kind).collect();
    assert_eq!(
        declared,
        vec!["interface", "open", "open", "interface", "interface", "open"]
    );

    let list = &ir.operations[0];
    let params: Vec<(&str, bool)> = list
        .parameters
        .iter()
        .map(|p| (p.name.as_str(), p.required))
        .collect();
    // Header parameters never reach the signature.
    assert_eq!(params, vec![("page", false), ("kind", true)]);
    assert_eq!(list.return_type, TypeExpr::Ref("PetPage".into()));

    let create = &ir.operations[1];
    assert!(matches!(
        create.request_body.as_ref().unwrap().body_type,
        TypeExpr::Object(_)
    ));

    let get = &ir.operations[2];
    assert_eq!(get.parameters[0].param_type, TypeExpr::Number);
    assert_eq!(
        get.return_type,
        TypeExpr::Union(vec![TypeExpr::Ref("Cat".into()), TypeExpr::Ref("Dog".into())])
    );

    // Non-JSON request bodies are ignored.
    let update = &ir.operations[3];
    assert!(update.request_body.is_none());
    assert_eq!(update.return_type, TypeExpr::Any);

    let used: Vec<&str> = ir.used_types.iter().collect();
    assert_eq!(used, vec!["PetPage", "Owner", "Pet", "Cat", "Dog"]);
}

#[test]
fn one_declaration_per_definition_and_one_function_per_operation() {
    for (doc, ops) in [
        (parse::from_json(PLAYERS).unwrap(), 5),
        (parse::from_yaml(PETSTORE).unwrap(), 4),
    ] {
        let ir = transform::transform(&doc, "");
        assert_eq!(ir.schemas.len(), doc.definitions().len());
        assert_eq!(ir.operations.len(), ops);
    }
}

#[test]
fn malformed_schema_nodes_degrade() {
    let doc = parse::from_yaml(
        r##"
swagger: "2.0"
definitions:
  Player:
    properties:
      id: {type: integer, required: true}
      scores: {type: array, items: [{type: integer}]}
      position: {type: string, enum: GK}
      kind: 42
  Broken: [1, 2, 3]
paths:
  /players:
    post:
      operationId: createPlayer
      parameters:
        - {name: body, in: body, schema: {$ref: "#/definitions/Player", required: yes}}
"##,
    )
    .expect("malformed schema nodes should not abort parsing");
    let ir = transform::transform(&doc, "players.yaml");

    let kinds: Vec<&str> = ir.schemas.iter().map(kind).collect();
    assert_eq!(kinds, vec!["interface", "open"]);

    let IrSchema::Interface(ref player) = ir.schemas[0] else {
        panic!("Player should be an interface");
    };
    let fields: Vec<(&str, &TypeExpr, bool)> = player
        .fields
        .iter()
        .map(|f| (f.name.as_str(), &f.field_type, f.required))
        .collect();
    assert_eq!(
        fields,
        vec![
            ("id", &TypeExpr::Number, false),
            ("scores", &TypeExpr::Array(Box::new(TypeExpr::Any)), false),
            ("position", &TypeExpr::String, false),
            ("kind", &TypeExpr::Any, false),
        ]
    );

    let create = &ir.operations[0];
    assert_eq!(
        create.request_body.as_ref().unwrap().body_type,
        TypeExpr::Ref("Player".into())
    );
}
