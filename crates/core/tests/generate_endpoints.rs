//! End-to-end generation from a YAML schema tree and a YAML config.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use opengen_core::{ApiTree, Config, GenerateError, generate_endpoints, resolve_target};

const TREE: &str = r#"
paths:
  /pets:
    parameters:
      - name: tenant
        in: header
    get:
      operationId: listPets
      tags: [pets]
      parameters:
        - name: status
          in: query
          schema:
            type: string
            enum: [available, pending, sold]
        - name: limit
          in: query
          schema:
            type: integer
            format: int32
            default: 20
      responses:
        200:
          content:
            application/json:
              schema:
                type: array
                items:
                  key: Pet
        400:
          content:
            application/json:
              schema:
                key: Problem
  /pets/{petId}:
    get:
      operationId: showPetById
      tags: [pets]
      parameters:
        - name: petId
          in: path
          required: true
          schema:
            type: string
            format: uuid
      responses:
        200:
          content:
            application/json:
              schema:
                key: Pet
    delete:
      operationId: deletePet
      tags: [admin]
      parameters:
        - name: petId
          in: path
          schema:
            type: string
            format: uuid
      responses:
        204:
          description: deleted
  /store/orders:
    post:
      summary: Place order
      tags: [store]
      requestBody:
        content:
          application/json:
            schema:
              type: object
              properties:
                quantity:
                  type: integer
      responses:
        200:
          content:
            application/json:
              schema:
                type: object
                additionalProperties:
                  type: string
"#;

const CONFIG: &str = r#"
useGroups: true
include: [pets, store]
renames:
  Pet: Animal
types:
  string:
    uuid: "uuid::Uuid"
"#;

#[test]
fn generates_rust_endpoints_from_yaml() {
    let config = Config::from_yaml_str(CONFIG).unwrap();
    let target = resolve_target("rust", config.clone()).unwrap();
    let tree = ApiTree::from_yaml(TREE).unwrap();

    let groups = generate_endpoints(&tree, target.as_ref(), &config).unwrap();
    let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Pets", "Store"]);

    let pets = &groups[0].endpoints;
    assert_eq!(pets.len(), 2);

    assert_eq!(pets[0].operation_id, "list_pets");
    assert_eq!(pets[0].return_type, "Vec<Animal>");
    assert_eq!(pets[0].url, "/pets");
    assert_eq!(
        pets[0].operation_params,
        vec!["status: Option<Status>", "limit: Option<i32>"]
    );

    assert_eq!(pets[1].operation_id, "show_pet_by_id");
    assert_eq!(pets[1].return_type, "Animal");
    assert_eq!(pets[1].http_method, "GET");
    assert_eq!(pets[1].url, "/pets/{pet_id}");
    assert_eq!(pets[1].operation_params, vec!["pet_id: uuid::Uuid"]);

    let order = &groups[1].endpoints[0];
    assert_eq!(order.operation_id, "place_order");
    assert_eq!(order.http_method, "POST");
    assert_eq!(order.return_type, "HashMap<String, String>");
    assert_eq!(order.operation_params, vec!["body: Option<PlaceOrderBody>"]);

    let body = order.request_params.body.as_ref().unwrap();
    assert_eq!(body.content_type.as_deref(), Some("application/json"));
    assert!(!body.required);
}

#[test]
fn serializes_groups_as_json() {
    let config = Config::from_yaml_str("useGroups: true").unwrap();
    let target = resolve_target("swift", config.clone()).unwrap();
    let tree = ApiTree::from_yaml(TREE).unwrap();
    let groups = generate_endpoints(&tree, target.as_ref(), &config).unwrap();

    let json = serde_json::to_value(&groups).unwrap();
    let admin = json
        .as_array()
        .unwrap()
        .iter()
        .find(|g| g["name"] == "Admin")
        .unwrap();
    let endpoint = &admin["endpoints"][0];
    assert_eq!(endpoint["operationId"], "deletePet");
    assert_eq!(endpoint["url"], "/pets/\\(petId)");
    assert_eq!(endpoint["returnType"], "Void");
    assert_eq!(endpoint["requestParams"]["path"][0]["type"], "UUID");
    assert_eq!(endpoint["requestParams"]["path"][0]["required"], true);
}

#[test]
fn first_failing_operation_aborts_the_pass() {
    let tree = ApiTree::from_yaml(
        r#"
paths:
  /ok:
    get:
      operationId: ok
      responses: {}
  /broken:
    get:
      responses: {}
"#,
    )
    .unwrap();
    let config = Config::default();
    let target = resolve_target("kotlin", config.clone()).unwrap();

    let err = generate_endpoints(&tree, target.as_ref(), &config).unwrap_err();
    assert!(matches!(err, GenerateError::MissingIdentity { .. }));
}
