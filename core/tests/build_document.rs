use oas_build_core::{fields, materialize, AppError, Object, OpenApiSpec, Value};
use pretty_assertions::assert_eq;
use serde_json::json;

fn oas() -> OpenApiSpec {
    OpenApiSpec::new("3.0.3").unwrap()
}

fn info(oas: &OpenApiSpec) -> Object {
    oas.info(fields! { "title" => "title", "version" => "1.0" })
}

#[test]
fn test_basic_build() {
    let oas = oas();
    let foo = oas.keyed_schema(fields! { "type" => "string" }, "foo");
    let basic = oas.security_scheme(fields! { "type" => "http", "scheme" => "basic" }, "HTTPBasic");

    let inner = oas.schema(fields! {
        "type" => "string",
        "pattern" => oas.non_empty(Value::Null, Value::Null),
        "maxLength" => oas.non_empty(10, Value::Null),
    });
    let response = oas.response(fields! {
        "description" => "
            # TITLE

            ## DESCRIPTION
            ",
        "content" => fields! {
            "application/json" => oas.media_type(fields! {
                "schema" => oas.schema(fields! {
                    "type" => "object",
                    "properties" => fields! { "foo" => inner },
                }),
            }),
        },
    });
    let operation = oas.operation(fields! {
        "parameters" => vec![
            oas.parameter(fields! { "name" => "p1", "in" => "query", "schema" => &foo }),
            oas.parameter(fields! { "name" => "p2", "in" => "query", "schema" => &foo }),
        ],
        "security" => vec![oas.security_requirement(&basic)],
        "deprecated" => false,
        "responses" => fields! { "200" => response },
    });
    let root = oas.openapi(fields! {
        "info" => oas.info(fields! { "title" => "Test", "version" => "1.0.0" }),
        "paths" => fields! { "/" => oas.path_item(fields! { "get" => operation }) },
    });

    let doc = oas.build(&root).unwrap();
    assert_eq!(
        doc.into_value(),
        json!({
            "openapi": "3.0.3",
            "info": { "title": "Test", "version": "1.0.0" },
            "paths": {
                "/": {
                    "get": {
                        "parameters": [
                            { "in": "query", "name": "p1", "schema": { "$ref": "#/components/schemas/foo" } },
                            { "in": "query", "name": "p2", "schema": { "$ref": "#/components/schemas/foo" } }
                        ],
                        "security": [{ "HTTPBasic": [] }],
                        "responses": {
                            "200": {
                                "description": "# TITLE\n\n## DESCRIPTION",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "foo": { "type": "string", "maxLength": 10 }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": { "foo": { "type": "string" } },
                "securitySchemes": { "HTTPBasic": { "scheme": "basic", "type": "http" } }
            }
        })
    );
}

fn single_get(oas: &OpenApiSpec, parameters: Vec<Object>, response_schema: &Object) -> Object {
    oas.openapi(fields! {
        "info" => info(oas),
        "paths" => fields! {
            "/" => oas.path_item(fields! {
                "get" => oas.operation(fields! {
                    "parameters" => parameters,
                    "responses" => fields! {
                        "200" => oas.response(fields! {
                            "description" => "description",
                            "content" => fields! {
                                "application/json" => oas.media_type(fields! { "schema" => response_schema }),
                            },
                        }),
                    },
                }),
            }),
        },
    })
}

#[test]
fn test_nested_refs_both_shared() {
    let oas = oas();
    let foo = oas.keyed_schema(fields! { "type" => "string" }, "foo");
    let bar = oas.keyed_schema(fields! { "type" => "array", "items" => &foo }, "bar");

    let root = single_get(
        &oas,
        vec![
            oas.parameter(fields! { "name" => "a", "in" => "query", "schema" => &foo }),
            oas.parameter(fields! { "name" => "b", "in" => "query", "schema" => &bar }),
        ],
        &bar,
    );

    let doc = oas.build(&root).unwrap();
    assert_eq!(
        doc.into_value(),
        json!({
            "components": {
                "schemas": {
                    "bar": { "type": "array", "items": { "$ref": "#/components/schemas/foo" } },
                    "foo": { "type": "string" }
                }
            },
            "info": { "title": "title", "version": "1.0" },
            "openapi": "3.0.3",
            "paths": {
                "/": {
                    "get": {
                        "parameters": [
                            { "in": "query", "name": "a", "schema": { "$ref": "#/components/schemas/foo" } },
                            { "in": "query", "name": "b", "schema": { "$ref": "#/components/schemas/bar" } }
                        ],
                        "responses": {
                            "200": {
                                "content": {
                                    "application/json": { "schema": { "$ref": "#/components/schemas/bar" } }
                                },
                                "description": "description"
                            }
                        }
                    }
                }
            }
        })
    );
}

#[test]
fn test_nested_refs_inner_used_once() {
    let oas = oas();
    let foo = oas.keyed_schema(fields! { "type" => "string" }, "foo");
    let bar = oas.keyed_schema(fields! { "type" => "array", "items" => &foo }, "bar");

    let root = single_get(
        &oas,
        vec![oas.parameter(fields! { "name" => "a", "in" => "query", "schema" => &bar })],
        &bar,
    );

    let doc = oas.build(&root).unwrap();
    assert_eq!(
        doc.components().cloned().map(serde_json::Value::Object),
        Some(json!({
            "schemas": { "bar": { "type": "array", "items": { "type": "string" } } }
        }))
    );
    assert_eq!(
        doc.get("paths").unwrap()["/"]["get"]["parameters"][0]["schema"],
        json!({ "$ref": "#/components/schemas/bar" })
    );
}

#[test]
fn test_single_reference_inlined_without_components() {
    let oas = oas();
    let foo = oas.keyed_schema(fields! { "type" => "string" }, "foo");
    let root = single_get(
        &oas,
        vec![oas.parameter(fields! { "name" => "a", "in" => "query", "schema" => &foo })],
        &oas.schema(fields! { "type" => "integer" }),
    );

    let doc = oas.build(&root).unwrap();
    assert!(doc.get("components").is_none());
    assert_eq!(
        doc.get("paths").unwrap()["/"]["get"]["parameters"][0]["schema"],
        json!({ "type": "string" })
    );
}

#[test]
fn test_transitive_dedup() {
    let oas = oas();
    let b = oas.keyed_schema(fields! { "type" => "integer" }, "b");
    let a = oas.keyed_schema(fields! { "type" => "array", "items" => &b }, "a");
    let root = oas.openapi(fields! {
        "info" => info(&oas),
        "x-first" => &a,
        "x-second" => &a,
        "x-direct" => &b,
    });

    let doc = oas.build(&root).unwrap().into_value();
    assert_eq!(doc["x-first"], json!({ "$ref": "#/components/schemas/a" }));
    assert_eq!(doc["x-second"], json!({ "$ref": "#/components/schemas/a" }));
    assert_eq!(doc["x-direct"], json!({ "$ref": "#/components/schemas/b" }));
    assert_eq!(
        doc["components"]["schemas"],
        json!({
            "a": { "type": "array", "items": { "$ref": "#/components/schemas/b" } },
            "b": { "type": "integer" }
        })
    );
}

#[test]
fn test_repeated_reference_from_same_path() {
    let oas = oas();
    let id = oas.keyed_schema(fields! { "type" => "string", "format" => "uuid" }, "Id");
    let root = oas.openapi(fields! {
        "info" => info(&oas),
        "x-ids" => vec![&id, &id, &id],
    });

    let doc = oas.build(&root).unwrap().into_value();
    assert_eq!(
        doc["x-ids"],
        json!([
            { "$ref": "#/components/schemas/Id" },
            { "$ref": "#/components/schemas/Id" },
            { "$ref": "#/components/schemas/Id" }
        ])
    );
    assert_eq!(doc["components"]["schemas"].as_object().unwrap().len(), 1);
}

#[test]
fn test_security_scheme_registered_from_every_requirement() {
    let oas = oas();
    let bearer = oas.security_scheme(
        fields! { "type" => "http", "scheme" => "bearer", "description" => "  JWT  " },
        "Bearer",
    );
    let root = oas.openapi(fields! {
        "info" => info(&oas),
        "security" => vec![oas.security_requirement(&bearer)],
        "x-again" => vec![oas.security_requirement(&bearer), oas.security_requirement(&bearer)],
    });

    let doc = oas.build(&root).unwrap().into_value();
    assert_eq!(doc["security"], json!([{ "Bearer": [] }]));
    assert_eq!(doc["x-again"], json!([{ "Bearer": [] }, { "Bearer": [] }]));
    assert_eq!(
        doc["components"],
        json!({
            "securitySchemes": {
                "Bearer": { "type": "http", "scheme": "bearer", "description": "JWT  " }
            }
        })
    );
}

#[test]
fn test_colliding_keys_last_write_wins() {
    let oas = oas();
    let first = oas.keyed_schema(fields! { "type" => "string" }, "dup");
    let second = oas.keyed_schema(fields! { "type" => "integer" }, "dup");
    let root = oas.openapi(fields! {
        "info" => info(&oas),
        "x-a" => vec![&first, &first],
        "x-b" => vec![&second, &second],
    });

    let doc = oas.build(&root).unwrap().into_value();
    assert_eq!(doc["x-a"][0], json!({ "$ref": "#/components/schemas/dup" }));
    assert_eq!(doc["x-b"][1], json!({ "$ref": "#/components/schemas/dup" }));
    assert_eq!(doc["components"]["schemas"]["dup"], json!({ "type": "integer" }));
}

#[test]
fn test_rematerialization_is_identical() {
    let oas = oas();
    let foo = oas.keyed_schema(fields! { "type" => "string" }, "foo");
    let bar = oas.keyed_schema(fields! { "type" => "array", "items" => &foo }, "bar");
    let root = single_get(
        &oas,
        vec![oas.parameter(fields! { "name" => "a", "in" => "query", "schema" => &foo })],
        &bar,
    );

    let first = oas.build(&root).unwrap();
    let second = oas.build(&root).unwrap();
    assert_eq!(first.to_json_pretty().unwrap(), second.to_json_pretty().unwrap());
    assert_eq!(first, second);
}

#[test]
fn test_concurrent_builds_share_fixtures() {
    let oas = oas();
    let foo = oas.keyed_schema(fields! { "type" => "string" }, "foo");
    let root = oas.openapi(fields! { "info" => info(&oas), "x-a" => &foo, "x-b" => &foo });
    let expected = oas.build(&root).unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| oas.build(&root).unwrap())).collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_invalid_root() {
    let oas = oas();
    let schema = oas.keyed_schema(fields! { "type" => "string" }, "foo");
    let err = materialize(&schema, "3.0.3").unwrap_err();
    assert!(matches!(err, AppError::InvalidRoot(_)));
}

#[test]
fn test_default_flags_suppressed_across_kinds() {
    let oas = oas();
    let root = oas.openapi(fields! {
        "info" => info(&oas),
        "x-param" => oas.parameter(fields! { "name" => "q", "required" => false, "deprecated" => true }),
        "x-body" => oas.request_body(fields! { "required" => false, "content" => fields! {} }),
        "x-schema" => oas.schema(fields! { "type" => "string", "nullable" => false, "readOnly" => true }),
    });

    let doc = oas.build(&root).unwrap().into_value();
    assert_eq!(doc["x-param"], json!({ "name": "q", "deprecated": true }));
    assert_eq!(doc["x-body"], json!({ "content": {} }));
    assert_eq!(doc["x-schema"], json!({ "type": "string", "readOnly": true }));
}

#[test]
fn test_collision_inside_repeated_hoist() {
    let oas = oas();
    let c = oas.keyed_schema(fields! { "type" => "string" }, "c");
    let d = oas.keyed_schema(fields! { "type" => "integer" }, "c");
    let a = oas.keyed_schema(fields! { "items" => &c, "extra" => &c }, "a");
    let root = oas.openapi(fields! {
        "info" => info(&oas),
        "x1" => &a,
        "x2" => vec![&d, &d],
        "x3" => &a,
    });

    let doc = oas.build(&root).unwrap().into_value();
    assert_eq!(doc["components"]["schemas"]["c"], json!({ "type": "string" }));
    assert_eq!(doc["x3"], json!({ "$ref": "#/components/schemas/a" }));
}

#[test]
fn test_scheme_in_repeated_hoist_reregistered() {
    let oas = oas();
    let http = oas.security_scheme(fields! { "type" => "http", "scheme" => "basic" }, "K");
    let api_key = oas.security_scheme(fields! { "type" => "apiKey" }, "K");
    let a = oas.keyed_schema(fields! { "x-security" => oas.security_requirement(&http) }, "a");
    let root = oas.openapi(fields! {
        "info" => info(&oas),
        "x1" => &a,
        "x2" => oas.security_requirement(&api_key),
        "x3" => &a,
    });

    let doc = oas.build(&root).unwrap().into_value();
    assert_eq!(
        doc["components"]["securitySchemes"]["K"],
        json!({ "type": "http", "scheme": "basic" })
    );
    assert_eq!(doc["components"]["schemas"]["a"], json!({ "x-security": { "K": [] } }));
}

#[test]
fn test_security_scheme_with_empty_key() {
    let oas = oas();
    let scheme = oas.security_scheme(fields! { "type" => "http", "scheme" => "basic" }, "");
    let root = oas.openapi(fields! {
        "info" => info(&oas),
        "security" => vec![oas.security_requirement(&scheme)],
    });

    let doc = oas.build(&root).unwrap().into_value();
    assert_eq!(doc["security"], json!([{ "": [] }]));
    assert_eq!(
        doc["components"]["securitySchemes"][""],
        json!({ "type": "http", "scheme": "basic" })
    );
}
