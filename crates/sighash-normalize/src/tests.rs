use super::*;
use pretty_assertions::assert_eq;
use sighash_frontend::MemberKey;
use sighash_test_utils::{
    binary, body, ident, int_lit, invoke, invoke_unresolved, model, ret, string_lit, MethodBuilder,
    Node, TypeBuilder,
};

fn tree_for<'m>(model: &'m sighash_frontend::SourceModel, type_name: &str, member: &str) -> &'m BodyTree {
    match model.member_source(&MemberKey::new(type_name, member)) {
        SourceLookup::Found(tree) => tree,
        SourceLookup::Unavailable => panic!("fixture body missing for {type_name}.{member}"),
    }
}

fn normalize(model: &sighash_frontend::SourceModel, type_name: &str, member: &str) -> String {
    normalize_body(
        model,
        tree_for(model, type_name, member),
        &NormalizeOptions::default(),
    )
    .unwrap()
}

#[test]
fn emits_kind_names_and_literal_values() {
    let m = model([TypeBuilder::class("a.A")
        .method(
            MethodBuilder::new("add", "int")
                .body(body(
                    "add",
                    [ret(binary(TreeKind::Plus, int_lit(1), int_lit(2)))],
                ))
                .build(),
        )
        .build()]);
    assert_eq!(
        normalize(&m, "a.A", "add"),
        "METHOD add RETURN PLUS INT_LITERAL 1 INT_LITERAL 2 "
    );
}

#[test]
fn string_literal_contributes_value_but_no_kind_tag() {
    let m = model([TypeBuilder::class("a.A")
        .method(
            MethodBuilder::new("s", "String")
                .body(body("s", [ret(string_lit("hi"))]))
                .build(),
        )
        .build()]);
    assert_eq!(normalize(&m, "a.A", "s"), "METHOD s RETURN hi ");
}

#[test]
fn bare_identifiers_are_suppressed_outside_member_select() {
    let m = model([TypeBuilder::class("a.A")
        .method(
            MethodBuilder::new("f", "int")
                .body(body("f", [ret(ident("localName"))]))
                .build(),
        )
        .build()]);
    // Local variable names never reach the fingerprint.
    assert_eq!(normalize(&m, "a.A", "f"), "METHOD f RETURN IDENTIFIER ");
}

#[test]
fn member_select_collects_identifier_text() {
    let select = Node::new(TreeKind::MemberSelect)
        .child(ident("field"))
        .child(ident("this"));
    let m = model([TypeBuilder::class("a.A")
        .method(
            MethodBuilder::new("f", "int")
                .body(body("f", [ret(select)]))
                .build(),
        )
        .build()]);
    assert_eq!(
        normalize(&m, "a.A", "f"),
        "METHOD f RETURN MEMBER_SELECT IDENTIFIER fieldIDENTIFIER this"
    );
}

#[test]
fn local_variable_declarations_emit_resolved_type() {
    let var = Node::new(TreeKind::Variable).text("java.util.List<java.lang.String>");
    let m = model([TypeBuilder::class("a.A")
        .method(MethodBuilder::new("f", "void").body(body("f", [var])).build())
        .build()]);
    assert_eq!(
        normalize(&m, "a.A", "f"),
        "METHOD f VARIABLE java.util.List<java.lang.String> "
    );
}

#[test]
fn resolvable_invocation_inlines_target_body() {
    let m = model([TypeBuilder::class("a.A")
        .method(
            MethodBuilder::new("caller", "int")
                .body(body("caller", [ret(invoke("helper", "a.A", "helper"))]))
                .build(),
        )
        .method(
            MethodBuilder::new("helper", "int")
                .body(body("helper", [ret(int_lit(7))]))
                .build(),
        )
        .build()]);
    let text = normalize(&m, "a.A", "caller");
    assert!(
        text.contains("METHOD helper RETURN INT_LITERAL 7"),
        "expected inlined helper body in {text:?}"
    );
}

#[test]
fn unresolvable_invocation_falls_back_to_source_text() {
    let m = model([TypeBuilder::class("a.A")
        .method(
            MethodBuilder::new("f", "void")
                .body(body(
                    "f",
                    [Node::new(TreeKind::ExpressionStatement)
                        .child(invoke_unresolved("mystery", "mystery()"))],
                ))
                .build(),
        )
        .build()]);
    let text = normalize(&m, "a.A", "f");
    assert!(text.contains("mysterymystery()"), "got {text:?}");
}

#[test]
fn unavailable_source_degrades_to_key() {
    // `ext.Lib.run` resolves but has no source anywhere in the model.
    let m = model([TypeBuilder::class("a.A")
        .method(
            MethodBuilder::new("f", "void")
                .body(body(
                    "f",
                    [Node::new(TreeKind::ExpressionStatement)
                        .child(invoke("run", "ext.Lib", "run"))],
                ))
                .build(),
        )
        .build()]);
    let text = normalize(&m, "a.A", "f");
    assert!(text.contains("runext.Lib.run "), "got {text:?}");
}

#[test]
fn shared_call_targets_are_memoized_consistently() {
    let m = model([TypeBuilder::class("a.A")
        .method(
            MethodBuilder::new("caller", "void")
                .body(body(
                    "caller",
                    [
                        Node::new(TreeKind::ExpressionStatement)
                            .child(invoke("helper", "a.A", "helper")),
                        Node::new(TreeKind::ExpressionStatement)
                            .child(invoke("helper", "a.A", "helper")),
                    ],
                ))
                .build(),
        )
        .method(
            MethodBuilder::new("helper", "int")
                .body(body("helper", [ret(int_lit(7))]))
                .build(),
        )
        .build()]);
    let text = normalize(&m, "a.A", "caller");
    let occurrences = text.matches("METHOD helper RETURN INT_LITERAL 7").count();
    assert_eq!(occurrences, 2);
}

#[test]
fn direct_recursion_terminates_with_sentinel() {
    let m = model([TypeBuilder::class("a.A")
        .method(
            MethodBuilder::new("f", "void")
                .body(body(
                    "f",
                    [Node::new(TreeKind::ExpressionStatement).child(invoke("f", "a.A", "f"))],
                ))
                .build(),
        )
        .build()]);
    let text = normalize(&m, "a.A", "f");
    assert!(text.contains("<recurse-a.A.f>"), "got {text:?}");
    // Deterministic across runs.
    assert_eq!(text, normalize(&m, "a.A", "f"));
}

#[test]
fn mutual_recursion_terminates_with_sentinel() {
    let m = model([TypeBuilder::class("a.A")
        .method(
            MethodBuilder::new("ping", "void")
                .body(body(
                    "ping",
                    [Node::new(TreeKind::ExpressionStatement)
                        .child(invoke("pong", "a.A", "pong"))],
                ))
                .build(),
        )
        .method(
            MethodBuilder::new("pong", "void")
                .body(body(
                    "pong",
                    [Node::new(TreeKind::ExpressionStatement)
                        .child(invoke("ping", "a.A", "ping"))],
                ))
                .build(),
        )
        .build()]);
    // The second arrival at pong's key (ping -> pong -> ping -> pong) finds
    // the pre-seeded sentinel and stops.
    let ping = normalize(&m, "a.A", "ping");
    assert!(ping.contains("<recurse-a.A.pong>"), "got {ping:?}");
    assert_eq!(ping, normalize(&m, "a.A", "ping"));

    // Each drill-down has its own cache, so pong expands independently.
    let pong = normalize(&m, "a.A", "pong");
    assert!(pong.contains("<recurse-a.A.ping>"), "got {pong:?}");
}

#[test]
fn closure_depth_ceiling_is_a_distinct_error() {
    let mut builder = TypeBuilder::class("a.Chain");
    for i in 0..6 {
        let name = format!("m{i}");
        let next = format!("m{}", i + 1);
        builder = builder.method(
            MethodBuilder::new(&name, "void")
                .body(body(
                    &name,
                    [Node::new(TreeKind::ExpressionStatement)
                        .child(invoke(&next, "a.Chain", &next))],
                ))
                .build(),
        );
    }
    builder = builder.method(
        MethodBuilder::new("m6", "void")
            .body(body("m6", Vec::new()))
            .build(),
    );
    let m = model([builder.build()]);
    let result = normalize_body(
        &m,
        tree_for(&m, "a.Chain", "m0"),
        &NormalizeOptions {
            max_closure_depth: 3,
        },
    );
    match result {
        Err(NormalizeError::ClosureDepthExceeded { limit, .. }) => assert_eq!(limit, 3),
        other => panic!("expected depth error, got {other:?}"),
    }
}

#[test]
fn throw_resolution_expands_constructor_source() {
    let m = model([TypeBuilder::class("a.A")
        .method(
            MethodBuilder::new("f", "void")
                .body(body(
                    "f",
                    [Node::new(TreeKind::Throw)
                        .target("a.Oops", "<init>")
                        .child(
                            Node::new(TreeKind::NewClass)
                                .text("Oops")
                                .child(ident("Oops")),
                        )],
                ))
                .build(),
        )
        .build()]);
    let text = normalize(&m, "a.A", "f");
    // Constructor source is unavailable, so the key itself appears.
    assert!(text.contains("THROW a.Oops.<init> NEW_CLASS Oops "), "got {text:?}");
}

#[test]
fn operator_kind_changes_the_sequence() {
    let plus = model([TypeBuilder::class("a.A")
        .method(
            MethodBuilder::new("f", "int")
                .body(body(
                    "f",
                    [ret(binary(TreeKind::Plus, int_lit(1), int_lit(2)))],
                ))
                .build(),
        )
        .build()]);
    let minus = model([TypeBuilder::class("a.A")
        .method(
            MethodBuilder::new("f", "int")
                .body(body(
                    "f",
                    [ret(binary(TreeKind::Minus, int_lit(1), int_lit(2)))],
                ))
                .build(),
        )
        .build()]);
    assert_ne!(normalize(&plus, "a.A", "f"), normalize(&minus, "a.A", "f"));
}
