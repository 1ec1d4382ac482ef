//! Snapshot tests for D binding generation.

use std::str::FromStr;

use polyglot_codegen::{
    generation::{GenerateOptions, ModuleOutput, Timestamp},
    pipeline::Pipeline,
};
use polyglot_codegen_d::{BindingCodegen, Generator};
use polyglot_manifest::Manifest;

fn generate(manifest_toml: &str, module: &str) -> ModuleOutput {
    let manifest = Manifest::from_str(manifest_toml).expect("Failed to parse manifest");
    let mut ctx = Pipeline::new().run(manifest).expect("pipeline failed");
    let registry = ctx.take_registry().expect("registry not built");
    let ast = registry.get(module).expect("module not found");
    let opts = GenerateOptions::default().with_timestamp(Timestamp::Fixed("T".into()));
    Generator::new().render(ast, &opts).expect("generation failed")
}

fn body(output: &ModuleOutput) -> &str {
    output
        .content
        .split_once("\n\n")
        .map(|(_, rest)| rest)
        .expect("banner missing")
}

#[test]
fn test_module_with_proxy() {
    let output = generate(
        r#"
        [[decl]]
        kind = "enum"
        file = "src/example.cpp"
        name = "Color"
        enumerators = [{ name = "Red" }, { name = "Green", value = 100 }, { name = "Blue" }]

        [[decl]]
        kind = "function"
        file = "src/example.cpp"
        name = "add"
        mangled = "_Z3addii"
        returns = "int32_t"
        params = [{ name = "a", type = "int32_t" }, { name = "b", type = "int32_t", default = 1 }]

        [[decl]]
        kind = "class"
        file = "src/example.cpp"
        name = "Point"
        struct = true
        members = [{ name = "x", type = "double" }, { name = "y", type = "double" }]

        [[decl]]
        kind = "function"
        file = "src/example.cpp"
        namespace = ["Foo"]
        name = "greet"
        mangled = "_ZN3Foo5greetERKSsi"
        returns = "string"
        params = [{ name = "who", type = { base = "string", const = true, reference = true } }, { name = "times", type = "int32_t" }]
        "#,
        "example",
    );

    assert!(output.is_complete());
    insta::assert_snapshot!(body(&output), @r#"
    module example;

    import std.string : fromStringz, toStringz;

    extern(C) {
        pragma(mangle, "polyglot_example_free_string") void polyglot_free_string(char* s) nothrow;
    }

    enum Color : int {
        Red,
        Green = 100,
        Blue,
    }

    extern(C++) {
        pragma(mangle, "_Z3addii") int add(int a, int b = 1);
    }

    extern(C++) struct Point {
        double x;
        double y;
    }

    extern(C++, Foo) {
        extern(C++) {
            pragma(mangle, "polyglot_proxy__ZN3Foo5greetERKSsi") char* polyglot_proxy__ZN3Foo5greetERKSsi(const(char)* who, int times);
        }

        extern(D) string greet(string who, int times) {
            auto raw = polyglot_proxy__ZN3Foo5greetERKSsi(toStringz(who), times);
            scope(exit) polyglot_free_string(raw);
            return fromStringz(raw).idup;
        }
    }
    "#);
}

#[test]
fn test_class_with_overloaded_methods() {
    let output = generate(
        r#"
        [[decl]]
        kind = "class"
        file = "widget.cpp"
        name = "Widget"
        members = [{ name = "width", type = "int32_t" }]

        [[decl.methods]]
        name = "set"
        mangled = "_ZN6Widget3setEi"
        params = [{ name = "w", type = "int32_t" }]

        [[decl.methods]]
        name = "set"
        mangled = "_ZN6Widget3setEd"
        params = [{ name = "w", type = "double" }]
        "#,
        "widget",
    );

    insta::assert_snapshot!(body(&output), @r#"
    module widget;

    extern(C++) struct Widget {
        int width;

        void set(int w) {
            return polyglot_Widget_method_set(&this, w);
        }

        void set(double w) {
            return polyglot_Widget_method_set_1(&this, w);
        }
    }

    extern(C++) {
        pragma(mangle, "_ZN6Widget3setEi") void polyglot_Widget_method_set(Widget* self, int w);
        pragma(mangle, "_ZN6Widget3setEd") void polyglot_Widget_method_set_1(Widget* self, double w);
    }
    "#);
}

#[test]
fn test_extern_blocks_do_not_merge_across_classes() {
    let output = generate(
        r#"
        [[decl]]
        kind = "enum"
        file = "m.cpp"
        name = "E"
        enumerators = [{ name = "A" }]

        [[decl]]
        kind = "function"
        file = "m.cpp"
        name = "f"
        mangled = "_Z1fv"

        [[decl]]
        kind = "function"
        file = "m.cpp"
        name = "g"
        mangled = "_Z1gv"

        [[decl]]
        kind = "class"
        file = "m.cpp"
        name = "C"

        [[decl]]
        kind = "function"
        file = "m.cpp"
        name = "h"
        mangled = "_Z1hv"
        "#,
        "m",
    );

    insta::assert_snapshot!(body(&output), @r#"
    module m;

    enum E : int {
        A,
    }

    extern(C++) {
        pragma(mangle, "_Z1fv") void f();
        pragma(mangle, "_Z1gv") void g();
    }

    extern(C++) struct C {}

    extern(C++) {
        pragma(mangle, "_Z1hv") void h();
    }
    "#);
}

#[test]
fn test_wide_types_leave_no_empty_block() {
    let output = generate(
        r#"
        [[decl]]
        kind = "enum"
        file = "wide.cpp"
        name = "Before"
        enumerators = [{ name = "A" }]

        [[decl]]
        kind = "function"
        file = "wide.cpp"
        name = "precise"
        mangled = "_Z7precisee"
        params = [{ name = "x", type = "long double" }]

        [[decl]]
        kind = "variable"
        file = "wide.cpp"
        name = "LIMIT"
        type = "uint64_t"
        value = 42
        "#,
        "wide",
    );

    assert_eq!(output.skipped.len(), 1);
    assert_eq!(output.skipped[0].name, "precise");
    insta::assert_snapshot!(body(&output), @r#"
    module wide;

    enum Before : int {
        A,
    }

    enum ulong LIMIT = 42;
    "#);
}
