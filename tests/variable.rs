#[macro_use]
mod common;

#[cfg(test)]
mod variable {
    tests! {
        collide_with_parameter is ERR
        "fun foo(a) { var a; }",
        "[line 1] Error at 'a': Already a variable with this name in this scope.",
    }

    tests! {
        duplicate_local is ERR
        "{ var a = \"1\"; var a = \"2\"; }",
        "[line 1] Error at 'a': Already a variable with this name in this scope.",
    }

    tests! {
        early_bound is OK
        "
        var a = \"outer\";
        { fun f() { print a; } f(); var a = \"inner\"; f(); }
        ",
        "outer",
        "outer",
    }

    tests! {
        in_middle_of_block is OK
        "
        {
            var a = \"a\";
            print a;
            var b = a + \" b\";
            print b;
            var c = a + \" c\";
            print c;
            var d = b + \" d\";
            print d;
        }
        ",
        "a",
        "a b",
        "a c",
        "a b d",
    }

    tests! {
        redeclare_global is OK
        "var a = \"1\"; var a; print a;",
        "nil",
    }

    tests! {
        redefine_global is OK
        "var a = \"1\"; var a = \"2\"; print a;",
        "2",
    }

    tests! {
        scope_reuse_in_different_blocks is OK
        "
        { var a = \"first\"; print a; }
        { var a = \"second\"; print a; }
        ",
        "first",
        "second",
    }

    tests! {
        shadow_and_local is OK
        "
        var a = \"outer\";
        {
            print a;
            var a = \"inner\";
            print a;
        }
        ",
        "outer",
        "inner",
    }

    tests! {
        undefined_global is ERR
        "print notDefined;",
        "[line 1] Runtime error at 'notDefined': Undefined variable 'notDefined'.",
    }

    tests! {
        undefined_local is ERR
        "{ print notDefined; }",
        "[line 1] Runtime error at 'notDefined': Undefined variable 'notDefined'.",
    }

    tests! {
        uninitialized is OK
        "var a; print a;",
        "nil",
    }

    tests! {
        use_false_as_var is ERR
        "var false = 1;",
        "[line 1] Error at 'false': Expect variable name.",
    }

    tests! {
        use_global_in_initializer is OK
        "var a = \"value\"; var a = a; print a;",
        "value",
    }

    tests! {
        use_local_in_initializer is ERR
        "var a = \"outer\"; { var a = a; }",
        "[line 1] Error at 'a': Can't read local variable in its own initializer.",
    }
}
