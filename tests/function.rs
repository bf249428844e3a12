#[macro_use]
mod common;

#[cfg(test)]
mod function {
    fn too_many_args_source() -> String {
        let args = (0..256).map(|i| i.to_string()).collect::<Vec<_>>().join(", ");
        format!("fun f() {{}} f({});", args)
    }

    fn too_many_params_source() -> String {
        let params = (0..256).map(|i| format!("p{i}")).collect::<Vec<_>>().join(", ");
        format!("fun f({}) {{}}", params)
    }

    tests! {
        body_must_be_block is ERR
        "fun f() 123;",
        "[line 1] Error at '123': Expect '{' before function body.",
    }

    tests! {
        empty_body is OK
        "fun f() {} print f();",
        "nil",
    }

    tests! {
        extra_arguments is ERR
        "fun f(a, b) { print a + b; } f(1, 2, 3, 4);",
        "[line 1] Runtime error at ')': Expected 2 arguments but got 4.",
    }

    tests! {
        local_mutual_recursion is ERR
        "{ fun isEven(n) { if (n == 0) return true; return isOdd(n - 1); } fun isOdd(n) { if (n == 0) return false; return isEven(n - 1); } print isEven(4); }",
        "[line 1] Runtime error at 'isOdd': Undefined variable 'isOdd'.",
    }

    tests! {
        local_recursion is OK
        "{ fun fact(n) { if (n <= 1) return 1; return n * fact(n - 1); } print fact(5); }",
        "120",
    }

    tests! {
        missing_arguments is ERR
        "fun f(a, b) { print a + b; } f(1);",
        "[line 1] Runtime error at ')': Expected 2 arguments but got 1.",
    }

    tests! {
        missing_comma_in_parameters is ERR
        "fun f(a b) {}",
        "[line 1] Error at 'b': Expect ')' after parameters.",
    }

    tests! {
        mutual_recursion is OK
        "fun isEven(n) { if (n == 0) return true; return isOdd(n - 1); } fun isOdd(n) { if (n == 0) return false; return isEven(n - 1); } print isEven(4); print isOdd(3);",
        "true",
        "true",
    }

    tests! {
        nested_call_with_arguments is OK
        "fun returnArg(arg) { return arg; } fun printArg(arg) { print arg; } returnArg(printArg)(\"hello world\");",
        "hello world",
    }

    tests! {
        parameters is OK
        "
        fun f0() { return 0; }
        fun f1(a) { return a; }
        fun f2(a, b) { return a + b; }
        fun f3(a, b, c) { return a + b + c; }
        fun f4(a, b, c, d) { return a + b + c + d; }
        fun f5(a, b, c, d, e) { return a + b + c + d + e; }
        fun f6(a, b, c, d, e, f) { return a + b + c + d + e + f; }
        fun f7(a, b, c, d, e, f, g) { return a + b + c + d + e + f + g; }
        fun f8(a, b, c, d, e, f, g, h) { return a + b + c + d + e + f + g + h; }
        print f0();
        print f1(1);
        print f2(1, 2);
        print f3(1, 2, 3);
        print f4(1, 2, 3, 4);
        print f5(1, 2, 3, 4, 5);
        print f6(1, 2, 3, 4, 5, 6);
        print f7(1, 2, 3, 4, 5, 6, 7);
        print f8(1, 2, 3, 4, 5, 6, 7, 8);
        ",
        "0",
        "1",
        "3",
        "6",
        "10",
        "15",
        "21",
        "28",
        "36",
    }

    tests! {
        print is OK
        "fun foo() {} print foo; print clock;",
        "<fn foo>",
        "<native fn>",
    }

    tests! {
        recursion is OK
        "fun fact(n) { if (n <= 1) return 1; return n * fact(n - 1); } print fact(5);",
        "120",
    }

    tests! {
        too_many_arguments is ERR
        &too_many_args_source(),
        "[line 1] Error at '255': Can't have more than 255 arguments.",
    }

    tests! {
        too_many_parameters is ERR
        &too_many_params_source(),
        "[line 1] Error at 'p255': Can't have more than 255 parameters.",
    }
}
