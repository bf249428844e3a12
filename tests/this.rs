#[macro_use]
mod common;

#[cfg(test)]
mod this_expr {
    tests! {
        closure is OK
        "
        class Foo {
            getClosure() {
                fun closure() { return this.toString(); }
                return closure;
            }
            toString() { return \"Foo\"; }
        }
        var closure = Foo().getClosure();
        print closure();
        ",
        "Foo",
    }

    tests! {
        nested_class is OK
        "
        class Outer {
            method() {
                print this;
                fun f() {
                    print this;
                    class Inner {
                        method() { print this; }
                    }
                    Inner().method();
                }
                f();
            }
        }
        Outer().method();
        ",
        "Outer instance",
        "Outer instance",
        "Inner instance",
    }

    tests! {
        this_at_top_level is ERR
        "print this;",
        "[line 1] Error at 'this': Can't use 'this' outside of a class.",
    }

    tests! {
        this_in_method is OK
        "
        class Foo {
            baz() { print this.name; }
        }
        var foo = Foo();
        foo.name = \"baz\";
        foo.baz();
        ",
        "baz",
    }

    tests! {
        this_in_top_level_function is ERR
        "fun notAMethod() { print this; }",
        "[line 1] Error at 'this': Can't use 'this' outside of a class.",
    }
}
