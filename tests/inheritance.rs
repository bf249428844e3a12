#[macro_use]
mod common;

#[cfg(test)]
mod inheritance {
    tests! {
        constructor is OK
        "
        class A {
            init(value) { this.value = value; }
        }
        class B < A {}
        print B(\"value\").value;
        ",
        "value",
    }

    tests! {
        inherit_from_function is ERR
        "
        fun Base() {}
        class Derived < Base {}
        ",
        "[line 2] Runtime error at 'Base': Superclass must be a class.",
    }

    tests! {
        inherit_from_nil is ERR
        "
        var Foo = nil;
        class Sub < Foo {}
        ",
        "[line 2] Runtime error at 'Foo': Superclass must be a class.",
    }

    tests! {
        inherit_methods is OK
        "
        class Foo {
            methodOnFoo() { print \"foo\"; }
            override() { print \"foo\"; }
        }
        class Bar < Foo {
            methodOnBar() { print \"bar\"; }
            override() { print \"bar\"; }
        }
        var bar = Bar();
        bar.methodOnFoo();
        bar.methodOnBar();
        bar.override();
        ",
        "foo",
        "bar",
        "bar",
    }

    tests! {
        set_fields_from_base_class is OK
        "
        class Foo {
            foo(a, b) { this.a = a; this.b = b; }
            fooPrint() { print this.a; print this.b; }
        }
        class Bar < Foo {
            bar(a, b) { this.a = a; this.b = b; }
            barPrint() { print this.a; print this.b; }
        }
        var bar = Bar();
        bar.foo(\"foo 1\", \"foo 2\");
        bar.fooPrint();
        bar.bar(\"bar 1\", \"bar 2\");
        bar.barPrint();
        bar.fooPrint();
        ",
        "foo 1",
        "foo 2",
        "bar 1",
        "bar 2",
        "bar 1",
        "bar 2",
    }
}
