#[macro_use]
mod common;

#[cfg(test)]
mod class {
    tests! {
        empty is OK
        "class Foo {} print Foo;",
        "Foo",
    }

    tests! {
        inherit_self is ERR
        "class Foo < Foo {}",
        "[line 1] Error at 'Foo': A class can't inherit from itself.",
    }

    tests! {
        inherited_method is OK
        "
        class Foo {
            inFoo() { print \"in foo\"; }
        }
        class Bar < Foo {
            inBar() { print \"in bar\"; }
        }
        class Baz < Bar {
            inBaz() { print \"in baz\"; }
        }
        var baz = Baz();
        baz.inFoo();
        baz.inBar();
        baz.inBaz();
        ",
        "in foo",
        "in bar",
        "in baz",
    }

    tests! {
        local_inherit_other is OK
        "class A {} { class B < A {} print B; }",
        "B",
    }

    tests! {
        local_inherit_self is ERR
        "{ class Foo < Foo {} }",
        "[line 1] Error at 'Foo': A class can't inherit from itself.",
    }

    tests! {
        reference_self is OK
        "class Foo { returnSelf() { return Foo; } } print Foo().returnSelf();",
        "Foo",
    }
}
