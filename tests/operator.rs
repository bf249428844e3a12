#[macro_use]
mod common;

#[cfg(test)]
mod operator {
    tests! {
        add is OK
        "
        print 123 + 456;
        print \"str\" + \"ing\";
        ",
        "579",
        "string",
    }

    tests! {
        add_mismatched_types is ERR
        "print true + nil;",
        "[line 1] Runtime error at '+': Operands must be two numbers or two strings.",
    }

    tests! {
        comparison is OK
        "
        print 1 < 2;
        print 2 < 2;
        print 2 < 1;
        print 1 <= 2;
        print 2 <= 2;
        print 2 <= 1;
        print 1 > 2;
        print 2 > 2;
        print 2 > 1;
        print 1 >= 2;
        print 2 >= 2;
        print 2 >= 1;
        ",
        "true",
        "false",
        "false",
        "true",
        "true",
        "false",
        "false",
        "false",
        "true",
        "false",
        "true",
        "true",
    }

    tests! {
        divide is OK
        "
        print 8 / 2;
        print 12.34 / 12.34;
        print 1 / 0;
        ",
        "4",
        "1",
        "inf",
    }

    tests! {
        divide_mismatched_types is ERR
        "print \"minuend\" / \"subtrahend\";",
        "[line 1] Runtime error at '/': Operands must be numbers.",
    }

    tests! {
        equals is OK
        "
        print nil == nil;
        print true == true;
        print true == false;
        print 1 == 1;
        print 1 == 2;
        print \"str\" == \"str\";
        print \"str\" == \"ing\";
        ",
        "true",
        "true",
        "false",
        "true",
        "false",
        "true",
        "false",
    }

    tests! {
        equals_class is OK
        "
        class Foo {}
        class Bar {}
        print Foo == Foo;
        print Foo == Bar;
        print Foo == \"Foo\";
        print Foo == Foo();
        ",
        "true",
        "false",
        "false",
        "false",
    }

    tests! {
        equals_method is OK
        "
        class Foo { method() {} }
        var foo = Foo();
        var m = foo.method;
        print m == foo.method;
        ",
        "false",
    }

    tests! {
        multiply is OK
        "
        print 5 * 3;
        print 12.34 * 0.3;
        ",
        "15",
        "3.702",
    }

    tests! {
        negate is OK
        "
        print -(-3);
        print --3;
        print -3;
        ",
        "3",
        "3",
        "-3",
    }

    tests! {
        negate_mismatched_type is ERR
        "print -\"str\";",
        "[line 1] Runtime error at '-': Operand must be a number.",
    }

    tests! {
        not is OK
        "
        print !true;
        print !false;
        print !!true;
        ",
        "false",
        "true",
        "true",
    }

    tests! {
        subtract is OK
        "
        print 4 - 3;
        print 1.2 - 1.2;
        ",
        "1",
        "0",
    }
}
