#[macro_use]
mod common;

#[cfg(test)]
mod number {
    tests! {
        leading_dot is ERR
        ".123;",
        "[line 1] Error at '.': Expect expression.",
    }

    tests! {
        literals is OK
        "
        print 123;
        print 987654;
        print 0;
        print -0;
        print 123.456;
        print -0.001;
        ",
        "123",
        "987654",
        "0",
        "0",
        "123.456",
        "-0.001",
    }

    tests! {
        nan_equality is OK
        "
        var nan = 0.0 / 0.0;
        print nan == 0;
        print nan != 1;
        print nan == nan;
        print nan != nan;
        ",
        "false",
        "true",
        "false",
        "true",
    }

    tests! {
        trailing_dot is ERR
        "8.;",
        "[line 1] Error at ';': Expect property name after '.'.",
    }
}
