/// Runs `$source` through the full pipeline against an in-memory sink and
/// asserts the printed output lines match `$expected`, in order.
#[macro_export]
macro_rules! tests {
    ($name:ident is OK $source:expr, $($expected:expr),* $(,)?) => {
        #[test]
        fn $name() {
            use rocks_lang::Rocks;

            let mut expected: Vec<&str> = vec![$($expected),*];
            let expected = if expected.is_empty() {
                String::new()
            } else {
                expected.push("");
                expected.join("\n")
            };

            let mut output = Vec::new();
            let mut rocks = Rocks::new(Box::new(&mut output));
            rocks.run($source);
            drop(rocks);

            assert_eq!(expected, std::str::from_utf8(&output).unwrap());
        }
    };

    ($name:ident is ERR $source:expr, $($expected:expr),* $(,)?) => {
        #[test]
        fn $name() {
            use rocks_lang::Rocks;

            let expected = vec![$($expected),*].join("\n");

            let mut output = Vec::new();
            let mut rocks = Rocks::new(Box::new(&mut output));
            rocks.run($source);
            let had_error = rocks.had_error() || rocks.had_runtime_error();
            drop(rocks);

            assert!(had_error, "expected an error for source: {}", $source);
            assert_eq!(format!("{expected}\n"), std::str::from_utf8(&output).unwrap());
        }
    };
}
