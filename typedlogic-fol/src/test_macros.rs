#[macro_export]
macro_rules! assert_debug_string {
    ($expected:expr, $value:expr) => {{
        match (&$expected, &$value) {
            (expected_val, val) => assert_eq!(*expected_val, format!("{:?}", val)),
        }
    }};
    ($expected:expr, $value:expr ,) => {
        $crate::assert_debug_string!($expected, $value)
    };
}

#[macro_export]
macro_rules! assert_debug_strings {
    ($expected:expr, $value:expr) => {{
        match (&$expected, &$value) {
            (expected_val, val) => {
                let strings: Vec<String> = val.iter().map(|v| format!("{:?}", v)).collect();
                assert_eq!(*expected_val, strings.join("\n"))
            }
        }
    }};
    ($expected:expr, $value:expr ,) => {
        $crate::assert_debug_strings!($expected, $value)
    };
}
