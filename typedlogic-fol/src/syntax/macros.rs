/// Creates a [`Variable`] from an identifier, optionally typed.
///
/// **Example**:
/// ```rust
/// # use typedlogic_fol::v;
/// let x = v!(x);
/// let y = v!(y: str);
///
/// assert_eq!("?x", x.to_string());
/// assert_eq!(Some("str"), y.domain());
/// ```
///
/// [`Variable`]: crate::syntax::Variable
#[macro_export]
macro_rules! v {
    ($v:ident) => {
        $crate::syntax::Variable::new(stringify!($v))
    };
    ($v:ident : $t:ident) => {
        $crate::syntax::Variable::typed(stringify!($v), stringify!($t))
    };
}

/// Creates a positional [`Term`]. Identifiers in argument position are variables,
/// literals are values.
///
/// **Example**:
/// ```rust
/// # use typedlogic_fol::term;
/// let t = term!(Likes(x, "Fred", 3));
/// assert_eq!(r#"Likes(?x, "Fred", 3)"#, t.to_string());
///
/// let p = term!(P);
/// assert!(p.is_constant());
/// ```
///
/// [`Term`]: crate::syntax::Term
#[macro_export]
macro_rules! term {
    ($p:ident) => {
        $crate::syntax::Term::proposition(stringify!($p))
    };
    ($p:ident ( $($arg:tt),* $(,)? )) => {
        $crate::syntax::Term::new(stringify!($p), vec![$($crate::term_arg!($arg)),*])
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! term_arg {
    ($v:ident) => {
        $crate::syntax::Value::from($crate::v!($v))
    };
    ($l:literal) => {
        $crate::syntax::Value::from($l)
    };
}
