// src/macros.rs

/// `String` shorthand: `s!()` is empty, `s!(x)` is `String::from(x)`.
#[macro_export]
macro_rules! s {
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Concatenate string-like parts (anything `AsRef<str>`) into one `String`.
#[macro_export]
macro_rules! join {
    ($($part:expr),+ $(,)?) => {{
        let mut out = ::std::string::String::new();
        $(
            out.push_str(::core::convert::AsRef::<str>::as_ref(&$part));
        )+
        out
    }};
}
