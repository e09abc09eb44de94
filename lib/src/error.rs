use std::{fmt, io};
use std::panic::Location;
use std::error::Error as StdError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A build error: one or more details, optionally chained behind the error
/// that caused it.
#[derive(Debug)]
pub struct Error {
    detail: Vec<Box<dyn ErrorDetail>>,
    cause: Option<Box<Error>>,
    location: &'static Location<'static>,
}

pub trait ErrorDetail: fmt::Display + fmt::Debug + Send + Sync {
    fn context(&self) -> Vec<(Option<String>, String)> { vec![] }
}

impl Error {
    pub fn message(&self) -> String {
        self.detail.iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Places `self` as the innermost cause of `outer` and returns `outer`.
    pub fn chain(self, mut outer: Error) -> Self {
        outer.cause = match outer.cause.take() {
            Some(cause) => Some(Box::new(self.chain(*cause))),
            None => Some(Box::new(self)),
        };

        outer
    }

    /// Iterates over `self` and then each of its causes, outermost first.
    pub fn causes(&self) -> impl Iterator<Item = &Error> {
        std::iter::successors(Some(self), |e| e.cause.as_deref())
    }
}

impl ErrorDetail for &(dyn StdError + Send + Sync) {
    fn context(&self) -> Vec<(Option<String>, String)> {
        std::iter::successors(self.source(), |&e| e.source())
            .map(|e| (None, e.to_string()))
            .collect()
    }
}

macro_rules! impl_error_detail_with_std_error {
    ($($T:ty),* $(,)?) => {$(
        impl $crate::error::ErrorDetail for $T {
            fn context(&self) -> Vec<(Option<String>, String)> {
                let error: &(dyn std::error::Error + Send + Sync) = self;
                error.context()
            }
        }
    )*}
}

impl_error_detail_with_std_error! {
    io::Error,
    toml::de::Error,
    serde_yaml_ng::Error,
    jwalk::Error,
    std::path::StripPrefixError,
}

impl ErrorDetail for String { }
impl ErrorDetail for &'static str { }

impl<T: ErrorDetail + 'static> From<T> for Error {
    #[track_caller]
    fn from(detail: T) -> Self {
        Error {
            detail: vec![Box::new(detail)],
            cause: None,
            location: Location::caller(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, error) in self.causes().enumerate() {
            let indent = " ".repeat(depth * 4);
            let newline = format!("\n{indent}");
            for detail in &error.detail {
                writeln!(f, "{indent}{}", detail.to_string().replace('\n', &newline))?;
                for (key, value) in detail.context() {
                    let value = value.replace('\n', &newline);
                    match key {
                        Some(key) => writeln!(f, "{indent}  {key}: {value}")?,
                        None => writeln!(f, "{indent}  {value}")?,
                    }
                }
            }

            if std::env::var_os("RUST_BACKTRACE").is_some() {
                writeln!(f, "{indent}[{}]", error.location)?;
            }
        }

        Ok(())
    }
}

/// An ad-hoc error: a message with `(key, value)` parameters. Built with
/// [`error!`](crate::error!).
#[derive(Debug)]
pub struct Message {
    pub message: String,
    pub parameters: Vec<(Option<String>, String)>,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.message.fmt(f)
    }
}

impl ErrorDetail for Message {
    fn context(&self) -> Vec<(Option<String>, String)> {
        self.parameters.clone()
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! err {
    ($($token:tt)*) => (Err($crate::error!($($token)*)));
}

/// Builds an [`Error`](crate::error::Error) from a message and parameters:
///
/// ```rust
/// let e = quire::error!("failed to write page", "path" => "blog/index.html");
/// assert!(e.to_string().contains("path: blog/index.html"));
/// ```
#[doc(hidden)]
#[macro_export]
macro_rules! error {
    (@param $v:ident) => { };

    (@param $v:ident $key:expr => $value:expr $(, $($rest:tt)*)?) => {
        $v.push((Some($key.to_string()), $value.to_string()));
        $($crate::error!(@param $v $($rest)*);)?
    };

    (@param $v:ident $value:expr $(, $($rest:tt)*)?) => {
        $v.push((None, $value.to_string()));
        $($crate::error!(@param $v $($rest)*);)?
    };

    ($msg:expr $(, $($rest:tt)*)?) => (
        $crate::error::Error::from($crate::error::Message {
            message: $msg.to_string(),
            parameters: {
                #[allow(unused_mut)]
                let mut v: Vec<(Option<String>, String)> = Vec::new();
                $($crate::error!(@param v $($rest)*);)?
                v
            },
        })
    );
}

pub trait Chainable<T> {
    fn chain(self, outer: impl Into<Error>) -> Result<T>;

    fn chain_with<F, E>(self, f: F) -> Result<T>
        where F: FnOnce() -> E, E: Into<Error>;
}

impl<T, E: Into<Error>> Chainable<T> for Result<T, E> {
    #[track_caller]
    fn chain(self, outer: impl Into<Error>) -> Result<T> {
        self.map_err(|e| e.into().chain(outer.into()))
    }

    #[track_caller]
    fn chain_with<F, O>(self, f: F) -> Result<T>
        where F: FnOnce() -> O, O: Into<Error>,
    {
        self.map_err(|e| e.into().chain(f().into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chained_errors_render_outermost_first() {
        let io = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let result: Result<()> = Err(io).chain(crate::error! {
            "failed to read post",
            "path" => "content/blog/a.md",
        });

        let error = result.unwrap_err();
        let rendered = error.to_string();
        let outer = rendered.find("failed to read post").unwrap();
        let inner = rendered.find("no such file").unwrap();
        assert!(outer < inner);
        assert!(rendered.contains("  path: content/blog/a.md"));
        assert_eq!(error.causes().count(), 2);
    }

    #[derive(Debug)]
    struct Wrapped(io::Error);

    impl fmt::Display for Wrapped {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("wrapped")
        }
    }

    impl StdError for Wrapped {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn std_error_sources_become_context() {
        let wrapped = Wrapped(io::Error::new(io::ErrorKind::Other, "disk on fire"));
        let error: &(dyn StdError + Send + Sync) = &wrapped;
        assert_eq!(error.context(), [(None, "disk on fire".to_string())]);
    }

    #[test]
    fn chain_appends_to_the_innermost_cause() {
        let a = Error::from("a");
        let b = Error::from("b");
        let c = Error::from("c");
        let error = a.chain(b).chain(c);
        let messages: Vec<_> = error.causes().map(|e| e.message()).collect();
        assert_eq!(messages, ["c", "b", "a"]);
    }
}
