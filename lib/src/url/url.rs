use std::ops::Deref;

pub use super::UrlBuf;

/// A borrowed URL or URL path. No validation is performed: featured image
/// paths come straight from front matter and are only ever joined and
/// escaped, never parsed further.
#[derive(Debug)]
#[repr(transparent)]
pub struct Url(str);

impl Url {
    pub fn new(from: &str) -> &Url {
        // SAFETY: `Url` is `repr(transparent)` over `str`.
        unsafe { &*(from as *const str as *const Url) }
    }

    pub const fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_url_buf(&self) -> UrlBuf {
        UrlBuf::from(self.0.to_owned())
    }

    /// ```rust
    /// use quire::url::Url;
    ///
    /// let url = Url::new("https://gibicomunica.com.br");
    /// assert_eq!(url.scheme(), Some("https"));
    ///
    /// let url = Url::new("mailto:contato@gibicomunica.com.br");
    /// assert_eq!(url.scheme(), Some("mailto"));
    ///
    /// let url = Url::new("/img/a.jpg");
    /// assert_eq!(url.scheme(), None);
    ///
    /// let url = Url::new("img/a.jpg#x:y");
    /// assert_eq!(url.scheme(), None);
    ///
    /// let url = Url::new("img/a.jpg?x:y");
    /// assert_eq!(url.scheme(), None);
    /// ```
    pub fn scheme(&self) -> Option<&str> {
        let bytes = self.as_bytes();
        let scheme = match memchr::memchr3(b':', b'?', b'/', bytes) {
            Some(i) if bytes[i] == b':' => match memchr::memrchr(b'#', &bytes[..i]) {
                Some(_) => return None,
                None => &self[..i],
            }
            _ => return None,
        };

        let valid = scheme.bytes().next().is_some_and(|b| b.is_ascii_alphabetic())
            && scheme.bytes().all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'));

        valid.then_some(scheme)
    }

    /// Whether the URL has a scheme, as in `https://cdn.example.com/b.jpg`,
    /// rather than being a path on the site.
    pub fn has_scheme(&self) -> bool {
        self.scheme().is_some()
    }
}

impl Deref for Url {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for Url {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<Url> for str {
    fn as_ref(&self) -> &Url {
        Url::new(self)
    }
}

impl AsRef<Url> for String {
    fn as_ref(&self) -> &Url {
        Url::new(self)
    }
}

impl AsRef<Url> for Url {
    fn as_ref(&self) -> &Url {
        self
    }
}

impl ToOwned for Url {
    type Owned = UrlBuf;

    fn to_owned(&self) -> Self::Owned {
        self.to_url_buf()
    }
}
