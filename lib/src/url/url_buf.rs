use std::ops::Deref;
use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use super::Url;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct UrlBuf(String);

impl UrlBuf {
    pub fn new() -> UrlBuf {
        UrlBuf(String::new())
    }

    pub fn as_url(&self) -> &Url {
        Url::new(self.0.as_str())
    }

    /// ```rust
    /// use quire::url::UrlBuf;
    ///
    /// let mut url = UrlBuf::from("blog/post");
    /// url.prepend("/");
    /// assert_eq!(url.as_str(), "/blog/post");
    ///
    /// url.prepend("https://gibicomunica.com.br");
    /// assert_eq!(url.as_str(), "https://gibicomunica.com.br/blog/post");
    ///
    /// url.prepend("/ignored");
    /// assert_eq!(url.as_str(), "https://gibicomunica.com.br/blog/post");
    /// ```
    pub fn prepend<T: AsRef<Url>>(&mut self, url: T) -> &mut Self {
        if self.has_scheme() {
            return self;
        }

        let mut url = url.as_ref().to_owned();
        let suffix = std::mem::take(self);
        url.append(suffix);
        *self = url;
        self
    }

    /// ```rust
    /// use quire::url::UrlBuf;
    ///
    /// let mut url = UrlBuf::from("https://gibicomunica.com.br/");
    /// url.append("/blog");
    /// assert_eq!(url.as_str(), "https://gibicomunica.com.br/blog");
    ///
    /// url.append("post/");
    /// assert_eq!(url.as_str(), "https://gibicomunica.com.br/blog/post/");
    ///
    /// url.append("https://cdn.example.com/b.jpg");
    /// assert_eq!(url.as_str(), "https://cdn.example.com/b.jpg");
    /// ```
    pub fn append<T: AsRef<Url>>(&mut self, url: T) -> &mut Self {
        let url = url.as_ref();
        if url.has_scheme() {
            *self = url.to_owned();
        } else if self.0.is_empty() {
            self.0.push_str(url);
        } else if !url.is_empty() {
            match (self.ends_with('/'), url.starts_with('/')) {
                (true, true) => self.0.push_str(&url[1..]),
                (true, false) | (false, true) => self.0.push_str(url),
                (false, false) => {
                    self.0.push('/');
                    self.0.push_str(url);
                }
            }
        }

        self
    }

    /// Ensures the URL ends with a `/`.
    ///
    /// ```rust
    /// use quire::url::UrlBuf;
    ///
    /// let mut url = UrlBuf::from("https://gibicomunica.com.br/blog");
    /// assert_eq!(url.make_dir().as_str(), "https://gibicomunica.com.br/blog/");
    /// assert_eq!(url.make_dir().as_str(), "https://gibicomunica.com.br/blog/");
    /// ```
    pub fn make_dir(&mut self) -> &mut Self {
        if !self.ends_with('/') {
            self.0.push('/');
        }

        self
    }
}

impl From<String> for UrlBuf {
    fn from(value: String) -> Self {
        UrlBuf(value)
    }
}

impl From<&str> for UrlBuf {
    fn from(value: &str) -> Self {
        Url::new(value).to_url_buf()
    }
}

impl From<&Url> for UrlBuf {
    fn from(value: &Url) -> Self {
        value.to_url_buf()
    }
}

impl Deref for UrlBuf {
    type Target = Url;

    fn deref(&self) -> &Self::Target {
        self.as_url()
    }
}

impl AsRef<Url> for UrlBuf {
    fn as_ref(&self) -> &Url {
        self.as_url()
    }
}

impl Borrow<Url> for UrlBuf {
    fn borrow(&self) -> &Url {
        self.as_url()
    }
}

impl AsRef<str> for UrlBuf {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<UrlBuf> for String {
    fn from(value: UrlBuf) -> Self {
        value.0
    }
}

impl fmt::Display for UrlBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
