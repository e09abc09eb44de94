mod url;
mod url_buf;

pub use url::*;
pub use url_buf::*;
