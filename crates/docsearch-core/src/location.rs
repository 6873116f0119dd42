//! Parsing of entry locations such as `iteration/#Interface`.

use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use url::Url;

/// A `location` split into its page path and optional anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Location<'a> {
    /// Everything before the first `#`.
    pub path: &'a str,
    /// Everything after the first `#`, if a `#` is present.
    pub anchor: Option<&'a str>,
}

impl<'a> Location<'a> {
    pub fn parse(raw: &'a str) -> Self {
        match raw.split_once('#') {
            Some((path, anchor)) => Self {
                path,
                anchor: Some(anchor),
            },
            None => Self {
                path: raw,
                anchor: None,
            },
        }
    }

    /// Resolve against the root URL of the published documentation.
    ///
    /// The base is treated as a directory even without a trailing slash, so
    /// `https://example.org/Pkg.jl/dev` and `.../dev/` resolve the same way.
    pub fn resolve(&self, base: &Url) -> Result<Url> {
        if base.cannot_be_a_base() {
            return Err(Error::InvalidUrl(format!("'{base}' cannot be used as a base URL")));
        }

        let mut base = base.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut url = base.join(self.path.trim_start_matches('/'))?;
        url.set_fragment(self.anchor);
        Ok(url)
    }
}

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.anchor {
            Some(anchor) => write!(f, "{}#{anchor}", self.path),
            None => f.write_str(self.path),
        }
    }
}
