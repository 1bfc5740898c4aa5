//! Script path resolution.

use std::fmt;

use sb_core::{Error, Result};

/// Path separator searched for when splitting a script path.
pub const SEPARATOR: char = '/';

/// Length of the script file extension (`.m`), stripped from the file name.
pub const EXTENSION_LEN: usize = 2;

/// A script path split into the directory the engine runs it from and the
/// bare name it is called by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptReference {
    directory: String,
    callable: String,
}

impl ScriptReference {
    /// Split `path` at its last separator and drop the extension.
    ///
    /// A path without a separator yields an empty directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the file name is not longer
    /// than the extension, since no callable name would remain.
    ///
    /// # Example
    ///
    /// ```
    /// use sb_pipeline::ScriptReference;
    ///
    /// let script = ScriptReference::resolve("/opt/scripts/denoise.m")?;
    /// assert_eq!(script.directory(), "/opt/scripts");
    /// assert_eq!(script.callable(), "denoise");
    /// # Ok::<(), sb_core::Error>(())
    /// ```
    pub fn resolve(path: &str) -> Result<Self> {
        let (directory, file_name) = match path.rfind(SEPARATOR) {
            Some(idx) => (&path[..idx], &path[idx + SEPARATOR.len_utf8()..]),
            None => ("", path),
        };

        let name_len = file_name.chars().count();
        if name_len <= EXTENSION_LEN {
            return Err(Error::invalid_config(format!(
                "script path '{path}' has file name '{file_name}', which leaves no callable \
                 name once the {EXTENSION_LEN}-character extension is removed"
            )));
        }

        let cut = file_name
            .char_indices()
            .nth(name_len - EXTENSION_LEN)
            .map_or(file_name.len(), |(idx, _)| idx);
        let callable = &file_name[..cut];

        tracing::debug!("Resolved script '{path}' to callable '{callable}' in '{directory}'");

        Ok(Self {
            directory: directory.to_string(),
            callable: callable.to_string(),
        })
    }

    /// Directory the engine must change into; empty when the path had none.
    pub fn directory(&self) -> &str {
        &self.directory
    }

    /// Name the script is invoked by.
    pub fn callable(&self) -> &str {
        &self.callable
    }
}

impl fmt::Display for ScriptReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.directory.is_empty() {
            write!(f, "{}", self.callable)
        } else {
            write!(f, "{}{SEPARATOR}{}", self.directory, self.callable)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn splits_directory_and_callable() {
        let script = ScriptReference::resolve("/home/user/scripts/myFunc.m").unwrap();
        assert_eq!(script.directory(), "/home/user/scripts");
        assert_eq!(script.callable(), "myFunc");
    }

    #[test]
    fn reassembles_to_original_path() {
        for path in [
            "/a/b.m",
            "/opt/scripts/denoise.m",
            "relative/dir/f1.m",
            "/with space/and.dots/run.m",
            "/x/ab.cd",
        ] {
            let script = ScriptReference::resolve(path).unwrap();
            let ext = &path[path.len() - EXTENSION_LEN..];
            assert_eq!(
                format!("{}/{}{}", script.directory(), script.callable(), ext),
                path
            );
        }
    }

    #[test]
    fn no_separator_gives_empty_directory() {
        let script = ScriptReference::resolve("blur.m").unwrap();
        assert_eq!(script.directory(), "");
        assert_eq!(script.callable(), "blur");
    }

    #[test]
    fn root_directory_is_empty_string() {
        let script = ScriptReference::resolve("/blur.m").unwrap();
        assert_eq!(script.directory(), "");
        assert_eq!(script.callable(), "blur");
    }

    #[test]
    fn file_name_shorter_than_extension_is_rejected() {
        assert_matches!(
            ScriptReference::resolve("/opt/scripts/m"),
            Err(Error::InvalidConfiguration(_))
        );
        assert_matches!(ScriptReference::resolve(""), Err(Error::InvalidConfiguration(_)));
    }

    #[test]
    fn bare_extension_is_rejected() {
        let err = ScriptReference::resolve("/opt/scripts/.m").unwrap_err();
        assert!(err.to_string().contains("/opt/scripts/.m"), "got: {err}");
    }

    #[test]
    fn trailing_separator_is_rejected() {
        assert_matches!(
            ScriptReference::resolve("/opt/scripts/"),
            Err(Error::InvalidConfiguration(_))
        );
    }

    #[test]
    fn multibyte_names_do_not_split_characters() {
        let script = ScriptReference::resolve("/données/flou.m").unwrap();
        assert_eq!(script.directory(), "/données");
        assert_eq!(script.callable(), "flou");

        let script = ScriptReference::resolve("/d/é.m").unwrap();
        assert_eq!(script.callable(), "é");
    }

    #[test]
    fn display_joins_parts() {
        let script = ScriptReference::resolve("/opt/f.m").unwrap();
        assert_eq!(script.to_string(), "/opt/f");
        let script = ScriptReference::resolve("f.m").unwrap();
        assert_eq!(script.to_string(), "f");
    }
}
