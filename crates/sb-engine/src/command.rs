//! Text of the statements sent to the engine.
//!
//! Parameters are spliced in verbatim. Callers are responsible for making
//! them valid syntax in the engine's language.

use std::fmt;

/// `cd <directory>`.
pub fn change_directory(directory: &str) -> String {
    format!("cd {directory}")
}

/// One script invocation: `<var> = <callable>(<var><arguments>)`.
///
/// `arguments` is the already-formatted trailing argument string (empty, or
/// `", a, b"`), appended unmodified after the image argument.
///
/// # Example
///
/// ```
/// use sb_engine::InvocationCommand;
///
/// let cmd = InvocationCommand::new("img", "myFunc", ", 2, 0.5");
/// assert_eq!(cmd.to_string(), "img = myFunc(img, 2, 0.5)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvocationCommand<'a> {
    variable: &'a str,
    callable: &'a str,
    arguments: &'a str,
}

impl<'a> InvocationCommand<'a> {
    pub fn new(variable: &'a str, callable: &'a str, arguments: &'a str) -> Self {
        Self {
            variable,
            callable,
            arguments,
        }
    }
}

impl fmt::Display for InvocationCommand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{var} = {callable}({var}{args})",
            var = self.variable,
            callable = self.callable,
            args = self.arguments
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cd_command() {
        assert_eq!(change_directory("/opt/scripts"), "cd /opt/scripts");
    }

    #[test]
    fn invocation_without_arguments() {
        let cmd = InvocationCommand::new("img", "edges", "");
        assert_eq!(cmd.to_string(), "img = edges(img)");
    }

    #[test]
    fn invocation_with_arguments() {
        let cmd = InvocationCommand::new("img", "myFunc", ", 2, 0.5");
        assert_eq!(cmd.to_string(), "img = myFunc(img, 2, 0.5)");
    }

    #[test]
    fn invocation_with_other_variable() {
        let cmd = InvocationCommand::new("frame", "denoise", ", 'median'");
        assert_eq!(cmd.to_string(), "frame = denoise(frame, 'median')");
    }
}
