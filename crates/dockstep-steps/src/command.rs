//! Command-line assembly shared by the steps.

/// Shell used for commands that rely on redirection or heredocs.
pub const SHELL: &str = "/bin/sh";

/// Join tokens with a single space, skipping `None`.
///
/// # Examples
///
/// ```
/// use dockstep_steps::command::join_command;
///
/// let line = join_command([Some("docker"), None, Some("build")]);
/// assert_eq!(line, "docker build");
/// ```
pub fn join_command<'a, I>(tokens: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    tokens.into_iter().flatten().collect::<Vec<_>>().join(" ")
}

/// `sh -c <line>`: redirection tokens mean nothing as plain process
/// arguments, so they need a shell to interpret them.
pub fn shell_wrap(command_line: String) -> Vec<String> {
    vec![SHELL.to_owned(), "-c".to_owned(), command_line]
}
