// ============================================================================
// src/util/paths.rs – `$VAR` and `~` expansion for user supplied paths
// ============================================================================

use regex::{Captures, Regex};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

fn var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$(\w+|\{[^}]*\})").expect("static pattern"))
}

/// Expand environment variables, then a leading `~`, against the real
/// environment and home directory.
pub fn expand_path(value: &str) -> PathBuf {
    let home = dirs::home_dir();
    expand_path_with(value, |name| env::var(name).ok(), home.as_deref())
}

/// `$NAME` and `${NAME}` are replaced when `lookup` knows the name and left
/// as written otherwise. Only `~` and `~/...` are expanded; `~user` is kept.
pub fn expand_path_with<F>(value: &str, lookup: F, home: Option<&Path>) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    let expanded = var_pattern().replace_all(value, |caps: &Captures<'_>| {
        let name = caps[1].trim_start_matches('{').trim_end_matches('}');
        lookup(name).unwrap_or_else(|| caps[0].to_string())
    });
    expand_user(&expanded, home)
}

fn expand_user(value: &str, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return PathBuf::from(value);
    };
    if value == "~" {
        return home.to_path_buf();
    }
    match value.strip_prefix("~/") {
        Some(rest) => home.join(rest.trim_start_matches('/')),
        None => PathBuf::from(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(name: &str) -> Option<String> {
        match name {
            "KEYS" => Some("/srv/keys".into()),
            "NAME" => Some("win.pem".into()),
            _ => None,
        }
    }

    #[test]
    fn expands_both_variable_forms() {
        let home = Path::new("/home/ops");
        assert_eq!(
            expand_path_with("$KEYS/${NAME}", env, Some(home)),
            PathBuf::from("/srv/keys/win.pem")
        );
    }

    #[test]
    fn unknown_variables_are_left_alone() {
        assert_eq!(
            expand_path_with("$MISSING/${ALSO_MISSING}/k.pem", env, None),
            PathBuf::from("$MISSING/${ALSO_MISSING}/k.pem")
        );
    }

    #[test]
    fn tilde_expands_to_home() {
        let home = Path::new("/home/ops");
        assert_eq!(
            expand_path_with("~/keys/id.pem", env, Some(home)),
            PathBuf::from("/home/ops/keys/id.pem")
        );
        assert_eq!(expand_path_with("~", env, Some(home)), home.to_path_buf());
        assert_eq!(
            expand_path_with("~other/id.pem", env, Some(home)),
            PathBuf::from("~other/id.pem")
        );
    }

    #[test]
    fn variable_may_expand_to_tilde_path() {
        let home = Path::new("/home/ops");
        let lookup = |name: &str| (name == "K").then(|| "~/k.pem".to_string());
        assert_eq!(
            expand_path_with("$K", lookup, Some(home)),
            PathBuf::from("/home/ops/k.pem")
        );
    }

    #[test]
    fn without_home_tilde_is_kept() {
        assert_eq!(
            expand_path_with("~/id.pem", env, None),
            PathBuf::from("~/id.pem")
        );
    }
}
