use std::env;
use std::str::FromStr;

/// Retrieves an environment variable and splits it into a vector of strings based on a delimiter.
///
/// # Arguments
/// - `var`: The name of the environment variable.
/// - `delimiter`: The character to split the environment variable's value by.
///
/// # Returns
/// - `Vec<String>` with blank entries removed.
pub fn get_env_var_as_vec(var: &str, delimiter: char) -> Vec<String> {
    split_list(&env::var(var).unwrap_or_default(), delimiter)
}

/// Splits a delimited list, trimming entries and dropping blank ones.
pub fn split_list(value: &str, delimiter: char) -> Vec<String> {
    value
        .split(delimiter)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Retrieves a non-empty environment variable.
pub fn get_env_var(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}

/// Retrieves an environment variable and parses it, falling back to `default`
/// when unset. Returns an error message naming the variable when the value
/// does not parse.
pub fn get_env_var_parsed<T: FromStr>(var: &str, default: T) -> Result<T, String> {
    match get_env_var(var) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| format!("{} has an invalid value: '{}'", var, raw)),
        None => Ok(default),
    }
}
