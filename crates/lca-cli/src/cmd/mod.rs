pub mod completions;
pub mod dag;
pub mod demo;
pub mod tree;

use std::str::FromStr;

/// Parse a `LEFT:RIGHT` pair such as `1:2` or `-3:7`.
pub fn parse_pair<T: FromStr>(raw: &str) -> Result<(T, T), String>
where
    T::Err: std::fmt::Display,
{
    let (left, right) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected LEFT:RIGHT, got `{raw}`"))?;
    let left = left
        .trim()
        .parse()
        .map_err(|e| format!("invalid id `{left}`: {e}"))?;
    let right = right
        .trim()
        .parse()
        .map_err(|e| format!("invalid id `{right}`: {e}"))?;
    Ok((left, right))
}
