//! Line splitting for the command interpreter.

use hbnb_model::{AttrValue, Record};

/// Splits off the first whitespace-delimited word, honoring single and
/// double quotes. Quotes are removed from the returned word.
pub(crate) fn next_token(s: &str) -> Option<(String, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }

    let mut token = String::new();
    let mut quote = None;
    for (i, c) in s.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => token.push(c),
            (None, '"' | '\'') => quote = Some(c),
            (None, c) if c.is_whitespace() => return Some((token, &s[i..])),
            (None, c) => token.push(c),
        }
    }
    Some((token, ""))
}

/// Rewrites `<Class>.<method>(<args>)` as `<method> <Class> <args>`.
///
/// Commas between arguments become spaces; a `{...}` argument is passed
/// through untouched. Returns `None` when `line` is not in dot form.
pub(crate) fn dot_call(line: &str) -> Option<String> {
    let (class, rest) = line.split_once('.')?;
    let (method, rest) = rest.split_once('(')?;
    let args = rest.trim_end().strip_suffix(')')?;
    if class.is_empty() || class.contains(char::is_whitespace) || method.is_empty() {
        return None;
    }

    let (plain, dict) = match args.find('{') {
        Some(idx) => args.split_at(idx),
        None => (args, ""),
    };
    Some(format!("{method} {class} {} {dict}", commas_to_spaces(plain)))
}

fn commas_to_spaces(s: &str) -> String {
    let mut quote = None;
    s.chars()
        .map(|c| match (quote, c) {
            (Some(q), c) if c == q => {
                quote = None;
                c
            }
            (None, '"' | '\'') => {
                quote = Some(c);
                c
            }
            (None, ',') => ' ',
            (_, c) => c,
        })
        .collect()
}

/// Parses `key=value` parameters for `create`.
///
/// `"..."` is a string (`_` becomes a space, `\"` an escaped quote), a value
/// containing `.` is a float, anything else an integer. Pairs that do not
/// parse, or that parse to a non-finite float, are skipped.
pub(crate) fn create_params(s: &str) -> Record {
    s.split_whitespace()
        .filter_map(|pair| {
            let (key, raw) = pair.split_once('=')?;
            if key.is_empty() {
                return None;
            }
            let value = if let Some(inner) = raw
                .strip_prefix('"')
                .and_then(|r| r.strip_suffix('"'))
            {
                AttrValue::Str(inner.replace('_', " ").replace("\\\"", "\""))
            } else if raw.contains('.') {
                AttrValue::Float(raw.parse::<f64>().ok().filter(|x| x.is_finite())?)
            } else {
                AttrValue::Int(raw.parse().ok()?)
            };
            Some((key.to_owned(), value))
        })
        .collect()
}

/// Parses a `{...}` literal for `update`. Single-quoted strings are accepted
/// alongside double-quoted ones. Returns `None` for anything that is not a
/// flat object.
pub(crate) fn dict_literal(s: &str) -> Option<Record> {
    let normalized = single_to_double_quotes(s.trim());
    let object: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&normalized).ok()?;
    object
        .into_iter()
        .map(|(k, v)| AttrValue::try_from(v).ok().map(|v| (k, v)))
        .collect()
}

/// Rewrites single-quote string delimiters as double quotes. Quote
/// characters inside a string are left alone, except a `"` inside a
/// single-quoted string, which gets escaped.
fn single_to_double_quotes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut quote = None;
    let mut escaped = false;
    for c in s.chars() {
        if escaped {
            // `\'` has no JSON equivalent
            if c != '\'' {
                out.push('\\');
            }
            out.push(c);
            escaped = false;
            continue;
        }
        match (quote, c) {
            (Some(_), '\\') => escaped = true,
            (None, '"' | '\'') => {
                quote = Some(c);
                out.push('"');
            }
            (Some(q), c) if c == q => {
                quote = None;
                out.push('"');
            }
            (Some('\''), '"') => out.push_str("\\\""),
            (_, c) => out.push(c),
        }
    }
    out
}
