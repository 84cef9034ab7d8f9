use super::VariableContext;

/// Replaces every `{name}` occurrence in `text` with the current value of
/// `name`. Unknown names are left as `{name}` untouched; this is deliberately
/// permissive, not an error.
pub fn substitute_template(text: &str, vars: &VariableContext) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match vars.get(name) {
                    Some(value) => out.push_str(&value.to_string()),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                // Unmatched brace: keep it and carry on.
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Quotes an operand so a comparison against a literal string is well-formed.
///
/// Operands are always strings from the user's point of view, so a bare word
/// is ambiguous: a known variable name or a numeric literal passes through
/// unquoted, anything else is wrapped in quotes.
pub fn auto_quote(operand: &str, vars: &VariableContext) -> String {
    quote_unless_known(operand, |name| vars.contains_key(name))
}

pub(crate) fn quote_unless_known(operand: &str, is_name: impl Fn(&str) -> bool) -> String {
    let trimmed = operand.trim();
    if is_name(trimmed) || trimmed.parse::<f64>().is_ok() || is_quoted(trimmed) {
        trimmed.to_string()
    } else {
        format!("\"{}\"", trimmed)
    }
}

/// Strips one layer of surrounding quotes, if present.
pub(crate) fn strip_quotes(text: &str) -> &str {
    let trimmed = text.trim();
    if is_quoted(trimmed) {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}

fn is_quoted(text: &str) -> bool {
    text.len() >= 2
        && ((text.starts_with('"') && text.ends_with('"'))
            || (text.starts_with('\'') && text.ends_with('\'')))
}
