//! `$name` placeholder substitution for message templates.
//!
//! Syntax:
//! - `$name` where `name` matches `[_A-Za-z][_A-Za-z0-9]*`
//! - `${name}` for a placeholder directly followed by identifier characters
//! - `$$` for a literal `$`
//!
//! Any other use of `$` is a malformed placeholder.

use crate::value::Fields;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("no value for placeholder ${name}")]
    MissingKey { name: String },

    #[error("invalid placeholder in template: line {line}, col {column}")]
    InvalidPlaceholder { line: usize, column: usize },
}

/// Replace every placeholder in `template` with the rendered value of the
/// matching entry in `fields`.
pub fn substitute(template: &str, fields: &Fields) -> Result<String, TemplateError> {
    // Fast path: most log messages carry no placeholders at all.
    if !template.contains('$') {
        return Ok(template.to_string());
    }

    let bytes = template.as_bytes();
    let mut out = String::with_capacity(template.len());
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            i += 1;
            continue;
        }
        out.push_str(&template[literal_start..i]);

        let (name, end) = match bytes.get(i + 1) {
            Some(b'$') => {
                out.push('$');
                i += 2;
                literal_start = i;
                continue;
            }
            Some(b'{') => {
                let start = i + 2;
                let len = identifier_len(&bytes[start..]);
                if len == 0 || bytes.get(start + len) != Some(&b'}') {
                    return Err(invalid_at(template, i));
                }
                (&template[start..start + len], start + len + 1)
            }
            Some(_) => {
                let start = i + 1;
                let len = identifier_len(&bytes[start..]);
                if len == 0 {
                    return Err(invalid_at(template, i));
                }
                (&template[start..start + len], start + len)
            }
            None => return Err(invalid_at(template, i)),
        };

        let value = fields
            .get(name)
            .ok_or_else(|| TemplateError::MissingKey { name: name.to_string() })?;
        out.push_str(&value.render());

        i = end;
        literal_start = end;
    }

    out.push_str(&template[literal_start..]);
    Ok(out)
}

fn identifier_len(bytes: &[u8]) -> usize {
    match bytes.first() {
        Some(b) if b.is_ascii_alphabetic() || *b == b'_' => {}
        _ => return 0,
    }
    bytes
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count()
}

fn invalid_at(template: &str, offset: usize) -> TemplateError {
    let before = &template[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |p| p + 1);
    let column = template[line_start..offset].chars().count() + 1;
    TemplateError::InvalidPlaceholder { line, column }
}
