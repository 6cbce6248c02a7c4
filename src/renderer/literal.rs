use super::ast::{BitStyle, HexStyle, Literal};
use super::config::SqlRenderCfg;
use super::error::{Error, Result};
use super::writer::{SqlWriter, to_upper};

/// 'it''s': одинарная кавычка удваивается.
pub fn quote_string(s: &str) -> String {
    let mut esc = String::with_capacity(s.len() + 2);
    esc.push('\'');
    for ch in s.chars() {
        if ch == '\'' {
            esc.push_str("''");
        } else {
            esc.push(ch);
        }
    }
    esc.push('\'');
    esc
}

/// `_latin1` → `_LATIN1 `
fn push_charset_prefix(w: &mut SqlWriter, prefix: Option<&str>) {
    if let Some(p) = prefix.filter(|p| !p.is_empty()) {
        w.push(to_upper(p));
        w.push_char(' ');
    }
}

pub fn render_literal(w: &mut SqlWriter, lit: &Literal, cfg: &SqlRenderCfg) -> Result<()> {
    match lit {
        Literal::String { value, prefix } => {
            push_charset_prefix(w, prefix.as_deref());
            w.push(quote_string(value));
        }
        Literal::National { value } => {
            w.push_char('N');
            w.push(quote_string(value));
        }
        Literal::Hex {
            value,
            style,
            prefix,
        } => {
            push_charset_prefix(w, prefix.as_deref());
            // в T-SQL нет X'..'
            let zero_x = matches!(style, HexStyle::ZeroX) || cfg.dialect.hex_string_as_zero_x();
            if zero_x {
                w.push("0x");
                w.push(value);
            } else {
                w.push("X'");
                w.push(value);
                w.push_char('\'');
            }
        }
        Literal::Bit {
            value,
            style,
            prefix,
        } => {
            push_charset_prefix(w, prefix.as_deref());
            match style {
                BitStyle::BQuote => {
                    w.push("b'");
                    w.push(value);
                    w.push_char('\'');
                }
                BitStyle::ZeroB => {
                    w.push("0b");
                    w.push(value);
                }
            }
        }
        Literal::Number { value } => {
            if value.is_empty() {
                return Err(Error::malformed("number literal", "value"));
            }
            w.push(value);
        }
        Literal::Bool { value } => w.push(if *value { "TRUE" } else { "FALSE" }),
        Literal::Null => w.push("NULL"),
        Literal::Typed { kind, value } => {
            w.push(to_upper(kind));
            w.push_char(' ');
            w.push(quote_string(value));
        }
    }
    Ok(())
}
