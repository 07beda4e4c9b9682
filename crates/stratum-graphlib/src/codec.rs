//! JSON wire form of a [`Graph`].
//!
//! A graph is a JSON object mapping each node identifier to the array of its edge targets.
//! Keys are always written in identifier order and arrays in stored order, so encoding the
//! same graph twice yields the same bytes. Decoding only checks the JSON shape; callers run
//! [`Graph::validate`] themselves.
//!
//! Graphs (and layouts, see `stratum::codec`) can also be wrapped as a script-level variable
//! assignment, `var <name> = <json>;`, for direct inclusion in generated pages.

use crate::{Error, Graph, Result};
use serde::Serialize;
use std::io::{Read, Write};

const CONTEXT: &str = "graph JSON";

pub fn encode(g: &Graph) -> Result<String> {
    to_string(g, false)
}

pub fn encode_pretty(g: &Graph) -> Result<String> {
    to_string(g, true)
}

pub fn to_writer<W: Write>(writer: W, g: &Graph, pretty: bool) -> Result<()> {
    write_json(writer, g, pretty)
}

pub fn decode(text: &str) -> Result<Graph> {
    serde_json::from_str(text).map_err(|err| Error::bad_input(CONTEXT, err))
}

pub fn from_reader<R: Read>(reader: R) -> Result<Graph> {
    serde_json::from_reader(reader).map_err(|err| {
        if err.is_io() {
            Error::Io(err.into())
        } else {
            Error::bad_input(CONTEXT, err)
        }
    })
}

pub fn encode_script(g: &Graph, var: &str) -> Result<String> {
    wrap_script(&encode(g)?, var)
}

pub fn decode_script(text: &str, var: &str) -> Result<Graph> {
    decode(unwrap_script(text, var)?)
}

/// Wraps already-encoded JSON as `var <var> = <json>;` followed by a newline.
pub fn wrap_script(json: &str, var: &str) -> Result<String> {
    check_script_var(var)?;
    Ok(format!("var {var} = {json};\n"))
}

/// Strips the `var <var> = ` prefix and `;` suffix written by [`wrap_script`].
pub fn unwrap_script<'a>(text: &'a str, var: &str) -> Result<&'a str> {
    check_script_var(var)?;
    let prefix = format!("var {var} = ");
    text.trim()
        .strip_prefix(prefix.as_str())
        .and_then(|rest| rest.strip_suffix(';'))
        .ok_or_else(|| {
            Error::bad_input(
                "script",
                format!("expected `{prefix}<json>;` around the embedded data"),
            )
        })
}

fn check_script_var(var: &str) -> Result<()> {
    let mut chars = var.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if valid_start && valid_rest {
        Ok(())
    } else {
        Err(Error::bad_input(
            "script",
            format!("`{var}` is not a valid script variable name"),
        ))
    }
}

pub(crate) fn to_string(value: &impl Serialize, pretty: bool) -> Result<String> {
    let mut buf: Vec<u8> = Vec::new();
    write_json(&mut buf, value, pretty)?;
    String::from_utf8(buf).map_err(|err| Error::bad_input(CONTEXT, err))
}

fn write_json<W: Write>(writer: W, value: &impl Serialize, pretty: bool) -> Result<()> {
    let res = if pretty {
        serde_json::to_writer_pretty(writer, value)
    } else {
        serde_json::to_writer(writer, value)
    };
    res.map_err(|err| {
        if err.is_io() {
            Error::Io(err.into())
        } else {
            Error::bad_input(CONTEXT, err)
        }
    })
}
