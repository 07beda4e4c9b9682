//! JSON wire form of a [`Layout`].
//!
//! Output is stable: nodes are written sorted by `(layer, order)` and edges in graph edge
//! order, and all struct fields in declaration order. Decoding checks the schema version
//! before anything else.

use crate::graphlib::codec as graph_codec;
use crate::{Error, LAYOUT_SCHEMA_VERSION, Layout, Result};
use serde::Deserialize;
use std::io::Write;

const CONTEXT: &str = "layout JSON";

#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

pub fn encode(layout: &Layout) -> Result<String> {
    serde_json::to_string(layout).map_err(bad_input)
}

pub fn encode_pretty(layout: &Layout) -> Result<String> {
    serde_json::to_string_pretty(layout).map_err(bad_input)
}

pub fn to_writer<W: Write>(writer: W, layout: &Layout, pretty: bool) -> Result<()> {
    let res = if pretty {
        serde_json::to_writer_pretty(writer, layout)
    } else {
        serde_json::to_writer(writer, layout)
    };
    res.map_err(|err| {
        if err.is_io() {
            Error::Io(err.into())
        } else {
            bad_input(err)
        }
    })
}

pub fn decode(text: &str) -> Result<Layout> {
    let probe: VersionProbe = serde_json::from_str(text).map_err(bad_input)?;
    if probe.version != LAYOUT_SCHEMA_VERSION {
        return Err(Error::UnsupportedVersion {
            found: probe.version,
            expected: LAYOUT_SCHEMA_VERSION,
        });
    }
    serde_json::from_str(text).map_err(bad_input)
}

pub fn encode_script(layout: &Layout, var: &str) -> Result<String> {
    Ok(graph_codec::wrap_script(&encode(layout)?, var)?)
}

pub fn decode_script(text: &str, var: &str) -> Result<Layout> {
    decode(graph_codec::unwrap_script(text, var)?)
}

fn bad_input(err: serde_json::Error) -> Error {
    Error::BadInput {
        context: CONTEXT.to_string(),
        message: err.to_string(),
    }
}
