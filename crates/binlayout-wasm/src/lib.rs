//! WASM bindings for the `binlayout` record codec generator.
//!
//! JavaScript hands over a JSON bundle of records and enums (the shape of
//! [`BundleDef`]), then decodes and encodes payloads against any record in
//! it, or asks for the Rust source of a record's codecs.
//!
//! ```text
//! // const catalog = new WasmCatalog(JSON.stringify({
//! //   records: [{ name: "Pair", fields: [
//! //     { name: "a", type: "u16" }, { name: "b", type: "i8" }
//! //   ] }]
//! // }));
//! //
//! // const { value, read } = catalog.decode("Pair", "big", bytes); // { a: 258, b: -1 }, 3
//! // const encoded = catalog.encode("Pair", "big", value);          // Uint8Array
//! ```
//!
//! Errors are returned to JavaScript as strings built from their `Display`
//! output.

mod convert;

use binlayout::{Catalog, RenderOptions, serde::BundleDef};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Compiled bundle of records.
#[wasm_bindgen]
pub struct WasmCatalog {
    catalog: Catalog,
}

#[wasm_bindgen]
impl WasmCatalog {
    /// Compiles every record of a JSON bundle.
    ///
    /// A malformed bundle, an unknown enum representation or a duplicate type
    /// name fails construction. Records that fail generation are left out and
    /// listed by [`WasmCatalog::errors`].
    #[wasm_bindgen(constructor)]
    pub fn new(bundle_json: &str) -> Result<WasmCatalog, JsValue> {
        let def: BundleDef = serde_json::from_str(bundle_json).map_err(convert::error_to_js)?;
        let catalog = Catalog::try_from(def).map_err(convert::error_to_js)?;
        Ok(WasmCatalog { catalog })
    }

    /// Names of the compiled records, in declaration order.
    pub fn records(&self) -> Vec<String> {
        self.catalog.records().map(str::to_string).collect()
    }

    /// Generation errors of the records that did not compile.
    pub fn errors(&self) -> Vec<String> {
        self.catalog.errors().iter().map(|e| e.to_string()).collect()
    }

    /// Decodes `data` as `record`; `order` is `"little"`, `"big"` or omitted
    /// for records pinned to one byte order.
    ///
    /// Returns `{ value, read }` with the decoded object and the number of
    /// bytes consumed.
    pub fn decode(
        &self,
        record: &str,
        order: Option<String>,
        data: &[u8],
    ) -> Result<JsValue, JsValue> {
        let codec = self.codec(record)?;
        let (decoded, read) = codec
            .decode_with(convert::operation(order)?, data)
            .map_err(convert::error_to_js)?;

        let mut out = serde_json::Map::new();
        out.insert(
            "value".to_string(),
            serde_json::Value::Object(convert::record_to_json(decoded)),
        );
        out.insert("read".to_string(), serde_json::Value::from(read));

        out.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(convert::error_to_js)
    }

    /// Encodes a JS object as `record` and returns the written bytes.
    ///
    /// The output buffer is sized from the record's static size plus
    /// `extra` bytes for composite fields.
    pub fn encode(
        &self,
        record: &str,
        order: Option<String>,
        obj: JsValue,
        extra: Option<usize>,
    ) -> Result<Vec<u8>, JsValue> {
        let codec = self.codec(record)?;
        let operation = convert::operation(order)?;

        let raw: serde_json::Map<String, serde_json::Value> =
            serde_wasm_bindgen::from_value(obj).map_err(convert::error_to_js)?;
        let values = convert::json_to_record(raw)?;

        let size = codec
            .generated()
            .codecs
            .first()
            .map_or(0, |ir| ir.static_size)
            + extra.unwrap_or(0);
        let mut buffer = vec![0u8; size];

        let written = codec
            .encode_with(operation, &values, &mut buffer)
            .map_err(convert::error_to_js)?;
        buffer.truncate(written);
        Ok(buffer)
    }

    /// Rust source of `record`'s codecs.
    pub fn render(&self, record: &str) -> Result<String, JsValue> {
        let codec = self.codec(record)?;
        Ok(binlayout::render(codec.generated(), &RenderOptions::default()))
    }
}

impl WasmCatalog {
    fn codec(&self, record: &str) -> Result<&binlayout::RecordCodec, JsValue> {
        self.catalog
            .codec(record)
            .ok_or_else(|| JsValue::from_str(&format!("unknown record `{}`", record)))
    }
}
