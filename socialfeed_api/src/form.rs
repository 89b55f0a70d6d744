//! Multipart payload encoding.
//!
//! Request payloads are built as a tree of [`FormValue`]s and flattened into a
//! single level of multipart fields. Nested maps use bracket notation
//! (`parent[child]`) and file lists repeat the same field name once per file.

use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::Error;

/// An uploaded file: name, optional MIME type, and contents.
#[derive(Clone, Debug, PartialEq)]
pub struct FilePart {
    pub file_name: String,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl FilePart {
    pub fn new(file_name: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            mime: None,
            bytes,
        }
    }

    pub fn with_mime(mut self, mime: &str) -> Self {
        self.mime = Some(mime.to_string());
        self
    }

    /// Reads a file from disk, guessing the MIME type from its extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let mime = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(|e| mime_for_extension(&e.to_ascii_lowercase()))
            .map(str::to_string);
        Ok(Self {
            file_name,
            mime,
            bytes,
        })
    }
}

fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "mp4" => Some("video/mp4"),
        "webm" => Some("video/webm"),
        "mov" => Some("video/quicktime"),
        _ => None,
    }
}

/// One node of a request payload.
#[derive(Clone, Debug, PartialEq)]
pub enum FormValue {
    Text(String),
    File(FilePart),
    Map(Fields),
    Files(Vec<FilePart>),
}

/// An ordered mapping of field name to value. Insertion order is wire order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fields(Vec<(String, FormValue)>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Fields::insert`].
    pub fn with(mut self, name: &str, value: impl Into<FormValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Appends a field. Names are not deduplicated.
    pub fn insert(&mut self, name: &str, value: impl Into<FormValue>) {
        self.0.push((name.to_string(), value.into()));
    }

    /// Appends a field only when `value` is `Some`.
    pub fn with_opt<V: Into<FormValue>>(mut self, name: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.insert(name, value);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        FormValue::Text(value)
    }
}

impl From<&String> for FormValue {
    fn from(value: &String) -> Self {
        FormValue::Text(value.clone())
    }
}

impl From<i64> for FormValue {
    fn from(value: i64) -> Self {
        FormValue::Text(value.to_string())
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        FormValue::Text(value.to_string())
    }
}

impl From<FilePart> for FormValue {
    fn from(value: FilePart) -> Self {
        FormValue::File(value)
    }
}

impl From<Vec<FilePart>> for FormValue {
    fn from(value: Vec<FilePart>) -> Self {
        FormValue::Files(value)
    }
}

impl From<Fields> for FormValue {
    fn from(value: Fields) -> Self {
        FormValue::Map(value)
    }
}

/// A leaf produced by [`flatten`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FlatValue<'a> {
    Text(&'a str),
    File(&'a FilePart),
}

/// Flattens a payload tree into `(field name, leaf)` pairs in wire order.
pub fn flatten(fields: &Fields) -> Vec<(String, FlatValue<'_>)> {
    let mut out = Vec::new();
    for (name, value) in fields.iter() {
        encode(name.to_string(), value, &mut out);
    }
    out
}

fn encode<'a>(name: String, value: &'a FormValue, out: &mut Vec<(String, FlatValue<'a>)>) {
    match value {
        FormValue::Text(text) => out.push((name, FlatValue::Text(text))),
        FormValue::File(file) => out.push((name, FlatValue::File(file))),
        FormValue::Files(files) => {
            for file in files {
                out.push((name.clone(), FlatValue::File(file)));
            }
        }
        FormValue::Map(children) => {
            for (key, child) in children.iter() {
                encode(format!("{}[{}]", name, key), child, out);
            }
        }
    }
}

/// Splits a flattened field name back into its key path:
/// `profile[address][city]` -> `["profile", "address", "city"]`.
pub fn field_path(name: &str) -> Vec<String> {
    let (head, mut rest) = match name.find('[') {
        Some(idx) => (&name[..idx], &name[idx..]),
        None => return vec![name.to_string()],
    };
    let mut path = vec![head.to_string()];
    while let Some(stripped) = rest.strip_prefix('[') {
        match stripped.find(']') {
            Some(end) => {
                path.push(stripped[..end].to_string());
                rest = &stripped[end + 1..];
            }
            None => {
                path.push(stripped.to_string());
                break;
            }
        }
    }
    path
}

/// Builds the multipart body for a payload.
pub(crate) fn to_multipart(fields: &Fields) -> Result<Form, Error> {
    let mut form = Form::new();
    for (name, leaf) in flatten(fields) {
        form = match leaf {
            FlatValue::Text(text) => form.text(name, text.to_string()),
            FlatValue::File(file) => {
                let mut part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
                if let Some(mime) = &file.mime {
                    part = part.mime_str(mime).map_err(|e| Error::Encoding {
                        field: name.clone(),
                        reason: e.to_string(),
                    })?;
                }
                form.part(name, part)
            }
        };
    }
    Ok(form)
}
