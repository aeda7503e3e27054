use std::fmt::Write as _;

use serde::de::DeserializeOwned;

use crate::document::Document;

pub const DOCUMENT_SEPARATOR: &str = "---";

pub fn from_str<T>(s: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    serde_yaml::from_str(s).map_err(Into::into)
}

/// Emits YAML that YAML 1.1 consumers read back the same, quoting strings such as `"yes"`.
pub fn to_string<T>(value: &T) -> anyhow::Result<String>
where
    T: serde::Serialize,
{
    serde_saphyr::to_string(value).map_err(Into::into)
}

/// Splits a multi-document stream on lines consisting of `---`, dropping blank segments.
pub fn split_documents(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim_end() == DOCUMENT_SEPARATOR {
            segments.push(&text[start..offset]);
            start = offset + line.len();
        }
        offset += line.len();
    }
    segments.push(&text[start..]);

    segments.retain(|segment| !segment.trim().is_empty());
    segments
}

/// Serializes documents as a stream: a leading `---` and one `---` between documents.
pub fn to_stream<'a>(documents: impl IntoIterator<Item = &'a Document>) -> anyhow::Result<String> {
    let mut out = String::new();
    writeln!(out, "{DOCUMENT_SEPARATOR}")?;
    for (i, document) in documents.into_iter().enumerate() {
        if i > 0 {
            writeln!(out, "{DOCUMENT_SEPARATOR}")?;
        }
        out.push_str(&to_string(document)?);
    }

    Ok(out)
}
