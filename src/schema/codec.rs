use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{SlideError, SlideResult};
use crate::project::model::Project;

/// Encode a project as a canonical JSON document.
///
/// Field order follows the model's declaration order, names are lower camel case, absent
/// optional fields are omitted and object/action variants carry a `type` discriminator.
#[tracing::instrument(skip(project), fields(project = %project.id))]
pub fn encode(project: &Project) -> SlideResult<String> {
    serde_json::to_string(project).map_err(|e| SlideError::format(format!("encode project: {e}")))
}

/// Decode a project from a JSON document.
///
/// Fails with [`SlideError::Format`] when the text is not JSON or the root object lacks any of
/// `id`, `name`, `slides`, `variables`. No partial project is ever returned. The result is not
/// validated; run [`crate::validate`] before playback.
pub fn decode(document: &str) -> SlideResult<Project> {
    serde_json::from_str(document).map_err(|e| SlideError::format(format!("decode project: {e}")))
}

/// Decode a project from a JSON reader.
pub fn decode_reader<R: Read>(r: R) -> SlideResult<Project> {
    serde_json::from_reader(r).map_err(|e| SlideError::format(format!("decode project: {e}")))
}

/// Decode a project from a JSON file on disk.
pub fn decode_path(path: impl AsRef<Path>) -> SlideResult<Project> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open project '{}'", path.display()))?;
    decode_reader(BufReader::new(f))
}

impl Project {
    /// Parse a project from a JSON file on disk. See [`decode_path`].
    pub fn from_path(path: impl AsRef<Path>) -> SlideResult<Self> {
        decode_path(path)
    }

    /// Encode this project. See [`encode`].
    pub fn to_json(&self) -> SlideResult<String> {
        encode(self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/codec.rs"]
mod tests;
