use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

/// Characters escaped when a value becomes a single URL path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'%')
    .add(b'/');

/// Like [`SEGMENT`] but keeps `/`, for document paths that span directories.
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'%');

/// The repository coordinates a request addressed.
///
/// Slug resolution happens upstream in the host application; by the time an
/// error page renders, these fields hold whatever the request asked for,
/// whether or not it exists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlugProperties {
    /// The GitHub organization or user
    pub owner: String,
    /// The repository name
    pub repository: String,
    /// The branch, tag, or commit the request pinned, if any
    #[serde(rename = "ref")]
    pub git_ref: String,
    /// The document path below the repository's docs directory
    pub path: String,
}

impl SlugProperties {
    /// The repository's home on GitHub.
    pub fn github_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repository)
    }

    /// GitHub's new-file editor, pointed at the document the request wanted.
    /// Content is read from the repository's `docs/` directory, so the
    /// suggested path keeps that prefix.
    pub fn new_file_url(&self) -> String {
        format!(
            "https://github.com/{}/{}/new/{}/docs/{}",
            self.owner,
            self.repository,
            utf8_percent_encode(&self.git_ref, SEGMENT),
            utf8_percent_encode(&self.path, PATH),
        )
    }

    /// Path to the hosted debug view for this slug. The debug tool itself
    /// lives with the host application; the error pages only link to it.
    pub fn debug_url(&self) -> String {
        let mut url = format!("/_debug/{}/{}", self.owner, self.repository);

        if !self.git_ref.is_empty() {
            url.push('~');
            url.push_str(&utf8_percent_encode(&self.git_ref, SEGMENT).to_string());
        }

        if !self.path.is_empty() {
            url.push('/');
            url.push_str(&utf8_percent_encode(&self.path, PATH).to_string());
        }

        url
    }
}
