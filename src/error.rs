// src/error.rs
// =============================================================================
// Every way a preview run can fail.
//
// All of these are fatal: the run stops at the first one and main() reports
// the message once. That is why each variant carries the path or URL that
// was being worked on when things went wrong.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreviewError {
    /// The folder URL is not a full https://github.com/ URL
    #[error("Invalid url \"{0}\": must be a full https://github.com/ url")]
    InvalidUrl(String),

    /// The folder URL has a user segment but no repository segment
    #[error("Repo not found in url \"{0}\"")]
    RepoNotFound(String),

    /// A directory listing could not be fetched
    #[error("Invalid repository \"{repo}\": listing {url} answered HTTP {status}")]
    InvalidRepository { repo: String, url: String, status: u16 },

    /// A listing address answered with a single file instead of a folder
    #[error("{0} is a file, not a folder")]
    NotAFolder(String),

    /// No listing entry matches the path being resolved
    #[error("File \"{0}\" not found in files list")]
    FileNotFound(String),

    /// A listing entry is neither a file nor a directory
    #[error("Entry \"{name}\" has unknown type \"{kind}\"")]
    UnknownEntryType { name: String, kind: String },

    /// A file body could not be fetched
    #[error("Could not fetch \"{path}\": HTTP {status}")]
    HttpError { path: String, status: u16 },

    /// The entry document was fetched but has no content
    #[error("Empty entry document \"{0}\"")]
    EmptyDocument(String),

    /// The request never produced a response (DNS, TLS, connection reset)
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// A listing response was not the JSON we expected
    #[error("Malformed listing from {url}: {source}")]
    MalformedListing {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, PreviewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_names_the_path() {
        let e = PreviewError::FileNotFound("missing.js".to_string());
        assert_eq!(e.to_string(), "File \"missing.js\" not found in files list");
    }

    #[test]
    fn test_http_error_names_path_and_status() {
        let e = PreviewError::HttpError {
            path: "css/site.css".to_string(),
            status: 404,
        };
        assert_eq!(e.to_string(), "Could not fetch \"css/site.css\": HTTP 404");
    }

    #[test]
    fn test_unknown_entry_type_message() {
        let e = PreviewError::UnknownEntryType {
            name: "vendor".to_string(),
            kind: "submodule".to_string(),
        };
        assert!(e.to_string().contains("submodule"));
        assert!(e.to_string().contains("vendor"));
    }
}
