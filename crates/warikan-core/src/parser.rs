//! TOML allocation request parser.
//!
//! Loads request files and directories of request files, and validates them.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{AllocationRequest, Role, DEFAULT_TILT};

/// Intermediate TOML structure for parsing request files.
#[derive(Debug, Deserialize)]
struct TomlRequestFile {
    allocation: TomlAllocationHeader,
    #[serde(default)]
    roles: Vec<TomlRole>,
}

#[derive(Debug, Deserialize)]
struct TomlAllocationHeader {
    #[serde(default)]
    name: Option<String>,
    total_amount: i64,
    #[serde(default = "default_tilt")]
    default_tilt: u8,
    #[serde(default)]
    payer: Option<String>,
    #[serde(default)]
    shortfall_skip: bool,
}

fn default_tilt() -> u8 {
    DEFAULT_TILT
}

#[derive(Debug, Deserialize)]
struct TomlRole {
    name: String,
    #[serde(default)]
    headcount: u32,
}

/// A parsed request file.
#[derive(Debug, Clone)]
pub struct RequestFile {
    /// Optional label from the `[allocation]` table.
    pub name: Option<String>,
    /// Where the request was loaded from.
    pub source: PathBuf,
    pub request: AllocationRequest,
}

impl RequestFile {
    /// The label, falling back to the file stem.
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            self.source
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.source.display().to_string())
        })
    }
}

/// Parse a single TOML request file.
pub fn parse_request(path: &Path) -> Result<RequestFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read request file: {}", path.display()))?;

    parse_request_str(&content, path)
}

/// Parse a TOML string into a `RequestFile` (useful for testing).
pub fn parse_request_str(content: &str, source_path: &Path) -> Result<RequestFile> {
    let parsed: TomlRequestFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let roles = parsed
        .roles
        .into_iter()
        .map(|r| Role::new(r.name, r.headcount))
        .collect();

    let header = parsed.allocation;
    Ok(RequestFile {
        name: header.name,
        source: source_path.to_path_buf(),
        request: AllocationRequest {
            roles,
            total_amount: header.total_amount,
            default_tilt: header.default_tilt,
            payer: header.payer,
            shortfall_skip: header.shortfall_skip,
        },
    })
}

/// Recursively load all `.toml` request files from a directory.
pub fn load_request_directory(dir: &Path) -> Result<Vec<RequestFile>> {
    let mut files = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            files.extend(load_request_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_request(&path) {
                Ok(file) => files.push(file),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(files)
}

/// Load a single file, or every request file under a directory.
pub fn load_requests(path: &Path) -> Result<Vec<RequestFile>> {
    if path.is_dir() {
        load_request_directory(path)
    } else {
        Ok(vec![parse_request(path)?])
    }
}

/// A warning from request validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The role concerned (if applicable).
    pub role: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a request file for common issues.
///
/// Input errors that would make `allocate` fail are reported here too.
pub fn validate_request(file: &RequestFile) -> Vec<ValidationWarning> {
    let request = &file.request;
    let mut warnings = Vec::new();

    if let Err(e) = request.validate() {
        warnings.push(ValidationWarning {
            role: None,
            message: format!("invalid request: {e}"),
        });
    }

    if request.roles.is_empty() {
        warnings.push(ValidationWarning {
            role: None,
            message: "no roles defined".into(),
        });
    } else if request.total_headcount() == 0 {
        warnings.push(ValidationWarning {
            role: None,
            message: "total headcount is zero; no allocation is possible".into(),
        });
    }

    for role in &request.roles {
        if role.headcount == 0 && request.total_headcount() > 0 {
            warnings.push(ValidationWarning {
                role: Some(role.name.clone()),
                message: "headcount is zero".into(),
            });
        }
    }

    if request.total_amount < 0 {
        warnings.push(ValidationWarning {
            role: None,
            message: "total_amount is negative".into(),
        });
    }

    if request.payer.is_none() {
        warnings.push(ValidationWarning {
            role: None,
            message: "no payer designated; rounding residue will not be settled".into(),
        });
    }

    warnings
}
