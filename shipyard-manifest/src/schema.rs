//! Typed schema for the generator manifest.
//!
//! Managed spine: `spec.generators[0].matrix.generators[]`, which must hold
//! a list generator and a pull-request generator. Every struct carries a
//! flattened passthrough map so fields this system does not manage survive a
//! load/save round trip. Passthrough keys serialize in sorted order; the
//! on-disk form is canonical, not byte-preserving.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::{shape_err, ManifestError};

/// Template placeholder the pull-request generator's repository reference is
/// normalized to on every mutation.
pub const REPO_PLACEHOLDER: &str = "{{ .repo }}";

// ---------------------------------------------------------------------------
// Document types
// ---------------------------------------------------------------------------

/// One `{app, repo}` entry in the list generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub app: String,
    pub repo: String,
    #[serde(flatten)]
    pub rest: BTreeMap<String, Value>,
}

impl Element {
    pub fn new(app: &str, repo: &str) -> Self {
        Element {
            app: app.to_string(),
            repo: repo.to_string(),
            rest: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListGenerator {
    pub elements: Vec<Element>,
    #[serde(flatten)]
    pub rest: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubPullRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(flatten)]
    pub rest: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequestGenerator {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<GithubPullRequest>,
    #[serde(flatten)]
    pub rest: BTreeMap<String, Value>,
}

/// One entry of `matrix.generators`. Exactly one of the known generator
/// kinds is expected per entry; unknown kinds land in `rest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct InnerGenerator {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<ListGenerator>,
    #[serde(
        rename = "pullRequest",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub pull_request: Option<PullRequestGenerator>,
    #[serde(flatten)]
    pub rest: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub generators: Vec<InnerGenerator>,
    #[serde(flatten)]
    pub rest: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopGenerator {
    pub matrix: Matrix,
    #[serde(flatten)]
    pub rest: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spec {
    pub generators: Vec<TopGenerator>,
    #[serde(flatten)]
    pub rest: BTreeMap<String, Value>,
}

/// The generator manifest document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub spec: Spec,
    #[serde(flatten)]
    pub rest: BTreeMap<String, Value>,
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

impl Manifest {
    /// Check the managed spine: a matrix generator holding both a list
    /// generator and a pull-request generator.
    pub fn validate(&self) -> Result<(), ManifestError> {
        self.list_generator()?;
        self.pull_request_generator()?;
        Ok(())
    }

    fn matrix(&self) -> Result<&Matrix, ManifestError> {
        self.spec
            .generators
            .first()
            .map(|g| &g.matrix)
            .ok_or_else(|| shape_err("spec.generators is empty"))
    }

    fn matrix_mut(&mut self) -> Result<&mut Matrix, ManifestError> {
        self.spec
            .generators
            .first_mut()
            .map(|g| &mut g.matrix)
            .ok_or_else(|| shape_err("spec.generators is empty"))
    }

    fn list_generator(&self) -> Result<&ListGenerator, ManifestError> {
        self.matrix()?
            .generators
            .iter()
            .find_map(|g| g.list.as_ref())
            .ok_or_else(|| shape_err("no list generator under matrix.generators"))
    }

    fn list_generator_mut(&mut self) -> Result<&mut ListGenerator, ManifestError> {
        self.matrix_mut()?
            .generators
            .iter_mut()
            .find_map(|g| g.list.as_mut())
            .ok_or_else(|| shape_err("no list generator under matrix.generators"))
    }

    fn pull_request_generator(&self) -> Result<&PullRequestGenerator, ManifestError> {
        self.matrix()?
            .generators
            .iter()
            .find_map(|g| g.pull_request.as_ref())
            .ok_or_else(|| shape_err("no pull-request generator under matrix.generators"))
    }

    fn pull_request_generator_mut(&mut self) -> Result<&mut PullRequestGenerator, ManifestError> {
        self.matrix_mut()?
            .generators
            .iter_mut()
            .find_map(|g| g.pull_request.as_mut())
            .ok_or_else(|| shape_err("no pull-request generator under matrix.generators"))
    }

    /// The list generator's elements.
    pub fn elements(&self) -> Result<&[Element], ManifestError> {
        Ok(&self.list_generator()?.elements)
    }

    /// Whether an element with this `app` exists.
    pub fn has_element(&self, app: &str) -> Result<bool, ManifestError> {
        Ok(self.elements()?.iter().any(|e| e.app == app))
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Append `{app, repo}` unless an element with the same `app` already
    /// exists. Returns whether an element was appended.
    ///
    /// Also re-normalizes the pull-request repository reference (the
    /// reference drifts when the manifest is hand-edited).
    pub fn add_element(&mut self, app: &str, repo: &str) -> Result<bool, ManifestError> {
        self.normalize_pull_request_repo()?;
        let list = self.list_generator_mut()?;
        if list.elements.iter().any(|e| e.app == app) {
            return Ok(false);
        }
        list.elements.push(Element::new(app, repo));
        Ok(true)
    }

    /// Drop every element whose `app` matches. Returns whether anything was
    /// removed. Also re-normalizes the pull-request repository reference.
    pub fn remove_element(&mut self, app: &str) -> Result<bool, ManifestError> {
        self.normalize_pull_request_repo()?;
        let list = self.list_generator_mut()?;
        let before = list.elements.len();
        list.elements.retain(|e| e.app != app);
        Ok(list.elements.len() != before)
    }

    /// Pin `pullRequest.github.repo` to [`REPO_PLACEHOLDER`]. No-op when the
    /// pull-request generator has no `github` block.
    fn normalize_pull_request_repo(&mut self) -> Result<(), ManifestError> {
        let pr = self.pull_request_generator_mut()?;
        if let Some(github) = pr.github.as_mut() {
            github.repo = Some(REPO_PLACEHOLDER.to_string());
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
