//! # Fixture Files
//!
//! TOML description of an atom table plus the queries to run against it.
//!
//! ```toml
//! [[types]]
//! name = "ConceptNode"
//! parent = "Node"
//!
//! [[atoms]]
//! handle = 1
//! type = "ConceptNode"
//! name = "cat"
//! sti = 12
//!
//! [[atoms]]
//! handle = 2
//! type = "ListLink"
//! outgoing = [1]
//!
//! [[queries]]
//! name = "lists"
//! sources = [{ kind = "by_type", type = "ListLink" }]
//! criteria = [{ kind = "arity", arity = 1 }]
//! ```
//!
//! Types are registered in file order, so a parent must appear before its
//! children. Atoms are inserted in file order as well: a link may only point
//! at atoms listed above it. Type names in queries resolve through the
//! table's registry.

use crate::error::CliError;
use atomset_core::{
    Arity, Atom, AtomSetError, AtomTable, AttentionValue, CompositeTruthValue, Criterion, Handle,
    IndicatorType, Query, Source, Sti, TruthValue, Type, TypeRegistry, VersionHandle,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

// =============================================================================
// FILE LIMITS
// =============================================================================

/// Maximum fixture file size (16 MB).
const MAX_FIXTURE_FILE_SIZE: u64 = 16 * 1024 * 1024;

// =============================================================================
// FIXTURE
// =============================================================================

/// A parsed fixture file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fixture {
    #[serde(default)]
    pub types: Vec<TypeSpec>,
    #[serde(default)]
    pub atoms: Vec<AtomSpec>,
    #[serde(default)]
    pub queries: Vec<QuerySpec>,
}

impl Fixture {
    /// Read and parse a fixture file.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let io_error = |e: std::io::Error| CliError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let metadata = std::fs::metadata(path).map_err(io_error)?;
        if metadata.len() > MAX_FIXTURE_FILE_SIZE {
            return Err(CliError::Parse(format!(
                "File size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_FIXTURE_FILE_SIZE
            )));
        }

        let contents = std::fs::read_to_string(path).map_err(io_error)?;
        let fixture = Self::parse(&contents)?;
        tracing::info!(
            path = %path.display(),
            types = fixture.types.len(),
            atoms = fixture.atoms.len(),
            queries = fixture.queries.len(),
            "fixture loaded"
        );
        Ok(fixture)
    }

    /// Parse fixture text.
    pub fn parse(contents: &str) -> Result<Self, CliError> {
        toml::from_str(contents).map_err(|e| CliError::Parse(e.to_string()))
    }

    /// Build the atom table the fixture describes.
    pub fn build_table(&self) -> Result<AtomTable, AtomSetError> {
        let mut table = AtomTable::new();

        for spec in &self.types {
            let parent = resolve_type(&table, &spec.parent)?;
            table.add_type(&spec.name, parent)?;
        }

        for spec in &self.atoms {
            let atom = spec.to_atom(&table)?;
            table.insert(Handle(spec.handle), atom)?;
        }

        tracing::debug!(atoms = table.len(), types = table.classes().len(), "atom table built");
        Ok(table)
    }

    /// Find a stored query by name.
    #[must_use]
    pub fn query(&self, name: &str) -> Option<&QuerySpec> {
        self.queries.iter().find(|q| q.name == name)
    }
}

fn resolve_type<R>(registry: &R, name: &str) -> Result<Type, AtomSetError>
where
    R: TypeRegistry + ?Sized,
{
    registry
        .type_by_name(name)
        .ok_or_else(|| AtomSetError::UnknownTypeName(name.to_string()))
}

// =============================================================================
// TYPES AND ATOMS
// =============================================================================

/// A type registration: `name` becomes a child of `parent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeSpec {
    pub name: String,
    pub parent: String,
}

/// One atom row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AtomSpec {
    pub handle: u64,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub outgoing: Vec<u64>,
    #[serde(default)]
    pub sti: Sti,
    #[serde(default)]
    pub lti: Sti,
    #[serde(default)]
    pub marked: bool,
    #[serde(default)]
    pub truth: Option<TruthSpec>,
}

impl AtomSpec {
    fn to_atom(&self, table: &AtomTable) -> Result<Atom, AtomSetError> {
        if self.name.is_some() && !self.outgoing.is_empty() {
            return Err(AtomSetError::InvalidAtom(format!(
                "atom {} has both a name and an outgoing set",
                self.handle
            )));
        }
        let ty = resolve_type(table, &self.type_name)?;
        let atom = match &self.name {
            Some(name) => Atom::node(ty, name.as_str()),
            None => Atom::link(ty, self.outgoing.iter().copied().map(Handle).collect()),
        };

        let truth = self
            .truth
            .as_ref()
            .map(TruthSpec::to_truth_value)
            .unwrap_or_default();

        Ok(atom
            .with_attention(AttentionValue::new(self.sti, self.lti))
            .with_truth(truth)
            .marked(self.marked))
    }
}

/// Truth value row: a simple value, optionally with per-context versions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TruthSpec {
    pub strength: f32,
    pub confidence: f32,
    #[serde(default)]
    pub versions: Vec<VersionedTruthSpec>,
}

impl TruthSpec {
    fn to_truth_value(&self) -> TruthValue {
        let primary = TruthValue::simple(self.strength, self.confidence);
        if self.versions.is_empty() {
            return primary;
        }
        let composite = self.versions.iter().fold(
            CompositeTruthValue::new(primary),
            |composite, v| {
                composite.with_version(
                    v.version.to_version_handle(),
                    TruthValue::simple(v.strength, v.confidence),
                )
            },
        );
        TruthValue::Composite(composite)
    }
}

/// A truth value stored under one context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionedTruthSpec {
    pub version: VersionSpec,
    pub strength: f32,
    pub confidence: f32,
}

/// Context selector: indicator plus the handle of the context atom.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionSpec {
    #[serde(default)]
    pub indicator: IndicatorType,
    pub context: u64,
}

impl VersionSpec {
    fn to_version_handle(self) -> VersionHandle {
        VersionHandle::new(self.indicator, Handle(self.context))
    }
}

// =============================================================================
// QUERIES
// =============================================================================

/// A named stored query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuerySpec {
    pub name: String,
    #[serde(default)]
    pub sources: Vec<SourceSpec>,
    #[serde(default)]
    pub criteria: Vec<CriterionSpec>,
}

impl QuerySpec {
    /// Resolve type names and build the engine query.
    pub fn resolve<R>(&self, registry: &R) -> Result<Query, AtomSetError>
    where
        R: TypeRegistry + ?Sized,
    {
        let sources = self
            .sources
            .iter()
            .map(|s| s.resolve(registry))
            .collect::<Result<Vec<_>, _>>()?;
        let criteria = self
            .criteria
            .iter()
            .map(|c| c.resolve(registry))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Query { sources, criteria })
    }
}

/// Candidate source (tagged union).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum SourceSpec {
    Handles {
        handles: Vec<u64>,
    },
    ByType {
        #[serde(rename = "type")]
        type_name: String,
        #[serde(default)]
        subclass: bool,
    },
}

impl SourceSpec {
    fn resolve<R>(&self, registry: &R) -> Result<Source, AtomSetError>
    where
        R: TypeRegistry + ?Sized,
    {
        Ok(match self {
            Self::Handles { handles } => Source::Handles {
                handles: handles.iter().copied().map(Handle).collect(),
            },
            Self::ByType {
                type_name,
                subclass,
            } => Source::ByType {
                ty: resolve_type(registry, type_name)?,
                subclass: *subclass,
            },
        })
    }
}

/// Filter criterion (tagged union), with types given by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum CriterionSpec {
    RemovalFlag {
        marked: bool,
    },
    Arity {
        arity: Arity,
    },
    Type {
        #[serde(rename = "type")]
        type_name: String,
        #[serde(default)]
        subclass: bool,
    },
    Name {
        name: String,
    },
    NameAndType {
        #[serde(default)]
        name: Option<String>,
        #[serde(rename = "type")]
        type_name: String,
        #[serde(default)]
        subclass: bool,
    },
    OutgoingAt {
        target: u64,
        position: Arity,
        arity: Arity,
    },
    IncomingOf {
        target: u64,
    },
    AnyOutgoingType {
        #[serde(rename = "type")]
        type_name: String,
        #[serde(default)]
        subclass: bool,
        arity: Arity,
    },
    OutgoingTypeAt {
        #[serde(rename = "type")]
        type_name: String,
        #[serde(default)]
        subclass: bool,
        position: Arity,
        arity: Arity,
    },
    OutgoingNameTypeAt {
        #[serde(default)]
        name: Option<String>,
        #[serde(rename = "type")]
        type_name: String,
        #[serde(default)]
        subclass: bool,
        position: Arity,
        arity: Arity,
    },
    OutgoingNameAt {
        #[serde(default)]
        name: Option<String>,
        position: Arity,
        arity: Arity,
    },
    Attention {
        lower: Sti,
        upper: Sti,
    },
    Version {
        version: VersionSpec,
    },
    OutgoingVersion {
        #[serde(rename = "type")]
        type_name: String,
        #[serde(default)]
        subclass: bool,
        version: VersionSpec,
    },
    OutgoingNameVersion {
        name: String,
        #[serde(rename = "type")]
        type_name: String,
        version: VersionSpec,
    },
}

impl CriterionSpec {
    fn resolve<R>(&self, registry: &R) -> Result<Criterion, AtomSetError>
    where
        R: TypeRegistry + ?Sized,
    {
        Ok(match self {
            Self::RemovalFlag { marked } => Criterion::RemovalFlag { marked: *marked },
            Self::Arity { arity } => Criterion::Arity { arity: *arity },
            Self::Type {
                type_name,
                subclass,
            } => Criterion::Type {
                ty: resolve_type(registry, type_name)?,
                subclass: *subclass,
            },
            Self::Name { name } => Criterion::Name { name: name.clone() },
            Self::NameAndType {
                name,
                type_name,
                subclass,
            } => Criterion::NameAndType {
                name: name.clone(),
                ty: resolve_type(registry, type_name)?,
                subclass: *subclass,
            },
            Self::OutgoingAt {
                target,
                position,
                arity,
            } => Criterion::OutgoingAt {
                target: Handle(*target),
                position: *position,
                arity: *arity,
            },
            Self::IncomingOf { target } => Criterion::IncomingOf {
                target: Handle(*target),
            },
            Self::AnyOutgoingType {
                type_name,
                subclass,
                arity,
            } => Criterion::AnyOutgoingType {
                ty: resolve_type(registry, type_name)?,
                subclass: *subclass,
                arity: *arity,
            },
            Self::OutgoingTypeAt {
                type_name,
                subclass,
                position,
                arity,
            } => Criterion::OutgoingTypeAt {
                ty: resolve_type(registry, type_name)?,
                subclass: *subclass,
                position: *position,
                arity: *arity,
            },
            Self::OutgoingNameTypeAt {
                name,
                type_name,
                subclass,
                position,
                arity,
            } => Criterion::OutgoingNameTypeAt {
                name: name.clone(),
                ty: resolve_type(registry, type_name)?,
                subclass: *subclass,
                position: *position,
                arity: *arity,
            },
            Self::OutgoingNameAt {
                name,
                position,
                arity,
            } => Criterion::OutgoingNameAt {
                name: name.clone(),
                position: *position,
                arity: *arity,
            },
            Self::Attention { lower, upper } => Criterion::Attention {
                lower: *lower,
                upper: *upper,
            },
            Self::Version { version } => Criterion::Version {
                version: version.to_version_handle(),
            },
            Self::OutgoingVersion {
                type_name,
                subclass,
                version,
            } => Criterion::OutgoingVersion {
                ty: resolve_type(registry, type_name)?,
                subclass: *subclass,
                version: version.to_version_handle(),
            },
            Self::OutgoingNameVersion {
                name,
                type_name,
                version,
            } => Criterion::OutgoingNameVersion {
                name: name.clone(),
                ty: resolve_type(registry, type_name)?,
                version: version.to_version_handle(),
            },
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
