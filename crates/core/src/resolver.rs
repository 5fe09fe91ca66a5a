use crate::error::InventoryError;
use crate::types::TreeItem;

/// A location id paired with its full name path from the tree root.
/// Path segments carry the casing stored in the tree, not the caller's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub id: String,
    pub path: Vec<String>,
}

impl ResolvedLocation {
    /// Human-readable lineage, e.g. "Home / Garage / Shelf A"
    pub fn full_path(&self) -> String {
        self.path.join(" / ")
    }
}

/// Split a raw location reference into trimmed, non-empty path segments
pub fn path_segments(raw: &str) -> Vec<&str> {
    raw.split('/')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

pub(crate) fn name_matches(name: &str, segment: &str) -> bool {
    name.to_lowercase() == segment.to_lowercase()
}

/// Maps caller-supplied location references (an opaque id or a
/// slash-delimited path) onto one tree snapshot.
///
/// The snapshot is borrowed for the resolver's lifetime; one resolver serves
/// one top-level operation.
pub struct LocationResolver<'tree> {
    tree: &'tree [TreeItem],
    flattened: Vec<ResolvedLocation>,
}

impl<'tree> LocationResolver<'tree> {
    pub fn new(tree: &'tree [TreeItem]) -> Self {
        let mut flattened = Vec::new();
        for node in tree {
            flatten(node, &[], &mut flattened);
        }
        Self { tree, flattened }
    }

    /// Resolve a reference to exactly one location.
    ///
    /// An exact id match wins outright (ids are unique). Otherwise the
    /// reference is walked as a path, level by level, matching segment names
    /// case-insensitively against location nodes only. Every branch that
    /// survives the final segment is a candidate; more than one candidate is
    /// an error that enumerates all of them rather than picking the first.
    pub fn resolve(&self, reference: &str) -> Result<ResolvedLocation, InventoryError> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(InventoryError::EmptyReference);
        }

        if let Some(by_id) = self.find_by_id(reference) {
            return Ok(by_id.clone());
        }

        let segments = path_segments(reference);
        if segments.is_empty() {
            return Err(InventoryError::EmptyReference);
        }

        // Each frontier entry is a node to test against the current segment,
        // paired with the tree-cased path of its already-matched ancestors.
        let mut frontier: Vec<(&TreeItem, Vec<String>)> = self
            .tree
            .iter()
            .filter(|node| node.is_location())
            .map(|node| (node, Vec::new()))
            .collect();
        let mut matched: Vec<(&TreeItem, Vec<String>)> = Vec::new();

        for (depth, segment) in segments.iter().enumerate() {
            matched = frontier
                .into_iter()
                .filter(|(node, _)| name_matches(&node.name, segment))
                .map(|(node, mut path)| {
                    path.push(node.name.clone());
                    (node, path)
                })
                .collect();

            if matched.is_empty() {
                return Err(InventoryError::LocationNotFound {
                    reference: reference.to_string(),
                });
            }

            frontier = if depth + 1 < segments.len() {
                matched
                    .iter()
                    .flat_map(|(node, path)| {
                        node.location_children()
                            .map(move |child| (child, path.clone()))
                    })
                    .collect()
            } else {
                Vec::new()
            };
        }

        let mut candidates: Vec<ResolvedLocation> = matched
            .into_iter()
            .map(|(node, path)| ResolvedLocation {
                id: node.id.clone(),
                path,
            })
            .collect();

        if candidates.len() == 1 {
            return Ok(candidates.remove(0));
        }
        Err(InventoryError::AmbiguousLocation {
            reference: reference.to_string(),
            candidates,
        })
    }

    /// Every location anywhere in the tree whose name matches the query
    /// case-insensitively, each with its full path. Used for bare-name
    /// diagnostics; an empty result means nothing matched.
    pub fn resolve_any_by_name(&self, query: &str) -> Vec<ResolvedLocation> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        self.flattened
            .iter()
            .filter(|location| {
                location
                    .path
                    .last()
                    .is_some_and(|name| name_matches(name, query))
            })
            .cloned()
            .collect()
    }

    /// Exact (case-sensitive) id lookup across the whole snapshot
    pub fn find_by_id(&self, id: &str) -> Option<&ResolvedLocation> {
        self.flattened.iter().find(|location| location.id == id)
    }
}

fn flatten(node: &TreeItem, prefix: &[String], out: &mut Vec<ResolvedLocation>) {
    if !node.is_location() {
        return;
    }
    let mut path = prefix.to_vec();
    path.push(node.name.clone());
    out.push(ResolvedLocation {
        id: node.id.clone(),
        path: path.clone(),
    });
    for child in &node.children {
        flatten(child, &path, out);
    }
}
