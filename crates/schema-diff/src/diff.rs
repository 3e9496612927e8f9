//! Recursive schema comparison.
//!
//! Walks two schema trees in parallel and emits an ordered list of
//! classified changes. A node's own-level changes (type, nullability,
//! format) come before anything discovered in its children; within an
//! object the order is renames, removals, additions, required flips, then
//! recursion into shared keys, each group in key order. The order is stable
//! for identical inputs.

use std::collections::HashSet;

use schemadrift_core::{
    join_path, Change, ChangeKind, DriftError, SchemaKind, SchemaNode,
};

use crate::rename::detect_renames;

/// Compare two schema versions.
///
/// Total over valid nodes; a structurally invalid input is surfaced as
/// [`DriftError::InvalidNode`] so callers can tell it apart from a
/// legitimate empty result. Inputs are never mutated.
pub fn diff(
    before: &SchemaNode,
    after: &SchemaNode,
) -> Result<Vec<Change>, DriftError> {
    before.validate()?;
    after.validate()?;
    let mut changes = Vec::new();
    diff_nodes(before, after, "", &mut changes);
    Ok(changes)
}

fn diff_nodes(
    before: &SchemaNode,
    after: &SchemaNode,
    path: &str,
    out: &mut Vec<Change>,
) {
    // A kind change ends the comparison for this subtree; nested detail
    // under a different kind is meaningless.
    if !before.same_kind(after) {
        let kind = if before.is_object() != after.is_object() {
            ChangeKind::NestingChanged
        } else {
            ChangeKind::TypeChanged
        };
        let verb = match kind {
            ChangeKind::NestingChanged => "nesting",
            _ => "type",
        };
        out.push(
            Change::new(
                kind,
                path,
                format!(
                    "{verb} changed from {} to {}",
                    before.type_label(),
                    after.type_label()
                ),
            )
            .with_before(before.type_label())
            .with_after(after.type_label()),
        );
        return;
    }

    // Two unions with different alternative sets are a type change too.
    if let (
        SchemaKind::Union { variants: vb },
        SchemaKind::Union { variants: va },
    ) = (&before.kind, &after.kind)
    {
        let labels_before: Vec<String> =
            vb.iter().map(|v| v.type_label()).collect();
        let labels_after: Vec<String> =
            va.iter().map(|v| v.type_label()).collect();
        if labels_before != labels_after {
            out.push(
                Change::new(
                    ChangeKind::TypeChanged,
                    path,
                    format!(
                        "type changed from {} to {}",
                        before.type_label(),
                        after.type_label()
                    ),
                )
                .with_before(before.type_label())
                .with_after(after.type_label()),
            );
            return;
        }
    }

    if before.nullable != after.nullable {
        let message = if after.nullable {
            "value may now be null"
        } else {
            "value may no longer be null"
        };
        out.push(
            Change::new(ChangeKind::NullableChanged, path, message)
                .with_before(before.nullable.to_string())
                .with_after(after.nullable.to_string()),
        );
    }

    if before.format() != after.format() {
        out.push(
            Change::new(
                ChangeKind::FormatChanged,
                path,
                format!(
                    "format changed from {} to {}",
                    before.type_label(),
                    after.type_label()
                ),
            )
            .with_before(before.type_label())
            .with_after(after.type_label()),
        );
    }

    match (&before.kind, &after.kind) {
        (
            SchemaKind::Object {
                properties: props_before,
                required: req_before,
            },
            SchemaKind::Object {
                properties: props_after,
                required: req_after,
            },
        ) => {
            diff_object_properties(
                props_before,
                req_before,
                props_after,
                req_after,
                path,
                out,
            );
        }
        (
            SchemaKind::Array {
                items: items_before,
                homogeneous: homog_before,
            },
            SchemaKind::Array {
                items: items_after,
                homogeneous: homog_after,
            },
        ) => {
            diff_array_items(
                items_before,
                *homog_before,
                items_after,
                *homog_after,
                path,
                out,
            );
        }
        _ => {}
    }
}

fn diff_object_properties(
    props_before: &std::collections::BTreeMap<String, SchemaNode>,
    req_before: &std::collections::BTreeSet<String>,
    props_after: &std::collections::BTreeMap<String, SchemaNode>,
    req_after: &std::collections::BTreeSet<String>,
    path: &str,
    out: &mut Vec<Change>,
) {
    let removed: Vec<(&str, &SchemaNode)> = props_before
        .iter()
        .filter(|(name, _)| !props_after.contains_key(*name))
        .map(|(name, node)| (name.as_str(), node))
        .collect();
    let added: Vec<(&str, &SchemaNode)> = props_after
        .iter()
        .filter(|(name, _)| !props_before.contains_key(*name))
        .map(|(name, node)| (name.as_str(), node))
        .collect();

    let renames = detect_renames(&removed, &added);
    let renamed_from: HashSet<&str> =
        renames.iter().map(|(from, _)| from.as_str()).collect();
    let renamed_to: HashSet<&str> =
        renames.iter().map(|(_, to)| to.as_str()).collect();

    for (from, to) in &renames {
        out.push(
            Change::new(
                ChangeKind::FieldRenamed,
                join_path(path, from),
                format!("field renamed from `{from}` to `{to}`"),
            )
            .with_before(from.clone())
            .with_after(to.clone()),
        );
    }

    for (name, node) in &removed {
        if renamed_from.contains(name) {
            continue;
        }
        out.push(
            Change::new(
                ChangeKind::FieldRemoved,
                join_path(path, name),
                format!("field `{name}` was removed"),
            )
            .with_before(node.type_label()),
        );
    }

    for (name, node) in &added {
        if renamed_to.contains(name) {
            continue;
        }
        out.push(
            Change::new(
                ChangeKind::FieldAdded,
                join_path(path, name),
                format!("new field `{name}` was added"),
            )
            .with_after(node.type_label()),
        );
    }

    for name in props_before.keys() {
        if !props_after.contains_key(name) {
            continue;
        }
        let was_required = req_before.contains(name);
        let is_required = req_after.contains(name);
        if was_required && !is_required {
            out.push(
                Change::new(
                    ChangeKind::RequiredChanged,
                    join_path(path, name),
                    format!("field `{name}` is no longer always present"),
                )
                .with_before("required")
                .with_after("optional"),
            );
        } else if !was_required && is_required {
            out.push(
                Change::new(
                    ChangeKind::RequiredChanged,
                    join_path(path, name),
                    format!("field `{name}` is now always present"),
                )
                .with_before("optional")
                .with_after("required"),
            );
        }
    }

    for (name, node_before) in props_before {
        if let Some(node_after) = props_after.get(name) {
            diff_nodes(node_before, node_after, &join_path(path, name), out);
        }
    }
}

fn diff_array_items(
    items_before: &SchemaNode,
    homog_before: bool,
    items_after: &SchemaNode,
    homog_after: bool,
    path: &str,
    out: &mut Vec<Change>,
) {
    let item_path = format!("{path}[]");
    let mut item_changes = Vec::new();
    diff_nodes(items_before, items_after, &item_path, &mut item_changes);

    // The caller cares that the element type changed, not the nested
    // detail: collapse item-level kind changes into one change at the
    // array's own path.
    let element_type_changed = item_changes.iter().any(|c| {
        c.path == item_path
            && matches!(
                c.kind,
                ChangeKind::TypeChanged | ChangeKind::NestingChanged
            )
    });

    if element_type_changed {
        out.push(
            Change::new(
                ChangeKind::ArrayItemsChanged,
                path,
                format!(
                    "array items changed from {} to {}",
                    items_before.type_label(),
                    items_after.type_label()
                ),
            )
            .with_before(items_before.type_label())
            .with_after(items_after.type_label()),
        );
    } else {
        out.append(&mut item_changes);
    }

    if homog_before != homog_after {
        let message = if homog_after {
            "array items are now a single kind"
        } else {
            "array items are no longer a single kind"
        };
        out.push(Change::new(ChangeKind::HomogeneityChanged, path, message));
    }
}
