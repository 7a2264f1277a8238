use std::collections::BTreeMap;

use crate::spec::form::FormSpec;
use crate::values::FormValues;

pub type VisibilityMap = BTreeMap<String, bool>;
pub type RequiredMap = BTreeMap<String, bool>;

/// Resolves which fields are shown for the given values.
///
/// Fields are visited in declaration order, and a field whose dependency is
/// hidden stays hidden regardless of the stale value that dependency may hold.
pub fn resolve_visibility(spec: &FormSpec, values: &FormValues) -> VisibilityMap {
    let mut map = VisibilityMap::new();

    for field in &spec.fields {
        let visible = match &field.visibility {
            Some(rule) => {
                rule.depends_on
                    .iter()
                    .all(|dependency| is_visible(&map, dependency))
                    && rule.evaluate(values)
            }
            None => true,
        };
        map.insert(field.id.clone(), visible);
    }

    map
}

/// Resolves which fields are actively required: visible and required for these values.
pub fn resolve_required(
    spec: &FormSpec,
    values: &FormValues,
    visibility: &VisibilityMap,
) -> RequiredMap {
    spec.fields
        .iter()
        .map(|field| {
            let required = is_visible(visibility, &field.id) && field.required.evaluate(values);
            (field.id.clone(), required)
        })
        .collect()
}

/// Unknown ids count as visible so forward references do not hide a field.
pub fn is_visible(map: &VisibilityMap, id: &str) -> bool {
    map.get(id).copied().unwrap_or(true)
}
