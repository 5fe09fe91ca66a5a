use serde_json::{Map, Value};

use crate::types::TreeItem;

/// Render a tree snapshot (fetched with items) as nested JSON keyed by
/// location name: leaf locations collapse to their total item count, branch
/// locations become objects with an `itemCount` plus their children.
pub fn location_tree_report(tree: &[TreeItem]) -> Value {
    let mut root = Map::new();
    for node in tree.iter().filter(|node| node.is_location()) {
        let (element, _) = location_element(node);
        root.insert(node.name.clone(), element);
    }
    Value::Object(root)
}

/// Returns the JSON element for one location and its total item count,
/// items of descendant locations included
fn location_element(node: &TreeItem) -> (Value, u64) {
    let mut total_items = 0u64;
    let mut child_locations = Map::new();

    for child in &node.children {
        if child.is_location() {
            let (element, count) = location_element(child);
            child_locations.insert(child.name.clone(), element);
            total_items += count;
        } else {
            total_items += 1;
        }
    }

    if child_locations.is_empty() {
        return (Value::from(total_items), total_items);
    }

    let mut element = Map::new();
    element.insert("itemCount".to_string(), Value::from(total_items));
    for (name, child) in child_locations {
        element.insert(name, child);
    }
    (Value::Object(element), total_items)
}
