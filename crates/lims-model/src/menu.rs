//! The navigation menu as an explicit recursive tree.

/// A node in the menu tree. Leaves navigate to a resource; inner nodes
/// group submenus and remember whether they render expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuNode {
    /// Navigates to the resource named by its key in the parent.
    Leaf,
    /// A grouping node. Submenu order is presentation order.
    Node {
        expanded: bool,
        submenus: Vec<(String, MenuNode)>,
    },
}

impl MenuNode {
    pub fn node(expanded: bool, submenus: Vec<(&str, MenuNode)>) -> Self {
        MenuNode::Node {
            expanded,
            submenus: submenus
                .into_iter()
                .map(|(key, node)| (key.to_string(), node))
                .collect(),
        }
    }
}

/// The whole menu: an ordered forest of top-level entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    pub entries: Vec<(String, MenuNode)>,
}

impl Menu {
    pub fn push(&mut self, key: &str, node: MenuNode) {
        self.entries.push((key.to_string(), node));
    }

    /// Path of menu keys from a root entry down to `key`, or `None` when
    /// the key is not in the tree.
    pub fn find_submenu_path(&self, key: &str) -> Option<Vec<String>> {
        for (entry_key, node) in &self.entries {
            let mut path = vec![entry_key.clone()];
            if entry_key == key {
                return Some(path);
            }
            if descend(node, key, &mut path) {
                return Some(path);
            }
        }
        None
    }
}

fn descend(node: &MenuNode, key: &str, path: &mut Vec<String>) -> bool {
    let MenuNode::Node { submenus, .. } = node else {
        return false;
    };
    for (sub_key, sub_node) in submenus {
        path.push(sub_key.clone());
        if sub_key == key || descend(sub_node, key, path) {
            return true;
        }
        path.pop();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> Menu {
        let mut menu = Menu::default();
        menu.push(
            "screens",
            MenuNode::node(
                false,
                vec![
                    ("small_molecule_screens", MenuNode::Leaf),
                    ("rnai_screens", MenuNode::Leaf),
                ],
            ),
        );
        menu.push("library", MenuNode::node(false, vec![("rnalibrary", MenuNode::Leaf)]));
        menu
    }

    #[test]
    fn finds_nested_submenu_path() {
        assert_eq!(
            menu().find_submenu_path("rnai_screens"),
            Some(vec!["screens".to_string(), "rnai_screens".to_string()])
        );
    }

    #[test]
    fn finds_top_level_entry() {
        assert_eq!(menu().find_submenu_path("library"), Some(vec!["library".to_string()]));
    }

    #[test]
    fn unknown_key_is_none() {
        assert_eq!(menu().find_submenu_path("wells"), None);
    }
}
