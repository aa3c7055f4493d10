//! The default navigation menu.
//!
//! Menu keys name entries in the resource registry; the tree shape is
//! client configuration, declared here rather than in the JSON fixture so
//! presentation order is explicit.

use lims_model::{Menu, MenuNode};

/// The menu shipped with the client.
pub fn default_menu() -> Menu {
    let mut menu = Menu::default();
    menu.push("home", MenuNode::Leaf);
    menu.push(
        "screensaveruser",
        MenuNode::node(false, vec![("screeners", MenuNode::Leaf), ("staff", MenuNode::Leaf)]),
    );
    menu.push(
        "screen",
        MenuNode::node(
            false,
            vec![
                ("small_molecule_screens", MenuNode::Leaf),
                ("rnai_screens", MenuNode::Leaf),
            ],
        ),
    );
    menu.push(
        "library",
        MenuNode::node(
            false,
            vec![
                ("smallmoleculelibrary", MenuNode::Leaf),
                ("rnalibrary", MenuNode::Leaf),
            ],
        ),
    );
    menu.push("about", MenuNode::Leaf);
    menu
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_menu_resolves_nested_entries() {
        let menu = default_menu();
        assert_eq!(
            menu.find_submenu_path("rnalibrary"),
            Some(vec!["library".to_string(), "rnalibrary".to_string()])
        );
        assert!(menu.find_submenu_path("no_such_entry").is_none());
    }
}
