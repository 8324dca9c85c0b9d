use serde::Serialize;
use std::collections::HashMap;

/// Node of the category tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
    pub children: Vec<Category>,
    /// Items linked through `category_item`
    pub item_ids: Vec<i64>,
}

impl Category {
    pub fn new(id: i64, name: impl Into<String>, parent_id: Option<i64>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id,
            children: Vec::new(),
            item_ids: Vec::new(),
        }
    }

    /// Attach `child` below this category, fixing up its parent link.
    pub fn add_child_category(&mut self, mut child: Category) {
        child.parent_id = Some(self.id);
        self.children.push(child);
    }

    /// Assemble flat rows into trees.
    ///
    /// Rows whose parent is absent from `flat` become roots. Siblings keep
    /// ascending id order.
    pub fn build_tree(flat: Vec<Category>) -> Vec<Category> {
        let known: std::collections::HashSet<i64> = flat.iter().map(|c| c.id).collect();

        let mut by_parent: HashMap<Option<i64>, Vec<Category>> = HashMap::new();
        for category in flat {
            let key = category.parent_id.filter(|p| known.contains(p));
            by_parent.entry(key).or_default().push(category);
        }
        for siblings in by_parent.values_mut() {
            siblings.sort_by_key(|c| c.id);
        }

        let roots = by_parent.remove(&None).unwrap_or_default();
        roots
            .into_iter()
            .map(|root| attach_children(root, &mut by_parent))
            .collect()
    }
}

fn attach_children(
    mut node: Category,
    by_parent: &mut HashMap<Option<i64>, Vec<Category>>,
) -> Category {
    let children = by_parent.remove(&Some(node.id)).unwrap_or_default();
    for child in children {
        let child = attach_children(child, by_parent);
        node.add_child_category(child);
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_child_sets_parent() {
        let mut books = Category::new(1, "books", None);
        books.add_child_category(Category::new(2, "it", None));
        assert_eq!(books.children[0].parent_id, Some(1));
    }

    #[test]
    fn builds_nested_tree() {
        let flat = vec![
            Category::new(3, "java", Some(2)),
            Category::new(1, "books", None),
            Category::new(2, "it", Some(1)),
            Category::new(4, "music", None),
            Category::new(5, "novel", Some(1)),
        ];

        let tree = Category::build_tree(flat);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].name, "books");
        assert_eq!(tree[0].children.len(), 2);
        assert_eq!(tree[0].children[0].name, "it");
        assert_eq!(tree[0].children[0].children[0].name, "java");
        assert_eq!(tree[1].name, "music");
    }

    #[test]
    fn orphan_becomes_root() {
        let tree = Category::build_tree(vec![Category::new(7, "lost", Some(99))]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].parent_id, Some(99));
    }
}
