//! Category hierarchy resolution.
//!
//! Source records describe a product's category three different ways, in
//! decreasing order of trust: structured fields (`category_id`,
//! `root_category_id`, `category_depth`), a delimited path string
//! ("1815 > 28670 > 4593"), and the listing URL. Path- and URL-derived
//! values only ever fill missing slots; structured fields are never
//! overwritten.

use mart_model::CategoryDimension;

use crate::normalization::url::{extract_category_id, extract_url_key};

/// Deepest category level the warehouse distinguishes. Deeper hierarchies
/// are capped, not rejected.
pub const MAX_CATEGORY_LEVEL: i64 = 3;

/// Resolved hierarchy slots for one product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryInfo {
    /// Leaf (deepest) category id.
    pub category_id: Option<i64>,
    /// Root (level 1) category id.
    pub root_category_id: Option<i64>,
    /// Number of levels in the hierarchy path.
    pub category_depth: Option<i64>,
}

impl CategoryInfo {
    /// Fill the missing slots of `self` from the path string and URL.
    ///
    /// A depth of zero counts as missing. Returns the completed info.
    pub fn resolve(mut self, path: Option<&str>, url: Option<&str>) -> Self {
        let segments = path.map(parse_category_path).unwrap_or_default();

        if self.category_id.is_none() {
            self.category_id = segments.last().copied();
        }
        if self.root_category_id.is_none() {
            self.root_category_id = segments.first().copied();
        }
        if self.category_depth.is_none_or(|d| d == 0) && !segments.is_empty() {
            self.category_depth = Some(segments.len() as i64);
        }

        // Last resort: the listing URL carries the leaf id.
        if self.category_id.is_none() {
            self.category_id = url.and_then(extract_category_id);
        }

        self
    }
}

/// Splits a delimited category path into integer segment ids.
///
/// Any non-numeric segment invalidates the whole path; a half-parsed
/// hierarchy would pair the wrong root with a leaf.
pub fn parse_category_path(path: &str) -> Vec<i64> {
    if path.trim().is_empty() {
        return Vec::new();
    }
    let mut ids = Vec::new();
    for segment in path.split('>') {
        match segment.trim().parse::<i64>() {
            Ok(id) => ids.push(id),
            Err(_) => return Vec::new(),
        }
    }
    ids
}

/// Builds a category dimension row from resolved hierarchy info.
///
/// Returns `None` when no leaf id could be resolved at all.
pub fn build_category_dimension(
    info: &CategoryInfo,
    category_name: Option<&str>,
    category_url: Option<&str>,
) -> Option<CategoryDimension> {
    let category_id = info.category_id?;

    let category_level = info
        .category_depth
        .filter(|d| *d > 0)
        .map_or(1, |d| d.min(MAX_CATEGORY_LEVEL));

    let full_path = match info.root_category_id {
        Some(root) if root != category_id => format!("{root} > {category_id}"),
        _ => category_id.to_string(),
    };

    // Root-level categories have no parent. With only root and leaf ids
    // available the direct parent of a depth-3 leaf is unknown; the root is
    // the closest known ancestor.
    let parent_id = match (info.category_depth, info.root_category_id) {
        (Some(depth), Some(root)) if depth > 1 => Some(root),
        _ => None,
    };

    Some(CategoryDimension {
        category_id,
        category_name: category_name.map(str::to_string),
        category_level,
        full_path,
        url_key: category_url.and_then(extract_url_key),
        parent_id,
        // Curated manually downstream; never set here.
        standard_category: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_parsing() {
        assert_eq!(
            parse_category_path("1815 > 28670 > 12296 > 4593"),
            vec![1815, 28670, 12296, 4593]
        );
        assert_eq!(parse_category_path("1789"), vec![1789]);
        assert_eq!(parse_category_path(""), Vec::<i64>::new());
        assert_eq!(parse_category_path("1815 > abc"), Vec::<i64>::new());
    }

    #[test]
    fn resolve_from_path_only() {
        let info = CategoryInfo::default().resolve(Some("1815 > 28670 > 4593"), None);
        assert_eq!(info.category_id, Some(4593));
        assert_eq!(info.root_category_id, Some(1815));
        assert_eq!(info.category_depth, Some(3));
    }

    #[test]
    fn existing_fields_win_over_path() {
        let info = CategoryInfo {
            category_id: Some(999),
            root_category_id: None,
            category_depth: Some(2),
        }
        .resolve(Some("1815 > 4593"), None);
        assert_eq!(info.category_id, Some(999));
        assert_eq!(info.root_category_id, Some(1815));
        assert_eq!(info.category_depth, Some(2));
    }

    #[test]
    fn zero_depth_is_filled_from_path() {
        let info = CategoryInfo {
            category_id: None,
            root_category_id: None,
            category_depth: Some(0),
        }
        .resolve(Some("1815 > 4593"), None);
        assert_eq!(info.category_depth, Some(2));
    }

    #[test]
    fn url_fallback_when_path_absent() {
        let info = CategoryInfo::default().resolve(None, Some("https://site/x/c1789"));
        assert_eq!(info.category_id, Some(1789));
        assert_eq!(info.root_category_id, None);
        assert_eq!(info.category_depth, None);
    }

    #[test]
    fn dimension_row_for_leaf() {
        let info = CategoryInfo {
            category_id: Some(4593),
            root_category_id: Some(1815),
            category_depth: Some(4),
        };
        let row = build_category_dimension(&info, Some("Áo khoác"), None).unwrap();
        assert_eq!(row.category_level, 3); // capped
        assert_eq!(row.full_path, "1815 > 4593");
        assert_eq!(row.parent_id, Some(1815));
        assert_eq!(row.category_name.as_deref(), Some("Áo khoác"));
        assert!(row.standard_category.is_none());
    }

    #[test]
    fn dimension_row_for_root() {
        let info = CategoryInfo {
            category_id: Some(1815),
            root_category_id: Some(1815),
            category_depth: Some(1),
        };
        let row = build_category_dimension(&info, None, None).unwrap();
        assert_eq!(row.category_level, 1);
        assert_eq!(row.full_path, "1815");
        assert_eq!(row.parent_id, None);
    }

    #[test]
    fn dimension_defaults_without_depth() {
        let info = CategoryInfo {
            category_id: Some(1789),
            root_category_id: None,
            category_depth: None,
        };
        let row =
            build_category_dimension(&info, None, Some("https://site/dien-thoai/c1789")).unwrap();
        assert_eq!(row.category_level, 1);
        assert_eq!(row.full_path, "1789");
        assert_eq!(row.url_key.as_deref(), Some("dien-thoai"));
    }

    #[test]
    fn no_leaf_id_no_row() {
        assert!(build_category_dimension(&CategoryInfo::default(), None, None).is_none());
    }
}
