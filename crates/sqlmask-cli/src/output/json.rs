//! JSON output formatting.

use sqlmask_core::ColumnMap;

/// Format the column map as a JSON object in first-seen order.
///
/// If `pretty` is true, outputs indented JSON.
pub fn format_column_map(map: &ColumnMap, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(map).expect("serialization cannot fail")
    } else {
        serde_json::to_string(map).expect("serialization cannot fail")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlmask_core::process_query;

    #[test]
    fn test_json_compact_keeps_order() {
        let (_, map) = process_query("SELECT zeta, alpha FROM t");

        let json = format_column_map(&map, false);
        assert!(json.starts_with(r#"{"zeta":""#));
        assert!(json.find("zeta") < json.find("alpha"));
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_json_pretty() {
        let (_, map) = process_query("SELECT col1 FROM t");

        let json = format_column_map(&map, true);
        assert!(json.contains('\n'));
        assert!(json.contains(r#""col1": "8c43de7b01bca674276c43e09b3ec5ba""#));
    }

    #[test]
    fn test_empty_map() {
        assert_eq!(format_column_map(&ColumnMap::new(), false), "{}");
    }
}
