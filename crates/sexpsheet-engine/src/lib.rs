//! sexpsheet_engine - S-expression spreadsheet formula engine.

pub mod engine;

#[cfg(test)]
mod tests {
    use crate::engine::*;
    use dashmap::DashMap;
    use std::sync::Arc;

    fn grid(cells: &[(&str, &str)]) -> Grid {
        let grid = new_grid();
        for (name, raw) in cells {
            grid.insert(Coord::parse_a1(name).unwrap(), raw.to_string());
        }
        grid
    }

    fn value(grid: &Grid, name: &str) -> String {
        Evaluator::new(grid).evaluate_cell(&Coord::parse_a1(name).unwrap())
    }

    #[test]
    fn test_values_display() {
        let grid = grid(&[
            ("A1", "4"),
            ("A2", "true"),
            ("A3", "\"bees\""),
            ("A4", "bees"),
            ("A5", "(SUM 1 2)"),
        ]);
        assert_eq!(value(&grid, "A1"), "4.0");
        assert_eq!(value(&grid, "A2"), "true");
        assert_eq!(value(&grid, "A3"), "\"bees\"");
        assert_eq!(value(&grid, "A4"), "!#ERROR_INVALIDSYMBOL");
        assert_eq!(value(&grid, "A5"), "!#ERROR_SYNTAX");
        assert_eq!(value(&grid, "Z99"), "");
    }

    #[test]
    fn test_sum_of_column_block() {
        let grid = grid(&[
            ("A1", "1"),
            ("A2", "2"),
            ("A3", "3"),
            ("B1", "=(SUM A1:A3)"),
            ("B2", "=(SUM A:A)"),
        ]);
        assert_eq!(value(&grid, "B1"), "6.0");
        assert_eq!(value(&grid, "B2"), "6.0");
    }

    #[test]
    fn test_nested_functions() {
        let grid = grid(&[
            ("A1", "2"),
            ("A2", "5"),
            ("B1", "=(PRODUCT (SUM A1 A2) A1)"),
            ("B2", "=(< (SUM A1 A1) A2)"),
        ]);
        assert_eq!(value(&grid, "B1"), "14.0");
        assert_eq!(value(&grid, "B2"), "true");
    }

    #[test]
    fn test_cycles_are_reported_not_followed() {
        let grid = grid(&[
            ("A1", "=B1"),
            ("B1", "=(SUM A1 1)"),
            ("C1", "=(SUM A1:A1)"),
            ("D1", "=(SUM D1:D1)"),
        ]);
        assert_eq!(value(&grid, "A1"), "!#ERROR_CYCLICREF");
        assert_eq!(value(&grid, "B1"), "!#ERROR_CYCLICREF");
        assert_eq!(value(&grid, "C1"), "!#ERROR_CYCLICREF");
        assert_eq!(value(&grid, "D1"), "!#ERROR_CYCLICREF");
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let grid = grid(&[
            ("A1", "3"),
            ("B1", "=A1"),
            ("B2", "=A1"),
            ("C1", "=(SUM B1 B2 B1:B2)"),
        ]);
        assert_eq!(value(&grid, "C1"), "12.0");
    }

    #[test]
    fn test_errors_flow_through_arguments() {
        let grid = grid(&[
            ("A1", "=(FOO 1)"),
            ("A2", "=(SUM A1 1)"),
            ("A3", "=(< 1 true)"),
            ("A4", "=(SUM A3 1)"),
        ]);
        assert_eq!(value(&grid, "A1"), "!#ERROR_INVALIDCOMMAND");
        assert_eq!(value(&grid, "A2"), "!#ERROR_ARGISERROR");
        assert_eq!(value(&grid, "A3"), "!#ERROR_ARGTYPE");
        assert_eq!(value(&grid, "A4"), "!#ERROR_ARGTYPE");
        assert!(is_error(&value(&grid, "A2")));
        assert!(!is_error(&value(&grid, "A3").replace('!', "")));
    }

    #[test]
    fn test_enum_over_block_with_blanks() {
        let grid = grid(&[("A1", "1"), ("A3", "\"x\""), ("B1", "=(ENUM A1:A3)")]);
        assert_eq!(value(&grid, "B1"), "1.0 <blank> \"x\"");
    }

    #[test]
    fn test_evaluation_is_pure() {
        let grid = grid(&[("A1", "2"), ("B1", "=(PRODUCT A1 A1 A1)")]);
        let before: Vec<(Coord, String)> = grid
            .iter()
            .map(|e| (*e.key(), e.value().clone()))
            .collect();
        assert_eq!(value(&grid, "B1"), "8.0");
        assert_eq!(value(&grid, "B1"), "8.0");
        for (coord, raw) in before {
            assert_eq!(grid.get(&coord).unwrap().value(), &raw);
        }
    }

    #[test]
    fn test_plain_dashmap_and_arc_are_sources() {
        let map: DashMap<Coord, String> = DashMap::new();
        map.insert(Coord::parse_a1("A1").unwrap(), "7".to_string());
        assert_eq!(Evaluator::new(&map).evaluate(Some("=(SUM A1 1)")), "8.0");

        let shared = Arc::new(map);
        assert_eq!(Evaluator::new(&shared).evaluate(Some("=A1")), "7.0");
    }

    #[test]
    fn test_deep_nesting_is_a_syntax_error() {
        let depth = MAX_NESTING_DEPTH + 10;
        let formula = format!("={}1{}", "(SUM ".repeat(depth), ")".repeat(depth));
        let grid = grid(&[("A1", formula.as_str())]);
        assert_eq!(value(&grid, "A1"), "!#ERROR_SYNTAX");
    }

    #[test]
    fn test_error_strings_round_trip_through_tags() {
        for reason in ErrorReason::ALL {
            let display = reason.to_string();
            assert!(display.starts_with(ERROR_PREFIX));
            assert_eq!(display.parse::<ErrorReason>(), Ok(reason));
        }
    }
}
