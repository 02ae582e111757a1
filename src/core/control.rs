//! The enable/disable control mini-language
//!
//! A control string is a comma-separated list of clauses:
//!
//! | syntax | effect |
//! |---|---|
//! | `all` | enable every (facility, importance) pair in scope |
//! | `none` | disable every pair in scope |
//! | `info` | enable that importance across the scope |
//! | `!info` | disable that importance across the scope |
//! | `>=info`, `>info`, `<=info`, `<info` | enable importances relative to the given one |
//! | `name` | enable all importances of facility `name` |
//! | `name(...)` | apply the parenthesized sub-control to facility `name` only |
//!
//! Whitespace between tokens is insignificant. Parsing is transactional:
//! the whole string is staged into edits before anything is applied, and
//! any error reports its 1-based column and leaves every stream untouched.

use super::error::{MlogError, Result};
use super::importance::Importance;

/// One staged `(facility, importance, state)` edit. `facility == None`
/// targets every facility and also updates the registry's
/// enabled-importance set.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StagedEdit {
    pub facility: Option<String>,
    pub importances: Vec<Importance>,
    pub enable: bool,
}

/// Parse `input` into staged edits. `is_facility` answers whether a name
/// is registered; unknown names fail the parse.
pub(crate) fn parse(input: &str, is_facility: &dyn Fn(&str) -> bool) -> Result<Vec<StagedEdit>> {
    let mut cursor = Cursor::new(input);
    let mut edits = Vec::new();
    parse_clauses(&mut cursor, None, is_facility, &mut edits)?;
    cursor.skip_ws();
    if let Some(c) = cursor.peek() {
        return Err(MlogError::control(
            cursor.column(),
            format!("unexpected '{}'", c),
        ));
    }
    Ok(edits)
}

fn parse_clauses(
    cursor: &mut Cursor<'_>,
    scope: Option<&str>,
    is_facility: &dyn Fn(&str) -> bool,
    edits: &mut Vec<StagedEdit>,
) -> Result<()> {
    let mut first = true;
    loop {
        cursor.skip_ws();
        if first {
            // Empty control (or empty sub-control) stages nothing; after a
            // comma a clause is mandatory.
            match cursor.peek() {
                None => return Ok(()),
                Some(')') if scope.is_some() => return Ok(()),
                _ => {}
            }
        }
        first = false;

        parse_clause(cursor, scope, is_facility, edits)?;

        cursor.skip_ws();
        match cursor.peek() {
            Some(',') => {
                cursor.bump();
            }
            Some(')') if scope.is_some() => return Ok(()),
            None => return Ok(()),
            Some(c) => {
                return Err(MlogError::control(
                    cursor.column(),
                    format!("expected ',' but found '{}'", c),
                ));
            }
        }
    }
}

fn parse_clause(
    cursor: &mut Cursor<'_>,
    scope: Option<&str>,
    is_facility: &dyn Fn(&str) -> bool,
    edits: &mut Vec<StagedEdit>,
) -> Result<()> {
    cursor.skip_ws();
    let column = cursor.column();

    if cursor.eat('!') {
        let importance = expect_importance(cursor)?;
        edits.push(StagedEdit {
            facility: scope.map(str::to_string),
            importances: vec![importance],
            enable: false,
        });
        return Ok(());
    }

    if let Some(op) = cursor.take_relop() {
        let importance = expect_importance(cursor)?;
        let selected = Importance::ALL
            .into_iter()
            .filter(|&i| match op {
                ">=" => i >= importance,
                ">" => i > importance,
                "<=" => i <= importance,
                "<" => i < importance,
                _ => unreachable!(),
            })
            .collect();
        edits.push(StagedEdit {
            facility: scope.map(str::to_string),
            importances: selected,
            enable: true,
        });
        return Ok(());
    }

    let Some(name) = cursor.take_ident() else {
        return Err(MlogError::control(column, "expected a clause"));
    };

    match name {
        "all" => {
            edits.push(StagedEdit {
                facility: scope.map(str::to_string),
                importances: Importance::ALL.to_vec(),
                enable: true,
            });
            return Ok(());
        }
        "none" => {
            edits.push(StagedEdit {
                facility: scope.map(str::to_string),
                importances: Importance::ALL.to_vec(),
                enable: false,
            });
            return Ok(());
        }
        _ => {}
    }

    if let Ok(importance) = name.parse::<Importance>() {
        edits.push(StagedEdit {
            facility: scope.map(str::to_string),
            importances: vec![importance],
            enable: true,
        });
        return Ok(());
    }

    if scope.is_some() {
        return Err(MlogError::control(
            column,
            format!("unknown importance '{}'", name),
        ));
    }

    if !is_facility(name) {
        return Err(MlogError::control(
            column,
            format!("unknown importance or facility '{}'", name),
        ));
    }

    cursor.skip_ws();
    if cursor.eat('(') {
        let owned = name.to_string();
        parse_clauses(cursor, Some(&owned), is_facility, edits)?;
        cursor.skip_ws();
        if !cursor.eat(')') {
            return Err(MlogError::control(cursor.column(), "expected ')'"));
        }
    } else {
        edits.push(StagedEdit {
            facility: Some(name.to_string()),
            importances: Importance::ALL.to_vec(),
            enable: true,
        });
    }
    Ok(())
}

fn expect_importance(cursor: &mut Cursor<'_>) -> Result<Importance> {
    cursor.skip_ws();
    let column = cursor.column();
    let Some(name) = cursor.take_ident() else {
        return Err(MlogError::control(column, "expected an importance name"));
    };
    name.parse::<Importance>()
        .map_err(|_| MlogError::control(column, format!("unknown importance '{}'", name)))
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// 1-based column of the current position, measured from the start of
    /// the input.
    fn column(&self) -> usize {
        self.pos + 1
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn take_relop(&mut self) -> Option<&'static str> {
        let rest = &self.input[self.pos..];
        for op in [">=", "<=", ">", "<"] {
            if rest.starts_with(op) {
                self.pos += op.len();
                return Some(op);
            }
        }
        None
    }

    fn take_ident(&mut self) -> Option<&'a str> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '.' || c == '-')
        {
            self.bump();
        }
        if self.pos == start {
            None
        } else {
            Some(&self.input[start..self.pos])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(name: &str) -> bool {
        matches!(name, "main" | "main.third" | "foo" | "net")
    }

    fn parse_ok(input: &str) -> Vec<StagedEdit> {
        parse(input, &known).expect("control string should parse")
    }

    fn parse_err(input: &str) -> MlogError {
        parse(input, &known).expect_err("control string should fail")
    }

    #[test]
    fn test_all_and_none() {
        let edits = parse_ok("all");
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].facility, None);
        assert_eq!(edits[0].importances.len(), 7);
        assert!(edits[0].enable);

        let edits = parse_ok("none");
        assert!(!edits[0].enable);
    }

    #[test]
    fn test_single_importance() {
        let edits = parse_ok("debug");
        assert_eq!(edits[0].importances, vec![Importance::Debug]);
        assert!(edits[0].enable);

        let edits = parse_ok("!debug");
        assert_eq!(edits[0].importances, vec![Importance::Debug]);
        assert!(!edits[0].enable);
    }

    #[test]
    fn test_relational() {
        let edits = parse_ok(">=info");
        assert_eq!(
            edits[0].importances,
            vec![
                Importance::Info,
                Importance::Warn,
                Importance::Error,
                Importance::Fatal
            ]
        );

        let edits = parse_ok(">info");
        assert_eq!(
            edits[0].importances,
            vec![Importance::Warn, Importance::Error, Importance::Fatal]
        );

        let edits = parse_ok("<=trace");
        assert_eq!(
            edits[0].importances,
            vec![Importance::Debug, Importance::Trace]
        );

        let edits = parse_ok("<trace");
        assert_eq!(edits[0].importances, vec![Importance::Debug]);
    }

    #[test]
    fn test_facility_clause() {
        let edits = parse_ok("net");
        assert_eq!(edits[0].facility.as_deref(), Some("net"));
        assert_eq!(edits[0].importances.len(), 7);
        assert!(edits[0].enable);
    }

    #[test]
    fn test_facility_scoped_subcontrol() {
        let edits = parse_ok("debug, main.third(!debug)");
        assert_eq!(edits.len(), 2);
        assert_eq!(edits[0].facility, None);
        assert!(edits[0].enable);
        assert_eq!(edits[1].facility.as_deref(), Some("main.third"));
        assert_eq!(edits[1].importances, vec![Importance::Debug]);
        assert!(!edits[1].enable);
    }

    #[test]
    fn test_subcontrol_with_several_clauses() {
        let edits = parse_ok("foo( none , >=warn )");
        assert_eq!(edits.len(), 2);
        assert!(edits.iter().all(|e| e.facility.as_deref() == Some("foo")));
        assert!(!edits[0].enable);
        assert!(edits[1].enable);
    }

    #[test]
    fn test_whitespace_insignificant() {
        assert_eq!(parse_ok(" none ,  >= info "), parse_ok("none,>=info"));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_ok("").is_empty());
        assert!(parse_ok("   ").is_empty());
    }

    #[test]
    fn test_unknown_name_reports_column() {
        let err = parse_err("none, nosuch");
        match err {
            MlogError::Control { column, message } => {
                assert_eq!(column, 7);
                assert!(message.contains("nosuch"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_unknown_importance_in_scope() {
        let err = parse_err("foo(nosuch)");
        match err {
            MlogError::Control { column, message } => {
                assert_eq!(column, 5);
                assert!(message.contains("unknown importance"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_facility_clause_inside_scope_is_error() {
        // Facility names never nest.
        assert!(matches!(
            parse_err("foo(net)"),
            MlogError::Control { .. }
        ));
    }

    #[test]
    fn test_missing_close_paren() {
        let err = parse_err("foo(!debug");
        match err {
            MlogError::Control { column, .. } => assert_eq!(column, 11),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_trailing_comma_is_error() {
        assert!(matches!(parse_err("none,"), MlogError::Control { .. }));
    }

    #[test]
    fn test_bang_without_importance() {
        assert!(matches!(parse_err("!"), MlogError::Control { .. }));
        assert!(matches!(parse_err("!bogus"), MlogError::Control { .. }));
    }
}
