//! Query construction and evaluation for the document store.
//!
//! A [`FilterRequest`] bundles a declarative [`Selector`], an optional
//! [`SortSpec`], and an optional result limit. Selectors compile into a list
//! of predicate functions that are ANDed over every row; the first predicate
//! always checks that the row is a JSON object, so non-object rows never
//! match anything.
//!
//! # Example
//!
//! ```ignore
//! use jotdb_core::query::{Condition, FilterRequest, SortDirection};
//!
//! let request = FilterRequest::builder()
//!     .field("boolAttr", Condition::eq(false))
//!     .sort("numberAttr", SortDirection::Desc)
//!     .limit(10)
//!     .build();
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// A caller-supplied match function over a row.
pub type MatcherFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A caller-supplied comparator over two rows.
pub type ComparatorFn = Arc<dyn Fn(&Value, &Value) -> Ordering + Send + Sync>;

/// A compiled predicate over a row.
pub type Predicate<'a> = Box<dyn Fn(&Value) -> bool + Send + Sync + 'a>;

/// The declarative match expression of a filter request.
///
/// Either an opaque matcher function, or a mapping from attribute names to
/// [`Condition`]s that all must hold.
#[derive(Clone)]
pub enum Selector {
    /// Match rows with a caller-supplied function.
    Matcher(MatcherFn),
    /// Match rows attribute by attribute.
    Fields(Vec<(String, Condition)>),
}

impl Selector {
    /// A selector that matches every (object) row.
    pub fn all() -> Self {
        Selector::Fields(Vec::new())
    }

    /// Wraps a match function as a selector.
    pub fn matcher(func: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Selector::Matcher(Arc::new(func))
    }

    /// Builds a field selector from attribute/condition pairs.
    pub fn fields(pairs: impl IntoIterator<Item = (String, Condition)>) -> Self {
        Selector::Fields(pairs.into_iter().collect())
    }
}

impl Default for Selector {
    fn default() -> Self {
        Selector::all()
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Matcher(_) => f.write_str("Selector::Matcher(..)"),
            Selector::Fields(fields) => f.debug_tuple("Selector::Fields").field(fields).finish(),
        }
    }
}

/// The condition one attribute must satisfy: a literal to deep-equal
/// (including `null`), or a set of operator/operand pairs.
#[derive(Clone, Debug)]
pub enum Condition {
    /// Deep structural equality against a literal value.
    Literal(Value),
    /// One or more `$`-prefixed operators applied to the attribute.
    Ops(Vec<(String, Value)>),
}

impl Condition {
    /// Deep equality against a literal, `Condition::Literal` shorthand.
    pub fn literal(value: impl Into<Value>) -> Self {
        Condition::Literal(value.into())
    }

    /// A single operator/operand pair. Unrecognized operator keys compile to
    /// no predicate (they are logged and ignored at evaluation time).
    pub fn operator(key: impl Into<String>, operand: impl Into<Value>) -> Self {
        Condition::Ops(vec![(key.into(), operand.into())])
    }

    /// Several operator/operand pairs that all must hold, e.g. a
    /// `$gte`/`$lt` range.
    pub fn operators(ops: impl IntoIterator<Item = (String, Value)>) -> Self {
        Condition::Ops(ops.into_iter().collect())
    }

    /// `$eq` — deep structural equality.
    pub fn eq(operand: impl Into<Value>) -> Self {
        Self::operator("$eq", operand)
    }

    /// `$ne` — negated deep structural equality.
    pub fn ne(operand: impl Into<Value>) -> Self {
        Self::operator("$ne", operand)
    }

    /// `$gt` — strictly greater than.
    pub fn gt(operand: impl Into<Value>) -> Self {
        Self::operator("$gt", operand)
    }

    /// `$gte` — greater than or equal.
    pub fn gte(operand: impl Into<Value>) -> Self {
        Self::operator("$gte", operand)
    }

    /// `$lt` — strictly less than.
    pub fn lt(operand: impl Into<Value>) -> Self {
        Self::operator("$lt", operand)
    }

    /// `$lte` — less than or equal.
    pub fn lte(operand: impl Into<Value>) -> Self {
        Self::operator("$lte", operand)
    }

    /// `$in` — the attribute deep-equals some element of the operand sequence.
    pub fn is_in(operand: impl Into<Value>) -> Self {
        Self::operator("$in", operand)
    }

    /// `$nin` — the attribute deep-equals no element of the operand sequence.
    pub fn not_in(operand: impl Into<Value>) -> Self {
        Self::operator("$nin", operand)
    }
}

impl From<Value> for Condition {
    fn from(value: Value) -> Self {
        Condition::Literal(value)
    }
}

/// Sort direction for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order (0 to 9, A to Z, `true` before `false`).
    Asc,
    /// Descending order.
    Desc,
}

/// Sort specification for query results: an attribute (ascending by
/// default), an attribute with an explicit direction, or a comparator
/// function used verbatim.
#[derive(Clone)]
pub enum SortSpec {
    /// Sort by attribute, ascending.
    Attribute(String),
    /// Sort by attribute with an explicit direction.
    Directed(String, SortDirection),
    /// Sort with a caller-supplied comparator.
    Comparator(ComparatorFn),
}

impl fmt::Debug for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortSpec::Attribute(attr) => f.debug_tuple("SortSpec::Attribute").field(attr).finish(),
            SortSpec::Directed(attr, direction) => f
                .debug_tuple("SortSpec::Directed")
                .field(attr)
                .field(direction)
                .finish(),
            SortSpec::Comparator(_) => f.write_str("SortSpec::Comparator(..)"),
        }
    }
}

/// A structured query: selector + optional sort + optional limit.
///
/// A `limit` of `0` (or none at all) means unbounded.
#[derive(Clone, Debug, Default)]
pub struct FilterRequest {
    /// The match expression applied to every row.
    pub selector: Selector,
    /// Optional ordering of the surviving rows.
    pub sort: Option<SortSpec>,
    /// Optional cap on the number of returned rows.
    pub limit: Option<usize>,
}

impl FilterRequest {
    /// Creates a builder for fluent construction.
    pub fn builder() -> FilterRequestBuilder {
        FilterRequestBuilder::default()
    }
}

/// Fluent builder for [`FilterRequest`].
#[derive(Default)]
pub struct FilterRequestBuilder {
    request: FilterRequest,
}

impl FilterRequestBuilder {
    /// Adds an attribute condition. Replaces any matcher selector set before.
    pub fn field(mut self, attr: impl Into<String>, condition: impl Into<Condition>) -> Self {
        let pair = (attr.into(), condition.into());
        match &mut self.request.selector {
            Selector::Fields(fields) => fields.push(pair),
            Selector::Matcher(_) => self.request.selector = Selector::Fields(vec![pair]),
        }
        self
    }

    /// Uses a match function as the selector, replacing any field conditions.
    pub fn matcher(mut self, func: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.request.selector = Selector::matcher(func);
        self
    }

    /// Sorts by attribute in the given direction.
    pub fn sort(mut self, attr: impl Into<String>, direction: SortDirection) -> Self {
        self.request.sort = Some(SortSpec::Directed(attr.into(), direction));
        self
    }

    /// Sorts with a caller-supplied comparator.
    pub fn sort_with(
        mut self,
        comparator: impl Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.request.sort = Some(SortSpec::Comparator(Arc::new(comparator)));
        self
    }

    /// Caps the number of returned rows. `0` means unbounded.
    pub fn limit(mut self, limit: usize) -> Self {
        self.request.limit = Some(limit);
        self
    }

    /// Builds the final request.
    pub fn build(self) -> FilterRequest {
        self.request
    }
}

/// An ordered sequence of matching rows plus paging statistics.
///
/// `offset` is always `0` and `page_size` is always `0` ("all rows"); there
/// is no true pagination. `total_rows` counts the rows after limiting.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FilterResponse {
    /// The matching rows, ordered if a sort was requested.
    pub rows: Vec<Value>,
    /// Always `0`.
    pub offset: usize,
    /// Always `0`, meaning unbounded.
    pub page_size: usize,
    /// The number of rows after filtering and limiting.
    pub total_rows: usize,
}

impl FilterResponse {
    /// Wraps the rows and attaches the paging statistics.
    pub fn with_statistics(rows: Vec<Value>) -> Self {
        let total_rows = rows.len();
        Self {
            rows,
            offset: 0,
            page_size: 0,
            total_rows,
        }
    }
}

/// Compiles a selector into its predicate list.
///
/// The list always starts with the row-is-object guard. Field conditions
/// expand to one predicate per recognized operator; an unrecognized operator
/// key is logged and contributes no predicate, so a condition made only of
/// unknown operators degenerates to "always true" for that attribute.
pub fn compile(selector: &Selector) -> Vec<Predicate<'_>> {
    let mut predicates: Vec<Predicate<'_>> = vec![Box::new(|row: &Value| row.is_object())];

    match selector {
        Selector::Matcher(func) => {
            let func = Arc::clone(func);
            predicates.push(Box::new(move |row| func(row)));
        }
        Selector::Fields(fields) => {
            for (attr, condition) in fields {
                match condition {
                    Condition::Literal(expected) => {
                        predicates.push(Box::new(move |row| {
                            row.get(attr).is_some_and(|value| value_eq(value, expected))
                        }));
                    }
                    Condition::Ops(ops) => compile_operators(attr, ops, &mut predicates),
                }
            }
        }
    }

    predicates
}

fn compile_operators<'a>(
    attr: &'a str,
    ops: &'a [(String, Value)],
    out: &mut Vec<Predicate<'a>>,
) {
    for (key, operand) in ops {
        match key.as_str() {
            "$eq" => out.push(Box::new(move |row| {
                row.get(attr).is_some_and(|value| value_eq(value, operand))
            })),
            "$ne" => out.push(Box::new(move |row| {
                !row.get(attr).is_some_and(|value| value_eq(value, operand))
            })),
            "$gt" => out.push(Box::new(move |row| {
                relational_cmp(row.get(attr), operand) == Some(Ordering::Greater)
            })),
            "$gte" => out.push(Box::new(move |row| {
                matches!(
                    relational_cmp(row.get(attr), operand),
                    Some(Ordering::Greater | Ordering::Equal)
                )
            })),
            "$lt" => out.push(Box::new(move |row| {
                relational_cmp(row.get(attr), operand) == Some(Ordering::Less)
            })),
            "$lte" => out.push(Box::new(move |row| {
                matches!(
                    relational_cmp(row.get(attr), operand),
                    Some(Ordering::Less | Ordering::Equal)
                )
            })),
            "$in" => out.push(Box::new(move |row| membership(row.get(attr), operand, true))),
            "$nin" => out.push(Box::new(move |row| membership(row.get(attr), operand, false))),
            _ => {
                warn!(attribute = attr, operator = %key, "ignoring unrecognized filter operator");
            }
        }
    }
}

/// Logical AND over all compiled predicates. An empty list is vacuously true.
pub fn matches(row: &Value, predicates: &[Predicate<'_>]) -> bool {
    predicates.iter().all(|predicate| predicate(row))
}

/// Deep structural equality with numeric normalization (`1 == 1.0`).
pub fn value_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(v, w)| value_eq(v, w))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, v)| y.get(k).is_some_and(|w| value_eq(v, w)))
        }
        _ => a == b,
    }
}

/// Relational comparison for `$gt`/`$gte`/`$lt`/`$lte`.
///
/// Two strings compare as strings; anything else coerces both sides to a
/// number. A `null` (or otherwise uncoercible) operand coerces to `0`; a
/// row attribute that cannot coerce compares as `None`, so the predicate is
/// false either way.
fn relational_cmp(attr_value: Option<&Value>, operand: &Value) -> Option<Ordering> {
    if let (Some(Value::String(a)), Value::String(b)) = (attr_value, operand) {
        return Some(a.as_str().cmp(b.as_str()));
    }

    let a = coerce_number(attr_value?)?;
    let b = coerce_number(operand).unwrap_or(0.0);

    a.partial_cmp(&b)
}

/// Numeric coercion: numbers pass through, `null` is `0`, booleans are
/// `0`/`1`, numeric strings parse, and empty or whitespace-only strings are
/// `0`. Everything else has no numeric value.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        _ => None,
    }
}

/// `$in`/`$nin` membership. A non-sequence operand is vacuously true for
/// both polarities (a permissive no-op, not an error).
fn membership(attr_value: Option<&Value>, operand: &Value, include: bool) -> bool {
    match operand {
        Value::Array(candidates) => {
            let hit = attr_value
                .is_some_and(|value| candidates.iter().any(|candidate| value_eq(value, candidate)));
            if include { hit } else { !hit }
        }
        _ => true,
    }
}

/// The comparator kind, chosen once per sort from the first row's attribute.
///
/// Rows whose attribute kind differs from the first row's get a defined but
/// caveated ordering: under `Number`, `Bool` and `Str` mismatched rows
/// compare equal; `Other` falls back to a structural ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortKeyKind {
    Number,
    Bool,
    Str,
    Other,
}

impl SortKeyKind {
    fn of(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(_)) => SortKeyKind::Number,
            Some(Value::Bool(_)) => SortKeyKind::Bool,
            Some(Value::String(_)) => SortKeyKind::Str,
            _ => SortKeyKind::Other,
        }
    }
}

/// Builds the comparator for a sort specification against the given rows.
///
/// A comparator function is used verbatim. Attribute sorts pick the
/// [`SortKeyKind`] from the first row and compare every pair with that one
/// comparator; descending reverses the ascending outcome.
pub fn build_comparator(rows: &[Value], spec: &SortSpec) -> ComparatorFn {
    match spec {
        SortSpec::Comparator(func) => Arc::clone(func),
        SortSpec::Attribute(attr) => attribute_comparator(rows, attr.clone(), SortDirection::Asc),
        SortSpec::Directed(attr, direction) => attribute_comparator(rows, attr.clone(), *direction),
    }
}

fn attribute_comparator(rows: &[Value], attr: String, direction: SortDirection) -> ComparatorFn {
    let kind = SortKeyKind::of(rows.first().and_then(|row| row.get(&attr)));

    Arc::new(move |a, b| {
        let left = a.get(&attr);
        let right = b.get(&attr);

        let ordering = match kind {
            SortKeyKind::Number => match (
                left.and_then(Value::as_f64),
                right.and_then(Value::as_f64),
            ) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                _ => Ordering::Equal,
            },
            // `true` sorts before `false` ascending.
            SortKeyKind::Bool => match (left.and_then(Value::as_bool), right.and_then(Value::as_bool)) {
                (Some(x), Some(y)) => y.cmp(&x),
                _ => Ordering::Equal,
            },
            SortKeyKind::Str => match (left.and_then(Value::as_str), right.and_then(Value::as_str)) {
                (Some(x), Some(y)) => x.cmp(y),
                _ => Ordering::Equal,
            },
            SortKeyKind::Other => structural_cmp(left, right),
        };

        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    })
}

/// Total structural ordering over JSON values: by variant rank
/// (null < bool < number < string < array < object), then by value.
/// A missing attribute orders with `null`.
fn structural_cmp(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    fn rank(value: &Value) -> u8 {
        match value {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    let left = left.unwrap_or(&Value::Null);
    let right = right.unwrap_or(&Value::Null);

    match (left, right) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => {
            for (v, w) in x.iter().zip(y) {
                let ordering = structural_cmp(Some(v), Some(w));
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            x.len().cmp(&y.len())
        }
        (Value::Object(x), Value::Object(y)) => {
            for ((xk, xv), (yk, yv)) in x.iter().zip(y.iter()) {
                let ordering = xk.cmp(yk);
                if ordering != Ordering::Equal {
                    return ordering;
                }
                let ordering = structural_cmp(Some(xv), Some(yv));
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            x.len().cmp(&y.len())
        }
        _ => rank(left).cmp(&rank(right)),
    }
}

/// Runs the full pipeline: filter every row by the compiled predicates, sort
/// when a sort is specified and at least one row survived, truncate to a
/// positive limit, and attach the paging statistics.
pub fn execute<'a, I>(rows: I, request: &FilterRequest) -> FilterResponse
where
    I: IntoIterator<Item = &'a Value>,
{
    let predicates = compile(&request.selector);
    let mut rows: Vec<Value> = rows
        .into_iter()
        .filter(|row| matches(row, &predicates))
        .cloned()
        .collect();

    if let Some(spec) = &request.sort {
        if !rows.is_empty() {
            let comparator = build_comparator(&rows, spec);
            rows.sort_by(|a, b| comparator(a, b));
        }
    }

    if let Some(limit) = request.limit {
        if limit > 0 && rows.len() > limit {
            rows.truncate(limit);
        }
    }

    FilterResponse::with_statistics(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows() -> Vec<Value> {
        vec![
            json!({ "_id": "1", "boolAttr": false, "numberAttr": 9, "stringAttr": "String1" }),
            json!({ "_id": "2", "boolAttr": true, "numberAttr": 16, "stringAttr": "String2" }),
            json!({ "_id": "3", "boolAttr": false, "numberAttr": 11, "stringAttr": "String3" }),
        ]
    }

    fn run(request: FilterRequest) -> FilterResponse {
        let rows = rows();
        execute(rows.iter(), &request)
    }

    fn number_attrs(response: &FilterResponse) -> Vec<i64> {
        response
            .rows
            .iter()
            .map(|row| row["numberAttr"].as_i64().unwrap())
            .collect()
    }

    #[test]
    fn eq_with_descending_sort() {
        let response = run(
            FilterRequest::builder()
                .field("boolAttr", Condition::eq(false))
                .sort("numberAttr", SortDirection::Desc)
                .build(),
        );

        assert_eq!(response.total_rows, 2);
        assert_eq!(number_attrs(&response), vec![11, 9]);
    }

    #[test]
    fn literal_condition_is_deep_equality() {
        let response = run(
            FilterRequest::builder()
                .field("stringAttr", Condition::literal("String2"))
                .build(),
        );

        assert_eq!(number_attrs(&response), vec![16]);
    }

    #[test]
    fn matcher_selector_compiles_behind_object_guard() {
        let request = FilterRequest::builder()
            .matcher(|row| row["numberAttr"].as_i64().unwrap_or(0) >= 11)
            .sort("stringAttr", SortDirection::Asc)
            .build();

        let response = run(request);
        assert_eq!(number_attrs(&response), vec![16, 11]);

        // Non-object rows never reach the matcher.
        let selector = Selector::matcher(|_| true);
        let predicates = compile(&selector);
        assert!(!matches(&json!(42), &predicates));
    }

    #[test]
    fn relational_null_operand_compares_as_zero() {
        let response = run(
            FilterRequest::builder()
                .field("numberAttr", Condition::gt(Value::Null))
                .build(),
        );
        assert_eq!(response.total_rows, 3);

        let response = run(
            FilterRequest::builder()
                .field("numberAttr", Condition::lt(Value::Null))
                .build(),
        );
        assert_eq!(response.total_rows, 0);
    }

    #[test]
    fn relational_strings_compare_as_strings() {
        let response = run(
            FilterRequest::builder()
                .field("stringAttr", Condition::gte("String2"))
                .sort("stringAttr", SortDirection::Asc)
                .build(),
        );

        assert_eq!(number_attrs(&response), vec![16, 11]);
    }

    #[test]
    fn relational_blank_strings_coerce_to_zero() {
        let rows = vec![
            json!({ "_id": "1", "label": "" }),
            json!({ "_id": "2", "label": "   " }),
            json!({ "_id": "3", "label": "5" }),
        ];

        let request = FilterRequest::builder()
            .field("label", Condition::gte(Value::Null))
            .build();
        assert_eq!(execute(rows.iter(), &request).total_rows, 3);

        let request = FilterRequest::builder()
            .field("label", Condition::gt(0))
            .build();
        let response = execute(rows.iter(), &request);
        assert_eq!(response.total_rows, 1);
        assert_eq!(response.rows[0]["_id"], "3");
    }

    #[test]
    fn relational_range_with_two_operators() {
        let response = run(
            FilterRequest::builder()
                .field(
                    "numberAttr",
                    Condition::operators(vec![
                        ("$gte".to_string(), json!(10)),
                        ("$lt".to_string(), json!(16)),
                    ]),
                )
                .build(),
        );

        assert_eq!(number_attrs(&response), vec![11]);
    }

    #[test]
    fn membership_matches_by_deep_equality() {
        let response = run(
            FilterRequest::builder()
                .field("numberAttr", Condition::is_in(json!([9, 16])))
                .sort("numberAttr", SortDirection::Asc)
                .build(),
        );
        assert_eq!(number_attrs(&response), vec![9, 16]);

        let response = run(
            FilterRequest::builder()
                .field("numberAttr", Condition::not_in(json!([9, 16])))
                .build(),
        );
        assert_eq!(number_attrs(&response), vec![11]);
    }

    #[test]
    fn membership_non_sequence_operand_is_vacuously_true() {
        for condition in [Condition::is_in(json!("scalar")), Condition::not_in(json!(7))] {
            let response = run(FilterRequest::builder().field("numberAttr", condition).build());
            assert_eq!(response.total_rows, 3);
        }
    }

    #[test]
    fn unknown_operator_degenerates_to_always_true() {
        let response = run(
            FilterRequest::builder()
                .field("numberAttr", Condition::operator("$regex", "9|16"))
                .build(),
        );

        assert_eq!(response.total_rows, 3);
    }

    #[test]
    fn ne_excludes_equal_rows() {
        let response = run(
            FilterRequest::builder()
                .field("boolAttr", Condition::ne(false))
                .build(),
        );

        assert_eq!(number_attrs(&response), vec![16]);
    }

    #[test]
    fn numbers_normalize_across_integer_and_float() {
        let response = run(
            FilterRequest::builder()
                .field("numberAttr", Condition::eq(9.0))
                .build(),
        );

        assert_eq!(response.total_rows, 1);
    }

    #[test]
    fn bool_sort_puts_true_first_ascending() {
        let response = run(
            FilterRequest::builder()
                .sort("boolAttr", SortDirection::Asc)
                .build(),
        );
        assert_eq!(response.rows[0]["boolAttr"], json!(true));

        let response = run(
            FilterRequest::builder()
                .sort("boolAttr", SortDirection::Desc)
                .build(),
        );
        assert_eq!(response.rows[2]["boolAttr"], json!(true));
    }

    #[test]
    fn comparator_function_is_used_verbatim() {
        let request = FilterRequest {
            selector: Selector::all(),
            sort: Some(SortSpec::Comparator(Arc::new(|a, b| {
                // boolAttr first, then stringAttr
                let left = b["boolAttr"].as_bool().unwrap();
                let right = a["boolAttr"].as_bool().unwrap();
                left.cmp(&right).then_with(|| {
                    a["stringAttr"]
                        .as_str()
                        .unwrap()
                        .cmp(b["stringAttr"].as_str().unwrap())
                })
            }))),
            limit: None,
        };

        let response = run(request);
        assert_eq!(number_attrs(&response), vec![16, 9, 11]);
    }

    #[test]
    fn attribute_sort_defaults_to_ascending() {
        let request = FilterRequest {
            selector: Selector::all(),
            sort: Some(SortSpec::Attribute("numberAttr".to_string())),
            limit: None,
        };

        let response = run(request);
        assert_eq!(number_attrs(&response), vec![9, 11, 16]);
    }

    #[test]
    fn limit_truncates_and_total_counts_the_final_rows() {
        let response = run(
            FilterRequest::builder()
                .sort("numberAttr", SortDirection::Asc)
                .limit(2)
                .build(),
        );
        assert_eq!(response.total_rows, 2);
        assert_eq!(number_attrs(&response), vec![9, 11]);

        // A limit above the result size returns everything.
        let response = run(FilterRequest::builder().limit(99).build());
        assert_eq!(response.total_rows, 3);

        // A limit of zero means unbounded.
        let response = run(FilterRequest::builder().limit(0).build());
        assert_eq!(response.total_rows, 3);
    }

    #[test]
    fn statistics_are_attached() {
        let response = run(FilterRequest::default());

        assert_eq!(response.offset, 0);
        assert_eq!(response.page_size, 0);
        assert_eq!(response.total_rows, response.rows.len());
    }

    #[test]
    fn structural_fallback_orders_mixed_values() {
        let rows = vec![
            json!({ "attr": { "nested": 1 } }),
            json!({ "attr": null }),
            json!({ "attr": [1, 2] }),
        ];
        let request = FilterRequest {
            selector: Selector::all(),
            sort: Some(SortSpec::Directed("attr".to_string(), SortDirection::Asc)),
            limit: None,
        };

        let response = execute(rows.iter(), &request);
        assert!(response.rows[0]["attr"].is_null());
        assert!(response.rows[1]["attr"].is_array());
        assert!(response.rows[2]["attr"].is_object());
    }
}
