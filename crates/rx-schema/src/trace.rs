//! # Traced Checking
//!
//! [`Schema::check_with_trace`](crate::Schema::check_with_trace) walks the
//! tree exactly like `check` (same order, same short-circuiting) and
//! records one [`TraceEntry`] per node it finished evaluating. Entries are
//! in completion order, so a node's children always precede it.
//!
//! Both walks share one generic evaluator parameterized by a [`Tracer`].
//! Plain `check` uses [`NoTrace`], whose methods are empty and compile away.

use std::fmt;

use serde_json::Value;

use crate::schema::Schema;

/// One step into a schema or a value.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Segment<'a> {
    /// A parameter or field name.
    Name(&'a str),
    /// A list position.
    Index(usize),
}

impl fmt::Display for Segment<'_> {
    /// Renders as a JSON Pointer reference token (`~` → `~0`, `/` → `~1`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Name(name) => write!(f, "{}", name.replace('~', "~0").replace('/', "~1")),
            Segment::Index(i) => write!(f, "{i}"),
        }
    }
}

/// Observer of the evaluation walk.
pub(crate) trait Tracer {
    /// Enter a child node located at `schema` (relative to the current
    /// node) and checked against the sub-value at `instance`.
    fn descend(&mut self, schema: &[Segment<'_>], instance: &[Segment<'_>]);

    /// Leave the child entered by the matching `descend`.
    fn ascend(&mut self);

    /// A node finished with `verdict`.
    fn record(&mut self, node: &Schema, value: &Value, verdict: bool);
}

/// Evaluate `node` as a child of the current node.
pub(crate) fn descend<T: Tracer>(
    tracer: &mut T,
    schema: &[Segment<'_>],
    instance: &[Segment<'_>],
    node: &Schema,
    value: &Value,
) -> bool {
    tracer.descend(schema, instance);
    let verdict = node.evaluate(value, tracer);
    tracer.ascend();
    verdict
}

/// Tracer for plain `check`.
pub(crate) struct NoTrace;

impl Tracer for NoTrace {
    #[inline]
    fn descend(&mut self, _: &[Segment<'_>], _: &[Segment<'_>]) {}

    #[inline]
    fn ascend(&mut self) {}

    #[inline]
    fn record(&mut self, _: &Schema, _: &Value, _: bool) {}
}

/// Tracer that accumulates a [`Trace`].
#[derive(Default)]
pub(crate) struct TraceRecorder {
    schema_path: Vec<String>,
    instance_path: Vec<String>,
    frames: Vec<(usize, usize)>,
    entries: Vec<TraceEntry>,
}

impl TraceRecorder {
    pub(crate) fn finish(self) -> Trace {
        Trace {
            entries: self.entries,
        }
    }
}

fn pointer(tokens: &[String]) -> String {
    tokens.iter().map(|t| format!("/{t}")).collect()
}

impl Tracer for TraceRecorder {
    fn descend(&mut self, schema: &[Segment<'_>], instance: &[Segment<'_>]) {
        self.frames.push((schema.len(), instance.len()));
        self.schema_path.extend(schema.iter().map(ToString::to_string));
        self.instance_path
            .extend(instance.iter().map(ToString::to_string));
    }

    fn ascend(&mut self) {
        if let Some((schema, instance)) = self.frames.pop() {
            self.schema_path
                .truncate(self.schema_path.len().saturating_sub(schema));
            self.instance_path
                .truncate(self.instance_path.len().saturating_sub(instance));
        }
    }

    fn record(&mut self, node: &Schema, value: &Value, verdict: bool) {
        self.entries.push(TraceEntry {
            schema_path: pointer(&self.schema_path),
            instance_path: pointer(&self.instance_path),
            uri: node.uri().into_owned(),
            value: value.clone(),
            verdict,
        });
    }
}

/// The verdict of one evaluated node.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceEntry {
    /// JSON Pointer to the node inside the schema definition, e.g.
    /// `/required/name` or `/contents/1`. Empty for the root.
    pub schema_path: String,
    /// JSON Pointer to the checked sub-value inside the input. Empty for
    /// the root and for synthesized values (a `//rec` rest mapping, a
    /// `//seq` tail).
    pub instance_path: String,
    /// URI of the node's type.
    pub uri: String,
    /// The value the node was checked against.
    pub value: Value,
    /// The node's result.
    pub verdict: bool,
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = if self.instance_path.is_empty() {
            "(root)"
        } else {
            self.instance_path.as_str()
        };
        let schema_at = if self.schema_path.is_empty() {
            "(root)"
        } else {
            self.schema_path.as_str()
        };
        write!(
            f,
            "  {at}: {} while checking {} at {schema_at}, value {}",
            self.verdict, self.uri, self.value
        )
    }
}

/// Ordered record of a traced check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    /// Returns the number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in completion order.
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    /// Entries whose verdict was `false`, innermost first.
    pub fn failures(&self) -> impl Iterator<Item = &TraceEntry> {
        self.entries.iter().filter(|e| !e.verdict)
    }
}

impl fmt::Display for Trace {
    /// One line per failed node.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.failures().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rx;
    use serde_json::json;

    #[test]
    fn test_segment_escaping() {
        assert_eq!(Segment::Name("a/b~c").to_string(), "a~1b~0c");
        assert_eq!(Segment::Index(3).to_string(), "3");
    }

    #[test]
    fn test_trace_records_children_before_parent() {
        let rx = Rx::with_core_types();
        let schema = rx
            .make_schema(&json!({"type": "//arr", "contents": "//int"}))
            .unwrap();
        let (ok, trace) = schema.check_with_trace(&json!([1, 2]));
        assert!(ok);
        let paths: Vec<&str> = trace
            .entries()
            .iter()
            .map(|e| e.instance_path.as_str())
            .collect();
        assert_eq!(paths, vec!["/0", "/1", ""]);
        assert_eq!(trace.failures().count(), 0);
    }

    #[test]
    fn test_trace_locates_failure() {
        let rx = Rx::with_core_types();
        let schema = rx
            .make_schema(&json!({
                "type": "//rec",
                "required": {"tags": {"type": "//arr", "contents": "//str"}}
            }))
            .unwrap();
        let (ok, trace) = schema.check_with_trace(&json!({"tags": ["a", 7]}));
        assert!(!ok);

        let first = trace.failures().next().unwrap();
        assert_eq!(first.instance_path, "/tags/1");
        assert_eq!(first.schema_path, "/required/tags/contents");
        assert_eq!(first.uri, "tag:codesimply.com,2008:rx/core/str");
        assert_eq!(first.value, json!(7));

        let rendered = trace.to_string();
        assert!(rendered.contains("/tags/1"));
        assert!(rendered.lines().count() >= 3);
    }

    #[test]
    fn test_trace_short_circuits_like_check() {
        let rx = Rx::with_core_types();
        let schema = rx
            .make_schema(&json!({"type": "//all", "of": ["//fail", "//def"]}))
            .unwrap();
        let (ok, trace) = schema.check_with_trace(&json!(1));
        assert!(!ok);
        // //fail, then //all; //def is never reached.
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.entries()[0].schema_path, "/of/0");
    }

    #[test]
    fn test_entry_display_root() {
        let entry = TraceEntry {
            schema_path: String::new(),
            instance_path: String::new(),
            uri: "tag:codesimply.com,2008:rx/core/nil".to_string(),
            value: json!(1),
            verdict: false,
        };
        let shown = entry.to_string();
        assert!(shown.contains("(root)"));
        assert!(shown.contains("false while checking"));
    }
}
