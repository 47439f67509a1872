//! Executes mapping rules against a document.
use crate::error::MappingError;
use crate::node::XmlNodeKind;
use crate::rule::MappingRule;
use crate::transform::TransformRegistry;
use jsonize_jpath::{JsonType, infer_value};
use jsonize_tree::put_in_place;
use jsonize_xpath::{DataSourceNode, Namespaces, select, select_first};
use log::{debug, trace};
use serde_json::{Map, Number, Value};

/// What rule execution needs besides the document and the output.
#[derive(Debug, Clone, Copy)]
pub struct ApplyContext<'c> {
    pub namespaces: &'c Namespaces,
    pub transformations: &'c TransformRegistry,
}

impl<'c> ApplyContext<'c> {
    pub fn new(namespaces: &'c Namespaces, transformations: &'c TransformRegistry) -> Self {
        Self {
            namespaces,
            transformations,
        }
    }
}

/// Applies `rules` in order, each against the whole document.
pub fn apply_rules<'a, N: DataSourceNode<'a>>(
    rules: &[MappingRule],
    document: N,
    output: &mut Value,
    ctx: &ApplyContext<'_>,
) -> Result<(), MappingError> {
    let root = document.document_root();
    for rule in rules {
        rule.apply(root, output, ctx)?;
    }
    Ok(())
}

impl MappingRule {
    /// Reads this rule's source relative to `context` and writes the
    /// converted value at its destination inside `output`.
    ///
    /// A source that is not in the document, or a transformation returning
    /// null, leaves `output` untouched.
    pub fn apply<'a, N: DataSourceNode<'a>>(
        &self,
        context: N,
        output: &mut Value,
        ctx: &ApplyContext<'_>,
    ) -> Result<(), MappingError> {
        let Some(value) = self.read(context, ctx)? else {
            trace!("Nothing found at '{}'", self.from.path);
            return Ok(());
        };

        let value = match &self.transformation {
            Some(name) => {
                let transformation = ctx
                    .transformations
                    .get(name)
                    .ok_or_else(|| MappingError::UnknownTransformation(name.clone()))?;
                transformation(value)
            }
            None => value,
        };
        if value.is_null() {
            return Ok(());
        }

        let value = self.cast(value)?;
        put_in_place(value, &self.to.path, output)?;
        Ok(())
    }

    fn read<'a, N: DataSourceNode<'a>>(&self, context: N, ctx: &ApplyContext<'_>) -> Result<Option<Value>, MappingError> {
        let path = &self.from.path;
        match self.from.kind {
            XmlNodeKind::Sequence => {
                if self.item_mappings.is_empty() {
                    return Err(MappingError::MissingItemMappings(path.to_string()));
                }
                let elements = select(path, context, ctx.namespaces)?;
                if elements.is_empty() {
                    return Ok(None);
                }
                debug!("Mapping {} items of '{}'", elements.len(), path);
                let items = elements
                    .into_iter()
                    .map(|element| self.build_item(element, Value::Null, ctx))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Some(Value::Array(items)))
            }
            XmlNodeKind::Element | XmlNodeKind::Value
                if self.to.kind == JsonType::Object && !self.item_mappings.is_empty() =>
            {
                match select_first(path, context, ctx.namespaces)? {
                    Some(element) => Ok(Some(self.build_item(element, Value::Object(Map::new()), ctx)?)),
                    None => Ok(None),
                }
            }
            XmlNodeKind::Value => {
                Ok(select_first(path, context, ctx.namespaces)?.and_then(|node| node.text().map(Value::String)))
            }
            XmlNodeKind::Element => {
                Ok(select_first(path, context, ctx.namespaces)?.map(|node| Value::String(node.string_value())))
            }
            XmlNodeKind::Attribute => {
                path.attribute_name()?;
                Ok(select_first(path, context, ctx.namespaces)?.map(|node| Value::String(node.string_value())))
            }
        }
    }

    fn build_item<'a, N: DataSourceNode<'a>>(
        &self,
        element: N,
        mut item: Value,
        ctx: &ApplyContext<'_>,
    ) -> Result<Value, MappingError> {
        for mapping in &self.item_mappings {
            mapping.apply(element, &mut item, ctx)?;
        }
        Ok(item)
    }

    /// Converts a read value into the destination type.
    fn cast(&self, value: Value) -> Result<Value, MappingError> {
        let target = self.to.kind;
        let fail = |value: &Value| MappingError::Cast {
            path: self.from.path.to_string(),
            value: value.to_string(),
            target,
        };

        match target {
            JsonType::Infer => Ok(match value {
                Value::String(text) => infer_value(&text),
                other => other,
            }),
            JsonType::String => match value {
                Value::String(_) => Ok(value),
                Value::Number(_) | Value::Bool(_) => Ok(Value::String(value.to_string())),
                other => Err(fail(&other)),
            },
            JsonType::Integer => match &value {
                Value::Number(n) if n.is_i64() || n.is_u64() => Ok(value.clone()),
                Value::Number(n) => n
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                    .map(|f| Value::from(f as i64))
                    .ok_or_else(|| fail(&value)),
                Value::String(text) => text.trim().parse::<i64>().map(Value::from).map_err(|_| fail(&value)),
                _ => Err(fail(&value)),
            },
            JsonType::Number => match &value {
                Value::Number(_) => Ok(value.clone()),
                Value::String(text) => text
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .ok_or_else(|| fail(&value)),
                _ => Err(fail(&value)),
            },
            JsonType::Boolean => match &value {
                Value::Bool(_) => Ok(value.clone()),
                Value::String(text) if text == "true" => Ok(Value::Bool(true)),
                Value::String(text) if text == "false" => Ok(Value::Bool(false)),
                _ => Err(fail(&value)),
            },
            JsonType::Array => match value {
                Value::Array(_) => Ok(value),
                other => Err(fail(&other)),
            },
            JsonType::Object => match value {
                Value::Object(_) => Ok(value),
                other => Err(fail(&other)),
            },
            JsonType::Null => Ok(Value::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasources::XmlDocument;
    use jsonize_jpath::parse_path;
    use jsonize_xpath::parse_xpath;
    use jsonize_xpath::tests::create_test_tree;
    use serde_json::json;

    fn rule(from: &str, from_kind: XmlNodeKind, to: &str, to_kind: JsonType) -> MappingRule {
        MappingRule::new(parse_xpath(from).unwrap(), from_kind, parse_path(to).unwrap(), to_kind)
    }

    fn books_table() -> Namespaces {
        Namespaces::new().with(None, "urn:books").with(Some("meta"), "urn:meta")
    }

    #[test]
    fn test_value_and_attribute_rules() {
        let tree = create_test_tree();
        let table = books_table();
        let registry = TransformRegistry::default();
        let ctx = ApplyContext::new(&table, &registry);

        let rules = vec![
            rule("/library/book[1]/title", XmlNodeKind::Value, "$.first.title", JsonType::String),
            rule("/library/book[2]/@id", XmlNodeKind::Attribute, "$.second.id", JsonType::Infer),
            rule("/library/book[1]/@meta:lang", XmlNodeKind::Attribute, "$.first.lang", JsonType::String)
                .with_transformation("upper"),
            rule("/library/book", XmlNodeKind::Element, "$.first.text", JsonType::Infer),
        ];

        let mut output = Value::Null;
        apply_rules(&rules, tree.node(9), &mut output, &ctx).unwrap();
        assert_eq!(
            output,
            json!({
                "first": {"title": "Dune", "lang": "EN", "text": "Dune"},
                "second": {"id": "b2"}
            })
        );
    }

    #[test]
    fn test_sequence_rule_builds_items() {
        let tree = create_test_tree();
        let table = books_table();
        let registry = TransformRegistry::default();
        let ctx = ApplyContext::new(&table, &registry);

        let books = rule("/library/book", XmlNodeKind::Sequence, "$.books", JsonType::Array).with_item_mappings(vec![
            rule("./@id", XmlNodeKind::Attribute, "@.id", JsonType::Infer),
            rule("./title", XmlNodeKind::Value, "@.title", JsonType::Infer),
            rule("./@meta:lang", XmlNodeKind::Attribute, "@.lang", JsonType::Infer),
        ]);

        let mut output = json!({"kept": true});
        books.apply(tree.root(), &mut output, &ctx).unwrap();
        assert_eq!(
            output,
            json!({
                "kept": true,
                "books": [
                    {"id": "b1", "title": "Dune", "lang": "en"},
                    {"id": "b2", "title": "Emma"}
                ]
            })
        );
    }

    #[test]
    fn test_sequence_of_values_and_count() {
        let doc = XmlDocument::parse("<r><n>1</n><n>2.5</n><n>x</n></r>").unwrap();
        let table = Namespaces::new();
        let registry = TransformRegistry::default();
        let ctx = ApplyContext::new(&table, &registry);

        let values = rule("/r/n", XmlNodeKind::Sequence, "$.values", JsonType::Array)
            .with_item_mappings(vec![rule(".", XmlNodeKind::Value, "@", JsonType::Infer)]);
        let count = values.clone().with_transformation("count");

        let mut output = Value::Null;
        values.apply(doc.root_node(), &mut output, &ctx).unwrap();
        assert_eq!(output, json!({"values": [1, 2.5, "x"]}));

        let mut output = Value::Null;
        let count = MappingRule {
            to: crate::rule::JsonEndpoint {
                path: parse_path("$.count").unwrap(),
                kind: JsonType::Integer,
            },
            ..count
        };
        count.apply(doc.root_node(), &mut output, &ctx).unwrap();
        assert_eq!(output, json!({"count": 3}));
    }

    #[test]
    fn test_object_rule_from_item_mappings() {
        let doc = XmlDocument::parse(r#"<r><p name="a">1</p></r>"#).unwrap();
        let table = Namespaces::new();
        let registry = TransformRegistry::default();
        let ctx = ApplyContext::new(&table, &registry);

        let object = rule("/r/p", XmlNodeKind::Element, "$.p", JsonType::Object).with_item_mappings(vec![
            rule("./@name", XmlNodeKind::Attribute, "@.name", JsonType::String),
            rule(".", XmlNodeKind::Value, "@.v", JsonType::Integer),
        ]);

        let mut output = Value::Null;
        object.apply(doc.root_node(), &mut output, &ctx).unwrap();
        assert_eq!(output, json!({"p": {"name": "a", "v": 1}}));
    }

    #[test]
    fn test_missing_sources_leave_output_untouched() {
        let tree = create_test_tree();
        let table = books_table();
        let registry = TransformRegistry::default();
        let ctx = ApplyContext::new(&table, &registry);

        let rules = vec![
            rule("/library/book[3]/title", XmlNodeKind::Value, "$.a", JsonType::Infer),
            rule("/library/book[1]/@missing", XmlNodeKind::Attribute, "$.b", JsonType::Infer),
            rule("/library/magazine", XmlNodeKind::Sequence, "$.c", JsonType::Array)
                .with_item_mappings(vec![rule(".", XmlNodeKind::Value, "@", JsonType::Infer)]),
            rule("/library", XmlNodeKind::Value, "$.d", JsonType::Infer),
        ];

        let mut output = json!({"x": 1});
        apply_rules(&rules, tree.root(), &mut output, &ctx).unwrap();
        assert_eq!(output, json!({"x": 1}));
    }

    #[test]
    fn test_casts() {
        let doc = XmlDocument::parse(r#"<r i=" 42 " f="2.50" t="true" T="True" s="007"/>"#).unwrap();
        let table = Namespaces::new();
        let registry = TransformRegistry::default();
        let ctx = ApplyContext::new(&table, &registry);
        let read = |attribute: &str, kind: JsonType| {
            let mut output = Value::Null;
            rule(&format!("/r/@{attribute}"), XmlNodeKind::Attribute, "$.v", kind)
                .apply(doc.root_node(), &mut output, &ctx)
                .map(|_| output["v"].clone())
        };

        assert_eq!(read("i", JsonType::Integer).unwrap(), json!(42));
        assert_eq!(read("f", JsonType::Number).unwrap(), json!(2.5));
        assert_eq!(read("t", JsonType::Boolean).unwrap(), json!(true));
        assert_eq!(read("s", JsonType::String).unwrap(), json!("007"));
        assert_eq!(read("s", JsonType::Infer).unwrap(), json!(7));
        assert_eq!(read("s", JsonType::Null).unwrap(), Value::Null);

        assert!(matches!(
            read("T", JsonType::Boolean),
            Err(MappingError::Cast { target: JsonType::Boolean, .. })
        ));
        assert!(matches!(read("f", JsonType::Integer), Err(MappingError::Cast { .. })));
        assert!(matches!(read("t", JsonType::Array), Err(MappingError::Cast { .. })));
    }

    #[test]
    fn test_configuration_errors() {
        let tree = create_test_tree();
        let table = books_table();
        let registry = TransformRegistry::new();
        let ctx = ApplyContext::new(&table, &registry);
        let mut output = Value::Null;

        let sequence = rule("/library/book", XmlNodeKind::Sequence, "$.b", JsonType::Array);
        assert_eq!(
            sequence.apply(tree.root(), &mut output, &ctx),
            Err(MappingError::MissingItemMappings("/library/book".to_string()))
        );

        let transformed =
            rule("/library/book[1]/title", XmlNodeKind::Value, "$.t", JsonType::Infer).with_transformation("upper");
        assert_eq!(
            transformed.apply(tree.root(), &mut output, &ctx),
            Err(MappingError::UnknownTransformation("upper".to_string()))
        );

        let not_attribute = rule("/library/book[1]", XmlNodeKind::Attribute, "$.t", JsonType::Infer);
        assert!(matches!(
            not_attribute.apply(tree.root(), &mut output, &ctx),
            Err(MappingError::XPath(_))
        ));
        assert_eq!(output, Value::Null);
    }

    #[test]
    fn test_write_failures_surface() {
        let tree = create_test_tree();
        let table = books_table();
        let registry = TransformRegistry::default();
        let ctx = ApplyContext::new(&table, &registry);

        let mut output = json!({"list": [1]});
        let error = rule("/library/book[1]/title", XmlNodeKind::Value, "$.list[5]", JsonType::Infer)
            .apply(tree.root(), &mut output, &ctx)
            .unwrap_err();
        assert!(matches!(error, MappingError::Access(_)));
        assert_eq!(output, json!({"list": [1]}));
    }
}
