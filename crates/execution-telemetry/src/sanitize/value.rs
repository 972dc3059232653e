use async_graphql_parser::Positioned;
use async_graphql_value::{ConstValue, Name, Value};

pub(super) fn sanitize_arguments(arguments: &[(Positioned<Name>, Positioned<Value>)], rendered: &mut String) {
    let arguments_count = arguments.len();

    for (i, (name, value)) in arguments.iter().enumerate() {
        if i == 0 {
            rendered.push('(');
        }

        rendered.push_str(name.node.as_str());
        rendered.push_str(": ");

        sanitize(&value.node, rendered);

        if i == arguments_count - 1 {
            rendered.push(')');
        } else {
            rendered.push_str(", ");
        }
    }
}

pub(super) fn sanitize(value: &Value, rendered: &mut String) {
    match value {
        Value::Variable(name) => {
            rendered.push('$');
            rendered.push_str(name.as_str());
        }
        Value::Null => rendered.push_str("null"),
        Value::Number(_) => rendered.push('0'),
        Value::String(_) | Value::Binary(_) => rendered.push_str("\"\""),
        Value::Boolean(value) => rendered.push_str(if *value { "true" } else { "false" }),
        Value::Enum(name) => rendered.push_str(name.as_str()),
        Value::List(_) => rendered.push_str("[]"),
        Value::Object(_) => rendered.push_str("{}"),
    }
}

pub(super) fn sanitize_const(value: &ConstValue, rendered: &mut String) {
    match value {
        ConstValue::Null => rendered.push_str("null"),
        ConstValue::Number(_) => rendered.push('0'),
        ConstValue::String(_) | ConstValue::Binary(_) => rendered.push_str("\"\""),
        ConstValue::Boolean(value) => rendered.push_str(if *value { "true" } else { "false" }),
        ConstValue::Enum(name) => rendered.push_str(name.as_str()),
        ConstValue::List(_) => rendered.push_str("[]"),
        ConstValue::Object(_) => rendered.push_str("{}"),
    }
}
