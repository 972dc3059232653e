//! Renders an executable document on a single line with all literal values blanked. Variables,
//! enum values, booleans and nulls are kept as they are; strings become `""`, numbers `0`,
//! lists `[]` and objects `{}`.

mod directives;
mod selection;
mod value;

use async_graphql_parser::types::{DocumentOperations, ExecutableDocument, OperationDefinition, VariableDefinition};

use crate::{hooks::operation_type_label, request::ExecutionRequest};

/// Sanitizes the document of a request, `None` if it does not parse.
pub fn sanitize_request(request: &ExecutionRequest) -> Option<String> {
    async_graphql_parser::parse_query(&*request.document)
        .ok()
        .map(|document| sanitize(&document))
}

pub fn sanitize(document: &ExecutableDocument) -> String {
    let mut rendered = String::new();

    let mut operations = match &document.operations {
        DocumentOperations::Single(operation) => vec![(None, &operation.node)],
        DocumentOperations::Multiple(operations) => operations
            .iter()
            .map(|(name, operation)| (Some(name.as_str()), &operation.node))
            .collect(),
    };
    operations.sort_by_key(|(name, _)| *name);

    for (name, operation) in operations {
        if !rendered.is_empty() {
            rendered.push(' ');
        }
        sanitize_operation(name, operation, &mut rendered);
    }

    let mut fragments: Vec<_> = document.fragments.iter().collect();
    fragments.sort_by(|(left, _), (right, _)| left.as_str().cmp(right.as_str()));

    for (name, fragment) in fragments {
        if !rendered.is_empty() {
            rendered.push(' ');
        }

        let fragment = &fragment.node;

        rendered.push_str("fragment ");
        rendered.push_str(name.as_str());
        rendered.push_str(" on ");
        rendered.push_str(fragment.type_condition.node.on.node.as_str());

        directives::sanitize(&fragment.directives, &mut rendered);
        selection::sanitize(&fragment.selection_set.node, &mut rendered);
    }

    rendered
}

fn sanitize_operation(name: Option<&str>, operation: &OperationDefinition, rendered: &mut String) {
    rendered.push_str(operation_type_label(operation.ty.into()));

    if let Some(name) = name {
        rendered.push(' ');
        rendered.push_str(name);
    }

    sanitize_variable_definitions(&operation.variable_definitions, rendered);
    directives::sanitize(&operation.directives, rendered);
    selection::sanitize(&operation.selection_set.node, rendered);
}

fn sanitize_variable_definitions(
    definitions: &[async_graphql_parser::Positioned<VariableDefinition>],
    rendered: &mut String,
) {
    let definitions_count = definitions.len();

    for (i, definition) in definitions.iter().enumerate() {
        let definition = &definition.node;

        if i == 0 {
            rendered.push('(');
        }

        rendered.push('$');
        rendered.push_str(definition.name.node.as_str());
        rendered.push_str(": ");
        rendered.push_str(&definition.var_type.node.to_string());

        if let Some(default_value) = &definition.default_value {
            rendered.push_str(" = ");
            value::sanitize_const(&default_value.node, rendered);
        }

        directives::sanitize(&definition.directives, rendered);

        if i == definitions_count - 1 {
            rendered.push(')');
        } else {
            rendered.push_str(", ");
        }
    }
}
