use async_graphql_parser::types::{Selection, SelectionSet};

pub(super) fn sanitize(selection_set: &SelectionSet, rendered: &mut String) {
    let selection_count = selection_set.items.len();

    for (i, selection) in selection_set.items.iter().enumerate() {
        if i == 0 {
            rendered.push_str(" {");
        }

        match &selection.node {
            Selection::Field(field) => {
                let field = &field.node;

                rendered.push(' ');

                if let Some(alias) = &field.alias {
                    rendered.push_str(alias.node.as_str());
                    rendered.push_str(": ");
                }

                rendered.push_str(field.name.node.as_str());

                super::value::sanitize_arguments(&field.arguments, rendered);
                super::directives::sanitize(&field.directives, rendered);
                sanitize(&field.selection_set.node, rendered);
            }
            Selection::InlineFragment(inline_fragment) => {
                let inline_fragment = &inline_fragment.node;

                rendered.push_str(" ...");

                if let Some(type_condition) = &inline_fragment.type_condition {
                    rendered.push_str(" on ");
                    rendered.push_str(type_condition.node.on.node.as_str());
                }

                super::directives::sanitize(&inline_fragment.directives, rendered);
                sanitize(&inline_fragment.selection_set.node, rendered);
            }
            Selection::FragmentSpread(fragment_spread) => {
                let fragment_spread = &fragment_spread.node;

                rendered.push_str(" ...");
                rendered.push_str(fragment_spread.fragment_name.node.as_str());

                super::directives::sanitize(&fragment_spread.directives, rendered);
            }
        }

        if i == selection_count - 1 {
            rendered.push_str(" }");
        }
    }
}
